//! Table rendering: deterministic sort, column projection, TSV output.
//!
//! Rendering assumes its input already consistent; sorts are strictly
//! lexicographic and never fall back to discovery order.

use std::io::{self, Write};

use crate::characteristics::CharacteristicTable;
use crate::domain::{FileInfo, StudyTree, Subject};
use crate::files::FileTable;

const LEADING_COLUMNS: [&str; 4] = ["Project", "dbGaP_Study", "Study_Group", "Subject_ID"];
const TRAILING_COLUMNS: [&str; 7] = [
    "Anatomical_Part",
    "Anatomical_Part_ID",
    "Datatype",
    "File_Size",
    "MD5_Checksum",
    "AWS_URI",
    "GCP_URI",
];

/// The finished report: header plus data rows, all cells materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn write_tsv<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "{}", self.header.join("\t"))?;
        for row in &self.rows {
            writeln!(out, "{}", row.join("\t"))?;
        }
        Ok(())
    }
}

/// Project the tree, characteristics, and file records into sorted rows.
///
/// Order: datasets by identifier, groups by name, subjects by (name, node),
/// files by (anatomical part name, datatype, S3 URI). A subject with no
/// files emits exactly one row with empty trailing columns.
pub fn build_table(tree: &StudyTree, chars: &CharacteristicTable, files: &FileTable) -> Table {
    let char_names: Vec<&str> = chars.names().collect();

    let mut header: Vec<String> = LEADING_COLUMNS.iter().map(|c| c.to_string()).collect();
    header.extend(char_names.iter().map(|c| c.to_string()));
    header.extend(TRAILING_COLUMNS.iter().map(|c| c.to_string()));

    let mut datasets: Vec<_> = tree.datasets.iter().collect();
    datasets.sort_by(|a, b| a.dataset.identifier.cmp(&b.dataset.identifier));

    let mut rows = Vec::new();
    for entry in datasets {
        let mut groups: Vec<_> = entry.groups.iter().collect();
        groups.sort_by(|a, b| a.group.name.cmp(&b.group.name));

        for group_entry in groups {
            let mut subjects: Vec<_> = group_entry.subjects.iter().collect();
            subjects.sort_by(|a, b| {
                (a.name.as_str(), a.node.lexical()).cmp(&(b.name.as_str(), b.node.lexical()))
            });

            for subject in subjects {
                let mut leading = vec![
                    tree.project.clone(),
                    entry.dataset.identifier.clone(),
                    group_entry.group.name.clone(),
                    subject.name.clone(),
                ];
                for name in &char_names {
                    leading.push(
                        chars
                            .value(&subject.node, name)
                            .unwrap_or_default()
                            .to_string(),
                    );
                }

                rows.extend(subject_rows(subject, leading, files, header.len()));
            }
        }
    }

    Table { header, rows }
}

fn subject_rows(
    subject: &Subject,
    leading: Vec<String>,
    files: &FileTable,
    width: usize,
) -> Vec<Vec<String>> {
    let mut infos: Vec<&FileInfo> = files.files_for(&subject.node).iter().collect();
    if infos.is_empty() {
        let mut row = leading;
        row.resize(width, String::new());
        return vec![row];
    }

    infos.sort_by(|a, b| {
        (&a.anatomical_part.name, &a.datatype, &a.s3_uri)
            .cmp(&(&b.anatomical_part.name, &b.datatype, &b.s3_uri))
    });

    infos
        .into_iter()
        .map(|info| {
            let mut row = leading.clone();
            row.push(info.anatomical_part.name.clone());
            row.push(info.anatomical_part.id.clone());
            row.push(info.datatype.clone());
            row.push(info.file_size.clone());
            row.push(info.md5_checksum.clone());
            row.push(info.s3_uri.clone());
            row.push(info.gs_uri.clone().unwrap_or_default());
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnatomicalPart, Dataset, DatasetEntry, GroupEntry, Study, StudyGroup};
    use crate::graph::Term;

    fn file(part: &str, datatype: &str, s3: &str) -> FileInfo {
        FileInfo {
            anatomical_part: AnatomicalPart {
                name: part.to_string(),
                id: format!("{part}-id"),
            },
            datatype: datatype.to_string(),
            file_size: "100".to_string(),
            md5_checksum: "abc".to_string(),
            s3_uri: s3.to_string(),
            gs_uri: None,
        }
    }

    #[test]
    fn file_rows_sort_by_part_datatype_uri() {
        let subject = Subject {
            node: Term::node("s1"),
            name: "S1".to_string(),
        };
        let mut files = FileTable::default();
        let infos = [
            file("muscle", "WGS", "s3://b/wgs/2"),
            file("lung", "WGS", "s3://b/wgs/1"),
            file("lung", "RNA-Seq", "s3://b/rnaseq/1"),
        ];
        for info in infos {
            files.push(subject.node.clone(), info);
        }

        let rows = subject_rows(&subject, vec!["lead".to_string()], &files, 8);
        let keys: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r[1].as_str(), r[3].as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![("lung", "RNA-Seq"), ("lung", "WGS"), ("muscle", "WGS")]
        );
    }

    #[test]
    fn fileless_subject_pads_to_width() {
        let subject = Subject {
            node: Term::node("s1"),
            name: "S1".to_string(),
        };
        let files = FileTable::default();
        let rows = subject_rows(&subject, vec!["a".to_string(), "b".to_string()], &files, 9);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 9);
        assert!(rows[0][2..].iter().all(String::is_empty));
    }

    #[test]
    fn datasets_sort_by_identifier() {
        let tree = StudyTree {
            project: "P".to_string(),
            datasets: vec![dataset_entry("phs2"), dataset_entry("phs1")],
        };
        let table = build_table(
            &tree,
            &CharacteristicTable::default(),
            &FileTable::default(),
        );
        let ids: Vec<&str> = table.rows.iter().map(|r| r[1].as_str()).collect();
        assert_eq!(ids, vec!["phs1", "phs2"]);
    }

    #[test]
    fn tsv_output_is_tab_joined() {
        let table = Table {
            header: vec!["A".to_string(), "B".to_string()],
            rows: vec![vec!["1".to_string(), "2".to_string()]],
        };
        let mut buf = Vec::new();
        table.write_tsv(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "A\tB\n1\t2\n");
    }

    fn dataset_entry(id: &str) -> DatasetEntry {
        DatasetEntry {
            dataset: Dataset {
                node: Term::node(id),
                identifier: id.to_string(),
            },
            study: Study {
                node: Term::node(format!("{id}-study")),
            },
            groups: vec![GroupEntry {
                group: StudyGroup {
                    node: Term::node(format!("{id}-g")),
                    name: "G".to_string(),
                },
                subjects: vec![Subject {
                    node: Term::node(format!("{id}-s")),
                    name: "S".to_string(),
                }],
            }],
        }
    }

}
