//! Resolved entity records: the closed set of views over graph nodes that
//! the pipeline materializes. Entities are built once and never mutated.

use crate::graph::Term;

/// Project titles that mark the single top-level Dataset.
pub const KNOWN_PROJECT_TITLES: [&str; 2] = [
    "Genotype-Tissue Expression Project (GTEx)",
    "Trans-Omics for Precision Medicine (TOPMed)",
];

/// A Dataset that passed the two-hop identifier lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub node: Term,
    pub identifier: String,
}

/// A Study node linked from a Dataset via produced-by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Study {
    pub node: Term,
}

/// A StudyGroup with its uniquely resolved name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyGroup {
    pub node: Term,
    pub name: String,
}

/// A study-group member typed Material. `name` is empty when no name
/// attribute resolved; such subjects are retained and sort first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub node: Term,
    pub name: String,
}

/// A named, single-valued subject attribute with its dbGaP identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Characteristic {
    pub name: String,
    pub value: String,
    pub dbgap_id: String,
}

/// An anatomical site with its deduplicated term id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnatomicalPart {
    pub name: String,
    pub id: String,
}

/// One data-file record joined back to a Subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub anatomical_part: AnatomicalPart,
    pub datatype: String,
    pub file_size: String,
    pub md5_checksum: String,
    pub s3_uri: String,
    pub gs_uri: Option<String>,
}

/// Dataset → (Study →) StudyGroups → Subjects, unsorted; the renderer owns
/// ordering.
#[derive(Debug, Clone)]
pub struct StudyTree {
    /// The matched top-level project title literal.
    pub project: String,
    pub datasets: Vec<DatasetEntry>,
}

#[derive(Debug, Clone)]
pub struct DatasetEntry {
    pub dataset: Dataset,
    pub study: Study,
    pub groups: Vec<GroupEntry>,
}

#[derive(Debug, Clone)]
pub struct GroupEntry {
    pub group: StudyGroup,
    pub subjects: Vec<Subject>,
}

impl StudyTree {
    /// Every subject in the tree, in discovery order (may repeat a subject
    /// that belongs to several groups).
    pub fn subjects(&self) -> impl Iterator<Item = &Subject> {
        self.datasets
            .iter()
            .flat_map(|d| d.groups.iter())
            .flat_map(|g| g.subjects.iter())
    }
}
