//! File linking: joins each Dataset's acquisition chain back to subjects.
//!
//! Walk per dataset: MD5 dimension lookup, distribution filtering with the
//! size-consistency check, DataAcquisition resolution, then
//! acquisition → input extract → sample → {AnatomicalPart, Subject}.

use std::collections::{BTreeSet, HashMap};

use regex::Regex;
use tracing::warn;

use crate::classify::DatatypeClassifier;
use crate::domain::{AnatomicalPart, FileInfo};
use crate::error::DatsError;
use crate::graph::{GraphStore, Term};
use crate::resolver::EntityResolver;
use crate::validate::{self, Check, Outcome};

/// Literal printed when a dataset carries no MD5 dimension.
pub const MD5_PLACEHOLDER: &str = "TBD";

/// FileInfo records accumulated per subject node.
#[derive(Debug, Default)]
pub struct FileTable {
    files: HashMap<Term, Vec<FileInfo>>,
}

impl FileTable {
    pub fn files_for(&self, subject: &Term) -> &[FileInfo] {
        self.files.get(subject).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn push(&mut self, subject: Term, info: FileInfo) {
        self.files.entry(subject).or_default().push(info);
    }
}

/// Retained storage locations and the validated common size of one dataset's
/// distributions.
#[derive(Debug, Default)]
struct Distributions {
    s3_uri: Option<String>,
    gs_uri: Option<String>,
    file_size: Option<String>,
}

pub struct FileLinker<'a, G: GraphStore, C: DatatypeClassifier> {
    resolver: &'a EntityResolver<'a, G>,
    classifier: &'a C,
    scheme: Regex,
}

impl<'a, G: GraphStore, C: DatatypeClassifier> FileLinker<'a, G, C> {
    pub fn new(resolver: &'a EntityResolver<'a, G>, classifier: &'a C) -> Self {
        Self {
            resolver,
            classifier,
            scheme: Regex::new(r"^(gs|s3)://").unwrap(),
        }
    }

    /// Link every typed Dataset node, including those dropped from the
    /// hierarchy for lacking an identifier; their files simply never join a
    /// printed subject.
    pub fn link(&self, project: &str) -> Result<FileTable, DatsError> {
        let mut table = FileTable::default();
        for dataset in self.resolver.find_by_type(&self.resolver.vocab().dataset) {
            self.link_dataset(&dataset, project, &mut table)?;
        }
        Ok(table)
    }

    fn link_dataset(
        &self,
        dataset: &Term,
        project: &str,
        table: &mut FileTable,
    ) -> Result<(), DatsError> {
        let vocab = self.resolver.vocab();
        let md5_checksum = self.md5_checksum(dataset);
        let distribs = self.distributions(dataset)?;

        let Some(acquisition) = self.acquisition(dataset)? else {
            return Ok(());
        };

        for extract in self.resolver.objects(&acquisition, &vocab.has_input) {
            for sample in self.resolver.objects(&extract, &vocab.derives_from) {
                let parts = self.anatomical_parts(&sample)?;
                for subject in self.resolver.objects(&sample, &vocab.derives_from) {
                    if !self.resolver.has_type(&subject, &vocab.material) {
                        continue;
                    }
                    validate::expect_one(
                        Check::AnatomicalParts {
                            subject: subject.lexical(),
                        },
                        parts.len(),
                    )?;

                    let s3_uri = distribs.s3_uri.clone().ok_or_else(|| {
                        DatsError::MissingS3Uri {
                            dataset: dataset.lexical().to_string(),
                        }
                    })?;
                    let datatype = self
                        .classifier
                        .classify(project, &s3_uri)
                        .map_err(validate::classification)?;

                    table.push(
                        subject,
                        FileInfo {
                            anatomical_part: parts[0].clone(),
                            datatype,
                            file_size: distribs.file_size.clone().unwrap_or_default(),
                            md5_checksum: md5_checksum.clone(),
                            s3_uri,
                            gs_uri: distribs.gs_uri.clone(),
                        },
                    );
                }
            }
        }
        Ok(())
    }

    /// MD5 is stored as a Dimension child of the Dataset whose two-hop name
    /// is "MD5"; its data-item is the checksum value.
    fn md5_checksum(&self, dataset: &Term) -> String {
        let vocab = self.resolver.vocab();
        let mut checksum = MD5_PLACEHOLDER.to_string();
        for node in self.resolver.objects(dataset, &vocab.has_part) {
            if !self.resolver.has_type(&node, &vocab.dimension) {
                continue;
            }
            let name = self
                .resolver
                .resolve_chain(&node, &vocab.name, &vocab.sdo_value)
                .last();
            let value = self.resolver.resolve_single(&node, &vocab.data_item).last();
            if name.as_ref().map(|t| t.lexical()) == Some("MD5") {
                if let Some(value) = value {
                    checksum = value.lexical().to_string();
                }
            }
        }
        checksum
    }

    /// Collect distributions, keeping only `s3://`/`gs://` URIs (last seen
    /// per scheme wins). Every distribution must report the same size.
    fn distributions(&self, dataset: &Term) -> Result<Distributions, DatsError> {
        let vocab = self.resolver.vocab();
        let mut distribs = Distributions::default();

        for node in self.resolver.objects(dataset, &vocab.distribution) {
            for size in self.resolver.objects(&node, &vocab.content_size) {
                let found = size.lexical();
                match &distribs.file_size {
                    None => distribs.file_size = Some(found.to_string()),
                    Some(expected) => {
                        validate::consistent_size(dataset.lexical(), expected, found)?
                    }
                }
            }

            if !self.resolver.has_type(&node, &vocab.data_download) {
                continue;
            }
            let uri = node.lexical();
            let Some(caps) = self.scheme.captures(uri) else {
                continue;
            };
            let slot = if &caps[1] == "gs" {
                &mut distribs.gs_uri
            } else {
                &mut distribs.s3_uri
            };
            if let Some(previous) = slot.as_deref() {
                warn!(scheme = &caps[1], previous, uri, "duplicate distribution URI, keeping the last");
            }
            *slot = Some(uri.to_string());
        }
        Ok(distribs)
    }

    /// The dataset's single DataAcquisition; zero or many skips file-linking
    /// for this dataset only.
    fn acquisition(&self, dataset: &Term) -> Result<Option<Term>, DatsError> {
        let vocab = self.resolver.vocab();
        let acquisitions: Vec<Term> = self
            .resolver
            .objects(dataset, &vocab.produced_by)
            .into_iter()
            .filter(|o| self.resolver.has_type(o, &vocab.data_acquisition))
            .collect();
        let check = Check::DataAcquisition {
            dataset: dataset.lexical(),
        };
        if validate::expect_one(check, acquisitions.len())? == Outcome::Drop {
            return Ok(None);
        }
        Ok(acquisitions.into_iter().next())
    }

    /// Anatomical structures derived-from by the sample. The term id is a
    /// double-indirection lookup that must collapse to exactly one distinct
    /// id after deduplication (duplicate AnatomicalPart definitions occur in
    /// real documents).
    fn anatomical_parts(&self, sample: &Term) -> Result<Vec<AnatomicalPart>, DatsError> {
        let vocab = self.resolver.vocab();
        let mut parts = Vec::new();
        for node in self.resolver.objects(sample, &vocab.derives_from) {
            if !self.resolver.has_type(&node, &vocab.anatomical_structure) {
                continue;
            }
            let name = self
                .resolver
                .resolve_single(&node, &vocab.name)
                .last()
                .map(|t| t.lexical().to_string())
                .unwrap_or_default();

            let mut ids = BTreeSet::new();
            for id_node in self.resolver.objects(&node, &vocab.central_id) {
                for id in self.resolver.objects(&id_node, &vocab.central_id) {
                    ids.insert(id.lexical().to_string());
                }
            }
            validate::expect_one(Check::AnatomicalPartIds { part: &name }, ids.len())?;
            let id = ids.into_iter().next().unwrap_or_default();
            parts.push(AnatomicalPart { name, id });
        }
        Ok(parts)
    }
}
