//! Central cardinality and consistency policy.
//!
//! Every check the pipeline performs is listed here with one severity:
//! `Fatal` aborts the run through [`DatsError`], `Recoverable` logs a warning
//! and tells the caller to drop the offending record. Traversal code never
//! decides severity on its own.

use tracing::warn;

use crate::classify::ClassifyError;
use crate::error::DatsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Fatal,
    Recoverable,
}

/// A cardinality check at one site of the traversal, with enough context to
/// diagnose a failure.
#[derive(Debug)]
pub enum Check<'a> {
    /// Datasets matching a known project title.
    TopLevelDatasets,
    /// Two-hop identifier lookup on a Dataset.
    DatasetIdentifier { dataset: &'a str },
    /// Study linked from a Dataset via produced-by.
    DatasetStudy { dataset: &'a str },
    /// Name attribute of a StudyGroup.
    GroupName { group: &'a str },
    /// One field (name, value, or id) of a subject characteristic.
    Characteristic { subject: &'a str, field: &'static str },
    /// DataAcquisition linked from a Dataset.
    DataAcquisition { dataset: &'a str },
    /// Distinct term ids of an AnatomicalPart after deduplication.
    AnatomicalPartIds { part: &'a str },
    /// AnatomicalParts reachable from one sample for one subject.
    AnatomicalParts { subject: &'a str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    /// Drop the offending record and continue with its siblings.
    Drop,
}

/// The single fatal/recoverable table: fatal checks map to a [`DatsError`],
/// everything else is `None`. [`severity`] and [`expect_one`] both read it.
fn fatal_error(check: &Check<'_>, count: usize) -> Option<DatsError> {
    match check {
        Check::TopLevelDatasets => Some(DatsError::TopLevelDatasetCount(count)),
        Check::AnatomicalPartIds { part } => Some(DatsError::AnatomicalPartIdCount {
            part: part.to_string(),
            count,
        }),
        Check::AnatomicalParts { subject } => Some(DatsError::AnatomicalPartCount {
            subject: subject.to_string(),
            count,
        }),
        Check::DatasetIdentifier { .. }
        | Check::DatasetStudy { .. }
        | Check::GroupName { .. }
        | Check::Characteristic { .. }
        | Check::DataAcquisition { .. } => None,
    }
}

pub fn severity(check: &Check<'_>) -> Severity {
    if fatal_error(check, 0).is_some() {
        Severity::Fatal
    } else {
        Severity::Recoverable
    }
}

/// Enforce an exactly-one cardinality.
pub fn expect_one(check: Check<'_>, count: usize) -> Result<Outcome, DatsError> {
    if count == 1 {
        return Ok(Outcome::Pass);
    }
    match fatal_error(&check, count) {
        Some(err) => Err(err),
        None => {
            warn!(check = ?check, count, "dropping record failing cardinality check");
            Ok(Outcome::Drop)
        }
    }
}

/// Enforce an at-least-one cardinality where extra matches resolve via
/// last-wins rather than a drop.
pub fn expect_some(check: Check<'_>, count: usize) -> Result<Outcome, DatsError> {
    match count {
        0 => expect_one(check, 0),
        1 => Ok(Outcome::Pass),
        n => {
            warn!(check = ?check, count = n, "ambiguous match, keeping the last");
            Ok(Outcome::Pass)
        }
    }
}

/// All distributions under one Dataset must report the same size.
pub fn consistent_size(dataset: &str, expected: &str, found: &str) -> Result<(), DatsError> {
    if expected == found {
        return Ok(());
    }
    Err(DatsError::SizeMismatch {
        dataset: dataset.to_string(),
        expected: expected.to_string(),
        found: found.to_string(),
    })
}

/// Map a per-record classification failure onto run policy. Classification
/// failures are fatal: an unclassifiable file means the project's rule table
/// is wrong, not just the record.
pub fn classification(err: ClassifyError) -> DatsError {
    match err {
        ClassifyError::UnknownProject(project) => DatsError::UnknownProjectFamily(project),
        ClassifyError::UnmatchedUri(uri) => DatsError::UnclassifiedUri(uri),
    }
}
