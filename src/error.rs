use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Fatal inconsistencies. Recoverable gaps (missing identifier, unlinked
/// study, ambiguous group name, incomplete characteristic, missing
/// acquisition) never surface here; they are logged and the record dropped.
#[derive(Debug, Error, Diagnostic)]
pub enum DatsError {
    #[error("failed to read DATS document at {0}")]
    DocumentRead(Utf8PathBuf),

    #[error("failed to parse DATS document: {0}")]
    DocumentParse(String),

    #[error("found {0} top-level DATS Datasets")]
    TopLevelDatasetCount(usize),

    #[error("file size mismatch under Dataset {dataset}: {expected} vs {found}")]
    SizeMismatch {
        dataset: String,
        expected: String,
        found: String,
    },

    #[error("found {count} term ids for AnatomicalPart {part}")]
    AnatomicalPartIdCount { part: String, count: usize },

    #[error("found {count} AnatomicalParts for subject {subject}")]
    AnatomicalPartCount { subject: String, count: usize },

    #[error("no datatype rules for project {0}")]
    UnknownProjectFamily(String),

    #[error("couldn't parse seq datatype from URI {0}")]
    UnclassifiedUri(String),

    #[error("no S3 distribution URI under Dataset {dataset}")]
    MissingS3Uri { dataset: String },

    #[error("failed to write report: {0}")]
    ReportWrite(String),
}
