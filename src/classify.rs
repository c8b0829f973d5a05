//! Project-keyed datatype classification of data-file URIs.
//!
//! Each project family carries its own rule table mapping a URI path fragment
//! to a datatype label. Failures name the record only; whether they abort the
//! run is decided by [`crate::validate::classification`].

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("no datatype rules for project {0}")]
    UnknownProject(String),

    #[error("couldn't parse seq datatype from URI {0}")]
    UnmatchedUri(String),
}

pub trait DatatypeClassifier {
    /// Datatype label for one file URI under the given project title.
    fn classify(&self, project: &str, s3_uri: &str) -> Result<String, ClassifyError>;
}

struct ProjectRules {
    project: Regex,
    rules: Vec<(Regex, String)>,
}

/// Regex rule tables keyed by a project-title pattern. First matching family
/// wins; within a family, first matching rule wins.
pub struct PatternClassifier {
    families: Vec<ProjectRules>,
}

impl PatternClassifier {
    /// The built-in GTEx family: `/wgs/` → WGS, `/rnaseq/` → RNA-Seq.
    pub fn new() -> Self {
        let gtex = ProjectRules {
            project: Regex::new(r"GTEx").unwrap(),
            rules: vec![
                (Regex::new(r"/wgs/").unwrap(), "WGS".to_string()),
                (Regex::new(r"/rnaseq/").unwrap(), "RNA-Seq".to_string()),
            ],
        };
        Self {
            families: vec![gtex],
        }
    }

    /// Register an additional project family.
    pub fn with_family(mut self, project: Regex, rules: Vec<(Regex, String)>) -> Self {
        self.families.push(ProjectRules { project, rules });
        self
    }
}

impl Default for PatternClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl DatatypeClassifier for PatternClassifier {
    fn classify(&self, project: &str, s3_uri: &str) -> Result<String, ClassifyError> {
        let family = self
            .families
            .iter()
            .find(|f| f.project.is_match(project))
            .ok_or_else(|| ClassifyError::UnknownProject(project.to_string()))?;

        family
            .rules
            .iter()
            .find(|(pattern, _)| pattern.is_match(s3_uri))
            .map(|(_, label)| label.clone())
            .ok_or_else(|| ClassifyError::UnmatchedUri(s3_uri.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const GTEX: &str = "Genotype-Tissue Expression Project (GTEx)";

    #[test]
    fn gtex_wgs_and_rnaseq() {
        let c = PatternClassifier::new();
        assert_eq!(
            c.classify(GTEX, "s3://bucket/project/wgs/sample.cram").unwrap(),
            "WGS"
        );
        assert_eq!(
            c.classify(GTEX, "s3://bucket/project/rnaseq/sample.bam").unwrap(),
            "RNA-Seq"
        );
    }

    #[test]
    fn unmatched_uri_names_the_record() {
        let c = PatternClassifier::new();
        let err = c.classify(GTEX, "s3://bucket/project/other/x").unwrap_err();
        assert_matches!(err, ClassifyError::UnmatchedUri(_));
    }

    #[test]
    fn unknown_project_family() {
        let c = PatternClassifier::new();
        let err = c
            .classify("Some Other Program", "s3://bucket/wgs/x")
            .unwrap_err();
        assert_matches!(err, ClassifyError::UnknownProject(_));
    }

    #[test]
    fn added_family_takes_queries() {
        let c = PatternClassifier::new().with_family(
            Regex::new(r"TOPMed").unwrap(),
            vec![(Regex::new(r"/wgs/").unwrap(), "WGS".to_string())],
        );
        assert_eq!(
            c.classify(
                "Trans-Omics for Precision Medicine (TOPMed)",
                "s3://bucket/wgs/x.cram"
            )
            .unwrap(),
            "WGS"
        );
    }
}
