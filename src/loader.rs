//! DATS document loading.
//!
//! The document is a flattened statement list produced by the upstream
//! JSON-LD expansion step: a JSON array of `{subject, predicate, object}`
//! objects. Subjects and predicates are node identifiers; an object is
//! either a node identifier string or `{"value": ..., "datatype"?: ...}`
//! for a literal.

use std::fs;

use camino::Utf8Path;
use serde::Deserialize;

use crate::error::DatsError;
use crate::graph::{MemoryGraph, Term, Triple};

#[derive(Debug, Deserialize)]
struct Statement {
    subject: String,
    predicate: String,
    object: ObjectRepr,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ObjectRepr {
    Node(String),
    Literal {
        value: String,
        #[serde(default)]
        datatype: Option<String>,
    },
}

impl From<ObjectRepr> for Term {
    fn from(repr: ObjectRepr) -> Self {
        match repr {
            ObjectRepr::Node(id) => Term::Node(id),
            ObjectRepr::Literal { value, datatype } => Term::Literal { value, datatype },
        }
    }
}

/// Read and parse a DATS document into an in-memory triple graph.
pub fn load_document(path: &Utf8Path) -> Result<MemoryGraph, DatsError> {
    let text = fs::read_to_string(path).map_err(|_| DatsError::DocumentRead(path.to_owned()))?;
    parse_document(&text)
}

pub fn parse_document(text: &str) -> Result<MemoryGraph, DatsError> {
    let statements: Vec<Statement> =
        serde_json::from_str(text).map_err(|err| DatsError::DocumentParse(err.to_string()))?;
    Ok(statements
        .into_iter()
        .map(|s| {
            Triple::new(
                Term::Node(s.subject),
                Term::Node(s.predicate),
                s.object.into(),
            )
        })
        .collect())
}
