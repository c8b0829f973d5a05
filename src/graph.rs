//! Triple graph: (subject, predicate, object) statements over opaque terms.
//!
//! The store is read-only once built. [`GraphStore`] exposes a single pattern
//! query where any unbound position acts as a wildcard; [`MemoryGraph`] backs
//! it with per-position indexes so lookups touch only candidate statements.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A graph term: an opaque node identifier (IRI or blank node) or a literal
/// value with an optional datatype annotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Node(String),
    Literal {
        value: String,
        datatype: Option<String>,
    },
}

impl Term {
    pub fn node(id: impl Into<String>) -> Self {
        Term::Node(id.into())
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal {
            value: value.into(),
            datatype: None,
        }
    }

    pub fn typed_literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Term::Literal {
            value: value.into(),
            datatype: Some(datatype.into()),
        }
    }

    pub fn as_node(&self) -> Option<&str> {
        match self {
            Term::Node(id) => Some(id),
            Term::Literal { .. } => None,
        }
    }

    /// The lexical form: node identifier or literal value.
    pub fn lexical(&self) -> &str {
        match self {
            Term::Node(id) => id,
            Term::Literal { value, .. } => value,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexical())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

/// Indexed pattern query over a static triple graph.
pub trait GraphStore {
    /// All triples matching the pattern; `None` in any position is a wildcard.
    fn matching(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> Vec<&Triple>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory triple store with subject/predicate/object indexes.
#[derive(Debug, Default)]
pub struct MemoryGraph {
    triples: Vec<Triple>,
    by_subject: HashMap<Term, Vec<usize>>,
    by_predicate: HashMap<Term, Vec<usize>>,
    by_object: HashMap<Term, Vec<usize>>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, triple: Triple) {
        let idx = self.triples.len();
        self.by_subject
            .entry(triple.subject.clone())
            .or_default()
            .push(idx);
        self.by_predicate
            .entry(triple.predicate.clone())
            .or_default()
            .push(idx);
        self.by_object
            .entry(triple.object.clone())
            .or_default()
            .push(idx);
        self.triples.push(triple);
    }

    /// Shorthand used heavily in tests: insert (subject, predicate, object).
    pub fn add(&mut self, subject: Term, predicate: Term, object: Term) {
        self.insert(Triple::new(subject, predicate, object));
    }

    /// The smallest candidate index slice for the bound pattern positions,
    /// or `None` when the pattern is fully unbound.
    fn candidates(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> Option<&[usize]> {
        let mut best: Option<&[usize]> = None;
        let lookups = [
            (subject, &self.by_subject),
            (predicate, &self.by_predicate),
            (object, &self.by_object),
        ];
        for (bound, index) in lookups {
            if let Some(term) = bound {
                let slice = index.get(term).map(Vec::as_slice).unwrap_or(&[]);
                if best.map(|b| slice.len() < b.len()).unwrap_or(true) {
                    best = Some(slice);
                }
            }
        }
        best
    }
}

impl FromIterator<Triple> for MemoryGraph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut graph = MemoryGraph::new();
        for triple in iter {
            graph.insert(triple);
        }
        graph
    }
}

impl GraphStore for MemoryGraph {
    fn matching(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> Vec<&Triple> {
        let matches = |t: &Triple| {
            subject.map(|s| t.subject == *s).unwrap_or(true)
                && predicate.map(|p| t.predicate == *p).unwrap_or(true)
                && object.map(|o| t.object == *o).unwrap_or(true)
        };

        match self.candidates(subject, predicate, object) {
            Some(indexes) => indexes
                .iter()
                .map(|&i| &self.triples[i])
                .filter(|t| matches(t))
                .collect(),
            None => self.triples.iter().filter(|t| matches(t)).collect(),
        }
    }

    fn len(&self) -> usize {
        self.triples.len()
    }
}
