//! Tabular reconstruction of DATS-encoded genomic study metadata.
//!
//! Walks a triple graph of subjects, sample provenance, and data files and
//! emits a flat, deterministically sorted TSV report.

pub mod app;
pub mod characteristics;
pub mod classify;
pub mod domain;
pub mod error;
pub mod files;
pub mod graph;
pub mod hierarchy;
pub mod loader;
pub mod report;
pub mod resolver;
pub mod validate;
pub mod vocab;
