//! Pipeline orchestration: one read pass over a static graph, then render.

use std::io::Write;

use tracing::debug;

use crate::characteristics::collect_characteristics;
use crate::classify::DatatypeClassifier;
use crate::error::DatsError;
use crate::files::FileLinker;
use crate::graph::GraphStore;
use crate::hierarchy::HierarchyBuilder;
use crate::report::{self, Table};
use crate::resolver::EntityResolver;
use crate::vocab::Vocabulary;

pub struct App<G: GraphStore, C: DatatypeClassifier> {
    graph: G,
    vocab: Vocabulary,
    classifier: C,
}

impl<G: GraphStore, C: DatatypeClassifier> App<G, C> {
    pub fn new(graph: G, vocab: Vocabulary, classifier: C) -> Self {
        Self {
            graph,
            vocab,
            classifier,
        }
    }

    /// Run the reconstruction and return the finished table.
    pub fn run(&self, known_titles: &[String]) -> Result<Table, DatsError> {
        let resolver = EntityResolver::new(&self.graph, &self.vocab);

        let tree = HierarchyBuilder::new(&resolver).build(known_titles)?;
        debug!(
            project = %tree.project,
            datasets = tree.datasets.len(),
            "hierarchy built"
        );

        let chars = collect_characteristics(&resolver, tree.subjects())?;
        let files = FileLinker::new(&resolver, &self.classifier).link(&tree.project)?;

        Ok(report::build_table(&tree, &chars, &files))
    }

    /// Run and write the TSV report.
    pub fn write_report<W: Write>(&self, known_titles: &[String], out: W) -> Result<(), DatsError> {
        let table = self.run(known_titles)?;
        table
            .write_tsv(out)
            .map_err(|err| DatsError::ReportWrite(err.to_string()))
    }
}
