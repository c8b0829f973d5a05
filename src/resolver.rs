//! Entity resolution over the triple graph: typed node lookup and single- or
//! two-hop attribute resolution.
//!
//! This layer only counts matches. Whether an unexpected count aborts the
//! run or drops a record is decided by the caller through [`crate::validate`].

use crate::graph::{GraphStore, Term};
use crate::vocab::Vocabulary;

/// Outcome of resolving an attribute that is expected to be single-valued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Absent,
    One(Term),
    /// All matches in discovery order; callers decide last-wins vs drop.
    Many(Vec<Term>),
}

impl Resolution {
    fn from_values(mut values: Vec<Term>) -> Self {
        match values.len() {
            0 => Resolution::Absent,
            1 => Resolution::One(values.remove(0)),
            _ => Resolution::Many(values),
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Resolution::Absent => 0,
            Resolution::One(_) => 1,
            Resolution::Many(values) => values.len(),
        }
    }

    /// The single value, or the last of many. `None` when absent.
    pub fn last(self) -> Option<Term> {
        match self {
            Resolution::Absent => None,
            Resolution::One(value) => Some(value),
            Resolution::Many(values) => values.into_iter().last(),
        }
    }

    /// The value only when exactly one matched.
    pub fn exactly_one(self) -> Option<Term> {
        match self {
            Resolution::One(value) => Some(value),
            _ => None,
        }
    }
}

/// Read-only queries binding the graph to a vocabulary.
pub struct EntityResolver<'a, G: GraphStore> {
    graph: &'a G,
    vocab: &'a Vocabulary,
}

impl<'a, G: GraphStore> EntityResolver<'a, G> {
    pub fn new(graph: &'a G, vocab: &'a Vocabulary) -> Self {
        Self { graph, vocab }
    }

    pub fn vocab(&self) -> &Vocabulary {
        self.vocab
    }

    /// All subjects carrying a type assertion for `type_term`.
    pub fn find_by_type(&self, type_term: &Term) -> Vec<Term> {
        self.graph
            .matching(None, Some(&self.vocab.rdf_type), Some(type_term))
            .into_iter()
            .map(|t| t.subject.clone())
            .collect()
    }

    pub fn has_type(&self, node: &Term, type_term: &Term) -> bool {
        !self
            .graph
            .matching(Some(node), Some(&self.vocab.rdf_type), Some(type_term))
            .is_empty()
    }

    /// Objects of all `(node, predicate, ?)` triples, in statement order.
    pub fn objects(&self, node: &Term, predicate: &Term) -> Vec<Term> {
        self.graph
            .matching(Some(node), Some(predicate), None)
            .into_iter()
            .map(|t| t.object.clone())
            .collect()
    }

    /// Resolve an attribute expected to be single-valued.
    pub fn resolve_single(&self, node: &Term, predicate: &Term) -> Resolution {
        Resolution::from_values(self.objects(node, predicate))
    }

    /// Two-hop resolution: follow `first` from `node`, then `second` from
    /// each intermediate. Used for identifier and name-value lookups.
    pub fn resolve_chain(&self, node: &Term, first: &Term, second: &Term) -> Resolution {
        let values = self
            .objects(node, first)
            .iter()
            .flat_map(|mid| self.objects(mid, second))
            .collect();
        Resolution::from_values(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MemoryGraph;

    fn vocab() -> Vocabulary {
        Vocabulary::dats()
    }

    #[test]
    fn find_by_type_returns_typed_subjects() {
        let v = vocab();
        let mut g = MemoryGraph::new();
        g.add(Term::node("d1"), v.rdf_type.clone(), v.dataset.clone());
        g.add(Term::node("d2"), v.rdf_type.clone(), v.dataset.clone());
        g.add(Term::node("s1"), v.rdf_type.clone(), v.study.clone());

        let resolver = EntityResolver::new(&g, &v);
        let mut datasets = resolver.find_by_type(&v.dataset);
        datasets.sort_by(|a, b| a.lexical().cmp(b.lexical()));
        assert_eq!(datasets, vec![Term::node("d1"), Term::node("d2")]);
    }

    #[test]
    fn resolve_single_counts_matches() {
        let v = vocab();
        let mut g = MemoryGraph::new();
        g.add(Term::node("n"), v.name.clone(), Term::literal("first"));

        let resolver = EntityResolver::new(&g, &v);
        assert_eq!(
            resolver.resolve_single(&Term::node("n"), &v.name),
            Resolution::One(Term::literal("first"))
        );
        assert_eq!(
            resolver.resolve_single(&Term::node("missing"), &v.name),
            Resolution::Absent
        );

        g.add(Term::node("n"), v.name.clone(), Term::literal("second"));
        let resolver = EntityResolver::new(&g, &v);
        let res = resolver.resolve_single(&Term::node("n"), &v.name);
        assert_eq!(res.count(), 2);
        assert_eq!(res.last(), Some(Term::literal("second")));
    }

    #[test]
    fn resolve_chain_follows_two_hops() {
        let v = vocab();
        let mut g = MemoryGraph::new();
        g.add(Term::node("d"), v.central_id.clone(), Term::node("id-node"));
        g.add(
            Term::node("id-node"),
            v.sdo_identifier.clone(),
            Term::literal("phs000424"),
        );

        let resolver = EntityResolver::new(&g, &v);
        assert_eq!(
            resolver
                .resolve_chain(&Term::node("d"), &v.central_id, &v.sdo_identifier)
                .exactly_one(),
            Some(Term::literal("phs000424"))
        );
    }
}
