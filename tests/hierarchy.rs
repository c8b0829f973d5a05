use dats_tabular::graph::{MemoryGraph, Term};
use dats_tabular::hierarchy::HierarchyBuilder;
use dats_tabular::resolver::EntityResolver;
use dats_tabular::vocab::Vocabulary;

const GTEX: &str = "Genotype-Tissue Expression Project (GTEx)";

fn node(id: &str) -> Term {
    Term::node(id)
}

fn titles() -> Vec<String> {
    vec![GTEX.to_string()]
}

/// Top-level dataset with identifier and study; no groups yet.
fn seed(v: &Vocabulary) -> MemoryGraph {
    let mut g = MemoryGraph::new();
    g.add(node("ds"), v.rdf_type.clone(), v.dataset.clone());
    g.add(node("ds"), v.title.clone(), Term::literal(GTEX));
    g.add(node("ds"), v.central_id.clone(), node("ds-id"));
    g.add(node("ds-id"), v.sdo_identifier.clone(), Term::literal("phs000424"));
    g.add(node("ds"), v.produced_by.clone(), node("study1"));
    g.add(node("study1"), v.rdf_type.clone(), v.study.clone());
    g
}

#[test]
fn dataset_without_identifier_is_dropped() {
    let v = Vocabulary::dats();
    let mut g = seed(&v);
    g.add(node("ds2"), v.rdf_type.clone(), v.dataset.clone());
    g.add(node("ds2"), v.produced_by.clone(), node("study1"));

    let resolver = EntityResolver::new(&g, &v);
    let tree = HierarchyBuilder::new(&resolver).build(&titles()).unwrap();
    assert_eq!(tree.datasets.len(), 1);
    assert_eq!(tree.datasets[0].dataset.identifier, "phs000424");
}

#[test]
fn dataset_without_study_is_dropped() {
    let v = Vocabulary::dats();
    let mut g = seed(&v);
    g.add(node("ds2"), v.rdf_type.clone(), v.dataset.clone());
    g.add(node("ds2"), v.central_id.clone(), node("ds2-id"));
    g.add(node("ds2-id"), v.sdo_identifier.clone(), Term::literal("phs000999"));
    // produced-by target exists but is not typed Study
    g.add(node("ds2"), v.produced_by.clone(), node("not-a-study"));

    let resolver = EntityResolver::new(&g, &v);
    let tree = HierarchyBuilder::new(&resolver).build(&titles()).unwrap();
    assert_eq!(tree.datasets.len(), 1);
}

#[test]
fn ambiguous_study_link_keeps_the_last() {
    let v = Vocabulary::dats();
    let mut g = seed(&v);
    g.add(node("ds"), v.produced_by.clone(), node("study2"));
    g.add(node("study2"), v.rdf_type.clone(), v.study.clone());

    let resolver = EntityResolver::new(&g, &v);
    let tree = HierarchyBuilder::new(&resolver).build(&titles()).unwrap();
    assert_eq!(tree.datasets[0].study.node, node("study2"));
}

#[test]
fn group_without_unique_name_is_dropped() {
    let v = Vocabulary::dats();
    let mut g = seed(&v);
    g.add(node("study1"), v.has_part.clone(), node("g1"));
    g.add(node("g1"), v.rdf_type.clone(), v.study_group.clone());
    g.add(node("g1"), v.name.clone(), Term::literal("Group1"));
    // g2 has two names, g3 has none
    g.add(node("study1"), v.has_part.clone(), node("g2"));
    g.add(node("g2"), v.rdf_type.clone(), v.study_group.clone());
    g.add(node("g2"), v.name.clone(), Term::literal("A"));
    g.add(node("g2"), v.name.clone(), Term::literal("B"));
    g.add(node("study1"), v.has_part.clone(), node("g3"));
    g.add(node("g3"), v.rdf_type.clone(), v.study_group.clone());

    let resolver = EntityResolver::new(&g, &v);
    let tree = HierarchyBuilder::new(&resolver).build(&titles()).unwrap();
    let groups = &tree.datasets[0].groups;
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].group.name, "Group1");
}

#[test]
fn untyped_group_members_are_ignored() {
    let v = Vocabulary::dats();
    let mut g = seed(&v);
    g.add(node("study1"), v.has_part.clone(), node("g1"));
    g.add(node("g1"), v.rdf_type.clone(), v.study_group.clone());
    g.add(node("g1"), v.name.clone(), Term::literal("Group1"));
    g.add(node("g1"), v.has_member.clone(), node("s1"));
    g.add(node("s1"), v.rdf_type.clone(), v.material.clone());
    g.add(node("s1"), v.name.clone(), Term::literal("S1"));
    g.add(node("g1"), v.has_member.clone(), node("not-material"));

    let resolver = EntityResolver::new(&g, &v);
    let tree = HierarchyBuilder::new(&resolver).build(&titles()).unwrap();
    let subjects = &tree.datasets[0].groups[0].subjects;
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0].name, "S1");
}

#[test]
fn unnamed_subject_is_retained_with_empty_name() {
    let v = Vocabulary::dats();
    let mut g = seed(&v);
    g.add(node("study1"), v.has_part.clone(), node("g1"));
    g.add(node("g1"), v.rdf_type.clone(), v.study_group.clone());
    g.add(node("g1"), v.name.clone(), Term::literal("Group1"));
    g.add(node("g1"), v.has_member.clone(), node("anon"));
    g.add(node("anon"), v.rdf_type.clone(), v.material.clone());

    let resolver = EntityResolver::new(&g, &v);
    let tree = HierarchyBuilder::new(&resolver).build(&titles()).unwrap();
    let subjects = &tree.datasets[0].groups[0].subjects;
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0].name, "");
}
