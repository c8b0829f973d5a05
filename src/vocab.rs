//! The fixed vocabulary of type and relation terms used to query the graph.
//!
//! Traversal code never embeds identifiers; it goes through a [`Vocabulary`]
//! so the term set can be swapped per project without touching algorithms.

use crate::graph::Term;

/// Type and predicate terms for one metadata schema.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    // type assertions
    pub rdf_type: Term,
    pub dataset: Term,
    pub study: Term,
    pub study_group: Term,
    pub material: Term,
    pub data_acquisition: Term,
    pub dimension: Term,
    pub data_download: Term,
    pub anatomical_structure: Term,
    // attributes
    pub title: Term,
    pub name: Term,
    pub central_id: Term,
    pub sdo_identifier: Term,
    pub sdo_value: Term,
    pub data_item: Term,
    pub content_size: Term,
    // relations
    pub has_part: Term,
    pub has_member: Term,
    pub has_quality: Term,
    pub produced_by: Term,
    pub has_input: Term,
    pub derives_from: Term,
    pub distribution: Term,
}

impl Vocabulary {
    /// The DATS vocabulary (schema.org + OBO terms as emitted by the DATS
    /// JSON-LD context).
    pub fn dats() -> Self {
        Self {
            rdf_type: Term::node("http://www.w3.org/1999/02/22-rdf-syntax-ns#type"),
            dataset: Term::node("https://schema.org/Dataset"),
            study: Term::node("http://purl.obolibrary.org/obo/OBI_0000066"),
            study_group: Term::node("http://purl.obolibrary.org/obo/STATO_0000193"),
            material: Term::node("http://purl.obolibrary.org/obo/BFO_0000040"),
            // DataAcquisition is still mapped to sdo:Action by the context
            data_acquisition: Term::node("https://schema.org/Action"),
            dimension: Term::node("https://schema.org/PropertyValue"),
            data_download: Term::node("https://schema.org/DataDownload"),
            anatomical_structure: Term::node("https://schema.org/AnatomicalStructure"),
            title: Term::node("https://schema.org/name"),
            name: Term::node("http://purl.obolibrary.org/obo/IAO_0000590"),
            central_id: Term::node("http://purl.obolibrary.org/obo/IAO_0000577"),
            sdo_identifier: Term::node("https://schema.org/identifier"),
            sdo_value: Term::node("https://schema.org/value"),
            data_item: Term::node("http://purl.obolibrary.org/obo/IAO_0000027"),
            content_size: Term::node("https://schema.org/contentSize"),
            has_part: Term::node("https://schema.org/hasPart"),
            has_member: Term::node("https://schema.org/member"),
            has_quality: Term::node("http://purl.obolibrary.org/obo/RO_0000086"),
            produced_by: Term::node("http://purl.obolibrary.org/obo/RO_0003001"),
            has_input: Term::node("http://purl.obolibrary.org/obo/RO_0002233"),
            derives_from: Term::node("http://www.w3.org/ns/prov#wasDerivedFrom"),
            distribution: Term::node("https://schema.org/distribution"),
        }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::dats()
    }
}
