//! Per-subject characteristic aggregation and the global column name set.
//!
//! A quality node must resolve exactly one value, exactly one two-hop name,
//! and exactly one two-hop dbGaP id; failing any check drops that quality
//! node from the subject (no global column is removed). Drop-and-continue is
//! deliberate policy here.

use std::collections::{BTreeSet, HashMap};

use crate::domain::{Characteristic, Subject};
use crate::error::DatsError;
use crate::graph::{GraphStore, Term};
use crate::resolver::EntityResolver;
use crate::validate::{self, Check, Outcome};

/// Accumulated characteristics, keyed by subject node, plus the sorted union
/// of all characteristic names used for dynamic column layout.
#[derive(Debug, Default)]
pub struct CharacteristicTable {
    per_subject: HashMap<Term, HashMap<String, Characteristic>>,
    names: BTreeSet<String>,
}

impl CharacteristicTable {
    /// All characteristic names across all subjects, sorted ascending.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn value(&self, subject: &Term, name: &str) -> Option<&str> {
        self.per_subject
            .get(subject)?
            .get(name)
            .map(|c| c.value.as_str())
    }

    pub fn get(&self, subject: &Term, name: &str) -> Option<&Characteristic> {
        self.per_subject.get(subject)?.get(name)
    }
}

/// Walk has-quality edges for every subject and accumulate retained
/// characteristics.
pub fn collect_characteristics<'a, G: GraphStore>(
    resolver: &EntityResolver<'_, G>,
    subjects: impl IntoIterator<Item = &'a Subject>,
) -> Result<CharacteristicTable, DatsError> {
    let vocab = resolver.vocab();
    let mut table = CharacteristicTable::default();

    for subject in subjects {
        let entry = table.per_subject.entry(subject.node.clone()).or_default();
        for quality in resolver.objects(&subject.node, &vocab.has_quality) {
            let values = resolver.resolve_single(&quality, &vocab.data_item);
            let names = resolver.resolve_chain(&quality, &vocab.name, &vocab.sdo_value);
            let ids = resolver.resolve_chain(&quality, &vocab.central_id, &vocab.sdo_identifier);

            let subject_id = subject.node.lexical();
            let checks = [
                ("value", values.count()),
                ("name", names.count()),
                ("id", ids.count()),
            ];
            let mut dropped = false;
            for (field, count) in checks {
                let check = Check::Characteristic {
                    subject: subject_id,
                    field,
                };
                if validate::expect_one(check, count)? == Outcome::Drop {
                    dropped = true;
                    break;
                }
            }
            if dropped {
                continue;
            }

            // counts were validated above
            let (Some(value), Some(name), Some(id)) = (
                values.exactly_one(),
                names.exactly_one(),
                ids.exactly_one(),
            ) else {
                continue;
            };

            let name = name.lexical().to_string();
            table.names.insert(name.clone());
            entry.insert(
                name.clone(),
                Characteristic {
                    name,
                    value: value.lexical().to_string(),
                    dbgap_id: id.lexical().to_string(),
                },
            );
        }
    }

    Ok(table)
}
