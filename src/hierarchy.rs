//! Dataset → Study → StudyGroup → Subject linkage.

use tracing::debug;

use crate::domain::{Dataset, DatasetEntry, GroupEntry, Study, StudyGroup, StudyTree, Subject};
use crate::error::DatsError;
use crate::graph::{GraphStore, Term};
use crate::resolver::{EntityResolver, Resolution};
use crate::validate::{self, Check, Outcome};

pub struct HierarchyBuilder<'a, G: GraphStore> {
    resolver: &'a EntityResolver<'a, G>,
}

impl<'a, G: GraphStore> HierarchyBuilder<'a, G> {
    pub fn new(resolver: &'a EntityResolver<'a, G>) -> Self {
        Self { resolver }
    }

    /// Build the full tree: find the top-level project, keep datasets with a
    /// resolved identifier and a linked study, then groups and subjects.
    pub fn build(&self, known_titles: &[String]) -> Result<StudyTree, DatsError> {
        let all_datasets = self.resolver.find_by_type(&self.resolver.vocab().dataset);
        debug!(datasets = all_datasets.len(), "typed Dataset nodes found");

        let project = self.top_level_project(&all_datasets, known_titles)?;

        let mut entries = Vec::new();
        for node in &all_datasets {
            let Some(dataset) = self.dataset_with_identifier(node)? else {
                continue;
            };
            let Some(study) = self.dataset_study(&dataset)? else {
                continue;
            };
            let groups = self.study_groups(&study)?;
            entries.push(DatasetEntry {
                dataset,
                study,
                groups,
            });
        }

        Ok(StudyTree {
            project,
            datasets: entries,
        })
    }

    /// The single dataset titled with a known project name anchors the
    /// Project column. Any other count is fatal.
    fn top_level_project(
        &self,
        all_datasets: &[Term],
        known_titles: &[String],
    ) -> Result<String, DatsError> {
        let vocab = self.resolver.vocab();
        let mut matched = Vec::new();
        for node in all_datasets {
            for title in self.resolver.objects(node, &vocab.title) {
                if known_titles.iter().any(|known| known == title.lexical()) {
                    matched.push(title.lexical().to_string());
                }
            }
        }
        validate::expect_one(Check::TopLevelDatasets, matched.len())?;
        Ok(matched.remove(0))
    }

    /// Two-hop identifier lookup; datasets without one are dropped.
    fn dataset_with_identifier(&self, node: &Term) -> Result<Option<Dataset>, DatsError> {
        let vocab = self.resolver.vocab();
        let resolution = self
            .resolver
            .resolve_chain(node, &vocab.central_id, &vocab.sdo_identifier);
        let check = Check::DatasetIdentifier {
            dataset: node.lexical(),
        };
        if validate::expect_some(check, resolution.count())? == Outcome::Drop {
            return Ok(None);
        }
        let identifier = resolution
            .last()
            .map(|t| t.lexical().to_string())
            .unwrap_or_default();
        Ok(Some(Dataset {
            node: node.clone(),
            identifier,
        }))
    }

    /// Follow produced-by and keep targets typed Study; last match wins on
    /// ambiguity. Datasets without a study are dropped.
    fn dataset_study(&self, dataset: &Dataset) -> Result<Option<Study>, DatsError> {
        let vocab = self.resolver.vocab();
        let studies: Vec<Term> = self
            .resolver
            .objects(&dataset.node, &vocab.produced_by)
            .into_iter()
            .filter(|o| self.resolver.has_type(o, &vocab.study))
            .collect();
        let check = Check::DatasetStudy {
            dataset: dataset.node.lexical(),
        };
        if validate::expect_some(check, studies.len())? == Outcome::Drop {
            return Ok(None);
        }
        Ok(studies.into_iter().last().map(|node| Study { node }))
    }

    /// Has-part children typed StudyGroup; a group is kept only when exactly
    /// one name attribute resolves.
    fn study_groups(&self, study: &Study) -> Result<Vec<GroupEntry>, DatsError> {
        let vocab = self.resolver.vocab();
        let mut groups = Vec::new();
        for node in self.resolver.objects(&study.node, &vocab.has_part) {
            if !self.resolver.has_type(&node, &vocab.study_group) {
                continue;
            }
            let names = self.resolver.resolve_single(&node, &vocab.name);
            let check = Check::GroupName {
                group: node.lexical(),
            };
            if validate::expect_one(check, names.count())? == Outcome::Drop {
                continue;
            }
            let name = names
                .exactly_one()
                .map(|t| t.lexical().to_string())
                .unwrap_or_default();
            let group = StudyGroup { node: node.clone(), name };
            let subjects = self.group_subjects(&group);
            groups.push(GroupEntry { group, subjects });
        }
        Ok(groups)
    }

    /// Has-member children typed Material. Subjects without a resolvable
    /// name are retained with an empty name; many names resolve last-wins.
    fn group_subjects(&self, group: &StudyGroup) -> Vec<Subject> {
        let vocab = self.resolver.vocab();
        let mut subjects = Vec::new();
        for node in self.resolver.objects(&group.node, &vocab.has_member) {
            if !self.resolver.has_type(&node, &vocab.material) {
                continue;
            }
            let name = match self.resolver.resolve_single(&node, &vocab.name) {
                Resolution::Absent => String::new(),
                resolution => resolution
                    .last()
                    .map(|t| t.lexical().to_string())
                    .unwrap_or_default(),
            };
            subjects.push(Subject { node, name });
        }
        subjects
    }
}
