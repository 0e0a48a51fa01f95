//! Read-only project catalogues.
//!
//! Records are compiled into the binary as `'static` tables and never change
//! during a session. Catalogues preserve declaration order; any truncation
//! (pagination) is a view concern.

mod data;

pub use data::{DEVOPS_PROJECTS, PROFILE, PROJECTS};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    #[serde(rename = "Live Production")]
    LiveProduction,
    #[serde(rename = "Beta Access")]
    BetaAccess,
    #[serde(rename = "Open Source")]
    OpenSource,
    #[serde(rename = "In Development")]
    InDevelopment,
}

impl Status {
    pub const fn label(self) -> &'static str {
        match self {
            Self::LiveProduction => "Live Production",
            Self::BetaAccess => "Beta Access",
            Self::OpenSource => "Open Source",
            Self::InDevelopment => "In Development",
        }
    }
}

/// Technology layer. Declaration order is the preview priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Frontend,
    Backend,
    Ai,
    Devops,
    Database,
}

impl Layer {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Frontend => "Frontend",
            Self::Backend => "Backend",
            Self::Ai => "AI",
            Self::Devops => "DevOps",
            Self::Database => "Database",
        }
    }
}

/// Technologies of a project, either a plain list or grouped by layer.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum TagSet {
    Flat(&'static [&'static str]),
    Grouped(&'static [(Layer, &'static [&'static str])]),
}

#[derive(Debug, Serialize)]
pub struct ImageRef {
    pub src: &'static str,
    pub caption: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub value: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Decision {
    pub title: &'static str,
    pub rationale: &'static str,
}

#[derive(Debug, Default, Serialize)]
pub struct Links {
    pub live: Option<&'static str>,
    pub source: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ProjectRecord {
    pub id: &'static str,
    pub title: &'static str,
    pub tagline: &'static str,
    pub category: &'static str,
    pub status: Status,
    pub summary: &'static str,
    pub description: &'static str,
    /// Cover image first, then the gallery.
    pub images: &'static [ImageRef],
    pub tags: TagSet,
    pub metrics: &'static [Metric],
    pub architecture: Option<&'static str>,
    pub decisions: &'static [Decision],
    pub links: Links,
}

#[derive(Debug, Serialize)]
pub struct DevOpsProjectRecord {
    pub id: &'static str,
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub description: &'static str,
    pub tools: &'static [&'static str],
    /// Pipeline stages in execution order.
    pub steps: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct Profile {
    pub name: &'static str,
    pub role: &'static str,
    pub location: &'static str,
    pub headline: &'static str,
    pub bio: &'static [&'static str],
    pub highlights: &'static [(&'static str, &'static str)],
    pub skills: &'static [&'static str],
}

/// Records addressable by a stable id.
pub trait Record: 'static {
    fn id(&self) -> &'static str;
}

impl Record for ProjectRecord {
    fn id(&self) -> &'static str {
        self.id
    }
}

impl Record for DevOpsProjectRecord {
    fn id(&self) -> &'static str {
        self.id
    }
}

/// Ordered, immutable view over a static table.
#[derive(Debug)]
pub struct Catalog<T: 'static> {
    records: &'static [T],
}

impl<T: 'static> Clone for Catalog<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for Catalog<T> {}

impl<T: Record> Catalog<T> {
    pub const fn new(records: &'static [T]) -> Self {
        Self { records }
    }

    pub const fn list(&self) -> &'static [T] {
        self.records
    }

    pub const fn len(&self) -> usize {
        self.records.len()
    }

    pub fn get(&self, id: &str) -> Option<&'static T> {
        self.records.iter().find(|r| r.id() == id)
    }
}

impl Catalog<ProjectRecord> {
    pub const fn projects() -> Self {
        Self::new(PROJECTS)
    }
}

impl Catalog<DevOpsProjectRecord> {
    pub const fn devops() -> Self {
        Self::new(DEVOPS_PROJECTS)
    }
}

pub const PREVIEW_TAG_LIMIT: usize = 5;

/// Flattened technology list for a collapsed card.
///
/// Flat lists are truncated as-is. Grouped sets are concatenated in layer
/// priority order, de-duplicated keeping the first occurrence, then
/// truncated.
pub fn preview_tags(tags: &TagSet) -> Vec<&'static str> {
    match *tags {
        TagSet::Flat(list) => list.iter().copied().take(PREVIEW_TAG_LIMIT).collect(),
        TagSet::Grouped(groups) => {
            let mut ordered: Vec<_> = groups.iter().collect();
            ordered.sort_by_key(|(layer, _)| *layer);

            let mut preview: Vec<&'static str> = Vec::with_capacity(PREVIEW_TAG_LIMIT);
            for tag in ordered.into_iter().flat_map(|(_, list)| list.iter().copied()) {
                if preview.len() == PREVIEW_TAG_LIMIT {
                    break;
                }
                if !preview.contains(&tag) {
                    preview.push(tag);
                }
            }
            preview
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_grouped_tags_dedupe_in_priority_order() {
        const GROUPS: &[(Layer, &[&str])] = &[
            (Layer::Frontend, &["Next.js", "React"]),
            (Layer::Backend, &["Node.js", "Next.js"]),
        ];
        assert_eq!(
            preview_tags(&TagSet::Grouped(GROUPS)),
            vec!["Next.js", "React", "Node.js"]
        );
    }

    #[test]
    fn test_grouped_tags_follow_layer_priority_not_declaration() {
        const GROUPS: &[(Layer, &[&str])] = &[
            (Layer::Database, &["PostgreSQL"]),
            (Layer::Ai, &["OpenAI"]),
            (Layer::Frontend, &["Svelte"]),
        ];
        assert_eq!(
            preview_tags(&TagSet::Grouped(GROUPS)),
            vec!["Svelte", "OpenAI", "PostgreSQL"]
        );
    }

    #[test]
    fn test_preview_is_capped() {
        const FLAT: &[&str] = &["a", "b", "c", "d", "e", "f", "g"];
        assert_eq!(preview_tags(&TagSet::Flat(FLAT)), vec!["a", "b", "c", "d", "e"]);

        const GROUPS: &[(Layer, &[&str])] = &[
            (Layer::Frontend, &["a", "b", "c"]),
            (Layer::Backend, &["c", "d", "e", "f"]),
        ];
        assert_eq!(
            preview_tags(&TagSet::Grouped(GROUPS)),
            vec!["a", "b", "c", "d", "e"]
        );
    }

    #[test]
    fn test_catalog_preserves_declaration_order() {
        let catalog = Catalog::projects();
        let ids: Vec<_> = catalog.list().iter().map(|p| p.id).collect();
        let expected: Vec<_> = PROJECTS.iter().map(|p| p.id).collect();
        assert_eq!(ids, expected);
        assert_eq!(catalog.get(ids[1]).map(|p| p.id), Some(ids[1]));
        assert!(catalog.get("no-such-project").is_none());
    }

    #[test]
    fn test_static_tables_are_well_formed() {
        let ids: HashSet<_> = PROJECTS.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), PROJECTS.len(), "project ids must be unique");
        for project in PROJECTS {
            assert!(!project.images.is_empty(), "{} has no cover image", project.id);
            assert!(preview_tags(&project.tags).len() <= PREVIEW_TAG_LIMIT);
        }

        let ids: HashSet<_> = DEVOPS_PROJECTS.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), DEVOPS_PROJECTS.len());
        assert!(DEVOPS_PROJECTS.iter().all(|p| !p.steps.is_empty()));
    }
}
