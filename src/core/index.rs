//! The known project list and membership queries against it.

use super::data::Project;

/// Ordered list of projects. Order matters: translation files resolve to the
/// first project that claims them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectIndex {
    projects: Vec<Project>,
}

impl ProjectIndex {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// All projects a markup document belongs to, in list order. May be empty.
    pub fn projects_for_markup_document(&self, uri: &str) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| p.contains_markup(uri))
            .collect()
    }

    /// The first project whose translation-file fragment occurs in `uri`.
    pub fn project_for_translation_file(&self, uri: &str) -> Option<&Project> {
        self.projects
            .iter()
            .find(|p| p.claims_translation_file(uri))
    }
}
