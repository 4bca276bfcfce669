use crate::core::utils::glob_matcher::matches_exclusion;

/// A logical group of markup files sharing one translation resource.
///
/// Projects are replaced wholesale whenever a new project list arrives; there
/// is no partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Label shown in diagnostics, unique within a session.
    pub name: String,
    /// Path prefix a markup document URI must contain.
    pub root: String,
    /// Glob patterns excluding documents under `root`, matched as prefixes.
    pub exclude: Vec<String>,
    /// Path fragment a translation file URI must contain to belong here.
    pub translation_file: String,
}

impl Project {
    pub fn new(
        name: impl Into<String>,
        root: impl Into<String>,
        exclude: Vec<String>,
        translation_file: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            exclude,
            translation_file: translation_file.into(),
        }
    }

    /// Whether a markup document belongs to this project: the URI contains the
    /// root and no exclusion pattern matches it.
    pub fn contains_markup(&self, uri: &str) -> bool {
        uri.contains(&self.root)
            && !self
                .exclude
                .iter()
                .any(|pattern| matches_exclusion(pattern, uri))
    }

    /// Whether a translation file belongs to this project.
    pub fn claims_translation_file(&self, uri: &str) -> bool {
        !self.translation_file.is_empty() && uri.contains(&self.translation_file)
    }
}
