use std::collections::HashMap;

use crate::core::document::Range;

/// Marker rendered in place of a missing target value.
pub const NO_TRANSLATION: &str = "(no translation)";

/// One translatable string and its localized value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationUnit {
    /// Join key referenced by `@@id` annotations. Never empty.
    pub id: String,
    pub source: Option<String>,
    /// `None` means "no translation", which is not the same as an empty string.
    pub target: Option<String>,
    pub source_range: Option<Range>,
    pub target_range: Option<Range>,
}

impl TranslationUnit {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: None,
            target: None,
            source_range: None,
            target_range: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>, range: Option<Range>) -> Self {
        self.source = Some(source.into());
        self.source_range = range;
        self
    }

    pub fn with_target(mut self, target: impl Into<String>, range: Option<Range>) -> Self {
        self.target = Some(target.into());
        self.target_range = range;
        self
    }

    /// Target text for display, falling back to [`NO_TRANSLATION`].
    pub fn display_target(&self) -> &str {
        self.target.as_deref().unwrap_or(NO_TRANSLATION)
    }

    /// Best position to navigate to: the target if recorded, else the source.
    pub fn navigation_range(&self) -> Option<Range> {
        self.target_range.or(self.source_range)
    }
}

/// The parsed state of one translation document.
///
/// The project association is derived from the current project list and is
/// recomputed whenever that list changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationFile {
    uri: String,
    units: Vec<TranslationUnit>,
    by_id: HashMap<String, usize>,
    /// Name of the project this file resolved to.
    project: Option<String>,
    /// Last parse failure, if the most recent parse failed.
    parse_error: Option<String>,
}

impl TranslationFile {
    pub fn new(uri: impl Into<String>, project: Option<String>) -> Self {
        Self {
            uri: uri.into(),
            units: Vec::new(),
            by_id: HashMap::new(),
            project,
            parse_error: None,
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn units(&self) -> &[TranslationUnit] {
        &self.units
    }

    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    pub fn parse_error(&self) -> Option<&str> {
        self.parse_error.as_deref()
    }

    /// Replace the unit set wholesale. On duplicate ids the first unit wins.
    pub fn set_units(&mut self, units: Vec<TranslationUnit>) {
        let mut by_id = HashMap::with_capacity(units.len());
        for (index, unit) in units.iter().enumerate() {
            by_id.entry(unit.id.clone()).or_insert(index);
        }
        self.units = units;
        self.by_id = by_id;
        self.parse_error = None;
    }

    /// Record a failed parse: the file is kept but contributes zero units.
    pub fn set_parse_error(&mut self, error: impl Into<String>) {
        self.units.clear();
        self.by_id.clear();
        self.parse_error = Some(error.into());
    }

    pub fn set_project(&mut self, project: Option<String>) {
        self.project = project;
    }

    pub fn unit(&self, id: &str) -> Option<&TranslationUnit> {
        self.by_id.get(id).map(|&index| &self.units[index])
    }

    pub fn has_unit(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }
}
