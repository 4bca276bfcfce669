//! Parsed translation files keyed by URI.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::data::TranslationFile;
use super::document::TextDocument;
use super::index::ProjectIndex;
use super::parsers::{TranslationFormat, try_parse};

/// Most recent parse of every translation file seen so far, iterated in URI
/// order.
#[derive(Debug, Default)]
pub struct TranslationStore {
    files: BTreeMap<String, TranslationFile>,
}

impl TranslationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn get(&self, uri: &str) -> Option<&TranslationFile> {
        self.files.get(uri)
    }

    pub fn files(&self) -> impl Iterator<Item = &TranslationFile> {
        self.files.values()
    }

    /// Parse `document` and store the result.
    ///
    /// A new entry takes `project` as its association; an existing entry only
    /// has its units replaced and keeps the association it already had.
    /// Parse failures are logged and leave the entry with zero units.
    pub fn upsert(
        &mut self,
        document: &TextDocument,
        format: TranslationFormat,
        project: Option<&str>,
    ) -> &TranslationFile {
        let uri = document.uri();
        let file = self
            .files
            .entry(uri.to_string())
            .or_insert_with(|| TranslationFile::new(uri, project.map(str::to_string)));

        match try_parse(format, document.text()) {
            Ok(units) => {
                debug!("parsed {} units from {}", units.len(), uri);
                file.set_units(units);
            }
            Err(e) => {
                warn!("failed to parse translation file {}: {:#}", uri, e);
                file.set_parse_error(format!("{:#}", e));
            }
        }

        file
    }

    pub fn remove(&mut self, uri: &str) -> Option<TranslationFile> {
        self.files.remove(uri)
    }

    /// Recompute every file's project association from `projects`.
    pub fn reassign_all(&mut self, projects: &ProjectIndex) {
        if self.files.is_empty() {
            return;
        }
        for (uri, file) in self.files.iter_mut() {
            let project = projects
                .project_for_translation_file(uri)
                .map(|p| p.name.clone());
            file.set_project(project);
        }
    }

    /// Translation files to validate a markup document against: for each
    /// project the document belongs to, the first stored file resolved to that
    /// project. Projects without a resolved file contribute nothing.
    pub fn supported_translations(
        &self,
        markup_uri: &str,
        projects: &ProjectIndex,
    ) -> Vec<&TranslationFile> {
        projects
            .projects_for_markup_document(markup_uri)
            .into_iter()
            .filter_map(|project| {
                self.files
                    .values()
                    .find(|file| file.project() == Some(project.name.as_str()))
            })
            .collect()
    }
}
