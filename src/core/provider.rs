//! The orchestrator tying projects, translations and markup validation
//! together.
//!
//! [`TranslationProvider`] owns all mutable state. Every notification runs to
//! completion and returns the diagnostics to publish, each entry a full
//! replacement for its URI. Hosts that process events concurrently must
//! serialize access through a single writer.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use super::data::{NO_TRANSLATION, Project, TranslationFile, TranslationUnit};
use super::document::{DocumentKind, Position, Range, TextDocument};
use super::index::ProjectIndex;
use super::parsers::TranslationFormat;
use super::store::TranslationStore;
use super::validation::{self, Diagnostic, IdentifierReference};

/// Separator between per-project values in hover text.
pub const HOVER_SEPARATOR: &str = "\n";

/// A full replacement diagnostic set for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishDiagnostics {
    pub uri: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Translated values for the reference under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hover {
    pub range: Range,
    pub text: String,
}

/// A navigable position inside a translation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub uri: String,
    pub range: Range,
}

/// A translation unit no open markup document of its project references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedTranslation<'a> {
    pub file: &'a TranslationFile,
    pub unit: &'a TranslationUnit,
}

#[derive(Debug, Default)]
pub struct TranslationProvider {
    projects: ProjectIndex,
    store: TranslationStore,
    /// Open markup documents, revalidated when any translation changes.
    documents: BTreeMap<String, TextDocument>,
    /// References found by the last validation pass of each document.
    references: HashMap<String, Vec<IdentifierReference>>,
    /// JSON documents seen before any project claimed them.
    unclaimed: BTreeMap<String, TextDocument>,
}

impl TranslationProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projects(&self) -> &ProjectIndex {
        &self.projects
    }

    pub fn store(&self) -> &TranslationStore {
        &self.store
    }

    pub fn open_documents(&self) -> impl Iterator<Item = &TextDocument> {
        self.documents.values()
    }

    /// Replace the project list, re-resolve translation files and revalidate
    /// every open markup document.
    pub fn projects_updated(&mut self, projects: Vec<Project>) -> Vec<PublishDiagnostics> {
        debug!("project list updated: {} project(s)", projects.len());
        self.projects = ProjectIndex::new(projects);
        self.claim_unclaimed();
        self.store.reassign_all(&self.projects);
        self.revalidate_all()
    }

    /// Bulk translation loading finished.
    pub fn translations_loaded(&mut self) -> Vec<PublishDiagnostics> {
        debug!("translations loaded: {} file(s)", self.store.len());
        self.claim_unclaimed();
        self.store.reassign_all(&self.projects);
        self.revalidate_all()
    }

    /// Route a changed document by kind.
    ///
    /// Translation files are re-parsed and trigger a revalidation of every
    /// open markup document, since one translation file can affect any of
    /// them. Markup documents are validated alone, or silently kept for later
    /// while no projects or translations are known.
    pub fn document_changed(&mut self, document: TextDocument) -> Vec<PublishDiagnostics> {
        match DocumentKind::classify(&document, &self.projects) {
            DocumentKind::Translation(format) => self.translation_changed(&document, format),
            DocumentKind::Markup => {
                let uri = document.uri().to_string();
                self.documents.insert(uri.clone(), document);
                if self.projects.is_empty() || self.store.is_empty() {
                    debug!("skipping validation of {}: nothing to validate against", uri);
                    return Vec::new();
                }
                self.revalidate(&uri).into_iter().collect()
            }
            DocumentKind::UnclaimedJson => {
                if self.store.get(document.uri()).is_some() {
                    return self.translation_changed(&document, TranslationFormat::Json);
                }
                debug!("holding back {}: no project claims it", document.uri());
                self.unclaimed.insert(document.uri().to_string(), document);
                Vec::new()
            }
            DocumentKind::Other => Vec::new(),
        }
    }

    /// Parse held-back JSON documents the current project list claims.
    fn claim_unclaimed(&mut self) {
        let claimed: Vec<String> = self
            .unclaimed
            .keys()
            .filter(|uri| self.projects.project_for_translation_file(uri).is_some())
            .cloned()
            .collect();
        for uri in claimed {
            if let Some(document) = self.unclaimed.remove(&uri) {
                debug!("{} is now claimed by a project", uri);
                self.store.upsert(&document, TranslationFormat::Json, None);
            }
        }
    }

    fn translation_changed(
        &mut self,
        document: &TextDocument,
        format: TranslationFormat,
    ) -> Vec<PublishDiagnostics> {
        let project = self
            .projects
            .project_for_translation_file(document.uri())
            .map(|p| p.name.clone());
        self.store.upsert(document, format, project.as_deref());
        self.revalidate_all()
    }

    /// Forget a closed markup document and clear its diagnostics.
    pub fn document_closed(&mut self, uri: &str) -> Vec<PublishDiagnostics> {
        self.references.remove(uri);
        match self.documents.remove(uri) {
            Some(_) => vec![PublishDiagnostics {
                uri: uri.to_string(),
                diagnostics: Vec::new(),
            }],
            None => Vec::new(),
        }
    }

    /// Drop a translation file that no longer exists.
    pub fn translation_removed(&mut self, uri: &str) -> Vec<PublishDiagnostics> {
        self.unclaimed.remove(uri);
        match self.store.remove(uri) {
            Some(_) => self.revalidate_all(),
            None => Vec::new(),
        }
    }

    fn revalidate_all(&mut self) -> Vec<PublishDiagnostics> {
        let uris: Vec<String> = self.documents.keys().cloned().collect();
        debug!("revalidating {} open document(s)", uris.len());
        uris.iter().filter_map(|uri| self.revalidate(uri)).collect()
    }

    /// Validate one open document. Without supporting translations nothing is
    /// scanned and an empty set clears earlier warnings.
    fn revalidate(&mut self, uri: &str) -> Option<PublishDiagnostics> {
        let document = self.documents.get(uri)?;
        let translations = self.store.supported_translations(uri, &self.projects);

        let diagnostics = match validation::validate(document, &translations) {
            Some(result) => {
                self.references.insert(uri.to_string(), result.references);
                result.diagnostics
            }
            None => Vec::new(),
        };

        Some(PublishDiagnostics {
            uri: uri.to_string(),
            diagnostics,
        })
    }

    /// The reference under `position` and the translations supporting its
    /// document. `None` if either is missing.
    fn lookup(
        &self,
        uri: &str,
        position: Position,
    ) -> Option<(&IdentifierReference, Vec<&TranslationFile>)> {
        let reference = self
            .references
            .get(uri)?
            .iter()
            .find(|r| r.range.contains(position))?;
        let translations = self.store.supported_translations(uri, &self.projects);
        if translations.is_empty() {
            return None;
        }
        Some((reference, translations))
    }

    /// Target values of the reference under the cursor, one per supporting
    /// translation.
    pub fn hover(&self, uri: &str, position: Position) -> Option<Hover> {
        let (reference, translations) = self.lookup(uri, position)?;

        let text = translations
            .iter()
            .map(|file| {
                file.unit(&reference.id)
                    .map(TranslationUnit::display_target)
                    .unwrap_or(NO_TRANSLATION)
            })
            .collect::<Vec<_>>()
            .join(HOVER_SEPARATOR);

        Some(Hover {
            range: reference.range,
            text,
        })
    }

    /// Positions of the unit under the cursor in each supporting translation.
    pub fn locations(&self, uri: &str, position: Position) -> Vec<Location> {
        let Some((reference, translations)) = self.lookup(uri, position) else {
            return Vec::new();
        };

        translations
            .iter()
            .filter_map(|file| {
                let range = file.unit(&reference.id)?.navigation_range()?;
                Some(Location {
                    uri: file.uri().to_string(),
                    range,
                })
            })
            .collect()
    }

    /// Units of resolved translation files that no open markup document of
    /// the same project references.
    pub fn unused_translations(&self) -> Vec<UnusedTranslation<'_>> {
        let mut used: HashMap<&str, HashSet<&str>> = HashMap::new();
        for (uri, references) in &self.references {
            for project in self.projects.projects_for_markup_document(uri) {
                used.entry(project.name.as_str())
                    .or_default()
                    .extend(references.iter().map(|r| r.id.as_str()));
            }
        }

        self.store
            .files()
            .filter_map(|file| Some((file, file.project()?)))
            .flat_map(|(file, project)| {
                let used_ids = used.get(project);
                file.units()
                    .iter()
                    .filter(move |unit| !used_ids.is_some_and(|ids| ids.contains(unit.id.as_str())))
                    .map(move |unit| UnusedTranslation { file, unit })
            })
            .collect()
    }
}
