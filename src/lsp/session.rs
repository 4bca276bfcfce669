//! Editor session state behind the language server.
//!
//! Everything here is synchronous: the server locks one [`Session`], calls a
//! method and publishes what it returns before releasing the lock.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::{Config, ProjectConfig, load_config};
use crate::core::{
    DocumentKind, Hover, Location, Position, PublishDiagnostics, TextDocument,
    TranslationProvider,
};
use crate::workspace::{language_for_path, load_document, load_documents, scan_files};

/// What happened to a watched file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileChange {
    Created,
    Changed,
    Deleted,
}

#[derive(Debug, Default)]
pub struct Session {
    provider: TranslationProvider,
    root: Option<PathBuf>,
    config: Config,
    /// Language ids of documents open in the editor.
    languages: HashMap<String, String>,
}

impl Session {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self {
            root,
            ..Default::default()
        }
    }

    pub fn provider(&self) -> &TranslationProvider {
        &self.provider
    }

    fn root_dir(&self) -> PathBuf {
        self.root.clone().unwrap_or_default()
    }

    /// Load the config from the workspace root and deliver its projects.
    pub fn load_projects(&mut self) -> Result<Vec<PublishDiagnostics>> {
        let Some(root) = self.root.clone() else {
            info!("no workspace root; waiting for projects from the client");
            return Ok(Vec::new());
        };
        let loaded = load_config(&root)?;
        let root = match &loaded.path {
            Some(path) => path.parent().map(Path::to_path_buf).unwrap_or(root),
            None => root,
        };
        info!(
            "loaded {} project(s) from {}",
            loaded.config.projects.len(),
            if loaded.from_file() { "config file" } else { "defaults" }
        );
        self.root = Some(root);
        self.config = loaded.config;
        let projects = self.config.resolve_projects(&self.root_dir());
        Ok(self.provider.projects_updated(projects))
    }

    /// Replace the project list with entries sent by the client. An invalid
    /// list is rejected and the current one stays in place.
    pub fn projects_updated(
        &mut self,
        projects: Vec<ProjectConfig>,
    ) -> Result<Vec<PublishDiagnostics>> {
        let config = Config {
            projects,
            ignores: self.config.ignores.clone(),
        };
        config
            .validate()
            .context("Rejected project list from client")?;
        self.config = config;
        let resolved = self.config.resolve_projects(&self.root_dir());
        Ok(self.provider.projects_updated(resolved))
    }

    /// Read every translation file in the workspace, then signal the end of
    /// the bulk load.
    pub fn load_translations(&mut self) -> Vec<PublishDiagnostics> {
        let mut published = Vec::new();
        if let Some(root) = &self.root {
            let scan = scan_files(root, &self.config.ignores);
            let candidates: Vec<PathBuf> = scan
                .files
                .into_iter()
                .filter(|path| language_for_path(path) != Some("html"))
                .collect();
            let loaded = load_documents(&candidates);
            for document in loaded.documents {
                if self.is_translation_candidate(&document) {
                    published.extend(self.provider.document_changed(document));
                }
            }
        }
        published.extend(self.provider.translations_loaded());
        published
    }

    pub fn translations_loaded(&mut self) -> Vec<PublishDiagnostics> {
        self.provider.translations_loaded()
    }

    /// Translation files, plus JSON a later project list may still claim.
    fn is_translation_candidate(&self, document: &TextDocument) -> bool {
        matches!(
            DocumentKind::classify(document, self.provider.projects()),
            DocumentKind::Translation(_) | DocumentKind::UnclaimedJson
        )
    }

    pub fn open(&mut self, key: String, language_id: String, text: String) -> Vec<PublishDiagnostics> {
        self.languages.insert(key.clone(), language_id.clone());
        self.provider
            .document_changed(TextDocument::new(key, language_id, text))
    }

    pub fn change(&mut self, key: String, text: String) -> Vec<PublishDiagnostics> {
        let language_id = self
            .languages
            .get(&key)
            .cloned()
            .or_else(|| language_for_path(Path::new(&key)).map(str::to_string))
            .unwrap_or_else(|| "plaintext".to_string());
        self.provider
            .document_changed(TextDocument::new(key, language_id, text))
    }

    pub fn close(&mut self, key: &str) -> Vec<PublishDiagnostics> {
        self.languages.remove(key);
        self.provider.document_closed(key)
    }

    /// React to a translation file changing on disk. Markup files are owned
    /// by the editor while open and are ignored here.
    pub fn watched_file_changed(&mut self, key: &str, change: FileChange) -> Vec<PublishDiagnostics> {
        match change {
            FileChange::Deleted => self.provider.translation_removed(key),
            FileChange::Created | FileChange::Changed => {
                let document = match load_document(Path::new(key)) {
                    Ok(document) => document,
                    Err(e) => {
                        warn!("cannot read {}: {}", key, e);
                        return Vec::new();
                    }
                };
                if !self.is_translation_candidate(&document) {
                    debug!("ignoring watched file {}", key);
                    return Vec::new();
                }
                self.provider.document_changed(document)
            }
        }
    }

    pub fn hover(&self, key: &str, position: Position) -> Option<Hover> {
        self.provider.hover(key, position)
    }

    pub fn locations(&self, key: &str, position: Position) -> Vec<Location> {
        self.provider.locations(key, position)
    }
}
