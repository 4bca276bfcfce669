use std::{
    collections::HashMap,
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::info;

use super::super::args::CheckCommand;
use super::CommandResult;
use crate::{
    config::load_config,
    core::{DocumentKind, Position, PublishDiagnostics, TextDocument, TranslationProvider},
    issues::{
        Issue, IssueContext, IssueLocation, MissingTranslationIssue, ParseErrorIssue,
        UnusedTranslationIssue,
    },
    workspace::{load_documents, scan_files},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum CheckRule {
    Missing,
    Unused,
}

impl CheckRule {
    pub fn all() -> Vec<CheckRule> {
        vec![CheckRule::Missing, CheckRule::Unused]
    }
}

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let start_dir = match cmd.common.root {
        Some(root) => root,
        None => env::current_dir().context("Failed to determine current directory")?,
    };
    let checks = if cmd.checks.is_empty() {
        CheckRule::all()
    } else {
        cmd.checks
    };
    run_check(&start_dir, &checks)
}

/// Feed the whole workspace through a [`TranslationProvider`] the way an
/// editor session would, then collect its findings as issues.
pub fn run_check(start_dir: &Path, checks: &[CheckRule]) -> Result<CommandResult> {
    let loaded_config = load_config(start_dir)?;
    let root: PathBuf = match &loaded_config.path {
        Some(path) => path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| start_dir.to_path_buf()),
        None => start_dir.to_path_buf(),
    };
    let config = loaded_config.config;
    info!("checking workspace {}", root.display());

    let scan = scan_files(&root, &config.ignores);
    let loaded = load_documents(&scan.files);

    let mut provider = TranslationProvider::new();
    provider.projects_updated(config.resolve_projects(&root));

    let (translations, rest): (Vec<TextDocument>, Vec<TextDocument>) =
        loaded.documents.into_iter().partition(|doc| {
            matches!(
                DocumentKind::classify(doc, provider.projects()),
                DocumentKind::Translation(_)
            )
        });
    let markup: Vec<TextDocument> = rest
        .into_iter()
        .filter(|doc| DocumentKind::classify(doc, provider.projects()) == DocumentKind::Markup)
        .collect();
    let translation_count = translations.len();
    let markup_count = markup.len();

    // Keep the latest set per document
    let mut published: HashMap<String, PublishDiagnostics> = HashMap::new();
    let mut collect = |sets: Vec<PublishDiagnostics>| {
        for set in sets {
            published.insert(set.uri.clone(), set);
        }
    };

    let mut translation_texts: HashMap<String, TextDocument> = HashMap::new();
    for document in translations {
        translation_texts.insert(document.uri().to_string(), document.clone());
        collect(provider.document_changed(document));
    }
    collect(provider.translations_loaded());
    for document in markup {
        collect(provider.document_changed(document));
    }

    let display = |uri: &str| display_path(&root, uri);
    let mut issues: Vec<Issue> = Vec::new();

    if checks.contains(&CheckRule::Missing) {
        let documents: HashMap<&str, &TextDocument> = provider
            .open_documents()
            .map(|doc| (doc.uri(), doc))
            .collect();
        for set in published.values() {
            let Some(document) = documents.get(set.uri.as_str()) else {
                continue;
            };
            issues.extend(set.diagnostics.iter().map(|diagnostic| {
                Issue::MissingTranslation(MissingTranslationIssue {
                    context: context_at(&display(&set.uri), document, diagnostic.range.start),
                    id: diagnostic.id.clone(),
                    projects: diagnostic.projects.clone(),
                })
            }));
        }
    }

    if checks.contains(&CheckRule::Unused) {
        for unused in provider.unused_translations() {
            let uri = unused.file.uri();
            let start = unused
                .unit
                .navigation_range()
                .map(|range| range.start)
                .unwrap_or_default();
            let context = match translation_texts.get(uri) {
                Some(document) => context_at(&display(uri), document, start),
                None => IssueContext::new(IssueLocation::new(display(uri), 1, 1), ""),
            };
            issues.push(Issue::UnusedTranslation(UnusedTranslationIssue {
                context,
                id: unused.unit.id.clone(),
                project: unused.file.project().unwrap_or_default().to_string(),
                target: unused.unit.target.clone(),
            }));
        }
    }

    let mut parse_error_count = 0;
    for file in provider.store().files() {
        if let Some(error) = file.parse_error() {
            parse_error_count += 1;
            issues.push(Issue::ParseError(ParseErrorIssue {
                file_path: display(file.uri()),
                error: error.to_string(),
            }));
        }
    }

    issues.sort();

    Ok(CommandResult {
        issues,
        project_count: provider.projects().projects().len(),
        markup_files_checked: markup_count,
        translation_files_checked: translation_count,
        parse_error_count,
        skipped_count: scan.skipped_count + loaded.failures.len(),
    })
}

/// Path relative to the workspace root, for display.
fn display_path(root: &Path, uri: &str) -> String {
    Path::new(uri)
        .strip_prefix(root)
        .map(|relative| relative.to_string_lossy().to_string())
        .unwrap_or_else(|_| uri.to_string())
}

fn context_at(file_path: &str, document: &TextDocument, start: Position) -> IssueContext {
    let source_line = document.line_text(start.line).unwrap_or_default();
    IssueContext::new(
        IssueLocation::new(
            file_path,
            start.line as usize + 1,
            start.character as usize + 1,
        ),
        source_line,
    )
}
