//! Missing-translation checks for markup documents.
//!
//! A markup document references translation units through attributes such as
//! `i18n="@@greeting"` or `i18n-title='@@tooltip'`. Every reference is checked
//! against the translation files supporting the document; each file lacking
//! the id adds its project to a warning at the reference.

use std::ops;
use std::sync::LazyLock;

use regex::Regex;

use super::data::TranslationFile;
use super::document::{Range, TextDocument};

/// Name reported as the origin of every diagnostic.
pub const DIAGNOSTIC_SOURCE: &str = "i18n-lens";

/// Diagnostic code for a reference missing in at least one project.
pub const MISSING_TRANSLATION_CODE: &str = "missing-translation";

/// `i18n<anything>="@@<id>"` with either quote style. Group 1 (double quotes)
/// or group 2 (single quotes) spans `@@<id>`.
static ANNOTATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"i18n[^\s=>]*=(?:"(@@[^"]+)"|'(@@[^']+)')"#).unwrap()
});

/// Severity of engine diagnostics. Missing translations are warnings, never
/// errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticSeverity {
    Warning,
}

/// One occurrence of an `@@id` annotation in a markup document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierReference {
    pub id: String,
    /// Byte span of `@@<id>`.
    pub span: ops::Range<usize>,
    pub range: Range,
}

/// A reported problem at a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub range: Range,
    pub severity: DiagnosticSeverity,
    pub code: &'static str,
    pub source: &'static str,
    pub message: String,
    /// The referenced id.
    pub id: String,
    /// Projects lacking the id, in supporting-translation order.
    pub projects: Vec<String>,
}

impl Diagnostic {
    pub fn missing_translation(reference: &IdentifierReference, projects: Vec<String>) -> Self {
        Self {
            range: reference.range,
            severity: DiagnosticSeverity::Warning,
            code: MISSING_TRANSLATION_CODE,
            source: DIAGNOSTIC_SOURCE,
            message: format!(
                "Missed translation in '{}' project(-s)",
                projects.join(", ")
            ),
            id: reference.id.clone(),
            projects,
        }
    }
}

/// Outcome of validating one markup document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub diagnostics: Vec<Diagnostic>,
    /// Every reference in the document, left to right.
    pub references: Vec<IdentifierReference>,
}

/// Find all `@@id` references, left to right, non-overlapping.
pub fn scan_references(document: &TextDocument) -> Vec<IdentifierReference> {
    ANNOTATION_REGEX
        .captures_iter(document.text())
        .filter_map(|captures| {
            let matched = captures.get(1).or_else(|| captures.get(2))?;
            let span = matched.range();
            Some(IdentifierReference {
                id: matched.as_str()["@@".len()..].to_string(),
                range: document.range_of(&span),
                span,
            })
        })
        .collect()
}

/// Validate a markup document against its supporting translation files.
///
/// Returns `None` without scanning when there are no supporting translations;
/// the caller decides what to do with state from earlier passes.
pub fn validate(
    document: &TextDocument,
    translations: &[&TranslationFile],
) -> Option<Validation> {
    if translations.is_empty() {
        return None;
    }

    let references = scan_references(document);
    let diagnostics = references
        .iter()
        .filter_map(|reference| {
            let missing: Vec<String> = translations
                .iter()
                .filter(|file| !file.has_unit(&reference.id))
                .filter_map(|file| file.project().map(str::to_string))
                .collect();

            (!missing.is_empty()).then(|| Diagnostic::missing_translation(reference, missing))
        })
        .collect();

    Some(Validation {
        diagnostics,
        references,
    })
}
