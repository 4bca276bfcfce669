//! Issue types reported by `i18n-lens check`.
//!
//! Each issue is self-contained: it carries the location and the source line
//! needed to display it without going back to the workspace.

use enum_dispatch::enum_dispatch;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    MissingTranslation,
    UnusedTranslation,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::MissingTranslation => write!(f, "missing-translation"),
            Rule::UnusedTranslation => write!(f, "unused-translation"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Locations
// ============================================================

/// A 1-based position in a workspace file, as printed to users.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct IssueLocation {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
}

impl IssueLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }
}

/// Location plus the line it points into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueContext {
    pub location: IssueLocation,
    pub source_line: String,
}

impl IssueContext {
    pub fn new(location: IssueLocation, source_line: impl Into<String>) -> Self {
        Self {
            location,
            source_line: source_line.into(),
        }
    }

    pub fn file_path(&self) -> &str {
        &self.location.file_path
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn col(&self) -> usize {
        self.location.col
    }
}

// ============================================================
// Issue Types
// ============================================================

/// An `@@id` reference some supporting translation file lacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTranslationIssue {
    pub context: IssueContext,
    pub id: String,
    /// Projects whose translation file lacks the id.
    pub projects: Vec<String>,
}

impl MissingTranslationIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MissingTranslation
    }
}

/// A translation unit no markup file of its project references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedTranslationIssue {
    pub context: IssueContext,
    pub id: String,
    pub project: String,
    pub target: Option<String>,
}

impl UnusedTranslationIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnusedTranslation
    }
}

/// Translation file could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    MissingTranslation(MissingTranslationIssue),
    UnusedTranslation(UnusedTranslationIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::MissingTranslation(_) => MissingTranslationIssue::severity(),
            Issue::UnusedTranslation(_) => UnusedTranslationIssue::severity(),
            Issue::ParseError(_) => ParseErrorIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::MissingTranslation(_) => MissingTranslationIssue::rule(),
            Issue::UnusedTranslation(_) => UnusedTranslationIssue::rule(),
            Issue::ParseError(_) => ParseErrorIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

pub enum ReportLocation<'a> {
    /// A position with the line it points into.
    Line(&'a IssueContext),
    /// File-level only (no line context).
    File { path: &'a str },
}

/// Trait for types that can be reported to the CLI.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (id, error text).
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

impl Report for MissingTranslationIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Line(&self.context)
    }

    fn message(&self) -> String {
        self.id.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("missing in: {}", self.projects.join(", ")))
    }
}

impl Report for UnusedTranslationIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Line(&self.context)
    }

    fn message(&self) -> String {
        self.id.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(match &self.target {
            Some(target) => format!("in {} (\"{}\")", self.project, target),
            None => format!("in {}", self.project),
        })
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    fn sort_key(&self) -> (&str, usize, usize) {
        match self.location() {
            ReportLocation::Line(ctx) => (ctx.file_path(), ctx.line(), ctx.col()),
            ReportLocation::File { path } => (path, 0, 0),
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // file_path, line, col, then rule and message
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
