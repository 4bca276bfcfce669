use crate::issues::Issue;

/// Result of running `check`.
#[derive(Debug, Default)]
pub struct CommandResult {
    /// All issues found, sorted by location.
    pub issues: Vec<Issue>,
    pub project_count: usize,
    /// Number of markup documents (HTML templates) that were validated.
    pub markup_files_checked: usize,
    /// Number of translation files (XLIFF/JSON) that were loaded.
    pub translation_files_checked: usize,
    /// Number of translation files that failed to parse.
    pub parse_error_count: usize,
    /// Paths that could not be walked or read.
    pub skipped_count: usize,
}
