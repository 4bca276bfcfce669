//! Workspace discovery: find markup and translation files on disk and load
//! them as documents.

use std::{
    fs,
    path::{Path, PathBuf},
};

use glob::Pattern;
use rayon::prelude::*;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::core::TextDocument;
use crate::core::utils::is_glob_pattern;

/// Result of scanning a workspace.
pub struct ScanResult {
    /// Sorted paths of candidate files.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

pub fn scan_files(root: &Path, ignore_patterns: &[String]) -> ScanResult {
    let mut files = Vec::new();
    let mut skipped_count = 0;

    // Literal patterns are directory prefixes relative to root
    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => warn!("invalid ignore pattern '{}': {}", p, e),
            }
        } else {
            literal_ignore_paths.push(root.join(p));
        }
    }

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                info!("cannot access path: {}", e);
                continue;
            }
        };
        let path = entry.path();
        let path_str = path.to_string_lossy();

        if literal_ignore_paths
            .iter()
            .any(|ignore_path| path.starts_with(ignore_path))
        {
            continue;
        }

        if glob_patterns.iter().any(|p| p.matches(&path_str)) {
            continue;
        }

        if entry.file_type().is_file() && is_scannable_file(path) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    ScanResult {
        files,
        skipped_count,
    }
}

fn is_scannable_file(path: &Path) -> bool {
    language_for_path(path).is_some()
}

/// Editor language id for a workspace file, `None` for files the tool never
/// looks at.
pub fn language_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "html" | "htm" => Some("html"),
        "xlf" | "xliff" => Some("xml"),
        "json" => Some("json"),
        _ => None,
    }
}

/// Documents read from disk plus the files that could not be read.
#[derive(Default)]
pub struct LoadResult {
    pub documents: Vec<TextDocument>,
    /// `(path, error)` for every unreadable file.
    pub failures: Vec<(String, String)>,
}

/// Read a single file as a document keyed by its path.
pub fn load_document(path: &Path) -> std::io::Result<TextDocument> {
    let text = fs::read_to_string(path)?;
    let language = language_for_path(path).unwrap_or("plaintext");
    Ok(TextDocument::new(path.to_string_lossy(), language, text))
}

/// Read files in parallel, keeping input order.
pub fn load_documents(paths: &[PathBuf]) -> LoadResult {
    let results: Vec<_> = paths
        .par_iter()
        .map(|path| (path, load_document(path)))
        .collect();

    let mut loaded = LoadResult::default();
    for (path, result) in results {
        match result {
            Ok(document) => loaded.documents.push(document),
            Err(e) => {
                warn!("cannot read {}: {}", path.display(), e);
                loaded
                    .failures
                    .push((path.to_string_lossy().to_string(), e.to_string()));
            }
        }
    }
    loaded
}
