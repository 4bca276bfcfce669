//! Translation file parsers.
//!
//! Callers only see [`parse`] and [`try_parse`]; the strategy behind each
//! [`TranslationFormat`] can change (e.g. to a real XML tree parser) without
//! touching them.
//!
//! - `xliff`: `<trans-unit>` block extraction
//! - `json`: flat key-value extraction from nested JSON

pub mod json;
pub mod xliff;

use anyhow::Result;
use tracing::warn;

use super::data::TranslationUnit;

/// Parse strategy for a translation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslationFormat {
    /// XLIFF documents made of `<trans-unit>` blocks.
    Xliff,
    /// Arbitrary nested JSON, flattened into path keys.
    Json,
}

impl std::fmt::Display for TranslationFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslationFormat::Xliff => write!(f, "xliff"),
            TranslationFormat::Json => write!(f, "json"),
        }
    }
}

/// Parse a translation document, surfacing malformed input as an error.
pub fn try_parse(format: TranslationFormat, text: &str) -> Result<Vec<TranslationUnit>> {
    match format {
        TranslationFormat::Xliff => Ok(xliff::parse_trans_units(text)),
        TranslationFormat::Json => json::parse_json_units(text),
    }
}

/// Parse a translation document. Never fails: malformed input is logged and
/// yields zero units.
pub fn parse(format: TranslationFormat, text: &str) -> Vec<TranslationUnit> {
    match try_parse(format, text) {
        Ok(units) => units,
        Err(e) => {
            warn!("failed to parse {} translation file: {:#}", format, e);
            Vec::new()
        }
    }
}
