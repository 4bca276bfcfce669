//! `<trans-unit>` extraction from XLIFF 1.2 style documents.
//!
//! Pattern based: blocks are located first, then fields are pulled out of each
//! block. Blocks are non-overlapping and never nested.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::core::data::TranslationUnit;
use crate::core::document::{LineIndex, Range};

/// A whole `<trans-unit ...>...</trans-unit>` block. Group 1 holds the opening
/// tag's attributes, group 2 the body. Self-closing units have no body and
/// are not matched.
static TRANS_UNIT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<trans-unit\b((?:[^>]*[^/>])?)>(.*?)</trans-unit\s*>").unwrap()
});

static ID_ATTRIBUTE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|\s)id\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

static SOURCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<source(?:\s[^>]*)?>(.*?)</source\s*>").unwrap());

static TARGET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<target(?:\s[^>]*)?>(.*?)</target\s*>").unwrap());

/// Extract all translation units. Blocks without a usable `id` are skipped.
pub fn parse_trans_units(text: &str) -> Vec<TranslationUnit> {
    let line_index = LineIndex::new(text);
    let range_at = |start: usize, end: usize| {
        Range::new(
            line_index.position_at(text, start),
            line_index.position_at(text, end),
        )
    };

    TRANS_UNIT_REGEX
        .captures_iter(text)
        .filter_map(|block| {
            let attributes = block.get(1)?;
            let body = block.get(2)?;

            let id = extract_id(attributes.as_str())?;
            let mut unit = TranslationUnit::new(id);

            if let Some(source) = inner_text(&SOURCE_REGEX, body.as_str()) {
                let start = body.start() + source.start();
                let range = range_at(start, start + source.len());
                unit = unit.with_source(source.as_str(), Some(range));
            }
            if let Some(target) = inner_text(&TARGET_REGEX, body.as_str()) {
                let start = body.start() + target.start();
                let range = range_at(start, start + target.len());
                unit = unit.with_target(target.as_str(), Some(range));
            }

            Some(unit)
        })
        .collect()
}

fn extract_id(attributes: &str) -> Option<String> {
    let captures = ID_ATTRIBUTE_REGEX.captures(attributes)?;
    let id = captures.get(1).or_else(|| captures.get(2))?.as_str();
    (!id.is_empty()).then(|| id.to_string())
}

fn inner_text<'t>(regex: &Regex, body: &'t str) -> Option<regex::Match<'t>> {
    regex.captures(body).and_then(|c: Captures<'t>| c.get(1))
}
