//! Flat key-value extraction from JSON translation resources.
//!
//! Nested objects and arrays are flattened into path keys such as
//! `a.b[2].c`; every path becomes one translation unit id.

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use crate::core::data::TranslationUnit;
use crate::core::document::{LineIndex, Range};

/// The closed set of shapes flattening distinguishes.
enum Shape<'a> {
    /// `{}` or `[]`: kept as a leaf so the path is not lost.
    EmptyContainer,
    Mapping(&'a Map<String, Value>),
    Sequence(&'a [Value]),
    Scalar,
}

impl<'a> Shape<'a> {
    fn of(value: &'a Value) -> Self {
        match value {
            Value::Object(map) if map.is_empty() => Shape::EmptyContainer,
            Value::Array(items) if items.is_empty() => Shape::EmptyContainer,
            Value::Object(map) => Shape::Mapping(map),
            Value::Array(items) => Shape::Sequence(items),
            _ => Shape::Scalar,
        }
    }
}

/// Flatten a nested value into a map from path strings to leaf values.
///
/// Empty objects and arrays map to `{}` / `[]` instead of being dropped, so
/// `{}` flattens to `{"": {}}` and `{"a": []}` to `{"a": []}`.
pub fn flatten(value: &Value) -> Map<String, Value> {
    let mut result = Map::new();
    flatten_into(value, String::new(), &mut result);
    result
}

fn flatten_into(value: &Value, path: String, result: &mut Map<String, Value>) {
    match Shape::of(value) {
        Shape::EmptyContainer | Shape::Scalar => {
            result.insert(path, value.clone());
        }
        Shape::Mapping(map) => {
            for (key, child) in map {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                flatten_into(child, child_path, result);
            }
        }
        Shape::Sequence(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(child, format!("{}[{}]", path, index), result);
            }
        }
    }
}

/// Parse a JSON translation resource into units. There is no source text in
/// this format; falsy leaves and empty containers have no target. A root
/// scalar or an empty root object has no key and yields no unit.
pub fn parse_json_units(text: &str) -> Result<Vec<TranslationUnit>> {
    let json: Value = serde_json::from_str(text).context("Failed to parse JSON translation file")?;
    let line_index = LineIndex::new(text);

    let units = flatten(&json)
        .into_iter()
        .filter(|(path, _)| !path.is_empty())
        .map(|(path, leaf)| {
            let range = find_key_span(text, &path).map(|(start, end)| {
                Range::new(
                    line_index.position_at(text, start),
                    line_index.position_at(text, end),
                )
            });

            let mut unit = TranslationUnit::new(path);
            match target_text(&leaf) {
                Some(target) => unit = unit.with_target(target, range),
                None => unit.target_range = range,
            }
            unit
        })
        .collect();

    Ok(units)
}

/// Render a leaf as target text. Falsy values have no translation.
fn target_text(leaf: &Value) -> Option<String> {
    match leaf {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Split a flattened path into its object keys, dropping `[n]` indices.
fn key_segments(path: &str) -> Vec<&str> {
    path.split('.')
        .map(|segment| segment.split('[').next().unwrap_or(segment))
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Locate the byte span of the last object key of `path`, including quotes.
///
/// Each key segment is searched after the previous one, and only quoted
/// strings followed by `:` count, so values that happen to contain the same
/// text are skipped.
fn find_key_span(content: &str, path: &str) -> Option<(usize, usize)> {
    let mut search_start = 0;
    let mut span = None;

    for part in key_segments(path) {
        let pattern = format!("\"{}\"", part);
        let remaining = &content[search_start..];

        let mut pos = 0;
        let mut found = None;
        while let Some(rel_pos) = remaining[pos..].find(&pattern) {
            let abs_pos = pos + rel_pos;
            let after_pattern = abs_pos + pattern.len();
            if remaining[after_pattern..].trim_start().starts_with(':') {
                found = Some((search_start + abs_pos, search_start + after_pattern));
                break;
            }
            pos = abs_pos + 1;
        }

        let (start, end) = found?;
        span = Some((start, end));
        search_start = end;
    }

    span
}
