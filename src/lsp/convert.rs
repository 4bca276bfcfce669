//! Conversions between engine types and `lsp_types`.
//!
//! The engine keys documents by plain strings. `file://` URIs become their
//! filesystem path so project roots and translation-file fragments written in
//! the config compare against ordinary paths; other schemes keep the URI text.

use std::path::Path;

use tower_lsp::lsp_types::{
    self, DiagnosticSeverity as LspSeverity, NumberOrString, Url,
};

use crate::core::{Diagnostic, DiagnosticSeverity, Hover, Location, Position, Range};

pub fn uri_to_key(uri: &Url) -> String {
    if uri.scheme() == "file"
        && let Ok(path) = uri.to_file_path()
    {
        return path.to_string_lossy().to_string();
    }
    uri.to_string()
}

pub fn key_to_uri(key: &str) -> Option<Url> {
    if Path::new(key).is_absolute() {
        Url::from_file_path(key).ok()
    } else {
        Url::parse(key).ok()
    }
}

pub fn from_lsp_position(position: lsp_types::Position) -> Position {
    Position::new(position.line, position.character)
}

pub fn to_lsp_position(position: Position) -> lsp_types::Position {
    lsp_types::Position::new(position.line, position.character)
}

pub fn to_lsp_range(range: Range) -> lsp_types::Range {
    lsp_types::Range::new(to_lsp_position(range.start), to_lsp_position(range.end))
}

fn to_lsp_severity(severity: DiagnosticSeverity) -> LspSeverity {
    match severity {
        DiagnosticSeverity::Warning => LspSeverity::WARNING,
    }
}

pub fn to_lsp_diagnostic(diagnostic: &Diagnostic) -> lsp_types::Diagnostic {
    lsp_types::Diagnostic {
        range: to_lsp_range(diagnostic.range),
        severity: Some(to_lsp_severity(diagnostic.severity)),
        code: Some(NumberOrString::String(diagnostic.code.to_string())),
        source: Some(diagnostic.source.to_string()),
        message: diagnostic.message.clone(),
        ..Default::default()
    }
}

pub fn to_lsp_hover(hover: Hover) -> lsp_types::Hover {
    lsp_types::Hover {
        contents: lsp_types::HoverContents::Markup(lsp_types::MarkupContent {
            kind: lsp_types::MarkupKind::PlainText,
            value: hover.text,
        }),
        range: Some(to_lsp_range(hover.range)),
    }
}

pub fn to_lsp_location(location: &Location) -> Option<lsp_types::Location> {
    Some(lsp_types::Location {
        uri: key_to_uri(&location.uri)?,
        range: to_lsp_range(location.range),
    })
}
