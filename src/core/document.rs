//! Text documents as delivered by the host editor or the workspace scanner.
//!
//! Positions follow the editor protocol convention: zero-based lines and
//! UTF-16 code unit columns. Byte offsets are used everywhere inside the engine
//! and converted at the edges through [`LineIndex`].

use std::fmt;

use super::index::ProjectIndex;
use super::parsers::TranslationFormat;

/// A zero-based line/character position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: u32,
    /// Column in UTF-16 code units.
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.character + 1)
    }
}

/// A half-open `[start, end)` range of positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position < self.end
    }
}

/// Byte offsets of line starts, for O(log n) offset/position conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Zero-based line containing `offset`.
    fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line - 1,
        }
    }

    /// Convert a byte offset into a position. Offsets past the end clamp to
    /// the end of the text, offsets inside a UTF-8 sequence round down.
    pub fn position_at(&self, text: &str, offset: usize) -> Position {
        let mut offset = offset.min(text.len());
        while !text.is_char_boundary(offset) {
            offset -= 1;
        }
        let line = self.line_of(offset);
        let line_start = self.line_starts[line];
        let character: usize = text[line_start..offset]
            .chars()
            .map(char::len_utf16)
            .sum();
        Position::new(line as u32, character as u32)
    }

    /// Convert a position back into a byte offset. Lines past the end clamp to
    /// the end of the text, characters past the end of a line clamp to the
    /// line end.
    pub fn offset_at(&self, text: &str, position: Position) -> usize {
        let line = position.line as usize;
        let Some(&line_start) = self.line_starts.get(line) else {
            return text.len();
        };
        let line_end = self
            .line_starts
            .get(line + 1)
            .map(|next| next - 1)
            .unwrap_or(text.len());

        let mut remaining = position.character as usize;
        for (i, c) in text[line_start..line_end].char_indices() {
            if remaining == 0 {
                return line_start + i;
            }
            remaining = remaining.saturating_sub(c.len_utf16());
        }
        line_end
    }
}

/// A full-text snapshot of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    uri: String,
    language_id: String,
    text: String,
    line_index: LineIndex,
}

impl TextDocument {
    pub fn new(
        uri: impl Into<String>,
        language_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        let text = text.into();
        let line_index = LineIndex::new(&text);
        Self {
            uri: uri.into(),
            language_id: language_id.into(),
            text,
            line_index,
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn language_id(&self) -> &str {
        &self.language_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position_at(&self, offset: usize) -> Position {
        self.line_index.position_at(&self.text, offset)
    }

    pub fn offset_at(&self, position: Position) -> usize {
        self.line_index.offset_at(&self.text, position)
    }

    pub fn range_of(&self, span: &std::ops::Range<usize>) -> Range {
        Range::new(self.position_at(span.start), self.position_at(span.end))
    }

    /// The text of a zero-based line, without its line terminator.
    pub fn line_text(&self, line: u32) -> Option<&str> {
        let start = self.offset_at(Position::new(line, 0));
        if line as usize >= self.line_index.line_count() {
            return None;
        }
        let rest = &self.text[start..];
        let line = rest.split('\n').next().unwrap_or(rest);
        Some(line.strip_suffix('\r').unwrap_or(line))
    }

    /// Lowercased file extension of the URI, if any.
    pub fn extension(&self) -> Option<String> {
        let name = self.uri.rsplit(['/', '\\']).next()?;
        let (_, ext) = name.rsplit_once('.')?;
        Some(ext.to_ascii_lowercase())
    }
}

/// How the engine treats a changed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// A translation resource parsed with the given format.
    Translation(TranslationFormat),
    /// JSON that no known project claims yet. Becomes a translation once a
    /// project list claims its URI.
    UnclaimedJson,
    /// An HTML-like template that may carry i18n annotations.
    Markup,
    /// Anything else; ignored.
    Other,
}

impl DocumentKind {
    /// Classify a document by extension and language id.
    ///
    /// JSON files only count as translations when a known project claims them,
    /// otherwise every `package.json` would end up in the store.
    pub fn classify(document: &TextDocument, projects: &ProjectIndex) -> Self {
        let extension = document.extension();
        let language = document.language_id();

        match extension.as_deref() {
            Some("xlf" | "xliff") => return DocumentKind::Translation(TranslationFormat::Xliff),
            Some("html" | "htm") => return DocumentKind::Markup,
            _ => {}
        }

        let is_json = matches!(extension.as_deref(), Some("json"))
            || matches!(language, "json" | "jsonc");
        if is_json {
            return if projects.project_for_translation_file(document.uri()).is_some() {
                DocumentKind::Translation(TranslationFormat::Json)
            } else {
                DocumentKind::UnclaimedJson
            };
        }

        if language == "html" {
            DocumentKind::Markup
        } else {
            DocumentKind::Other
        }
    }
}
