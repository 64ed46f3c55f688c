//! Document representation - text with a per-byte style buffer
//!
//! This is the reference [`HostBuffer`]: it keeps one style id per byte,
//! the way an editing surface does, and shifts styles along with edits.

use std::borrow::Cow;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::error::{LexerError, Result};
use crate::syntax::{EolMode, HostBuffer, StyleId};

/// A text document with committed styles
#[derive(Debug, Clone)]
pub struct Document {
    /// Text content
    text: String,
    /// One style id per byte of `text`
    styles: Vec<StyleId>,
    /// Byte offset of each line start; always starts with 0
    line_starts: Vec<usize>,
    /// Line terminator in use
    eol: EolMode,
    /// Document name (e.g., file name)
    name: String,
    /// Associated file path
    filename: Option<PathBuf>,
    /// Whether the text changed since it was loaded
    modified: bool,
}

impl Document {
    /// Create a document holding `text`, all bytes in style 0
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let mut doc = Self {
            styles: vec![0; text.len()],
            line_starts: Vec::new(),
            eol: EolMode::detect(&text),
            name: name.into(),
            filename: None,
            modified: false,
            text,
        };
        doc.rebuild_lines();
        doc
    }

    /// Create a document from file contents
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => LexerError::FileNotFound(path.to_path_buf()),
            _ => LexerError::Io(err),
        })?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());

        let mut doc = Self::from_text(name, content);
        doc.filename = Some(path.to_path_buf());
        Ok(doc)
    }

    /// Get document name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get filename if set
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Check if the document was edited
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Get the text content
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Committed styles, one per byte
    pub fn styles(&self) -> &[StyleId] {
        &self.styles
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the document is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Get number of lines
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Insert text at a byte position, returning the inserted range
    ///
    /// Inserted bytes start out in style 0; styles after `pos` shift.
    pub fn insert(&mut self, pos: usize, s: &str) -> Range<usize> {
        let pos = floor_char_boundary(&self.text, pos);
        self.text.insert_str(pos, s);
        self.styles.splice(pos..pos, std::iter::repeat(0).take(s.len()));
        self.rebuild_lines();
        self.modified = true;
        pos..pos + s.len()
    }

    /// Delete a byte range, returning the (empty) range left behind
    pub fn delete(&mut self, range: Range<usize>) -> Range<usize> {
        let start = floor_char_boundary(&self.text, range.start);
        let end = ceil_char_boundary(&self.text, range.end.max(start));
        self.text.replace_range(start..end, "");
        self.styles.drain(start..end);
        self.rebuild_lines();
        self.modified = true;
        start..start
    }

    /// Consecutive byte ranges sharing a style, split on char boundaries
    pub fn style_runs(&self) -> Vec<(Range<usize>, StyleId)> {
        let mut runs: Vec<(Range<usize>, StyleId)> = Vec::new();
        for (pos, ch) in self.text.char_indices() {
            let style = self.styles[pos];
            let end = pos + ch.len_utf8();
            match runs.last_mut() {
                Some((range, last)) if *last == style => range.end = end,
                _ => runs.push((pos..end, style)),
            }
        }
        runs
    }

    fn rebuild_lines(&mut self) {
        let bytes = self.text.as_bytes();
        self.line_starts.clear();
        self.line_starts.push(0);
        for (i, &b) in bytes.iter().enumerate() {
            let is_break = match b {
                b'\n' => true,
                b'\r' => bytes.get(i + 1) != Some(&b'\n'),
                _ => false,
            };
            if is_break {
                self.line_starts.push(i + 1);
            }
        }
    }
}

impl HostBuffer for Document {
    fn text(&self, start: usize, end: usize) -> Cow<'_, str> {
        let start = floor_char_boundary(&self.text, start);
        let end = ceil_char_boundary(&self.text, end);
        if start >= end {
            return Cow::Borrowed("");
        }
        Cow::Borrowed(&self.text[start..end])
    }

    fn line_index_from_byte_pos(&self, pos: usize) -> (usize, usize) {
        let pos = pos.min(self.text.len());
        let line = self.line_starts.partition_point(|&start| start <= pos) - 1;
        (line, pos - self.line_starts[line])
    }

    fn byte_pos_from_line_index(&self, line: usize, column: usize) -> usize {
        let Some(&start) = self.line_starts.get(line) else {
            return self.text.len();
        };
        let line_end = self
            .line_starts
            .get(line + 1)
            .copied()
            .unwrap_or(self.text.len());
        (start + column).min(line_end)
    }

    fn style_at(&self, pos: usize) -> StyleId {
        self.styles.get(pos).copied().unwrap_or(0)
    }

    fn commit_style(&mut self, start: usize, length: usize, style: StyleId) {
        let end = start.saturating_add(length).min(self.styles.len());
        if start < end {
            self.styles[start..end].fill(style);
        }
    }

    fn document_length(&self) -> usize {
        self.text.len()
    }

    fn eol_mode(&self) -> EolMode {
        self.eol
    }
}

/// Nearest char boundary at or before `pos`
fn floor_char_boundary(s: &str, pos: usize) -> usize {
    if pos >= s.len() {
        return s.len();
    }
    let mut p = pos;
    while p > 0 && !s.is_char_boundary(p) {
        p -= 1;
    }
    p
}

/// Nearest char boundary at or after `pos`
fn ceil_char_boundary(s: &str, pos: usize) -> usize {
    if pos >= s.len() {
        return s.len();
    }
    let mut p = pos;
    while p < s.len() && !s.is_char_boundary(p) {
        p += 1;
    }
    p
}
