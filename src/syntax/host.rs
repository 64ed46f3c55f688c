//! Host buffer interface
//!
//! The lexer never owns the text. It reads ranges and previously
//! committed styles through [`HostBuffer`] and writes new styles back
//! through [`HostBuffer::commit_style`]. All positions are byte offsets.

use std::borrow::Cow;

use super::tokens::StyleId;

/// Line terminator used by a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EolMode {
    #[default]
    Lf,
    CrLf,
    Cr,
}

impl EolMode {
    /// The terminator text
    pub fn as_str(self) -> &'static str {
        match self {
            EolMode::Lf => "\n",
            EolMode::CrLf => "\r\n",
            EolMode::Cr => "\r",
        }
    }

    /// Guess the terminator from the first line break in `text`
    pub fn detect(text: &str) -> Self {
        match text.find(['\r', '\n']) {
            Some(pos) if text[pos..].starts_with("\r\n") => EolMode::CrLf,
            Some(pos) if text.as_bytes()[pos] == b'\r' => EolMode::Cr,
            _ => EolMode::Lf,
        }
    }
}

/// Text surface the lexer styles
pub trait HostBuffer {
    /// Byte-exact text of `[start, end)`
    fn text(&self, start: usize, end: usize) -> Cow<'_, str>;

    /// Line and byte column containing `pos`
    fn line_index_from_byte_pos(&self, pos: usize) -> (usize, usize);

    /// Byte position of `column` on `line`, clamped to the document length
    fn byte_pos_from_line_index(&self, line: usize, column: usize) -> usize;

    /// Style currently committed at `pos`; past the end this is style 0
    fn style_at(&self, pos: usize) -> StyleId;

    /// Assign `style` to `length` bytes starting at `start`
    fn commit_style(&mut self, start: usize, length: usize, style: StyleId);

    /// Document length in bytes
    fn document_length(&self) -> usize;

    /// Line terminator in use
    fn eol_mode(&self) -> EolMode {
        EolMode::Lf
    }

    /// Full text of `line`, including its terminator
    fn line_text(&self, line: usize) -> Cow<'_, str> {
        let start = self.byte_pos_from_line_index(line, 0);
        let end = self.byte_pos_from_line_index(line + 1, 0);
        self.text(start, end)
    }
}
