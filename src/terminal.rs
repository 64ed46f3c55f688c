//! Terminal rendering using crossterm
//!
//! Styled documents are written as ANSI sequences to any [`Write`] sink,
//! so the same renderer drives stdout and in-memory buffers.

use std::io::Write;

use crossterm::{
    queue,
    style::{
        Attribute, Attributes, Color as TermColor, ContentStyle, Print, ResetColor, SetAttribute,
        SetStyle,
    },
};

use crate::document::Document;
use crate::error::Result;
use crate::syntax::{Color, HostBuffer, StyleProperty, StyleRegistry};

impl From<Color> for TermColor {
    fn from(color: Color) -> Self {
        TermColor::Rgb {
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }
}

/// Convert a style property to a crossterm style
///
/// Terminals pick their own font, so `font` is dropped.
pub fn content_style(prop: &StyleProperty) -> ContentStyle {
    let mut attributes = Attributes::default();
    if prop.bold {
        attributes.set(Attribute::Bold);
    }
    if prop.italic {
        attributes.set(Attribute::Italic);
    }
    if prop.underline {
        attributes.set(Attribute::Underlined);
    }

    ContentStyle {
        foreground_color: Some(prop.fg.into()),
        background_color: prop.bg.map(TermColor::from),
        underline_color: None,
        attributes,
    }
}

/// Writes styled documents to a terminal sink
pub struct Renderer<'a, W: Write> {
    out: W,
    registry: &'a StyleRegistry,
}

impl<'a, W: Write> Renderer<'a, W> {
    pub fn new(out: W, registry: &'a StyleRegistry) -> Self {
        Self { out, registry }
    }

    /// Write the document with its committed styles
    ///
    /// Attributes are reset before every line terminator (in the
    /// document's EOL mode) so a background never bleeds past the end of
    /// a line.
    pub fn render(&mut self, doc: &Document) -> Result<()> {
        let text = doc.as_str();
        let eol = doc.eol_mode().as_str();
        for (range, id) in doc.style_runs() {
            let style = content_style(self.registry.resolve(id));
            for (i, segment) in text[range].split(eol).enumerate() {
                if i > 0 {
                    queue!(self.out, Print(eol))?;
                }
                if !segment.is_empty() {
                    queue!(
                        self.out,
                        SetStyle(style),
                        Print(segment),
                        ResetColor,
                        SetAttribute(Attribute::Reset)
                    )?;
                }
            }
        }
        self.out.flush()?;
        Ok(())
    }

    /// Write one line per style run: byte range, category and text
    pub fn render_spans(&mut self, doc: &Document) -> Result<()> {
        let text = doc.as_str();
        for (range, id) in doc.style_runs() {
            let name = self.registry.name_of(id).unwrap_or("unknown");
            writeln!(
                self.out,
                "{}..{}\t{}\t{:?}",
                range.start,
                range.end,
                name,
                &text[range.clone()]
            )?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Consume the renderer, returning the sink
    pub fn into_inner(self) -> W {
        self.out
    }
}
