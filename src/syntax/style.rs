//! Style types for rendering
//!
//! This module provides the display properties a style id resolves to,
//! and the flat `(span, style)` assignments the tokenizers emit.

use std::fmt;

use super::tokens::StyleId;

/// An RGB color, written `#RRGGBB` in properties files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    /// Create a color from components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `#RGB`
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::rgb(r, g, b))
            }
            3 => {
                let mut parts = [0u8; 3];
                for (slot, digit) in parts.iter_mut().zip(hex.chars()) {
                    let v = digit.to_digit(16)? as u8;
                    *slot = v * 0x11;
                }
                Some(Self::rgb(parts[0], parts[1], parts[2]))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Display properties for one style id
///
/// `fg` is always concrete; everything else left unset inherits the
/// editor's default paper and font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleProperty {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Option<Color>,
    /// Font family override
    pub font: Option<String>,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
}

impl Default for StyleProperty {
    fn default() -> Self {
        Self::fg(Color::BLACK)
    }
}

impl StyleProperty {
    /// Create a property with just a foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            bg: None,
            font: None,
            bold: false,
            italic: false,
            underline: false,
        }
    }
}

/// A styled run of text
///
/// `start` and `len` are byte counts, never char counts: the host surface
/// indexes its style buffer by byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledSpan {
    /// Byte offset where this span starts
    pub start: usize,
    /// Length in bytes
    pub len: usize,
    /// Style to apply to this span
    pub style: StyleId,
}

impl StyledSpan {
    /// Create a new span
    pub fn new(start: usize, len: usize, style: StyleId) -> Self {
        Self { start, len, style }
    }

    /// Byte offset just past the span
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}
