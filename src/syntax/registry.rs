//! Style registry
//!
//! Maps style ids to display properties. The table starts from the
//! compiled defaults in [`TokenType::default_directives`] and can be
//! overridden per id from a properties file.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info, warn};

use super::style::{Color, StyleProperty};
use super::tokens::{self, StyleId, TokenType};
use crate::config::{split_directives, Properties};
use crate::error::{LexerError, Result};

/// A single parsed style directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Fore(Color),
    Back(Color),
    Font(String),
    Bold,
    Italic,
    Underline,
}

impl Directive {
    /// Parse one directive; `None` for anything unknown or malformed
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(value) = s.strip_prefix("face:").or_else(|| s.strip_prefix("fore:")) {
            return Color::from_hex(value).map(Directive::Fore);
        }
        if let Some(value) = s.strip_prefix("back:") {
            return Color::from_hex(value).map(Directive::Back);
        }
        if let Some(family) = s.strip_prefix("$(font.").and_then(|v| v.strip_suffix(')')) {
            let family = family.trim();
            return (!family.is_empty()).then(|| Directive::Font(family.to_string()));
        }
        match s {
            "bold" => Some(Directive::Bold),
            "italic" => Some(Directive::Italic),
            "underline" => Some(Directive::Underline),
            _ => None,
        }
    }

    /// Apply to a property
    pub fn apply(&self, prop: &mut StyleProperty) {
        match self {
            Directive::Fore(color) => prop.fg = *color,
            Directive::Back(color) => prop.bg = Some(*color),
            Directive::Font(family) => prop.font = Some(family.clone()),
            Directive::Bold => prop.bold = true,
            Directive::Italic => prop.italic = true,
            Directive::Underline => prop.underline = true,
        }
    }
}

/// Style id to display property table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRegistry {
    properties: BTreeMap<StyleId, StyleProperty>,
    default_color: Color,
    default_paper: Color,
    fallback: StyleProperty,
}

impl StyleRegistry {
    /// Create a registry holding the compiled defaults
    pub fn new() -> Result<Self> {
        let mut registry = Self {
            properties: BTreeMap::new(),
            default_color: Color::BLACK,
            default_paper: Color::WHITE,
            fallback: StyleProperty::fg(Color::BLACK),
        };
        registry.load_defaults()?;
        Ok(registry)
    }

    /// Reset the table to the compiled defaults
    ///
    /// Unlike user overrides, a malformed default directive is an error:
    /// the table would be meaningless without it.
    pub fn load_defaults(&mut self) -> Result<()> {
        let mut properties = BTreeMap::new();
        for token_type in tokens::ALL {
            let mut prop = StyleProperty::fg(self.default_color);
            for raw in split_directives(token_type.default_directives()) {
                let directive = Directive::parse(raw).ok_or_else(|| LexerError::DefaultStyle {
                    id: token_type.id(),
                    directive: raw.to_string(),
                })?;
                directive.apply(&mut prop);
            }
            properties.insert(token_type.id(), prop);
        }
        self.properties = properties;
        debug!(styles = self.properties.len(), "default styles loaded");
        Ok(())
    }

    /// Apply overrides from a properties file
    ///
    /// A missing file is not an error. Returns how many styles the file
    /// touched.
    pub fn load_user_overrides(&mut self, path: &Path) -> Result<usize> {
        if !path.is_file() {
            debug!(path = %path.display(), "no properties file, keeping current styles");
            return Ok(0);
        }
        let props = Properties::load(path)?;
        info!(path = %path.display(), entries = props.len(), "loading style properties");
        Ok(self.apply_properties(&props))
    }

    /// Apply overrides from parsed properties
    ///
    /// Only ids present in the table are read. Directives merge onto the
    /// current property; unknown or malformed ones are skipped.
    pub fn apply_properties(&mut self, props: &Properties) -> usize {
        let mut touched = 0;
        for (&id, prop) in self.properties.iter_mut() {
            let Some(directives) = props.style_directives(id) else {
                continue;
            };
            for raw in directives {
                match Directive::parse(raw) {
                    Some(directive) => directive.apply(prop),
                    None => warn!(style = id, directive = raw, "ignoring style directive"),
                }
            }
            touched += 1;
        }
        touched
    }

    /// Reset to defaults, then apply `path` if given
    ///
    /// Running this twice with the same file yields the same table.
    pub fn reload(&mut self, path: Option<&Path>) -> Result<usize> {
        self.load_defaults()?;
        match path {
            Some(path) => self.load_user_overrides(path),
            None => Ok(0),
        }
    }

    /// Display property for `id`, falling back to the default color
    pub fn resolve(&self, id: StyleId) -> &StyleProperty {
        self.properties.get(&id).unwrap_or(&self.fallback)
    }

    /// Default foreground color
    pub fn default_color(&self) -> Color {
        self.default_color
    }

    /// Default background color
    pub fn default_paper(&self) -> Color {
        self.default_paper
    }

    /// Category name for a style id
    pub fn name_of(&self, id: StyleId) -> Option<&'static str> {
        TokenType::from_id(id).map(TokenType::name)
    }

    /// Style id for a category name
    pub fn id_of(&self, name: &str) -> Option<StyleId> {
        TokenType::from_name(name).map(TokenType::id)
    }
}
