//! Properties file support
//!
//! Style overrides are read from `rst.properties`. Two locations are
//! consulted in order and the first file that exists wins; the files are
//! never merged:
//!
//! 1. `$XDG_CONFIG_HOME/rstlex/rst.properties` (or `~/.config/rstlex/...`)
//! 2. `<prefix>/share/rstlex/rst.properties` for the first prefix with a
//!    `share/rstlex` directory
//!
//! Format: `key = value` pairs, one per line. Lines starting with `#` or
//! `;` are comments.
//!
//! Example:
//! ```text
//! # rstlex styles
//! [General]
//! style.rst.2 = face:#204a87,bold
//! style.rst.16 = italic,underline
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;

/// Application directory name under config and data roots
pub const APP_NAME: &str = "rstlex";

/// File name of the style properties file
pub const PROPERTIES_FILE: &str = "rst.properties";

/// Key prefix for style entries
pub const STYLE_KEY_PREFIX: &str = "style.rst.";

/// User-writable properties path
pub fn user_properties_path() -> Option<PathBuf> {
    let config_home = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir().map(|home| home.join(".config")))?;
    Some(config_home.join(APP_NAME).join(PROPERTIES_FILE))
}

/// Packaged default properties path
///
/// Prefixes are tried in order: `$RSTLEX_PREFIX`, `/usr/local`, `/usr`,
/// `~/.local`. The first one with a `share/rstlex` directory is used.
pub fn packaged_properties_path() -> Option<PathBuf> {
    let mut prefixes: Vec<PathBuf> = Vec::new();
    if let Some(prefix) = std::env::var_os("RSTLEX_PREFIX").filter(|v| !v.is_empty()) {
        prefixes.push(PathBuf::from(prefix));
    }
    prefixes.push(PathBuf::from("/usr/local"));
    prefixes.push(PathBuf::from("/usr"));
    if let Some(home) = home_dir() {
        prefixes.push(home.join(".local"));
    }

    prefixes
        .into_iter()
        .map(|prefix| prefix.join("share").join(APP_NAME))
        .find(|dir| dir.is_dir())
        .map(|dir| dir.join(PROPERTIES_FILE))
}

/// First existing properties file, in priority order
pub fn find_properties_file() -> Option<PathBuf> {
    let candidates = [user_properties_path(), packaged_properties_path()];
    first_existing(candidates.into_iter().flatten())
}

/// First path in `candidates` that exists
fn first_existing(candidates: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|path| {
        let exists = path.is_file();
        debug!(path = %path.display(), exists, "properties candidate");
        exists
    })
}

fn home_dir() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var_os("USERPROFILE").map(PathBuf::from)
    }

    #[cfg(not(windows))]
    {
        std::env::var_os("HOME").map(PathBuf::from)
    }
}

/// Parsed properties file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    values: HashMap<String, String>,
}

impl Properties {
    /// Read and parse a properties file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(Self::parse(&contents))
    }

    /// Parse properties file contents
    ///
    /// Keys outside the top level or a `[General]` section are dropped.
    /// A later duplicate key replaces an earlier one.
    pub fn parse(contents: &str) -> Self {
        let mut values = HashMap::new();
        let mut in_general = true;

        for line in contents.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                in_general = section.trim().eq_ignore_ascii_case("general");
                continue;
            }

            if !in_general {
                continue;
            }

            // Parse key = value
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim().to_string();
                let value = unquote(value.trim()).to_string();
                values.insert(key, value);
            }
        }

        Self { values }
    }

    /// Raw value for `key`
    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Directive list for style `id`, if the file sets a non-empty one
    pub fn style_directives(&self, id: u8) -> Option<Vec<&str>> {
        let value = self.get(&format!("{STYLE_KEY_PREFIX}{id}"))?;
        let directives: Vec<&str> = split_directives(value).collect();
        if directives.is_empty() {
            None
        } else {
            Some(directives)
        }
    }

    /// Number of entries
    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }
}

/// Split a comma-separated directive list, dropping empty items
pub fn split_directives(value: &str) -> impl Iterator<Item = &str> + '_ {
    value.split(',').map(str::trim).filter(|d| !d.is_empty())
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
