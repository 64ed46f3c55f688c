//! Pattern rules for syntax highlighting
//!
//! This module defines the rule type the tokenizers iterate over.
//! Patterns go through `fancy_regex` because the grammar relies on
//! backreferences (an overline must be repeated as the underline).

use std::ops::Range;

use fancy_regex::Regex;
use tracing::warn;

use super::tokens::{StyleId, TokenType};
use crate::error::{LexerError, Result};

/// Where a rule is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Matched anchored at the tokenizer's offset, in multiline mode
    Block,
    /// Matched anywhere within one physical line
    Inline,
}

/// A single named pattern rule
///
/// Rules are tried in declaration order; the first one that matches wins.
pub struct TokenRule {
    /// Name for debugging
    pub name: String,
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Block or inline
    pub scope: Scope,
    /// Token type to assign to matches
    pub token_type: TokenType,
    /// Pattern starts with `^` and can only match at a line start
    line_anchored: bool,
}

impl TokenRule {
    /// Compile a rule
    ///
    /// Block patterns are wrapped in `\A(?:...)` with multiline and
    /// case-insensitive flags, so matching a slice starting at the
    /// tokenizer offset is an anchored match. Inline patterns only get the
    /// case-insensitive flag; `^` then means start of the line.
    pub fn new(name: &str, pattern: &str, scope: Scope, token_type: TokenType) -> Result<Self> {
        let source = match scope {
            Scope::Block => format!(r"(?mi)\A(?:{pattern})"),
            Scope::Inline => format!("(?i){pattern}"),
        };
        let regex = Regex::new(&source).map_err(|source| LexerError::Pattern {
            rule: name.to_string(),
            source,
        })?;
        Ok(Self {
            name: name.to_string(),
            pattern: regex,
            scope,
            token_type,
            line_anchored: pattern.starts_with('^'),
        })
    }

    /// Style id committed for matches of this rule
    pub fn style(&self) -> StyleId {
        self.token_type.id()
    }

    /// Match anchored at byte offset `pos` of `text`
    ///
    /// `at_line_start` tells whether `pos` begins a physical line; `^`
    /// rules are not tried otherwise. Returns the match length in bytes.
    /// Empty matches are reported as no match so callers always advance.
    pub fn match_at(&self, text: &str, pos: usize, at_line_start: bool) -> Option<usize> {
        if self.line_anchored && !at_line_start {
            return None;
        }
        let rest = text.get(pos..)?;
        match self.pattern.find(rest) {
            Ok(Some(m)) if m.start() == 0 && m.end() > 0 => Some(m.end()),
            Ok(_) => None,
            Err(err) => {
                warn!(rule = %self.name, offset = pos, error = %err, "rule failed at runtime");
                None
            }
        }
    }

    /// Byte ranges of capture group 1 for every non-overlapping match in `line`
    ///
    /// Patterns may consume context characters around the group; only the
    /// group is reported. Falls back to the whole match for patterns
    /// without a group.
    pub fn find_groups(&self, line: &str) -> Vec<Range<usize>> {
        let mut ranges = Vec::new();
        for caps in self.pattern.captures_iter(line) {
            let caps = match caps {
                Ok(caps) => caps,
                Err(err) => {
                    warn!(rule = %self.name, error = %err, "rule failed at runtime");
                    break;
                }
            };
            if let Some(m) = caps.get(1).or_else(|| caps.get(0)) {
                if m.end() > m.start() {
                    ranges.push(m.start()..m.end());
                }
            }
        }
        ranges
    }
}

impl std::fmt::Debug for TokenRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRule")
            .field("name", &self.name)
            .field("scope", &self.scope)
            .field("token_type", &self.token_type)
            .finish()
    }
}
