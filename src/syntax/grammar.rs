//! Compiled grammar
//!
//! A [`Grammar`] is the ordered block and inline rule lists compiled once
//! from a rule table. It is immutable afterwards and shared by reference
//! with the tokenizers.

use tracing::debug;

use super::rest::{self, RuleDef, KEYWORDS_PLACEHOLDER};
use super::rules::{Scope, TokenRule};
use crate::error::Result;

/// Ordered block and inline rules
#[derive(Debug)]
pub struct Grammar {
    /// Block rules, in priority order
    block: Vec<TokenRule>,
    /// Inline rules, in application order
    inline: Vec<TokenRule>,
}

impl Grammar {
    /// Compile the built-in reStructuredText grammar
    pub fn rest() -> Result<Self> {
        Self::compile(rest::RULES, rest::DIRECTIVE_KEYWORDS)
    }

    /// Compile a rule table
    ///
    /// Each rule lands in the block or inline list according to its scope,
    /// keeping table order. `{keywords}` in a pattern is replaced by the
    /// escaped alternation of `keywords`.
    pub fn compile(defs: &[RuleDef], keywords: &[&str]) -> Result<Self> {
        let alternation = keywords
            .iter()
            .map(|kw| regex::escape(kw))
            .collect::<Vec<_>>()
            .join("|");

        let mut block = Vec::new();
        let mut inline = Vec::new();
        for def in defs {
            let pattern = def.pattern.replace(KEYWORDS_PLACEHOLDER, &alternation);
            let rule = TokenRule::new(def.name, &pattern, def.scope, def.token_type)?;
            match def.scope {
                Scope::Block => block.push(rule),
                Scope::Inline => inline.push(rule),
            }
        }
        debug!(block = block.len(), inline = inline.len(), "grammar compiled");
        Ok(Self { block, inline })
    }

    /// Block rules, in priority order
    pub fn block_rules(&self) -> &[TokenRule] {
        &self.block
    }

    /// Inline rules, in application order
    pub fn inline_rules(&self) -> &[TokenRule] {
        &self.inline
    }
}
