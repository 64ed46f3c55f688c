//! Syntax and styling module
//!
//! This module provides the reStructuredText highlighter:
//! - Rule grammar and its compiled form
//! - Block and inline tokenizers
//! - Style registry with properties-file overrides
//! - Incremental re-style driver over a host buffer

mod grammar;
mod host;
mod manager;
mod registry;
mod rest;
mod rules;
mod style;
mod tokenizer;
mod tokens;

pub use grammar::Grammar;
pub use host::{EolMode, HostBuffer};
pub use manager::{stable_region, RestLexer};
pub use registry::{Directive, StyleRegistry};
pub use rest::{RuleDef, DIRECTIVE_KEYWORDS, RULES};
pub use rules::{Scope, TokenRule};
pub use style::{Color, StyleProperty, StyledSpan};
pub use tokenizer::{is_block_boundary, tokenize_block, tokenize_inline};
pub use tokens::{StyleId, TokenType};
