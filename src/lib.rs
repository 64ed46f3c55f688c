//! rstlex - incremental reStructuredText syntax highlighting
//!
//! The lexer styles a host buffer in place: block constructs first, then
//! inline markup per line, re-tokenizing only the region an edit can
//! affect.

pub mod config;
pub mod document;
pub mod error;
pub mod syntax;
pub mod terminal;

pub use document::Document;
pub use error::{LexerError, Result};
pub use syntax::{HostBuffer, RestLexer, StyleRegistry};
