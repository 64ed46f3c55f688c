//! Error types for rstlex

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for lexer operations
pub type Result<T> = std::result::Result<T, LexerError>;

/// Lexer error types
#[derive(Error, Debug)]
pub enum LexerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid pattern for rule `{rule}`: {source}")]
    Pattern {
        rule: String,
        #[source]
        source: fancy_regex::Error,
    },

    #[error("malformed default style {id}: `{directive}`")]
    DefaultStyle { id: u8, directive: String },

    #[error("no block rule matches at offset {offset}")]
    NoRuleMatched { offset: usize },

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("{0}")]
    Usage(String),
}
