//! Token types for reStructuredText highlighting
//!
//! Every style id the lexer can commit maps to one semantic category.
//! Several grammar rules share a category (both `title` and `section`
//! commit [`TokenType::Title`]), so the id is what the host stores and
//! what the properties file keys on.

/// Style identifier as stored by the host buffer
pub type StyleId = u8;

/// Semantic token categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenType {
    /// Plain paragraph text, colons, fields and directives
    Default = 0,
    /// `.. comment`
    Comment = 1,
    /// Section titles, with or without overline
    Title = 2,
    /// Transition lines between paragraphs
    Transition = 3,
    /// Bullet and enumerated list items
    List = 4,
    /// Definition list items
    Definition = 5,
    /// Field name inside a field list
    Field = 6,
    /// Option list items
    Option = 7,
    /// Literal blocks (never inline-highlighted)
    Literal = 8,
    /// Line blocks
    LineBlock = 9,
    /// Block quotes
    Quote = 10,
    /// `>>>` doctest blocks
    Doctest = 11,
    /// Grid and simple tables
    Table = 12,
    /// Footnote definitions
    Footnote = 13,
    /// Hyperlink targets
    Target = 14,
    /// Directive keyword (`note`, `image`, ...)
    Directive = 15,
    /// `*emphasis*`
    Emphasis = 16,
    /// `**strong**`
    Strong = 17,
    /// ``` ``inline literal`` ```
    InlineLiteral = 18,
    /// Standalone and embedded URLs
    Url = 19,
    /// Hyperlink references
    Link = 20,
    /// Footnote references
    FootnoteRef = 21,
    /// `|substitution|`
    Substitution = 22,
    /// Inline targets
    InlineTarget = 23,
    /// Interpreted text with a role
    Reference = 24,
    /// Trailing whitespace
    UnusedSpace = 25,
    /// Line terminators and blank lines
    Newline = 31,
}

/// All categories, in id order
pub const ALL: [TokenType; 27] = [
    TokenType::Default,
    TokenType::Comment,
    TokenType::Title,
    TokenType::Transition,
    TokenType::List,
    TokenType::Definition,
    TokenType::Field,
    TokenType::Option,
    TokenType::Literal,
    TokenType::LineBlock,
    TokenType::Quote,
    TokenType::Doctest,
    TokenType::Table,
    TokenType::Footnote,
    TokenType::Target,
    TokenType::Directive,
    TokenType::Emphasis,
    TokenType::Strong,
    TokenType::InlineLiteral,
    TokenType::Url,
    TokenType::Link,
    TokenType::FootnoteRef,
    TokenType::Substitution,
    TokenType::InlineTarget,
    TokenType::Reference,
    TokenType::UnusedSpace,
    TokenType::Newline,
];

impl TokenType {
    /// Style id committed to the host
    pub fn id(self) -> StyleId {
        self as StyleId
    }

    /// Look up a category by style id
    pub fn from_id(id: StyleId) -> Option<Self> {
        ALL.iter().copied().find(|t| t.id() == id)
    }

    /// Whether lines starting in this category are exempt from inline styling
    pub fn is_verbatim(self) -> bool {
        matches!(self, TokenType::Literal)
    }

    /// Compiled-in display directives, in properties-file syntax
    pub fn default_directives(self) -> &'static str {
        match self {
            TokenType::Default => "fore:#000000",
            TokenType::Comment => "fore:#4e9a06",
            TokenType::Title => "fore:#204a87,bold",
            TokenType::Transition => "fore:#888a85",
            TokenType::List => "fore:#5c3566",
            TokenType::Definition => "fore:#845902",
            TokenType::Field => "fore:#a40000",
            TokenType::Option => "fore:#3465a4,back:#eeeeec",
            TokenType::Literal => "fore:#3465a4,back:#eeeeec,$(font.Monospace)",
            TokenType::LineBlock => "fore:#8f5902",
            TokenType::Quote => "fore:#8f5902",
            TokenType::Doctest => "fore:#3465a4,back:#eeeeec",
            TokenType::Table => "fore:#ce5c00",
            TokenType::Footnote => "fore:#555753",
            TokenType::Target => "fore:#4e9a06",
            TokenType::Directive => "fore:#a40000",
            TokenType::Emphasis => "italic",
            TokenType::Strong => "bold",
            TokenType::InlineLiteral => "fore:#3465a4,back:#eeeeec,$(font.Monospace)",
            TokenType::Url => "fore:#4e9a06,underline",
            TokenType::Link => "fore:#4e9a06,underline",
            TokenType::FootnoteRef => "fore:#555753",
            TokenType::Substitution => "fore:#4e9a06",
            TokenType::InlineTarget => "fore:#4e9a06",
            TokenType::Reference => "fore:#4e9a06",
            TokenType::UnusedSpace => "back:#ef2929",
            TokenType::Newline => "fore:#000000",
        }
    }

    /// Get a human-readable name for this token type
    pub fn name(self) -> &'static str {
        match self {
            TokenType::Default => "string",
            TokenType::Comment => "comment",
            TokenType::Title => "title",
            TokenType::Transition => "transition",
            TokenType::List => "list",
            TokenType::Definition => "definition",
            TokenType::Field => "field",
            TokenType::Option => "option",
            TokenType::Literal => "literal",
            TokenType::LineBlock => "line",
            TokenType::Quote => "quote",
            TokenType::Doctest => "doctest",
            TokenType::Table => "table",
            TokenType::Footnote => "footnote",
            TokenType::Target => "target",
            TokenType::Directive => "directive",
            TokenType::Emphasis => "emphasis",
            TokenType::Strong => "strong",
            TokenType::InlineLiteral => "inline_literal",
            TokenType::Url => "url",
            TokenType::Link => "link",
            TokenType::FootnoteRef => "footnote_ref",
            TokenType::Substitution => "substitution",
            TokenType::InlineTarget => "inline_target",
            TokenType::Reference => "reference",
            TokenType::UnusedSpace => "unused_space",
            TokenType::Newline => "newline",
        }
    }

    /// Parse a token type from its name
    pub fn from_name(name: &str) -> Option<Self> {
        ALL.iter().copied().find(|t| t.name() == name)
    }
}
