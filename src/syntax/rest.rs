//! reStructuredText grammar table

use super::rules::Scope;
use super::tokens::TokenType;

/// One entry of a grammar table, before compilation
#[derive(Debug, Clone, Copy)]
pub struct RuleDef {
    pub name: &'static str,
    pub pattern: &'static str,
    pub scope: Scope,
    pub token_type: TokenType,
}

const fn block(name: &'static str, pattern: &'static str, token_type: TokenType) -> RuleDef {
    RuleDef {
        name,
        pattern,
        scope: Scope::Block,
        token_type,
    }
}

const fn inline(name: &'static str, pattern: &'static str, token_type: TokenType) -> RuleDef {
    RuleDef {
        name,
        pattern,
        scope: Scope::Inline,
        token_type,
    }
}

/// Placeholder replaced with the alternation of [`DIRECTIVE_KEYWORDS`]
pub const KEYWORDS_PLACEHOLDER: &str = "{keywords}";

/// Directive and admonition names recognised by the `in_directive` rule
pub const DIRECTIVE_KEYWORDS: &[&str] = &[
    "attention",
    "caution",
    "danger",
    "error",
    "hint",
    "important",
    "note",
    "tip",
    "warning",
    "admonition",
    "image",
    "figure",
    "topic",
    "sidebar",
    "code",
    "math",
    "rubric",
    "epigraph",
    "highlights",
    "compound",
    "container",
    "table",
    "csv-table",
    "list-table",
    "contents",
    "sectnum",
    "section-autonumbering",
    "section-numbering",
    "header",
    "footer",
    "target-notes",
    "meta",
    "include",
    "raw",
    "class",
    "role",
    "default-role",
];

/// The rule table, in priority order
///
/// Order matters for ambiguous input: a line that could start an option
/// list, a field list or plain text gets whichever rule comes first.
/// `newline`, `colon` and `string` together accept every character, so
/// the block tokenizer always finds a match.
pub const RULES: &[RuleDef] = &[
    block("title", r#"^([=`'"~^_*+#-]+)(\r\n?|\n).+\2\1\2"#, TokenType::Title),
    block("section", r#"^\w.*(\r\n?|\n)[=`'"~^_*+#-]+\1"#, TokenType::Title),
    block("transition", r#"^(\r\n?|\n)[=`'"~^_*+#-]{4,}\1\1"#, TokenType::Transition),
    block("bullet", r"^[\-+*] +.+([\r\n]+ {2,}.+)*(\r\n?|\n)", TokenType::List),
    block("enumerated", r"^(\(?(#|\w+)[.)] +)\S.*([\r\n]+ {2,}.+)*(\r\n?|\n)", TokenType::List),
    block("field", r"^:[ \w\-]+:.*([\r\n]+ +.*)*(\r\n?|\n)", TokenType::Default),
    block("option", r"^[\-/]+\w[^\r\n]+([\r\n]+ +.*)*(\r\n?|\n)", TokenType::Option),
    block("line", r"^\| .*((\r\n?|\n) .*)*(\r\n?|\n)", TokenType::LineBlock),
    block("line2", r"^( +\|) .*(\r\n?|\n)", TokenType::LineBlock),
    block("quote", r"^( {2,})\w.+([\r\n]+\1.+)*(\r\n?|\n)", TokenType::Quote),
    block("definition", r"^\w.*(\r\n?|\n) +.*([\r\n]+ +.*)*\1", TokenType::Definition),
    block("doctest", r"^>>> .+(\r\n?|\n)", TokenType::Doctest),
    block("table1", r"^( *)[\-=+]{2,}((\r\n?|\n)\1[\|+].+)+(\r\n?|\n)", TokenType::Table),
    block("table2", r"^( *)[\-=]{2,} [\-= ]+((\r\n?|\n)\1.+)+(\r\n?|\n)", TokenType::Table),
    block("literal3", r"^\.\. +code::.*(\r\n?|\n)([\r\n]+ {2,}.+)*\1", TokenType::Literal),
    block("directive", r"^\.\. +[\-\w]+::.*([\r\n]+ {2,}.+)*(\r\n?|\n)", TokenType::Default),
    block("footnote", r"^\.\. \[[^\]\r\n]+\] .+([\r\n]+ {3,}.+)*(\r\n?|\n)", TokenType::Footnote),
    block("target1", r"^\.\. _[^:\r\n]+: .*(\r\n?|\n)", TokenType::Target),
    block("comment", r"^\.\. +[\-\w].*([\r\n]+ {2,}.+)*(\r\n?|\n)", TokenType::Comment),
    block("target2", r"^__ .+(\r\n?|\n)", TokenType::Target),
    // not line anchored: these also match after a `string` or `colon` run
    block("literal", r"::(\r\n?|\n)([\r\n]+ +.*)+\1", TokenType::Literal),
    block("literal2", r"::(\r\n?|\n)([\r\n]+>+.*)+\1", TokenType::Literal),
    block("newline", r"[\r\n]+", TokenType::Newline),
    block("colon", r":+", TokenType::Default),
    block("string", r"[^:\r\n]+(?:\r\n?|\n)?", TokenType::Default),
    inline("in_emphasis", r"(\*\w[^*\r\n]*\*)", TokenType::Emphasis),
    inline("in_strong", r"(\*{2}\w[^*\r\n]*\*{2})", TokenType::Strong),
    inline("in_literal", r"(`{2}\w[^`\r\n]*`{2})", TokenType::InlineLiteral),
    inline("in_url1", r"\W(\w+://[\w\-\.:/]+)\W", TokenType::Url),
    inline("in_url2", r"(`[^<\r\n]+<[^>\r\n]+>`_)", TokenType::Url),
    inline("in_url3", r"^(\w+://[\w\-\.:/]+)\W", TokenType::Url),
    inline("in_link1", r"\W(\w+_)\W", TokenType::Link),
    inline("in_link2", r"(`\w[^`\r\n]*`_)", TokenType::Link),
    inline("in_footnote", r"(\[[\w*#]+\]_)", TokenType::FootnoteRef),
    inline("in_substitution", r"(\|\w[^\|]*\|)", TokenType::Substitution),
    inline("in_target", r"(_`\w[^`\r\n]*`)", TokenType::InlineTarget),
    inline("in_reference", r"(:\w+:`\w+`)", TokenType::Reference),
    inline("in_directive", r"^\.{2} +({keywords}):{2}", TokenType::Directive),
    inline("in_field", r"^:([^:]+):[ \r\n]", TokenType::Field),
    inline("in_unusedspace", r"( +)(\r\n?|\n)", TokenType::UnusedSpace),
];
