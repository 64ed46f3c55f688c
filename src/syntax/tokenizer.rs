//! Block and inline tokenizers
//!
//! Both work on plain `&str` and return spans relative to the text they
//! were given; committing to a host buffer is the driver's job.

use tracing::{debug, error};

use super::grammar::Grammar;
use super::style::StyledSpan;
use crate::error::{LexerError, Result};

/// Line-initial bytes that let a block from an earlier line run on
const CONTINUATION_BYTES: &[u8] = b" >\r\n=`'\"~^_*+#-";

/// Whether no block rule match can run across `pos`
///
/// Holds at a line start that follows an empty line (`\n\n`) when the
/// line does not begin with one of [`CONTINUATION_BYTES`]. No block rule
/// carries on past a blank line without one of them, so tokenizing from
/// such a position yields the same spans as tokenizing from any earlier
/// one, and a match never needs text past it.
pub fn is_block_boundary(text: &str, pos: usize) -> bool {
    let bytes = text.as_bytes();
    pos >= 2
        && bytes.get(pos - 2..pos) == Some(&b"\n\n"[..])
        && bytes.get(pos).is_some_and(|b| !CONTINUATION_BYTES.contains(b))
}

/// First block boundary after `offset`, or the text length
pub fn next_block_boundary(text: &str, offset: usize) -> usize {
    (offset + 1..text.len())
        .find(|&pos| is_block_boundary(text, pos))
        .unwrap_or(text.len())
}

/// Tokenize `text` with the block rules
///
/// Scans left to right; at each offset the first rule (in declared
/// order) matching exactly there claims the span. The returned spans are
/// contiguous and cover every byte of `text`.
///
/// `at_line_start` tells whether offset 0 begins a physical line in the
/// host document; afterwards a position is a line start when the
/// previous byte is a line terminator.
///
/// Rules only see text up to the next block boundary, so the cost of a
/// match attempt follows the paragraph rather than the document.
pub fn tokenize_block(grammar: &Grammar, text: &str, at_line_start: bool) -> Result<Vec<StyledSpan>> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut offset = 0;
    let mut window_end = 0;

    while offset < text.len() {
        if window_end <= offset {
            window_end = next_block_boundary(text, offset);
        }
        let window = &text[..window_end];

        let line_start = if offset == 0 {
            at_line_start
        } else {
            matches!(bytes[offset - 1], b'\n' | b'\r')
        };

        let matched = grammar
            .block_rules()
            .iter()
            .find_map(|rule| rule.match_at(window, offset, line_start).map(|len| (rule, len)));

        let Some((rule, len)) = matched else {
            error!(offset, rest = ?&text[offset..], "no block rule matched");
            return Err(LexerError::NoRuleMatched { offset });
        };

        debug!(rule = %rule.name, len, text = ?&text[offset..offset + len], "block match");
        spans.push(StyledSpan::new(offset, len, rule.style()));
        offset += len;
    }

    Ok(spans)
}

/// Tokenize one physical line with the inline rules
///
/// Spans come back in application order: rule by rule, and within a rule
/// left to right. Later spans overwrite earlier ones where they overlap.
pub fn tokenize_inline(grammar: &Grammar, line: &str) -> Vec<StyledSpan> {
    let mut spans = Vec::new();
    for rule in grammar.inline_rules() {
        for range in rule.find_groups(line) {
            debug!(rule = %rule.name, len = range.len(), text = ?&line[range.clone()], "inline match");
            spans.push(StyledSpan::new(range.start, range.len(), rule.style()));
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::rest::RuleDef;
    use crate::syntax::rules::Scope;
    use crate::syntax::tokens::TokenType;

    fn grammar() -> Grammar {
        Grammar::rest().unwrap()
    }

    fn block(text: &str) -> Vec<(String, TokenType)> {
        tokenize_block(&grammar(), text, true)
            .unwrap()
            .into_iter()
            .map(|s| {
                (
                    text[s.start..s.end()].to_string(),
                    TokenType::from_id(s.style).unwrap(),
                )
            })
            .collect()
    }

    fn spans_of(text: &str, want: &[(&str, TokenType)]) {
        let got = block(text);
        let want: Vec<_> = want.iter().map(|(s, t)| (s.to_string(), *t)).collect();
        assert_eq!(got, want);
    }

    #[test]
    fn test_end_to_end_block() {
        spans_of(
            "Title\n=====\n\nSome *emphasis* text.\n",
            &[
                ("Title\n=====\n", TokenType::Title),
                ("\n", TokenType::Newline),
                ("Some *emphasis* text.\n", TokenType::Default),
            ],
        );
    }

    #[test]
    fn test_overline_title() {
        spans_of(
            "=====\nTitle\n=====\n",
            &[("=====\nTitle\n=====\n", TokenType::Title)],
        );
    }

    #[test]
    fn test_transition_wins_over_string() {
        spans_of(
            "Para.\n\n==========\n\nMore.\n",
            &[
                ("Para.\n", TokenType::Default),
                ("\n==========\n\n", TokenType::Transition),
                ("More.\n", TokenType::Default),
            ],
        );
    }

    #[test]
    fn test_lists() {
        spans_of(
            "- one\n  cont\n* two\n\n1. first\n(a) second\n",
            &[
                ("- one\n  cont\n", TokenType::List),
                ("* two\n", TokenType::List),
                ("\n", TokenType::Newline),
                ("1. first\n", TokenType::List),
                ("(a) second\n", TokenType::List),
            ],
        );
    }

    #[test]
    fn test_field_before_option() {
        spans_of(
            ":author: me\n-v, --verbose  talk\n",
            &[
                (":author: me\n", TokenType::Default),
                ("-v, --verbose  talk\n", TokenType::Option),
            ],
        );
    }

    #[test]
    fn test_literal_after_paragraph() {
        spans_of(
            "Example::\n\n    code here\n\nAfter.\n",
            &[
                ("Example", TokenType::Default),
                ("::\n\n    code here\n", TokenType::Literal),
                ("\n", TokenType::Newline),
                ("After.\n", TokenType::Default),
            ],
        );
    }

    #[test]
    fn test_explicit_markup() {
        spans_of(
            ".. note:: careful\n   indented\n.. [1] A footnote.\n.. _target: http://x.org\n.. just a comment\n",
            &[
                (".. note:: careful\n   indented\n", TokenType::Default),
                (".. [1] A footnote.\n", TokenType::Footnote),
                (".. _target: http://x.org\n", TokenType::Target),
                (".. just a comment\n", TokenType::Comment),
            ],
        );
    }

    #[test]
    fn test_code_directive_is_literal() {
        spans_of(
            ".. code:: python\n\n   print(1)\n",
            &[(".. code:: python\n\n   print(1)\n", TokenType::Literal)],
        );
    }

    #[test]
    fn test_definition_and_quote() {
        spans_of(
            "term\n  definition\n\n  quoted text\n",
            &[
                ("term\n  definition\n\n  quoted text\n", TokenType::Definition),
            ],
        );
        spans_of(
            "  quoted text\n  more\n",
            &[("  quoted text\n  more\n", TokenType::Quote)],
        );
    }

    #[test]
    fn test_doctest_and_tables() {
        spans_of(">>> 1 + 1\n", &[(">>> 1 + 1\n", TokenType::Doctest)]);
        spans_of(
            "+---+---+\n| a | b |\n+===+===+\n| c | d |\n+---+---+\n",
            &[(
                "+---+---+\n| a | b |\n+===+===+\n| c | d |\n+---+---+\n",
                TokenType::Table,
            )],
        );
        spans_of(
            "=== ===\na   b\n=== ===\n",
            &[("=== ===\na   b\n=== ===\n", TokenType::Table)],
        );
    }

    #[test]
    fn test_line_blocks() {
        spans_of(
            "| first\n| second\n",
            &[("| first\n", TokenType::LineBlock), ("| second\n", TokenType::LineBlock)],
        );
    }

    #[test]
    fn test_colon_midline() {
        spans_of(
            "key: value\n",
            &[
                ("key", TokenType::Default),
                (":", TokenType::Default),
                (" value\n", TokenType::Default),
            ],
        );
    }

    #[test]
    fn test_anchored_rules_skip_midline() {
        // `..` after a colon run is not at a line start
        spans_of(
            "a:.. b\n",
            &[
                ("a", TokenType::Default),
                (":", TokenType::Default),
                (".. b\n", TokenType::Default),
            ],
        );
    }

    #[test]
    fn test_region_not_at_line_start() {
        let spans = tokenize_block(&grammar(), "- not a bullet\n", false).unwrap();
        assert_eq!(spans, vec![StyledSpan::new(0, 15, TokenType::Default.id())]);
    }

    #[test]
    fn test_multibyte_lengths_are_bytes() {
        let text = "Éçà\n===\n";
        let spans = tokenize_block(&grammar(), text, true).unwrap();
        assert_eq!(spans, vec![StyledSpan::new(0, 11, TokenType::Title.id())]);
        assert_eq!(text.chars().count(), 8);
    }

    #[test]
    fn test_crlf() {
        spans_of(
            "Title\r\n=====\r\n\r\nText\r\n",
            &[
                ("Title\r\n=====\r\n", TokenType::Title),
                ("\r\n", TokenType::Newline),
                ("Text\r\n", TokenType::Default),
            ],
        );
    }

    #[test]
    fn test_empty_text() {
        assert!(tokenize_block(&grammar(), "", true).unwrap().is_empty());
    }

    #[test]
    fn test_missing_catch_all_is_an_error() {
        let defs = [RuleDef {
            name: "letters",
            pattern: r"[a-z]+",
            scope: Scope::Block,
            token_type: TokenType::Default,
        }];
        let grammar = Grammar::compile(&defs, &[]).unwrap();
        let err = tokenize_block(&grammar, "abc1", true).unwrap_err();
        assert!(matches!(err, LexerError::NoRuleMatched { offset: 3 }));
    }

    #[test]
    fn test_inline_emphasis() {
        let line = "Some *emphasis* text.\n";
        let spans = tokenize_inline(&grammar(), line);
        assert_eq!(spans, vec![StyledSpan::new(5, 10, TokenType::Emphasis.id())]);
    }

    #[test]
    fn test_inline_later_rule_overwrites() {
        // emphasis claims the inner `*bold*`, then strong takes the whole run
        let line = "a **bold** b\n";
        let spans = tokenize_inline(&grammar(), line);
        assert_eq!(spans.last(), Some(&StyledSpan::new(2, 8, TokenType::Strong.id())));
    }

    #[test]
    fn test_inline_markup_kinds() {
        let line = "`Python <http://python.org>`_ then ``code``, ref_ and [1]_ and |sub|.\n";
        let kinds: Vec<_> = tokenize_inline(&grammar(), line)
            .into_iter()
            .map(|s| (&line[s.start..s.end()], TokenType::from_id(s.style).unwrap()))
            .collect();
        assert!(kinds.contains(&("``code``", TokenType::InlineLiteral)));
        assert!(kinds.contains(&("`Python <http://python.org>`_", TokenType::Url)));
        assert!(kinds.contains(&("http://python.org", TokenType::Url)));
        assert!(kinds.contains(&("ref_", TokenType::Link)));
        assert!(kinds.contains(&("[1]_", TokenType::FootnoteRef)));
        assert!(kinds.contains(&("|sub|", TokenType::Substitution)));
    }

    #[test]
    fn test_inline_field_directive_and_space() {
        let kinds = |line: &str| -> Vec<(String, TokenType)> {
            tokenize_inline(&grammar(), line)
                .into_iter()
                .map(|s| (line[s.start..s.end()].to_string(), TokenType::from_id(s.style).unwrap()))
                .collect()
        };
        assert_eq!(kinds(":author: me\n"), vec![("author".to_string(), TokenType::Field)]);
        assert_eq!(kinds(".. image:: a.png\n"), vec![("image".to_string(), TokenType::Directive)]);
        assert_eq!(kinds("trailing   \n"), vec![("   ".to_string(), TokenType::UnusedSpace)]);
        assert_eq!(
            kinds(":math:`x` and _`here`\n"),
            vec![
                ("_`here`".to_string(), TokenType::InlineTarget),
                (":math:`x`".to_string(), TokenType::Reference),
            ]
        );
    }

    #[test]
    fn test_block_boundaries() {
        let text = "Para.\n\nNext\n\n  indented\n\n- item\n\n====\n\nEnd\n";
        let boundaries: Vec<usize> = (0..=text.len()).filter(|&p| is_block_boundary(text, p)).collect();
        assert_eq!(boundaries, vec![7, 39]);
        assert_eq!(next_block_boundary(text, 0), 7);
        assert_eq!(next_block_boundary(text, 7), 39);
        assert_eq!(next_block_boundary(text, 39), text.len());
    }

    #[test]
    fn test_tokenizing_from_a_boundary_matches_the_tail() {
        let text = "Title\n=====\n\nterm\n  def\n\n  more\n\nEx::\n\n    code\n\nEnd *x*.\n";
        let grammar = grammar();
        let full = tokenize_block(&grammar, text, true).unwrap();
        let boundaries: Vec<usize> = (1..text.len()).filter(|&p| is_block_boundary(text, p)).collect();
        assert_eq!(boundaries.len(), 3);
        for pos in boundaries {
            assert!(full.iter().any(|s| s.start == pos));
            let tail = tokenize_block(&grammar, &text[pos..], true).unwrap();
            let expected: Vec<StyledSpan> = full
                .iter()
                .filter(|s| s.start >= pos)
                .map(|s| StyledSpan::new(s.start - pos, s.len, s.style))
                .collect();
            assert_eq!(tail, expected);
        }
    }

    #[test]
    fn test_labels_stay_on_one_line() {
        spans_of(
            ".. _broken\n\nName: here\n",
            &[
                (".. _broken\n", TokenType::Comment),
                ("\n", TokenType::Newline),
                ("Name", TokenType::Default),
                (":", TokenType::Default),
                (" here\n", TokenType::Default),
            ],
        );
    }

    #[test]
    fn test_block_tokenizing_scales_linearly() {
        let grammar = grammar();
        let paragraph = "Some *text* here.\nterm\n  definition\n\n";
        let time = |copies: usize| {
            let text = paragraph.repeat(copies);
            (0..3)
                .map(|_| {
                    let started = std::time::Instant::now();
                    tokenize_block(&grammar, &text, true).unwrap();
                    started.elapsed()
                })
                .min()
                .unwrap()
        };
        let small = time(64);
        let large = time(1024);
        // 16x the text; quadratic growth would be 256x
        assert!(large < small * 64, "small {small:?}, large {large:?}");
    }
}
