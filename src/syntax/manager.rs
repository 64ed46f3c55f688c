//! Incremental re-style driver
//!
//! The host calls [`RestLexer::style_text`] with the byte range an edit
//! touched. Markup blocks span several lines, so the range is first
//! widened to a stable region bounded by blank lines that no block can
//! run across. That region is re-tokenized from scratch and every byte
//! in it gets a fresh style.

use std::ops::Range;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::grammar::Grammar;
use super::host::HostBuffer;
use super::registry::StyleRegistry;
use super::tokenizer::{is_block_boundary, tokenize_block, tokenize_inline};
use super::tokens::{StyleId, TokenType};
use crate::config;
use crate::error::Result;

/// reStructuredText lexer
#[derive(Debug)]
pub struct RestLexer {
    /// Compiled rules, immutable after construction
    grammar: Grammar,
    /// Style id to display property table
    registry: StyleRegistry,
    /// Properties file the current table was loaded from
    properties_file: Option<PathBuf>,
    /// While paused, edits are not re-styled
    paused: bool,
}

impl RestLexer {
    /// Create a lexer using the first properties file found on disk
    pub fn new() -> Result<Self> {
        Self::build(config::find_properties_file())
    }

    /// Create a lexer reading overrides from `path`
    pub fn with_properties(path: &Path) -> Result<Self> {
        Self::build(Some(path.to_path_buf()))
    }

    /// Create a lexer with the compiled default styles only
    pub fn with_defaults() -> Result<Self> {
        Self::build(None)
    }

    fn build(properties_file: Option<PathBuf>) -> Result<Self> {
        let grammar = Grammar::rest()?;
        let mut registry = StyleRegistry::new()?;
        if let Some(path) = &properties_file {
            registry.load_user_overrides(path)?;
        }
        Ok(Self {
            grammar,
            registry,
            properties_file,
            paused: false,
        })
    }

    /// Language name shown by the host
    pub fn language(&self) -> &'static str {
        "reStructuredText"
    }

    /// Category name for a style id
    pub fn description(&self, style: StyleId) -> Option<&'static str> {
        self.registry.name_of(style)
    }

    /// Style of unstyled text
    pub fn default_style(&self) -> StyleId {
        TokenType::Default.id()
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    /// Properties file the styles were loaded from
    pub fn properties_file(&self) -> Option<&Path> {
        self.properties_file.as_deref()
    }

    /// Re-read the properties file after a configuration change
    pub fn reload_styles(&mut self) -> Result<usize> {
        self.registry.reload(self.properties_file.as_deref())
    }

    /// Switch to another properties file (or none) and reload
    pub fn set_properties_file(&mut self, path: Option<PathBuf>) -> Result<usize> {
        self.properties_file = path;
        self.reload_styles()
    }

    /// Stop or resume re-styling, e.g. around bulk edits
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Re-style after an edit of `[start, end)`
    ///
    /// Returns the region that was re-styled; empty while paused.
    pub fn style_text<B: HostBuffer + ?Sized>(
        &self,
        buf: &mut B,
        start: usize,
        end: usize,
    ) -> Result<Range<usize>> {
        if self.paused {
            debug!(start, end, "lexer paused, skipping");
            return Ok(start..start);
        }
        let region = stable_region(buf, start, end);
        debug!(start, end, fix_start = region.start, fix_end = region.end, "styling");
        self.restyle(buf, region.clone())?;
        Ok(region)
    }

    /// Style the whole document
    pub fn style_all<B: HostBuffer + ?Sized>(&self, buf: &mut B) -> Result<Range<usize>> {
        let region = 0..buf.document_length();
        self.restyle(buf, region.clone())?;
        Ok(region)
    }

    /// Tokenize exactly `region` and commit the result
    ///
    /// Block styles are committed in one forward pass, then every line
    /// that does not start inside a literal block gets its inline spans.
    pub fn restyle<B: HostBuffer + ?Sized>(&self, buf: &mut B, region: Range<usize>) -> Result<()> {
        let len = buf.document_length();
        let region = region.start.min(len)..region.end.min(len);
        if region.is_empty() {
            return Ok(());
        }

        let text = buf.text(region.start, region.end).into_owned();
        let (_, column) = buf.line_index_from_byte_pos(region.start);
        let spans = tokenize_block(&self.grammar, &text, column == 0)?;
        for span in spans {
            buf.commit_style(region.start + span.start, span.len, span.style);
        }

        self.restyle_inline(buf, &region);
        Ok(())
    }

    fn restyle_inline<B: HostBuffer + ?Sized>(&self, buf: &mut B, region: &Range<usize>) {
        let (mut line, _) = buf.line_index_from_byte_pos(region.start);
        loop {
            let line_start = buf.byte_pos_from_line_index(line, 0);
            if line_start >= region.end {
                break;
            }
            line += 1;

            let verbatim = TokenType::from_id(buf.style_at(line_start)).is_some_and(TokenType::is_verbatim);
            if verbatim {
                continue;
            }

            let text = buf.line_text(line - 1).into_owned();
            for span in tokenize_inline(&self.grammar, &text) {
                let start = (line_start + span.start).max(region.start);
                let end = (line_start + span.end()).min(region.end);
                if start < end {
                    buf.commit_style(start, end - start, span.style);
                }
            }
        }
    }
}

/// Widen an edit of `[start, end)` to a stable region
///
/// The region runs from the last block boundary before the edit to the
/// first one at least a line break past it (see [`is_block_boundary`]),
/// or to the buffer edges. Boundary tests only read bytes the edit left
/// alone, so styles outside the region are what a full pass gives.
/// Buffers without `\n\n` have no boundaries and re-style in full.
pub fn stable_region<B: HostBuffer + ?Sized>(buf: &B, start: usize, end: usize) -> Range<usize> {
    let len = buf.document_length();
    let start = start.min(len);
    let end = end.clamp(start, len);

    let (mut line, _) = buf.line_index_from_byte_pos(start);
    let fix_start = loop {
        let line_start = buf.byte_pos_from_line_index(line, 0);
        if line == 0 || line_start == 0 {
            break 0;
        }
        if line_start < start && boundary_at(buf, line_start) {
            break line_start;
        }
        line -= 1;
    };

    let (mut line, _) = buf.line_index_from_byte_pos(end);
    let fix_end = loop {
        let next_start = buf.byte_pos_from_line_index(line + 1, 0);
        if next_start >= len {
            break len;
        }
        if next_start >= end + 2 && boundary_at(buf, next_start) {
            break next_start;
        }
        line += 1;
    };

    fix_start..fix_end
}

fn boundary_at<B: HostBuffer + ?Sized>(buf: &B, pos: usize) -> bool {
    pos >= 2 && is_block_boundary(&buf.text(pos - 2, pos + 1), 2)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::document::Document;
    use proptest::prelude::*;
    use proptest::sample::Index;
    use std::sync::OnceLock;

    const LINES: &[&str] = &[
        "",
        "Title",
        "=====",
        "- item",
        "  more",
        "term",
        "  def *x* here",
        "Ex::",
        "    code",
        "1. first",
        ":field: value",
        ".. note:: Read this",
        ".. _target: http://x.org",
        ".. [1] A note",
        "| line",
        ">>> 1 + 1",
        "+---+---+",
        "| a | b |",
        "+===+===+",
        "Para with *emph* and ``lit``",
        "----------",
        "  quoted text",
        "__ anon",
    ];

    const INSERTS: &[&str] = &["a", "\n", "\n\n", "  ", "::", "=====\n", "- ", "*", "Ex::\n\n    x\n"];

    #[derive(Debug, Clone)]
    enum Edit {
        Insert(Index, &'static str),
        Delete(Index, usize),
    }

    fn edit() -> impl Strategy<Value = Edit> {
        prop_oneof![
            (any::<Index>(), prop::sample::select(INSERTS)).prop_map(|(at, s)| Edit::Insert(at, s)),
            (any::<Index>(), 1..8usize).prop_map(|(at, n)| Edit::Delete(at, n)),
        ]
    }

    fn lexer() -> &'static RestLexer {
        static LEXER: OnceLock<RestLexer> = OnceLock::new();
        LEXER.get_or_init(|| RestLexer::with_defaults().unwrap())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn incremental_styles_match_a_full_pass(
            lines in prop::collection::vec(prop::sample::select(LINES), 0..14),
            edits in prop::collection::vec(edit(), 1..6),
        ) {
            let mut doc = Document::from_text("t", lines.join("\n") + "\n");
            lexer().style_all(&mut doc).unwrap();

            for edit in edits {
                let range = match edit {
                    Edit::Insert(at, s) => doc.insert(at.index(doc.len() + 1), s),
                    Edit::Delete(at, n) => {
                        let start = at.index(doc.len() + 1);
                        doc.delete(start..(start + n).min(doc.len()))
                    }
                };
                lexer().style_text(&mut doc, range.start, range.end).unwrap();

                let mut fresh = Document::from_text("t", doc.as_str());
                lexer().style_all(&mut fresh).unwrap();
                prop_assert_eq!(doc.styles(), fresh.styles(), "text {:?}", doc.as_str());
            }
        }
    }
}
