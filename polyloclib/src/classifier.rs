//! Per-file line classification state machine.
//!
//! The classifier consumes a file's lines in order and tags each one as
//! [`LineClass::Code`], [`LineClass::Comment`], or [`LineClass::Blank`],
//! carrying block-comment and string state across line boundaries. It is a
//! pure function of (descriptor, line sequence): classifying the same lines
//! with a fresh classifier always yields the same tags.
//!
//! ## Classification rules
//!
//! - A whitespace-only line is blank, unless it falls inside a block
//!   comment, in which case it is a comment line.
//! - A line containing any comment content is a comment line even when code
//!   appears on it too (comment-dominance, the common LOC-tool convention).
//! - Comment markers inside string regions are inert: `"http://x"` is code.
//! - Scanning precedence at each position is fixed: string quote, then
//!   block-open delimiter, then single-line marker. Block opens are checked
//!   before line markers so Lua's `--[[` is not swallowed by `--`.
//!
//! ## Known limitations
//!
//! String detection is a single quote-to-matching-quote region. Raw strings,
//! triple-quoted strings, and interpolation are not modeled; an unterminated
//! quote carries string state onto following lines.

use crate::language::LanguageDescriptor;

/// Classification of one physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Non-blank line with no comment content outside strings
    Code,
    /// Line with comment content (possibly mixed with code)
    Comment,
    /// Whitespace-only line outside any block comment
    Blank,
}

/// Line classifier for a single file.
///
/// Create one per file; state is carried between [`classify_line`] calls and
/// discarded with the classifier.
///
/// [`classify_line`]: Classifier::classify_line
pub struct Classifier<'a> {
    lang: &'a LanguageDescriptor,
    /// Block-comment nesting depth; 0 = outside any block comment
    block_depth: usize,
    /// Index of the active delimiter pair while depth > 0
    active_block: Option<usize>,
    in_string: bool,
    string_quote: char,
}

impl<'a> Classifier<'a> {
    /// Create a classifier for one file of the given language.
    pub fn new(lang: &'a LanguageDescriptor) -> Self {
        Self {
            lang,
            block_depth: 0,
            active_block: None,
            in_string: false,
            string_quote: '"',
        }
    }

    /// True while the classifier is inside an unterminated block comment.
    pub fn in_block_comment(&self) -> bool {
        self.block_depth > 0
    }

    /// Classify the next physical line of the file.
    pub fn classify_line(&mut self, line: &str) -> LineClass {
        if line.trim().is_empty() {
            // A blank physical line inside a block comment counts as comment.
            return if self.block_depth > 0 {
                LineClass::Comment
            } else {
                LineClass::Blank
            };
        }

        let mut has_code = false;
        let mut has_comment = false;
        let mut rest = line;

        while !rest.is_empty() {
            if self.block_depth > 0 {
                has_comment = true;
                rest = match self.scan_block_comment(rest) {
                    Some(after) => after,
                    None => break,
                };
            } else if self.in_string {
                has_code = true;
                rest = match self.scan_string(rest) {
                    Some(after) => after,
                    None => break,
                };
            } else {
                let (after, code, comment) = self.scan_normal(rest);
                has_code |= code;
                has_comment |= comment;
                rest = match after {
                    Some(after) => after,
                    None => break,
                };
            }
        }

        if has_comment {
            LineClass::Comment
        } else if has_code {
            LineClass::Code
        } else {
            LineClass::Blank
        }
    }

    /// Scan inside a block comment. Returns the remainder of the line after
    /// the comment closes, or `None` when the whole rest belongs to it.
    fn scan_block_comment<'l>(&mut self, rest: &'l str) -> Option<&'l str> {
        let (open, close) = self.lang.block_delimiters[self.active_block?];

        let close_at = rest.find(close);
        let open_at = if self.lang.nestable {
            rest.find(open)
        } else {
            None
        };

        match (close_at, open_at) {
            // A nested open before the next close deepens the comment.
            (Some(c), Some(o)) if o < c => {
                self.block_depth += 1;
                Some(&rest[o + open.len()..])
            }
            (None, Some(o)) => {
                self.block_depth += 1;
                Some(&rest[o + open.len()..])
            }
            (Some(c), _) => {
                self.block_depth -= 1;
                if self.block_depth == 0 {
                    self.active_block = None;
                }
                Some(&rest[c + close.len()..])
            }
            (None, None) => None,
        }
    }

    /// Scan inside a string region. Returns the remainder after the closing
    /// quote, or `None` when the string stays open past the line end.
    fn scan_string<'l>(&mut self, rest: &'l str) -> Option<&'l str> {
        let mut chars = rest.char_indices();
        while let Some((i, ch)) = chars.next() {
            if Some(ch) == self.lang.escape_char {
                chars.next();
                continue;
            }
            if ch == self.string_quote {
                self.in_string = false;
                return Some(&rest[i + ch.len_utf8()..]);
            }
        }
        None
    }

    /// Scan outside comments and strings until a mode transition or line end.
    /// Returns (remainder, saw_code, saw_comment).
    fn scan_normal<'l>(&mut self, rest: &'l str) -> (Option<&'l str>, bool, bool) {
        let mut has_code = false;

        for (i, ch) in rest.char_indices() {
            if ch.is_whitespace() {
                continue;
            }
            let here = &rest[i..];

            // Fixed precedence: string quote, block open, line marker.
            if self.lang.string_quotes.contains(&ch) {
                self.in_string = true;
                self.string_quote = ch;
                return (Some(&rest[i + ch.len_utf8()..]), true, false);
            }

            if let Some(idx) = self
                .lang
                .block_delimiters
                .iter()
                .position(|(open, _)| here.starts_with(open))
            {
                self.block_depth = 1;
                self.active_block = Some(idx);
                let open_len = self.lang.block_delimiters[idx].0.len();
                return (Some(&here[open_len..]), has_code, true);
            }

            if self.lang.line_markers.iter().any(|m| marker_matches(here, m)) {
                return (None, has_code, true);
            }

            has_code = true;
        }

        (None, has_code, false)
    }
}

/// Whether a line marker matches at the start of `text`.
///
/// Word-like markers (Batch's `REM`) only match as a whole word, so
/// `REMOTE=1` stays code; punctuation markers (`//`, `#`) match anywhere.
fn marker_matches(text: &str, marker: &str) -> bool {
    if !text.starts_with(marker) {
        return false;
    }
    if marker.chars().last().is_some_and(char::is_alphanumeric) {
        text[marker.len()..]
            .chars()
            .next()
            .map_or(true, char::is_whitespace)
    } else {
        true
    }
}

/// Classify a full text with a fresh classifier, one tag per line.
///
/// Convenience for tests and callers that already hold file contents.
pub fn classify_text(lang: &LanguageDescriptor, text: &str) -> Vec<LineClass> {
    let mut classifier = Classifier::new(lang);
    text.lines()
        .map(|line| classifier.classify_line(line))
        .collect()
}
