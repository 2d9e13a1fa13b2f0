//! Incremental lexical highlighting.
//!
//! Each [`Line`] caches a per-byte [`Highlight`] and whether it ends inside
//! a block comment. [`update_from`] rescans from an edited row and keeps
//! going only while that multi-line state keeps changing, so an edit costs
//! the rows it actually affects rather than the whole document.

use std::path::Path;

use crate::editor::{Buffer, Line};

/// Display classification of a single byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Highlight {
    #[default]
    Normal,
    LineComment,
    BlockComment,
    String,
    Number,
    Keyword,
}

/// Lexical rules for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syntax {
    pub name: &'static str,
    /// File extensions (without the dot) that select this syntax.
    pub extensions: &'static [&'static str],
    pub line_comment: &'static [u8],
    pub block_comment_start: &'static [u8],
    pub block_comment_end: &'static [u8],
    /// Bytes that open and close a string literal.
    pub quotes: &'static [u8],
    pub keywords: &'static [&'static str],
}

pub static C_SYNTAX: Syntax = Syntax {
    name: "C",
    extensions: &["c", "h", "cpp", "hpp"],
    line_comment: b"//",
    block_comment_start: b"/*",
    block_comment_end: b"*/",
    quotes: b"\"'",
    keywords: &[
        "if", "else", "for", "while", "do", "switch", "case", "default", "break", "continue",
        "return", "struct", "typedef", "enum", "union", "static", "const", "volatile", "extern",
        "inline", "void", "char", "short", "int", "long", "float", "double", "signed",
        "unsigned", "size_t", "bool", "NULL",
    ],
};

static SYNTAXES: &[&Syntax] = &[&C_SYNTAX];

impl Syntax {
    /// Pick the syntax for a file by its extension.
    pub fn for_path(path: &Path) -> Option<&'static Self> {
        let ext = path.extension()?.to_str()?;
        SYNTAXES
            .iter()
            .copied()
            .find(|syntax| syntax.extensions.iter().any(|candidate| *candidate == ext))
    }

    fn is_keyword(&self, word: &[u8]) -> bool {
        self.keywords.iter().any(|kw| kw.as_bytes() == word)
    }
}

/// Whitespace, NUL, or punctuation that can bound a number or keyword.
pub fn is_separator(byte: u8) -> bool {
    byte.is_ascii_whitespace()
        || byte == b'\x0b'
        || byte == 0
        || b",.()+-/*=~%<>[]{};:&|^!?".contains(&byte)
}

/// Classify `bytes` into `out` (same length, pre-filled with `Normal`).
///
/// `in_block_comment` is the exit state of the previous line; the return
/// value is this line's exit state.
pub fn highlight_line(
    syntax: &Syntax,
    bytes: &[u8],
    in_block_comment: bool,
    out: &mut [Highlight],
) -> bool {
    debug_assert_eq!(bytes.len(), out.len());
    let mut in_comment = in_block_comment;
    let mut i = 0;

    while i < bytes.len() {
        let rest = &bytes[i..];

        if in_comment {
            let end = syntax.block_comment_end;
            if !end.is_empty() && rest.starts_with(end) {
                out[i..i + end.len()].fill(Highlight::BlockComment);
                i += end.len();
                in_comment = false;
            } else {
                out[i] = Highlight::BlockComment;
                i += 1;
            }
            continue;
        }

        if !syntax.line_comment.is_empty() && rest.starts_with(syntax.line_comment) {
            out[i..].fill(Highlight::LineComment);
            break;
        }

        let start = syntax.block_comment_start;
        if !start.is_empty() && rest.starts_with(start) {
            out[i..i + start.len()].fill(Highlight::BlockComment);
            i += start.len();
            in_comment = true;
            continue;
        }

        let byte = bytes[i];

        if syntax.quotes.contains(&byte) {
            i = scan_string(bytes, i, out);
            continue;
        }

        if byte.is_ascii_digit() && (i == 0 || is_separator(bytes[i - 1])) {
            let end = run_end(bytes, i, |b| b.is_ascii_digit() || b == b'.');
            out[i..end].fill(Highlight::Number);
            i = end;
            continue;
        }

        if byte.is_ascii_alphabetic() || byte == b'_' {
            let end = run_end(bytes, i, |b| b.is_ascii_alphanumeric() || b == b'_');
            let bounded_left = i == 0 || is_separator(bytes[i - 1]);
            let bounded_right = end == bytes.len() || is_separator(bytes[end]);
            if bounded_left && bounded_right && syntax.is_keyword(&bytes[i..end]) {
                out[i..end].fill(Highlight::Keyword);
            }
            i = end;
            continue;
        }

        i += 1;
    }

    in_comment
}

// Marks the string starting at `start` and returns the index after it.
fn scan_string(bytes: &[u8], start: usize, out: &mut [Highlight]) -> usize {
    let quote = bytes[start];
    out[start] = Highlight::String;
    let mut i = start + 1;
    while i < bytes.len() {
        out[i] = Highlight::String;
        if bytes[i] == b'\\' && i + 1 < bytes.len() {
            out[i + 1] = Highlight::String;
            i += 2;
            continue;
        }
        i += 1;
        if bytes[i - 1] == quote {
            break;
        }
    }
    i
}

fn run_end(bytes: &[u8], start: usize, pred: impl Fn(u8) -> bool) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| !pred(b))
        .map_or(bytes.len(), |offset| start + offset)
}

/// Re-highlight starting at `start_row`.
///
/// The row is scanned with the exit state of the row above it. Scanning
/// continues to the next row while the exit state just changed or the next
/// row has no current classification. Returns the number of rows scanned.
pub fn update_from(buffer: &mut Buffer, syntax: &Syntax, start_row: usize) -> usize {
    let line_count = buffer.line_count();
    if start_row >= line_count {
        return 0;
    }

    let mut in_comment = start_row
        .checked_sub(1)
        .and_then(|row| buffer.line(row))
        .is_some_and(Line::continues_block_comment);
    let mut scanned = 0;

    for row in start_row..line_count {
        let Some(line) = buffer.line_mut(row) else {
            break;
        };
        let entry = in_comment;
        let changed = line.rehighlight(|bytes, out| highlight_line(syntax, bytes, entry, out));
        in_comment = line.continues_block_comment();
        scanned += 1;

        let next_missing = buffer
            .line(row + 1)
            .is_some_and(|next| !next.is_highlighted());
        if !changed && !next_missing {
            break;
        }
    }

    tracing::debug!(start_row, scanned, syntax = syntax.name, "rehighlighted rows");
    scanned
}

/// Highlight every row of the buffer from scratch.
pub fn highlight_all(buffer: &mut Buffer, syntax: &Syntax) -> usize {
    buffer.reset_highlight();
    update_from(buffer, syntax, 0)
}
