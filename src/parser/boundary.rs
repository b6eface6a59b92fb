//! Declaration boundary scanner.
//!
//! Given the line after a documentation comment, finds the declaration the
//! comment belongs to (the "seed" line) and the full span of that
//! declaration. Function spans end on the first `;` with the parenthesis
//! depth back at or below zero. Type spans end on a `;` either before any
//! `{` or once the brace depth returns to zero.
//!
//! Depth counting ignores string and character literals, so a bracket inside
//! quotes can end a span early or late.

use super::comment::opens_doc_comment;
use super::cursor::LineCursor;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Lines examined after a comment when looking for its declaration.
pub const LOOKAHEAD_LINES: usize = 50;

/// Longest span collected for a single declaration.
pub const MAX_SPAN_LINES: usize = 200;

static RE_TYPE_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(struct|enum|union|typedef)\b").unwrap());

static RE_TYPEDEF_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*typedef\b").unwrap());

static RE_BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\*.*?\*/").unwrap());

/// Which parser a seed line is handed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedKind {
    Function,
    DataType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed {
    pub kind: SeedKind,
    /// Index of the seed line.
    pub line: usize,
}

/// States of the seed lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Scanning,
    /// Inside a plain `/* ... */` block spanning lines.
    InComment,
    /// Inside a preprocessor directive continued with `\`.
    InDirective,
    Done,
}

/// Raw text of one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Index of the first line.
    pub start: usize,
    /// Index of the line after the last one collected.
    pub end: usize,
    /// Collected lines joined with `\n`.
    pub text: String,
    /// False when the span was cut by end of file or [`MAX_SPAN_LINES`].
    pub terminated: bool,
}

/// Running tally of unmatched open vs. close characters.
#[derive(Debug, Clone, Copy)]
struct DepthCounter {
    open: char,
    close: char,
    depth: i64,
    seen_open: bool,
}

impl DepthCounter {
    fn new(open: char, close: char) -> Self {
        Self {
            open,
            close,
            depth: 0,
            seen_open: false,
        }
    }

    fn feed(&mut self, line: &str) {
        for c in line.chars() {
            if c == self.open {
                self.depth += 1;
                self.seen_open = true;
            } else if c == self.close {
                self.depth -= 1;
            }
        }
    }
}

/// Find the declaration following a comment that ends just before `start`.
///
/// Looks at most [`LOOKAHEAD_LINES`] lines ahead and never past the next
/// documentation comment. Blank lines, plain comments and preprocessor
/// directives are skipped.
pub fn locate_seed(lines: &[&str], start: usize) -> Option<Seed> {
    let mut cursor = LineCursor::at(lines, start);
    let limit = start.saturating_add(LOOKAHEAD_LINES);
    let mut state = ScanState::Scanning;

    while state != ScanState::Done && cursor.position() < limit {
        let index = cursor.position();
        let Some(line) = cursor.advance() else {
            break;
        };
        let trimmed = line.trim();

        state = match state {
            ScanState::InComment if trimmed.contains("*/") => ScanState::Scanning,
            ScanState::InDirective if !trimmed.ends_with('\\') => ScanState::Scanning,
            ScanState::InComment | ScanState::InDirective => state,
            ScanState::Scanning if opens_doc_comment(trimmed) => ScanState::Done,
            ScanState::Scanning if trimmed.starts_with('#') => {
                if trimmed.ends_with('\\') {
                    ScanState::InDirective
                } else {
                    ScanState::Scanning
                }
            }
            ScanState::Scanning if trimmed.starts_with("/*") => {
                if trimmed[2..].contains("*/") {
                    ScanState::Scanning
                } else {
                    ScanState::InComment
                }
            }
            ScanState::Scanning
                if trimmed.is_empty() || trimmed.starts_with("//") || trimmed.starts_with('*') =>
            {
                ScanState::Scanning
            }
            ScanState::Scanning => {
                if is_type_seed(trimmed) {
                    return Some(Seed {
                        kind: SeedKind::DataType,
                        line: index,
                    });
                }
                if looks_like_function_start(trimmed) {
                    return Some(Seed {
                        kind: SeedKind::Function,
                        line: index,
                    });
                }
                ScanState::Scanning
            }
            ScanState::Done => ScanState::Done,
        };
    }
    None
}

/// A line that mentions a type keyword and is not a function prototype
/// returning or taking such a type.
pub fn is_type_seed(line: &str) -> bool {
    if !RE_TYPE_KEYWORD.is_match(line) {
        return false;
    }
    let prototype =
        looks_like_function_start(line) && !line.contains('{') && !RE_TYPEDEF_START.is_match(line);
    !prototype
}

/// A line that can start a function declaration: it has parentheses, no `=`,
/// and either closes them and ends in `;` / `)`, or leaves them open.
pub fn looks_like_function_start(line: &str) -> bool {
    let line = line.trim();
    if line.is_empty()
        || line.starts_with("//")
        || line.starts_with("/*")
        || line.starts_with('*')
        || line.starts_with('#')
    {
        return false;
    }
    if line.contains('=') || !line.contains('(') {
        return false;
    }

    let closed = line.contains(')') && (line.contains(';') || line.ends_with(')'));
    let mut parens = DepthCounter::new('(', ')');
    parens.feed(line);
    closed || parens.depth > 0
}

/// Remove `/* ... */` runs and any trailing `//` comment from one line.
pub fn strip_inline_comments(line: &str) -> Cow<'_, str> {
    let without_blocks = RE_BLOCK_COMMENT.replace_all(line, "");
    match without_blocks.find("//") {
        Some(pos) => Cow::Owned(without_blocks[..pos].to_string()),
        None => without_blocks,
    }
}

/// Collect a function declaration starting at `seed`.
///
/// Returns `None` when no terminating `;` is found before end of file or
/// within [`MAX_SPAN_LINES`] lines.
pub fn function_span(lines: &[&str], seed: usize) -> Option<Span> {
    let mut cursor = LineCursor::at(lines, seed);
    let mut parens = DepthCounter::new('(', ')');
    let mut collected: Vec<String> = Vec::new();

    while let Some(line) = cursor.advance() {
        let line = strip_inline_comments(line);
        parens.feed(&line);
        let has_semicolon = line.contains(';');
        collected.push(line.into_owned());

        if has_semicolon && parens.depth <= 0 {
            return Some(Span {
                start: seed,
                end: cursor.position(),
                text: collected.join("\n"),
                terminated: true,
            });
        }
        if collected.len() >= MAX_SPAN_LINES {
            break;
        }
    }

    tracing::debug!(line = seed + 1, "function declaration has no terminating semicolon");
    None
}

/// Collect a type declaration starting at `seed`.
///
/// A span that hits end of file or [`MAX_SPAN_LINES`] is returned as-is
/// with `terminated == false`.
pub fn type_span(lines: &[&str], seed: usize) -> Span {
    let mut cursor = LineCursor::at(lines, seed);
    let mut braces = DepthCounter::new('{', '}');
    let mut collected: Vec<&str> = Vec::new();
    let mut terminated = false;

    while let Some(line) = cursor.advance() {
        collected.push(line);
        let code = strip_inline_comments(line);
        braces.feed(&code);

        if code.contains(';') && (!braces.seen_open || braces.depth <= 0) {
            terminated = true;
            break;
        }
        if collected.len() >= MAX_SPAN_LINES {
            tracing::debug!(line = seed + 1, "type declaration exceeds span cap");
            break;
        }
    }

    Span {
        start: seed,
        end: cursor.position(),
        text: collected.join("\n"),
        terminated,
    }
}
