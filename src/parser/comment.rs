//! Documentation comment locator.
//!
//! Walks a file's lines and yields each `/** ... */` block in source order.
//! A block opens on a line starting with `/**` and closes on the first
//! line (the opener included) containing `*/`. An opener with no closer
//! before end of file is ignored and scanning resumes on the following line.

use super::cursor::LineCursor;

const DOC_OPEN: &str = "/**";
const CLOSE: &str = "*/";
/// `/**<` documents what precedes it on the same line.
const TRAILING_DOC: &str = "/**<";

/// One documentation comment block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocComment {
    /// Raw lines of the block joined with `\n`, delimiters included.
    pub text: String,
    /// Index of the line holding the opener.
    pub start_line: usize,
    /// Index of the first line after the closer.
    pub next_line: usize,
}

/// Lazy iterator over the documentation comments of a file.
pub struct DocComments<'a> {
    cursor: LineCursor<'a>,
}

impl<'a> DocComments<'a> {
    pub fn new(lines: &'a [&'a str]) -> Self {
        Self {
            cursor: LineCursor::new(lines),
        }
    }

    /// Resume scanning at `line` after a caller consumed a declaration.
    /// Never moves backwards, so yielded blocks never overlap.
    pub fn skip_to(&mut self, line: usize) {
        if line > self.cursor.position() {
            self.cursor = LineCursor::at(self.cursor.lines(), line);
        }
    }
}

/// Whether `line` opens a documentation comment: the opener must start the
/// line, and trailing `/**<` member docs never count.
pub fn opens_doc_comment(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with(DOC_OPEN) && !line.starts_with(TRAILING_DOC)
}

fn closes_on_opener(line: &str) -> bool {
    line.find(DOC_OPEN)
        .is_some_and(|open| line[open + 2..].contains(CLOSE))
}

impl Iterator for DocComments<'_> {
    type Item = DocComment;

    fn next(&mut self) -> Option<DocComment> {
        while let Some(line) = self.cursor.advance() {
            if !opens_doc_comment(line) {
                continue;
            }
            let start_line = self.cursor.position() - 1;
            let mut block = vec![line];

            if closes_on_opener(line) {
                return Some(DocComment {
                    text: line.to_string(),
                    start_line,
                    next_line: self.cursor.position(),
                });
            }

            let resume = self.cursor.mark();
            let mut closed = false;
            while let Some(next) = self.cursor.advance() {
                block.push(next);
                if next.contains(CLOSE) {
                    closed = true;
                    break;
                }
            }

            if closed {
                return Some(DocComment {
                    text: block.join("\n"),
                    start_line,
                    next_line: self.cursor.position(),
                });
            }

            tracing::debug!(line = start_line + 1, "unterminated documentation comment");
            self.cursor.reset(resume);
        }
        None
    }
}
