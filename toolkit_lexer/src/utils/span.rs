//! Source location tracking for the Toolkit lexer
//!
//! Every token remembers where its first character sits in the source. Lines
//! and columns are 1-based and count characters, not bytes; the byte offset is
//! kept alongside so spans can slice the original text.
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// A position in source text with line, column, and byte offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Byte offset from start of input (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based)
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Offset 0, line 1, column 1
    pub fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Advance past one character. A newline moves to column 1 of the next
    /// line; every other character (tabs included) is one column wide.
    pub fn advance(self, ch: char) -> Self {
        match ch {
            '\n' => Self {
                offset: self.offset + 1,
                line: self.line + 1,
                column: 1,
            },
            _ => Self {
                offset: self.offset + ch.len_utf8(),
                line: self.line,
                column: self.column + 1,
            },
        }
    }

    /// Advance past every character of `s`
    pub fn advance_str(self, s: &str) -> Self {
        s.chars().fold(self, |pos, ch| pos.advance(ch))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span of source text from start to end position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "Span start must not be after end"
        );
        Self { start, end }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Zero-width span at `pos`
    pub fn point(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Span covering `text` when it begins at `start`
    pub fn covering(start: Position, text: &str) -> Self {
        Self {
            start,
            end: start.advance_str(text),
        }
    }

    /// Source text under this span
    pub fn slice<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start.offset..self.end.offset]
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// A value with its source location
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(value: T, span: Span) -> Self {
        Self { value, span }
    }
}

impl<T: fmt::Display> fmt::Display for Spanned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Source text plus the byte offset of every line start
#[derive(Debug, Clone)]
pub struct SourceMap {
    pub source: String,
    line_starts: Vec<usize>,
}

impl SourceMap {
    pub fn new(source: String) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(offset, _)| offset + 1))
            .collect();
        Self {
            source,
            line_starts,
        }
    }

    /// Number of lines; a trailing newline opens an empty last line
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Text of 1-based line `line_num` without its newline
    pub fn get_line(&self, line_num: u32) -> Option<&str> {
        let index = (line_num as usize).checked_sub(1)?;
        let start = *self.line_starts.get(index)?;
        let end = self
            .line_starts
            .get(index + 1)
            .map_or(self.source.len(), |next| next - 1);
        Some(&self.source[start..end])
    }

    pub fn format_error(&self, span: &Span, message: &str) -> String {
        self.format_diagnostic("error", span, message)
    }

    pub fn format_warning(&self, span: &Span, message: &str) -> String {
        self.format_diagnostic("warning", span, message)
    }

    /// Render `message` with the line `span` starts on and a caret underline
    pub fn format_diagnostic(&self, label: &str, span: &Span, message: &str) -> String {
        let mut out = format!("{}: {}\n  --> {}\n", label, message, span.start);

        let Some(line) = self.get_line(span.start.line) else {
            return out;
        };

        let gutter = span.start.line.to_string();
        let blank = " ".repeat(gutter.len());
        let indent = " ".repeat(span.start.column.saturating_sub(1) as usize);
        let width = if span.start.line == span.end.line {
            span.end.column.saturating_sub(span.start.column) as usize
        } else {
            (line.chars().count() + 1).saturating_sub(span.start.column as usize)
        };

        let _ = writeln!(out, "{} |", blank);
        let _ = writeln!(out, "{} | {}", gutter, line);
        let _ = writeln!(out, "{} | {}{}", blank, indent, "^".repeat(width.max(1)));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_advance() {
        let pos = Position::start();
        let pos = pos.advance('a');
        assert_eq!(pos, Position::new(1, 1, 2));

        let pos = pos.advance('\n');
        assert_eq!(pos, Position::new(2, 2, 1));

        // Tabs are a single column
        let pos = pos.advance('\t');
        assert_eq!(pos.column, 2);
    }

    #[test]
    fn test_position_advance_multibyte() {
        let pos = Position::start().advance('é');
        assert_eq!(pos.offset, 2);
        assert_eq!(pos.column, 2);
    }

    #[test]
    fn test_span_covering() {
        let span = Span::covering(Position::new(4, 1, 5), "set");
        assert_eq!(span.end, Position::new(7, 1, 8));
        assert_eq!(span.slice("abc set x"), "set");
        assert_eq!(span.to_string(), "1:5-8");
    }

    #[test]
    fn test_source_map_lines() {
        let map = SourceMap::new("set x = 1\nret x\n".to_string());
        assert_eq!(map.line_count(), 3);
        assert_eq!(map.get_line(1), Some("set x = 1"));
        assert_eq!(map.get_line(2), Some("ret x"));
        assert_eq!(map.get_line(3), Some(""));
        assert_eq!(map.get_line(0), None);
        assert_eq!(map.get_line(4), None);
    }

    #[test]
    fn test_format_error() {
        let map = SourceMap::new("set s = \"open".to_string());
        let span = Span::point(Position::new(8, 1, 9));
        let rendered = map.format_error(&span, "unterminated string");
        assert!(rendered.contains("error: unterminated string"));
        assert!(rendered.contains("--> 1:9"));
        assert!(rendered.contains("1 | set s = \"open"));
        assert!(rendered.contains("        ^"));
    }

    #[test]
    fn test_format_warning_underlines_escape() {
        let map = SourceMap::new("set s = \"a\\qb\"".to_string());
        let span = Span::covering(Position::new(10, 1, 11), "\\q");
        let rendered = map.format_warning(&span, "Unknown escape sequence '\\q'");
        assert!(rendered.starts_with("warning: Unknown escape sequence"));
        assert!(rendered.contains("--> 1:11"));
        assert!(rendered.contains("\n |           ^^\n"));
    }
}
