//! Character-level scanner
//!
//! Splits source text at spaces, newlines and brackets, keeps quoted strings
//! whole (escapes included), and drops everything between a `<*` token and the
//! next `*>` token. Operators are not delimiters: `a+b` is one raw token.

use super::analyzer::LexerError;
use crate::config::compile_time::lexical::{MAX_TOKEN_COUNT, MAX_TOKEN_LENGTH};
use crate::config::runtime::ScannerPreferences;
use crate::grammar::symbols::is_bracket_char;
use crate::logging::codes;
use crate::tokens::RawToken;
use crate::utils::{Position, Span};
use crate::{log_debug, log_warning};

pub const COMMENT_OPEN: &str = "<*";
pub const COMMENT_CLOSE: &str = "*>";

/// Where emitted tokens go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentState {
    Normal,
    InComment,
}

/// Scanner result plus what it threw away
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutput {
    pub tokens: Vec<RawToken>,
    /// Tokens swallowed by comments, sentinels included
    pub discarded_tokens: usize,
    pub comment_regions: usize,
    /// Set when lenient scanning accepted an unterminated string or comment
    pub unterminated: bool,
}

/// Single-pass scanner over one source unit
pub struct Scanner<'a> {
    source: &'a str,
    allow_unterminated: bool,

    cursor: Position,
    current: String,
    current_len: usize,
    current_start: Position,

    quote_mode: bool,
    pending_escape: bool,
    quote_start: Position,

    comment: CommentState,
    comment_start: Position,

    output: ScanOutput,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_preferences(source, &ScannerPreferences::default())
    }

    pub fn with_preferences(source: &'a str, preferences: &ScannerPreferences) -> Self {
        Self {
            source,
            allow_unterminated: preferences.allow_unterminated,
            cursor: Position::start(),
            current: String::new(),
            current_len: 0,
            current_start: Position::start(),
            quote_mode: false,
            pending_escape: false,
            quote_start: Position::start(),
            comment: CommentState::Normal,
            comment_start: Position::start(),
            output: ScanOutput::default(),
        }
    }

    /// Run the scanner to the end of input
    pub fn scan(mut self) -> Result<ScanOutput, LexerError> {
        let source = self.source;
        for ch in source.chars() {
            self.step(ch)?;
            self.cursor = self.cursor.advance(ch);
        }

        self.emit()?;
        self.finish()
    }

    fn step(&mut self, ch: char) -> Result<(), LexerError> {
        if self.quote_mode {
            self.push(ch)?;
            if self.pending_escape {
                self.pending_escape = false;
            } else if ch == '\\' {
                self.pending_escape = true;
            } else if ch == '"' {
                self.quote_mode = false;
            }
            return Ok(());
        }

        match ch {
            ' ' | '\n' => self.emit(),
            '"' => {
                self.emit()?;
                self.quote_mode = true;
                self.quote_start = self.cursor;
                self.push(ch)
            }
            c if is_bracket_char(c) => {
                self.emit()?;
                self.push(c)?;
                self.emit()
            }
            _ => self.push(ch),
        }
    }

    fn push(&mut self, ch: char) -> Result<(), LexerError> {
        if self.current.is_empty() {
            self.current_start = self.cursor;
        }

        self.current.push(ch);
        self.current_len += 1;

        if self.current_len > MAX_TOKEN_LENGTH {
            let error = LexerError::TokenTooLong {
                line: self.current_start.line,
                column: self.current_start.column,
                length: self.current_len,
            };
            return Err(error);
        }

        Ok(())
    }

    /// Hand the in-progress token to the output or the comment sink
    fn emit(&mut self) -> Result<(), LexerError> {
        if self.current.is_empty() {
            return Ok(());
        }

        let token = RawToken::new(std::mem::take(&mut self.current), self.current_start);
        self.current_len = 0;

        match (self.comment, token.content()) {
            (CommentState::Normal, COMMENT_OPEN) => {
                self.comment = CommentState::InComment;
                self.comment_start = token.start;
                self.output.comment_regions += 1;
                self.output.discarded_tokens += 1;
            }
            (CommentState::InComment, COMMENT_CLOSE) => {
                self.comment = CommentState::Normal;
                self.output.discarded_tokens += 1;
                log_debug!("Comment closed",
                    "opened_at" => self.comment_start,
                    "closed_at" => token.start
                );
            }
            (CommentState::InComment, _) => {
                self.output.discarded_tokens += 1;
            }
            (CommentState::Normal, _) => {
                if self.output.tokens.len() >= MAX_TOKEN_COUNT {
                    return Err(LexerError::TooManyTokens {
                        count: self.output.tokens.len() + 1,
                    });
                }
                self.output.tokens.push(token);
            }
        }

        Ok(())
    }

    fn finish(mut self) -> Result<ScanOutput, LexerError> {
        if self.quote_mode {
            if !self.allow_unterminated {
                return Err(LexerError::UnterminatedString {
                    line: self.quote_start.line,
                    column: self.quote_start.column,
                });
            }
            self.output.unterminated = true;
            log_warning!(
                code = codes::lexical::UNTERMINATED_INPUT_ACCEPTED,
                span = Span::new(self.quote_start, self.cursor),
                "Unterminated string runs to end of input",
                "opened_at" => self.quote_start
            );
        }

        if self.comment == CommentState::InComment {
            if !self.allow_unterminated {
                return Err(LexerError::UnterminatedComment {
                    line: self.comment_start.line,
                    column: self.comment_start.column,
                });
            }
            self.output.unterminated = true;
            log_warning!(
                code = codes::lexical::UNTERMINATED_INPUT_ACCEPTED,
                span = Span::new(self.comment_start, self.cursor),
                "Unterminated comment discards the rest of the input",
                "opened_at" => self.comment_start
            );
        }

        Ok(self.output)
    }
}

/// Scan `source` with default preferences
pub fn scan(source: &str) -> Result<Vec<RawToken>, LexerError> {
    Scanner::new(source).scan().map(|output| output.tokens)
}
