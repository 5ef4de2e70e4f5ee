//! Lexical analyzer: scanner, categorizer, metrics and logging in one pass

use super::categorizer::categorize_with_diagnostics;
use super::scanner::{ScanOutput, Scanner};
use crate::config::compile_time::lexical::{MAX_TOKEN_COUNT, MAX_TOKEN_LENGTH};
use crate::config::runtime::ScannerPreferences;
use crate::file_processor::FileProcessingResult;
use crate::logging::codes;
use crate::tokens::{ClassifiedToken, RawToken, TokenClass, TokenStream, TokenType};
use crate::utils::{Position, SourceMap, Span};
use crate::{log_debug, log_error, log_success};
use std::collections::BTreeMap;

/// Errors that stop a scan
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("Unterminated string literal starting at line {line}, column {column}")]
    UnterminatedString { line: u32, column: u32 },

    #[error("Unterminated comment starting at line {line}, column {column}")]
    UnterminatedComment { line: u32, column: u32 },

    #[error(
        "Token at line {line}, column {column} is too long: {length} characters (max {max})",
        max = MAX_TOKEN_LENGTH
    )]
    TokenTooLong { line: u32, column: u32, length: usize },

    #[error("Too many tokens: {count} (max {max})", max = MAX_TOKEN_COUNT)]
    TooManyTokens { count: usize },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::UnterminatedString { .. } => codes::lexical::UNTERMINATED_STRING,
            LexerError::UnterminatedComment { .. } => codes::lexical::UNTERMINATED_COMMENT,
            LexerError::TokenTooLong { .. } => codes::lexical::TOKEN_TOO_LONG,
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
        }
    }

    /// Line and column the error points at, if it has one
    pub fn position(&self) -> Option<(u32, u32)> {
        match self {
            LexerError::UnterminatedString { line, column }
            | LexerError::UnterminatedComment { line, column }
            | LexerError::TokenTooLong { line, column, .. } => Some((*line, *column)),
            LexerError::TooManyTokens { .. } => None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct LexicalMetrics {
    pub raw_tokens: usize,
    pub total_tokens: usize,
    pub discarded_comment_tokens: usize,
    pub comment_regions: usize,
    pub dropped_artifacts: usize,
    pub string_tokens: usize,
    pub number_tokens: usize,
    pub identifier_tokens: usize,
    pub keyword_tokens: usize,
    pub operator_tokens: usize,
    pub comparison_tokens: usize,
    pub bracket_tokens: usize,
    pub escape_diagnostics: usize,
    pub max_token_length: usize,
    pub line_count: usize,

    /// Per-type counts, only collected when detailed metrics are enabled
    pub type_counts: BTreeMap<TokenType, usize>,
}

impl LexicalMetrics {
    fn record_scan(&mut self, output: &ScanOutput) {
        self.raw_tokens = output.tokens.len();
        self.discarded_comment_tokens = output.discarded_tokens;
        self.comment_regions = output.comment_regions;
        self.max_token_length = output
            .tokens
            .iter()
            .map(RawToken::char_len)
            .max()
            .unwrap_or(0);
    }

    fn record_token(&mut self, token: &ClassifiedToken, detailed: bool) {
        self.total_tokens += 1;

        match token.kind.token_class() {
            TokenClass::Literal if token.kind == TokenType::String => self.string_tokens += 1,
            TokenClass::Literal => self.number_tokens += 1,
            TokenClass::Identifier => self.identifier_tokens += 1,
            TokenClass::Keyword => self.keyword_tokens += 1,
            TokenClass::Operator => self.operator_tokens += 1,
            TokenClass::Comparison => self.comparison_tokens += 1,
            TokenClass::Bracket => self.bracket_tokens += 1,
        }

        if detailed {
            *self.type_counts.entry(token.kind).or_insert(0) += 1;
        }
    }
}

pub struct LexicalAnalyzer {
    metrics: LexicalMetrics,
    preferences: ScannerPreferences,
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self::with_preferences(ScannerPreferences::default())
    }

    pub fn with_preferences(preferences: ScannerPreferences) -> Self {
        Self {
            metrics: LexicalMetrics::default(),
            preferences,
        }
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &ScannerPreferences {
        &self.preferences
    }

    /// Scanner output only, before categorization
    pub fn scan_raw(&mut self, source: &str) -> Result<Vec<RawToken>, LexerError> {
        self.metrics = LexicalMetrics::default();
        let output = self.run_scanner(source)?;
        self.metrics.record_scan(&output);
        Ok(output.tokens)
    }

    /// Scan and categorize `source`
    pub fn tokenize(&mut self, source: &str) -> Result<TokenStream, LexerError> {
        self.metrics = LexicalMetrics::default();
        self.metrics.line_count = source.lines().count();

        log_debug!("Starting lexical analysis",
            "chars" => source.chars().count(),
            "lines" => self.metrics.line_count,
            "max_tokens_allowed" => MAX_TOKEN_COUNT
        );

        let output = self.run_scanner(source)?;
        self.metrics.record_scan(&output);

        log_success!(codes::success::SCAN_COMPLETE, "Scan completed",
            "raw_tokens" => output.tokens.len(),
            "discarded_comment_tokens" => output.discarded_tokens,
            "comment_regions" => output.comment_regions
        );

        let categorization = categorize_with_diagnostics(output.tokens);
        self.metrics.dropped_artifacts = categorization.dropped;
        self.metrics.escape_diagnostics = categorization.diagnostics.len();
        for token in &categorization.tokens {
            self.metrics
                .record_token(token, self.preferences.collect_detailed_metrics);
        }

        log_success!(codes::success::CATEGORIZATION_COMPLETE, "Categorization completed",
            "tokens" => self.metrics.total_tokens,
            "strings" => self.metrics.string_tokens,
            "numbers" => self.metrics.number_tokens,
            "identifiers" => self.metrics.identifier_tokens,
            "keywords" => self.metrics.keyword_tokens,
            "escape_diagnostics" => self.metrics.escape_diagnostics
        );

        Ok(TokenStream::with_source_map(
            categorization.tokens,
            SourceMap::new(source.to_string()),
        )
        .with_diagnostics(categorization.diagnostics))
    }

    /// Tokenize a loaded file, attaching its path to every log event
    pub fn tokenize_file_result(
        &mut self,
        file_result: &FileProcessingResult,
    ) -> Result<TokenStream, LexerError> {
        let path = file_result.metadata.path.clone();

        crate::logging::with_file_context(&path, 0, || {
            let stream = self.tokenize(&file_result.source)?;

            log_success!(codes::success::TOKENIZATION_COMPLETE, "Tokenization completed",
                "file" => path.display(),
                "tokens" => stream.len(),
                "size_bytes" => file_result.metadata.size
            );

            Ok(stream)
        })
    }

    fn run_scanner(&self, source: &str) -> Result<ScanOutput, LexerError> {
        Scanner::with_preferences(source, &self.preferences)
            .scan()
            .map_err(|error| {
                self.log_failure(&error);
                error
            })
    }

    fn log_failure(&self, error: &LexerError) {
        let message = error.to_string();

        match error.position() {
            Some((line, column)) if self.preferences.include_position_in_errors => {
                let span = Span::point(Position::new(0, line, column));
                log_error!(error.error_code(), &message,
                    span = span,
                    "line" => line,
                    "column" => column
                );
            }
            _ => {
                log_error!(error.error_code(), &message);
            }
        }
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::escapes::EscapeError;
    use assert_matches::assert_matches;

    #[test]
    fn test_metrics_after_tokenize() {
        let mut analyzer = LexicalAnalyzer::new();
        let stream = analyzer
            .tokenize("<* header *>\nset name = \"a\\qb\"\n~print(name 2)\n")
            .unwrap();

        assert_eq!(stream.len(), 9);

        let metrics = analyzer.metrics();
        assert_eq!(metrics.raw_tokens, 9);
        assert_eq!(metrics.total_tokens, 9);
        assert_eq!(metrics.discarded_comment_tokens, 3);
        assert_eq!(metrics.comment_regions, 1);
        assert_eq!(metrics.string_tokens, 1);
        assert_eq!(metrics.number_tokens, 1);
        assert_eq!(metrics.identifier_tokens, 3);
        assert_eq!(metrics.keyword_tokens, 1);
        assert_eq!(metrics.comparison_tokens, 1);
        assert_eq!(metrics.bracket_tokens, 2);
        assert_eq!(metrics.escape_diagnostics, 1);
        assert_eq!(metrics.max_token_length, 6);
        assert_eq!(metrics.line_count, 3);
    }

    #[test]
    fn test_unknown_escape_reaches_the_stream() {
        let mut analyzer = LexicalAnalyzer::new();
        let stream = analyzer.tokenize("\"a\\qb\"").unwrap();

        assert_eq!(stream.tokens()[0].value.as_deref(), Some("ab"));
        assert_eq!(stream.diagnostics().len(), 1);

        let diagnostic = &stream.diagnostics()[0];
        assert_matches!(
            diagnostic.value,
            EscapeError::UnknownEscape {
                character: 'q',
                offset: 2
            }
        );
        assert_eq!((diagnostic.span.start.line, diagnostic.span.start.column), (1, 3));
        assert_eq!(diagnostic.span.end.column, 5);
        assert_eq!(analyzer.metrics().escape_diagnostics, 1);

        let clean = analyzer.tokenize("\"a\\tb\"").unwrap();
        assert!(!clean.has_diagnostics());
    }

    #[test]
    fn test_detailed_metrics_toggle() {
        let mut detailed = LexicalAnalyzer::with_preferences(ScannerPreferences {
            collect_detailed_metrics: true,
            ..ScannerPreferences::default()
        });
        detailed.tokenize("a b 1").unwrap();
        assert_eq!(detailed.metrics().type_counts.get(&TokenType::Ident), Some(&2));

        let mut plain = LexicalAnalyzer::with_preferences(ScannerPreferences {
            collect_detailed_metrics: false,
            ..ScannerPreferences::default()
        });
        plain.tokenize("a b 1").unwrap();
        assert!(plain.metrics().type_counts.is_empty());
    }

    #[test]
    fn test_metrics_reset_between_runs() {
        let mut analyzer = LexicalAnalyzer::new();
        analyzer.tokenize("a b c d").unwrap();
        analyzer.tokenize("x").unwrap();
        assert_eq!(analyzer.metrics().total_tokens, 1);
    }

    #[test]
    fn test_scan_raw_keeps_uncategorized_text() {
        let mut analyzer = LexicalAnalyzer::new();
        let raw = analyzer.scan_raw("set x <* c *> 1").unwrap();

        let contents: Vec<&str> = raw.iter().map(|t| t.content()).collect();
        assert_eq!(contents, vec!["set", "x", "1"]);
        assert_eq!(analyzer.metrics().discarded_comment_tokens, 3);
    }

    #[test]
    fn test_error_position_and_code() {
        let mut analyzer = LexicalAnalyzer::new();
        let error = analyzer.tokenize("x \"open").unwrap_err();

        assert_matches!(error, LexerError::UnterminatedString { line: 1, column: 3 });
        assert_eq!(error.position(), Some((1, 3)));
        assert_eq!(error.error_code(), codes::lexical::UNTERMINATED_STRING);
        assert!(error.to_string().contains("line 1, column 3"));
    }

    #[test]
    fn test_lenient_preference() {
        let mut analyzer = LexicalAnalyzer::with_preferences(ScannerPreferences {
            allow_unterminated: true,
            ..ScannerPreferences::default()
        });

        let stream = analyzer.tokenize("x \"open").unwrap();
        assert_eq!(stream.len(), 2);
        assert_eq!(stream.tokens()[1].kind, TokenType::Ident);
    }

    #[test]
    fn test_too_many_tokens_has_no_position() {
        let error = LexerError::TooManyTokens { count: 5 };
        assert_eq!(error.position(), None);
        assert_eq!(error.error_code(), codes::lexical::TOO_MANY_TOKENS);
    }
}
