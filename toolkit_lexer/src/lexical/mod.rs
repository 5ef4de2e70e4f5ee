//! Lexical analysis for Toolkit source text
//!
//! Source text is scanned into [`RawToken`]s, which are then categorized into
//! [`ClassifiedToken`]s:
//!
//! ```text
//! source -> Scanner (comments dropped) -> RawToken* -> categorize -> ClassifiedToken*
//! ```
//!
//! Both sequences can be viewed per line with [`group_by_line`].
//!
//! [`RawToken`]: crate::tokens::RawToken
//! [`ClassifiedToken`]: crate::tokens::ClassifiedToken
//! [`group_by_line`]: crate::tokens::group_by_line

pub mod analyzer;
pub mod categorizer;
pub mod escapes;
pub mod scanner;

use crate::config::runtime::ScannerPreferences;
use crate::file_processor::FileProcessingResult;
use crate::tokens::TokenStream;

pub use analyzer::{LexerError, LexicalAnalyzer, LexicalMetrics};
pub use categorizer::{categorize, categorize_with_diagnostics, classify, Categorization};
pub use escapes::{resolve_escapes, EscapeError, EscapeResolution};
pub use scanner::{scan, CommentState, ScanOutput, Scanner, COMMENT_CLOSE, COMMENT_OPEN};

/// Tokenize in-memory source with default preferences
pub fn tokenize(source: &str) -> Result<TokenStream, LexerError> {
    LexicalAnalyzer::new().tokenize(source)
}

pub fn tokenize_with_preferences(
    source: &str,
    preferences: ScannerPreferences,
) -> Result<TokenStream, LexerError> {
    LexicalAnalyzer::with_preferences(preferences).tokenize(source)
}

/// Tokenize a loaded file under its logging context
pub fn tokenize_file_result(
    file_result: &FileProcessingResult,
) -> Result<TokenStream, LexerError> {
    LexicalAnalyzer::new().tokenize_file_result(file_result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{group_by_line, ClassifiedToken, TokenType};
    use assert_matches::assert_matches;

    fn summary(stream: &TokenStream) -> Vec<(TokenType, &str, u32, u32)> {
        stream
            .iter()
            .map(|t| (t.kind, t.content(), t.line(), t.column()))
            .collect()
    }

    #[test]
    fn test_assignment_statement() {
        let stream = tokenize("set x = 5\n").unwrap();
        assert_eq!(
            summary(&stream),
            vec![
                (TokenType::Set, "set", 1, 1),
                (TokenType::Ident, "x", 1, 5),
                (TokenType::Equal, "=", 1, 7),
                (TokenType::Number, "5", 1, 9),
            ]
        );
    }

    #[test]
    fn test_string_with_escaped_quote() {
        let stream = tokenize(r#""hi \" there""#).unwrap();

        assert_eq!(stream.len(), 1);
        let token = &stream.tokens()[0];
        assert_eq!(token.kind, TokenType::String);
        assert_eq!(token.value.as_deref(), Some("hi \" there"));
    }

    #[test]
    fn test_brackets_need_no_whitespace() {
        let stream = tokenize("( a + b )").unwrap();
        assert_eq!(
            summary(&stream),
            vec![
                (TokenType::LParen, "(", 1, 1),
                (TokenType::Ident, "a", 1, 3),
                (TokenType::Add, "+", 1, 5),
                (TokenType::Ident, "b", 1, 7),
                (TokenType::RParen, ")", 1, 9),
            ]
        );

        // Operators are not delimiters, so unspaced arithmetic stays one token
        let stream = tokenize("(a+b)").unwrap();
        assert_eq!(
            summary(&stream),
            vec![
                (TokenType::LParen, "(", 1, 1),
                (TokenType::Ident, "a+b", 1, 2),
                (TokenType::RParen, ")", 1, 5),
            ]
        );
    }

    #[test]
    fn test_comment_region_leaves_nothing() {
        let stream = tokenize("<* skip me *> set y = 1").unwrap();
        let kinds: Vec<TokenType> = stream.iter().map(|t| t.kind).collect();

        assert_eq!(
            kinds,
            vec![
                TokenType::Set,
                TokenType::Ident,
                TokenType::Equal,
                TokenType::Number
            ]
        );
        assert!(stream.iter().all(|t| !["skip", "me"].contains(&t.content())));
    }

    #[test]
    fn test_function_call() {
        let stream = tokenize("~double(4)").unwrap();
        assert_eq!(
            summary(&stream),
            vec![
                (TokenType::Function, "~double", 1, 1),
                (TokenType::LParen, "(", 1, 8),
                (TokenType::Number, "4", 1, 9),
                (TokenType::RParen, ")", 1, 10),
            ]
        );
    }

    #[test]
    fn test_unmatched_quote_is_an_error_by_default() {
        let result = tokenize("set s = \"never closed\n");
        assert_matches!(
            result,
            Err(LexerError::UnterminatedString { line: 1, column: 9 })
        );
    }

    #[test]
    fn test_unmatched_quote_runs_to_end_when_lenient() {
        let preferences = ScannerPreferences {
            allow_unterminated: true,
            ..ScannerPreferences::default()
        };
        let stream = tokenize_with_preferences("set s = \"never closed\n", preferences).unwrap();

        let last = stream.tokens().last().unwrap();
        assert_eq!(last.content(), "\"never closed\n");
        assert_eq!(last.kind, TokenType::Ident);
        assert_eq!((last.line(), last.column()), (1, 9));
    }

    #[test]
    fn test_lenient_partial_string_ending_in_escaped_quote() {
        let preferences = ScannerPreferences {
            allow_unterminated: true,
            ..ScannerPreferences::default()
        };
        let stream = tokenize_with_preferences("x \"abc\\\"", preferences).unwrap();

        // Both ends are quotes, so the partial literal still reads as a string
        let last = stream.tokens().last().unwrap();
        assert_eq!(last.content(), "\"abc\\\"");
        assert_eq!(last.kind, TokenType::String);
        assert_eq!(last.value.as_deref(), Some("abc"));
        assert_eq!((last.line(), last.column()), (1, 3));

        assert_eq!(stream.diagnostics().len(), 1);
        assert_matches!(
            stream.diagnostics()[0].value,
            EscapeError::DanglingEscape { offset: 4 }
        );
    }

    #[test]
    fn test_first_column_is_one_and_lines_step_by_one() {
        let source = "a\nb c\n\n  d\ne";
        let stream = tokenize(source).unwrap();

        let lines: Vec<u32> = stream.iter().map(|t| t.line()).collect();
        assert_eq!(lines, vec![1, 2, 2, 4, 5]);
        assert_eq!(stream.tokens()[0].column(), 1);
        assert_eq!(stream.tokens()[1].column(), 1);
        assert_eq!(stream.tokens()[3].column(), 3);
    }

    #[test]
    fn test_grouped_view() {
        let stream = tokenize("set x = 1\n\nif x > 0\n  ret x\nend\n").unwrap();
        let lines = stream.lines();

        let numbers: Vec<u32> = lines.iter().map(|g| g.line).collect();
        assert_eq!(numbers, vec![1, 3, 4, 5]);
        assert_eq!(lines[1].tokens[0].kind, TokenType::If);
        assert_eq!(lines[1].tokens[2].kind, TokenType::GreaterThan);
        assert_eq!(lines[2].tokens[0].kind, TokenType::Return);
        assert_eq!(lines[3].tokens[0].kind, TokenType::End);

        let raw_lines = group_by_line(scan("a\nb c").unwrap());
        assert_eq!(raw_lines.len(), 2);
        assert_eq!(raw_lines[1].tokens.len(), 2);
    }

    #[test]
    fn test_full_vocabulary() {
        let source = "set s = \"str\" if ( a + b * c ) ret end m > n\n\
                      iter i as items { x is i ** 2 % 3 }\n\
                      ~f <: y :> z [ a << b >> c & d | e - f / g $ h <= j >= k < l ]";
        let stream = tokenize(source).unwrap();
        let counts = stream.type_counts();

        for kind in TokenType::ALL {
            assert!(counts.contains_key(&kind), "missing {:?}", kind);
        }
    }

    #[test]
    fn test_reclassification_is_stable() {
        let stream = tokenize("set s = \"a\\tb\" ~go(1 <= 2)").unwrap();
        let raw: Vec<_> = stream.iter().map(|t| t.token.clone()).collect();
        let again: Vec<ClassifiedToken> = categorize(raw);

        assert_eq!(stream.tokens(), again.as_slice());
    }

    #[test]
    fn test_empty_source() {
        let stream = tokenize("").unwrap();
        assert!(stream.is_empty());
        assert!(stream.lines().is_empty());
    }
}
