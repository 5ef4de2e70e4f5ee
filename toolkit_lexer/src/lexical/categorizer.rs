//! Maps raw tokens to token types
//!
//! Rules are tried in a fixed order and the first match wins:
//! string, operator, number, function, keyword, bracket, comparison, identifier.

use super::escapes::{is_quoted, resolve_escapes, EscapeError};
use crate::grammar::symbols::{
    bracket_type, comparison_type, is_bracket_symbol, is_comparison_symbol, is_operator_symbol,
    lookup_member, operator_type,
};
use crate::grammar::Keyword;
use crate::log_warning;
use crate::tokens::{ClassifiedToken, RawToken, TokenType};
use crate::utils::{Span, Spanned};

/// Marks a function name, e.g. `~print`
pub const FUNCTION_PREFIX: char = '~';

/// Categorizer output with the escape problems found along the way
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Categorization {
    pub tokens: Vec<ClassifiedToken>,
    pub diagnostics: Vec<Spanned<EscapeError>>,
    /// Whitespace artifacts that were skipped
    pub dropped: usize,
}

/// True for contents the categorizer skips: empty or a single space
pub fn is_whitespace_artifact(content: &str) -> bool {
    content.is_empty() || content == " "
}

/// Token type for `content`, or `None` for a whitespace artifact.
///
/// Depends on nothing but `content`.
pub fn classify(content: &str) -> Option<TokenType> {
    if is_whitespace_artifact(content) {
        return None;
    }

    let kind = if is_quoted(content) {
        TokenType::String
    } else if is_operator_symbol(content) {
        lookup_member("operator", content, operator_type)
    } else if is_number(content) {
        TokenType::Number
    } else if content.starts_with(FUNCTION_PREFIX) {
        TokenType::Function
    } else if let Some(keyword) = Keyword::from_str(content) {
        keyword.token_type()
    } else if is_bracket_symbol(content) {
        lookup_member("bracket", content, bracket_type)
    } else if is_comparison_symbol(content) {
        lookup_member("comparison", content, comparison_type)
    } else {
        TokenType::Ident
    };

    Some(kind)
}

/// Finite floating-point numeral. Literals that overflow to infinity, such as
/// `1e400`, are not numbers.
pub fn is_number(content: &str) -> bool {
    content
        .parse::<f64>()
        .map(|value| value.is_finite())
        .unwrap_or(false)
}

/// Classify one raw token; string tokens get their resolved value
pub fn classify_token(token: RawToken) -> Option<(ClassifiedToken, Vec<Spanned<EscapeError>>)> {
    let kind = classify(token.content())?;

    if kind != TokenType::String {
        return Some((ClassifiedToken::new(token, kind), Vec::new()));
    }

    let resolution = resolve_escapes(token.content());
    let diagnostics = resolution
        .diagnostics
        .into_iter()
        .map(|error| {
            let at = token.start.advance_str(&token.content()[..error.offset()]);
            let span = Span::covering(at, &error.sequence());
            Spanned::new(error, span)
        })
        .collect();

    Some((ClassifiedToken::string(token, resolution.value), diagnostics))
}

/// Classify a raw sequence in order, logging escape problems as warnings
pub fn categorize_with_diagnostics(raw_tokens: Vec<RawToken>) -> Categorization {
    let mut result = Categorization {
        tokens: Vec::with_capacity(raw_tokens.len()),
        ..Categorization::default()
    };

    for token in raw_tokens {
        match classify_token(token) {
            Some((classified, diagnostics)) => {
                for diagnostic in &diagnostics {
                    log_warning!(
                        code = diagnostic.value.error_code(),
                        span = diagnostic.span,
                        &diagnostic.value.to_string(),
                        "token" => classified.content()
                    );
                }
                result.tokens.push(classified);
                result.diagnostics.extend(diagnostics);
            }
            None => result.dropped += 1,
        }
    }

    result
}

/// Classify a raw sequence in order, dropping whitespace artifacts
pub fn categorize(raw_tokens: Vec<RawToken>) -> Vec<ClassifiedToken> {
    categorize_with_diagnostics(raw_tokens).tokens
}
