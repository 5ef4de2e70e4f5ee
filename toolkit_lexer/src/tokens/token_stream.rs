//! Cursor over classified tokens
//!
//! The stream owns the categorizer output, the escape diagnostics found while
//! producing it and, when built from a source text, a [`SourceMap`] for
//! rendering diagnostics against the original lines.

use super::lines::{group_by_line, LineGroup};
use super::token::{ClassifiedToken, TokenClass, TokenType};
use crate::lexical::escapes::EscapeError;
use crate::utils::{SourceMap, Span, Spanned};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<ClassifiedToken>,
    position: usize,
    source_map: Option<SourceMap>,
    diagnostics: Vec<Spanned<EscapeError>>,
}

impl TokenStream {
    pub fn new(tokens: Vec<ClassifiedToken>) -> Self {
        Self {
            tokens,
            position: 0,
            source_map: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn with_source_map(tokens: Vec<ClassifiedToken>, source_map: SourceMap) -> Self {
        Self {
            tokens,
            position: 0,
            source_map: Some(source_map),
            diagnostics: Vec::new(),
        }
    }

    /// Attach the escape problems found while categorizing these tokens
    pub fn with_diagnostics(mut self, diagnostics: Vec<Spanned<EscapeError>>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    // === NAVIGATION ===

    pub fn current(&self) -> Option<&ClassifiedToken> {
        self.tokens.get(self.position)
    }

    pub fn current_kind(&self) -> Option<TokenType> {
        self.current().map(|token| token.kind)
    }

    /// Next token without advancing
    pub fn peek(&self) -> Option<&ClassifiedToken> {
        self.peek_ahead(1)
    }

    pub fn peek_ahead(&self, n: usize) -> Option<&ClassifiedToken> {
        self.tokens.get(self.position + n)
    }

    /// Move to the next token and return it
    pub fn advance(&mut self) -> Option<&ClassifiedToken> {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        self.current()
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub fn check(&self, kind: TokenType) -> bool {
        self.current_kind() == Some(kind)
    }

    /// Consume the current token if it has type `kind`
    pub fn advance_if(&mut self, kind: TokenType) -> Option<ClassifiedToken> {
        if self.check(kind) {
            let token = self.tokens[self.position].clone();
            self.position += 1;
            Some(token)
        } else {
            None
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn save_position(&self) -> usize {
        self.position
    }

    pub fn restore_position(&mut self, saved_position: usize) {
        self.position = saved_position.min(self.tokens.len());
    }

    pub fn remaining_count(&self) -> usize {
        self.tokens.len().saturating_sub(self.position)
    }

    // === CONTENT ===

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[ClassifiedToken] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClassifiedToken> {
        self.tokens.iter()
    }

    pub fn into_tokens(self) -> Vec<ClassifiedToken> {
        self.tokens
    }

    /// Tokens grouped by the line they start on
    pub fn lines(&self) -> Vec<LineGroup<&ClassifiedToken>> {
        group_by_line(&self.tokens)
    }

    pub fn type_counts(&self) -> BTreeMap<TokenType, usize> {
        let mut counts = BTreeMap::new();
        for token in &self.tokens {
            *counts.entry(token.kind).or_insert(0) += 1;
        }
        counts
    }

    pub fn count_class(&self, class: TokenClass) -> usize {
        self.tokens
            .iter()
            .filter(|token| token.kind.token_class() == class)
            .count()
    }

    // === DIAGNOSTICS ===

    pub fn source_map(&self) -> Option<&SourceMap> {
        self.source_map.as_ref()
    }

    /// Escape problems in string literals, in source order
    pub fn diagnostics(&self) -> &[Spanned<EscapeError>] {
        &self.diagnostics
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// One rendered warning per escape diagnostic
    pub fn format_diagnostics(&self) -> Vec<String> {
        self.diagnostics
            .iter()
            .map(|diagnostic| {
                let message = format!("{} [{}]", diagnostic.value, diagnostic.value.error_code());
                match &self.source_map {
                    Some(source_map) => source_map.format_warning(&diagnostic.span, &message),
                    None => format!("warning: {} at {}", message, diagnostic.span.start),
                }
            })
            .collect()
    }

    /// Render `message` against the source line of `span`
    pub fn format_error(&self, span: Span, message: &str) -> String {
        match &self.source_map {
            Some(source_map) => source_map.format_error(&span, message),
            None => format!("error: {} at {}", message, span.start()),
        }
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a ClassifiedToken;
    type IntoIter = std::slice::Iter<'a, ClassifiedToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
