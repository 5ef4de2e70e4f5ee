//! Token types for the Toolkit language
//!
//! The scanner produces [`RawToken`]s (text plus start position); the
//! categorizer turns them into [`ClassifiedToken`]s tagged with a
//! [`TokenType`].

use crate::utils::{Position, Span};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of semantic token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TokenType {
    // === LITERALS ===
    String,
    Number,
    Ident,
    Function,

    // === ARITHMETIC AND BITWISE OPERATORS ===
    Add,
    Minus,
    Divide,
    Mod,
    Pow,
    Mult,
    And,
    Or,
    ShiftL,
    ShiftR,
    Fmt,

    // === ARROWS ===
    In,
    Out,

    // === KEYWORDS ===
    Set,
    Iter,
    As,
    End,
    Is,
    If,
    Return,

    // === COMPARISON ===
    LessThan,
    GreaterThan,
    LessThanEq,
    GreaterThanEq,
    Equal,

    // === BRACKETS ===
    LParen,
    RParen,
    LBracket,
    RBracket,
    LCurly,
    RCurly,
}

/// Coarse grouping used for metrics and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenClass {
    Literal,
    Identifier,
    Keyword,
    Operator,
    Comparison,
    Bracket,
}

impl TokenType {
    pub const ALL: [TokenType; 35] = [
        TokenType::String,
        TokenType::Number,
        TokenType::Ident,
        TokenType::Function,
        TokenType::Add,
        TokenType::Minus,
        TokenType::Divide,
        TokenType::Mod,
        TokenType::Pow,
        TokenType::Mult,
        TokenType::And,
        TokenType::Or,
        TokenType::ShiftL,
        TokenType::ShiftR,
        TokenType::Fmt,
        TokenType::In,
        TokenType::Out,
        TokenType::Set,
        TokenType::Iter,
        TokenType::As,
        TokenType::End,
        TokenType::Is,
        TokenType::If,
        TokenType::Return,
        TokenType::LessThan,
        TokenType::GreaterThan,
        TokenType::LessThanEq,
        TokenType::GreaterThanEq,
        TokenType::Equal,
        TokenType::LParen,
        TokenType::RParen,
        TokenType::LBracket,
        TokenType::RBracket,
        TokenType::LCurly,
        TokenType::RCurly,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Number => "NUMBER",
            Self::Ident => "IDENT",
            Self::Function => "FUNCTION",
            Self::Add => "ADD",
            Self::Minus => "MINUS",
            Self::Divide => "DIVIDE",
            Self::Mod => "MOD",
            Self::Pow => "POW",
            Self::Mult => "MULT",
            Self::And => "AND",
            Self::Or => "OR",
            Self::ShiftL => "SHIFT_L",
            Self::ShiftR => "SHIFT_R",
            Self::Fmt => "FMT",
            Self::In => "IN",
            Self::Out => "OUT",
            Self::Set => "SET",
            Self::Iter => "ITER",
            Self::As => "AS",
            Self::End => "END",
            Self::Is => "IS",
            Self::If => "IF",
            Self::Return => "RETURN",
            Self::LessThan => "LESS_THAN",
            Self::GreaterThan => "GREATER_THAN",
            Self::LessThanEq => "LESS_THAN_EQ",
            Self::GreaterThanEq => "GREATER_THAN_EQ",
            Self::Equal => "EQUAL",
            Self::LParen => "L_PAREN",
            Self::RParen => "R_PAREN",
            Self::LBracket => "L_BRACKET",
            Self::RBracket => "R_BRACKET",
            Self::LCurly => "L_CURLY",
            Self::RCurly => "R_CURLY",
        }
    }

    pub fn token_class(self) -> TokenClass {
        match self {
            Self::String | Self::Number => TokenClass::Literal,
            Self::Ident | Self::Function => TokenClass::Identifier,
            Self::Set
            | Self::Iter
            | Self::As
            | Self::End
            | Self::Is
            | Self::If
            | Self::Return
            | Self::In
            | Self::Out => TokenClass::Keyword,
            Self::Add
            | Self::Minus
            | Self::Divide
            | Self::Mod
            | Self::Pow
            | Self::Mult
            | Self::And
            | Self::Or
            | Self::ShiftL
            | Self::ShiftR
            | Self::Fmt => TokenClass::Operator,
            Self::LessThan
            | Self::GreaterThan
            | Self::LessThanEq
            | Self::GreaterThanEq
            | Self::Equal => TokenClass::Comparison,
            Self::LParen
            | Self::RParen
            | Self::LBracket
            | Self::RBracket
            | Self::LCurly
            | Self::RCurly => TokenClass::Bracket,
        }
    }

    pub fn is_opening_bracket(self) -> bool {
        matches!(self, Self::LParen | Self::LBracket | Self::LCurly)
    }

    pub fn is_closing_bracket(self) -> bool {
        matches!(self, Self::RParen | Self::RBracket | Self::RCurly)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Scanner output: the exact characters of one token and where it began
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawToken {
    pub content: String,
    pub start: Position,
}

impl RawToken {
    pub fn new(content: impl Into<String>, start: Position) -> Self {
        Self {
            content: content.into(),
            start,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn line(&self) -> u32 {
        self.start.line
    }

    pub fn column(&self) -> u32 {
        self.start.column
    }

    /// Span over the token text; string tokens containing newlines span lines
    pub fn span(&self) -> Span {
        Span::covering(self.start, &self.content)
    }

    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}

/// `content : line - column`
impl fmt::Display for RawToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {} - {}", self.content, self.line(), self.column())
    }
}

/// Categorizer output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedToken {
    #[serde(flatten)]
    pub token: RawToken,
    pub kind: TokenType,
    /// Escape-resolved text, present only for `String` tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ClassifiedToken {
    pub fn new(token: RawToken, kind: TokenType) -> Self {
        Self {
            token,
            kind,
            value: None,
        }
    }

    pub fn string(token: RawToken, value: String) -> Self {
        Self {
            token,
            kind: TokenType::String,
            value: Some(value),
        }
    }

    pub fn content(&self) -> &str {
        &self.token.content
    }

    pub fn line(&self) -> u32 {
        self.token.line()
    }

    pub fn column(&self) -> u32 {
        self.token.column()
    }

    pub fn span(&self) -> Span {
        self.token.span()
    }

    pub fn is(&self, kind: TokenType) -> bool {
        self.kind == kind
    }

    /// Numeric value of a `Number` token
    pub fn as_number(&self) -> Option<f64> {
        match self.kind {
            TokenType::Number => self.token.content.parse().ok(),
            _ => None,
        }
    }

    /// Function name without its `~` marker
    pub fn function_name(&self) -> Option<&str> {
        match self.kind {
            TokenType::Function => self.token.content.strip_prefix('~'),
            _ => None,
        }
    }
}

impl fmt::Display for ClassifiedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.token, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_raw_token_display_matches_listing_format() {
        let token = RawToken::new("set", Position::new(0, 1, 1));
        assert_eq!(token.to_string(), "set : 1 - 1");
    }

    #[test]
    fn test_all_is_complete_and_unique() {
        let names: HashSet<&str> = TokenType::ALL.iter().map(|t| t.name()).collect();
        assert_eq!(names.len(), 35);
    }

    #[test]
    fn test_token_classes() {
        assert_eq!(TokenType::Return.token_class(), TokenClass::Keyword);
        assert_eq!(TokenType::Out.token_class(), TokenClass::Keyword);
        assert_eq!(TokenType::Fmt.token_class(), TokenClass::Operator);
        assert_eq!(TokenType::LessThanEq.token_class(), TokenClass::Comparison);
        assert_eq!(TokenType::RCurly.token_class(), TokenClass::Bracket);
        assert!(TokenType::LBracket.is_opening_bracket());
        assert!(TokenType::RParen.is_closing_bracket());
    }

    #[test]
    fn test_span_covers_multiline_string() {
        let token = RawToken::new("\"a\nb\"", Position::new(4, 1, 5));
        let span = token.span();
        assert_eq!(span.start().line, 1);
        assert_eq!(span.end().line, 2);
    }

    #[test]
    fn test_classified_accessors() {
        let number = ClassifiedToken::new(RawToken::new("2.5", Position::start()), TokenType::Number);
        assert_eq!(number.as_number(), Some(2.5));

        let function =
            ClassifiedToken::new(RawToken::new("~print", Position::start()), TokenType::Function);
        assert_eq!(function.function_name(), Some("print"));
        assert_eq!(function.as_number(), None);
    }

    #[test]
    fn test_classified_json_shape() {
        let token = ClassifiedToken::string(
            RawToken::new("\"hi\"", Position::new(6, 1, 7)),
            "hi".to_string(),
        );
        let value = serde_json::to_value(&token).unwrap();

        assert_eq!(value["content"], "\"hi\"");
        assert_eq!(value["kind"], "String");
        assert_eq!(value["value"], "hi");
        assert_eq!(value["start"]["line"], 1);
        assert_eq!(value["start"]["column"], 7);
    }
}
