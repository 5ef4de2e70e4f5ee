//! Reserved words and arrow keywords
use crate::tokens::TokenType;
use serde::{Deserialize, Serialize};

/// Words the categorizer never treats as identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    End,
    Set,
    Is,
    As,
    Iter,
    Ret,
    If,
    /// `<:`
    Out,
    /// `:>`
    In,
}

impl Keyword {
    pub const ALL: [Keyword; 9] = [
        Keyword::End,
        Keyword::Set,
        Keyword::Is,
        Keyword::As,
        Keyword::Iter,
        Keyword::Ret,
        Keyword::If,
        Keyword::Out,
        Keyword::In,
    ];

    /// Exact spelling in Toolkit source
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::End => "end",
            Self::Set => "set",
            Self::Is => "is",
            Self::As => "as",
            Self::Iter => "iter",
            Self::Ret => "ret",
            Self::If => "if",
            Self::Out => "<:",
            Self::In => ":>",
        }
    }

    /// Case-sensitive lookup
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "end" => Some(Self::End),
            "set" => Some(Self::Set),
            "is" => Some(Self::Is),
            "as" => Some(Self::As),
            "iter" => Some(Self::Iter),
            "ret" => Some(Self::Ret),
            "if" => Some(Self::If),
            "<:" => Some(Self::Out),
            ":>" => Some(Self::In),
            _ => None,
        }
    }

    pub const fn token_type(self) -> TokenType {
        match self {
            Self::End => TokenType::End,
            Self::Set => TokenType::Set,
            Self::Is => TokenType::Is,
            Self::As => TokenType::As,
            Self::Iter => TokenType::Iter,
            Self::Ret => TokenType::Return,
            Self::If => TokenType::If,
            Self::Out => TokenType::Out,
            Self::In => TokenType::In,
        }
    }

    /// True for the `<:` and `:>` arrows
    pub const fn is_arrow(self) -> bool {
        matches!(self, Self::Out | Self::In)
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub fn is_reserved_keyword(word: &str) -> bool {
    Keyword::from_str(word).is_some()
}
