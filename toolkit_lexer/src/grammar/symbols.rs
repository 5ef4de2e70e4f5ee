//! Operator, bracket and comparison symbols
//!
//! Each family has a membership set and a match table. The categorizer asks
//! the set first and then the table; a symbol that is in a set but missing from
//! its table means the two drifted apart, which is a bug in this file.

use crate::tokens::TokenType;

pub const OPERATOR_SYMBOLS: [&str; 11] = ["+", "-", "*", "/", "%", "&", "|", "**", ">>", "<<", "$"];

pub const BRACKET_SYMBOLS: [&str; 6] = ["(", ")", "[", "]", "{", "}"];

pub const COMPARISON_SYMBOLS: [&str; 5] = ["<", ">", "=", "<=", ">="];

/// Characters the scanner splits out as standalone tokens
pub const BRACKET_CHARS: [char; 6] = ['(', ')', '[', ']', '{', '}'];

pub fn is_operator_symbol(symbol: &str) -> bool {
    OPERATOR_SYMBOLS.contains(&symbol)
}

pub fn is_bracket_symbol(symbol: &str) -> bool {
    BRACKET_SYMBOLS.contains(&symbol)
}

pub fn is_comparison_symbol(symbol: &str) -> bool {
    COMPARISON_SYMBOLS.contains(&symbol)
}

pub fn is_bracket_char(ch: char) -> bool {
    BRACKET_CHARS.contains(&ch)
}

pub fn operator_type(symbol: &str) -> Option<TokenType> {
    match symbol {
        "+" => Some(TokenType::Add),
        "-" => Some(TokenType::Minus),
        "*" => Some(TokenType::Mult),
        "/" => Some(TokenType::Divide),
        "%" => Some(TokenType::Mod),
        "&" => Some(TokenType::And),
        "|" => Some(TokenType::Or),
        "**" => Some(TokenType::Pow),
        ">>" => Some(TokenType::ShiftR),
        "<<" => Some(TokenType::ShiftL),
        "$" => Some(TokenType::Fmt),
        _ => None,
    }
}

pub fn bracket_type(symbol: &str) -> Option<TokenType> {
    match symbol {
        "(" => Some(TokenType::LParen),
        ")" => Some(TokenType::RParen),
        "[" => Some(TokenType::LBracket),
        "]" => Some(TokenType::RBracket),
        "{" => Some(TokenType::LCurly),
        "}" => Some(TokenType::RCurly),
        _ => None,
    }
}

pub fn comparison_type(symbol: &str) -> Option<TokenType> {
    match symbol {
        "<" => Some(TokenType::LessThan),
        ">" => Some(TokenType::GreaterThan),
        "=" => Some(TokenType::Equal),
        "<=" => Some(TokenType::LessThanEq),
        ">=" => Some(TokenType::GreaterThanEq),
        _ => None,
    }
}

/// Table lookup for a symbol already known to be in `family`'s set.
///
/// # Panics
///
/// If the set and the table disagree about `symbol`.
pub fn lookup_member(
    family: &'static str,
    symbol: &str,
    table: fn(&str) -> Option<TokenType>,
) -> TokenType {
    match table(symbol) {
        Some(kind) => kind,
        None => panic!(
            "{} symbol {:?} is in the membership set but has no table entry",
            family, symbol
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_operator_table_is_total() {
        let kinds: HashSet<TokenType> = OPERATOR_SYMBOLS
            .iter()
            .map(|s| operator_type(s).unwrap_or_else(|| panic!("missing operator {}", s)))
            .collect();
        assert_eq!(kinds.len(), OPERATOR_SYMBOLS.len());
    }

    #[test]
    fn test_bracket_table_is_total() {
        for symbol in BRACKET_SYMBOLS {
            assert!(bracket_type(symbol).is_some(), "missing bracket {}", symbol);
        }
        for ch in BRACKET_CHARS {
            assert!(is_bracket_symbol(&ch.to_string()));
        }
    }

    #[test]
    fn test_comparison_table_is_total() {
        for symbol in COMPARISON_SYMBOLS {
            assert!(comparison_type(symbol).is_some(), "missing comparison {}", symbol);
        }
    }

    #[test]
    fn test_families_are_disjoint() {
        for symbol in OPERATOR_SYMBOLS {
            assert!(!is_bracket_symbol(symbol));
            assert!(!is_comparison_symbol(symbol));
        }
        for symbol in COMPARISON_SYMBOLS {
            assert!(!is_bracket_symbol(symbol));
        }
    }

    #[test]
    fn test_tables_reject_non_members() {
        assert_eq!(operator_type("^"), None);
        assert_eq!(comparison_type("=="), None);
        assert_eq!(bracket_type("<"), None);
    }

    #[test]
    fn test_lookup_member() {
        assert_eq!(lookup_member("operator", "**", operator_type), TokenType::Pow);
    }

    #[test]
    #[should_panic(expected = "has no table entry")]
    fn test_lookup_member_panics_on_drift() {
        lookup_member("operator", "^", operator_type);
    }
}
