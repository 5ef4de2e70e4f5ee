//! Fixed vocabulary of the Toolkit language

pub mod keywords;
pub mod symbols;

pub use keywords::{is_reserved_keyword, Keyword};
pub use symbols::{
    is_bracket_char, is_bracket_symbol, is_comparison_symbol, is_operator_symbol,
    BRACKET_SYMBOLS, COMPARISON_SYMBOLS, OPERATOR_SYMBOLS,
};
