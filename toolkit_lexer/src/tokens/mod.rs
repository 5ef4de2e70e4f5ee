//! Token model: scanner output, classified tokens, and views over them

pub mod lines;
pub mod token;
pub mod token_stream;

pub use lines::{group_by_line, LineGroup, Located};
pub use token::{ClassifiedToken, RawToken, TokenClass, TokenType};
pub use token_stream::TokenStream;
