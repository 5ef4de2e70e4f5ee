// Internal modules
#[macro_use]
pub mod logging;
pub mod config;
pub mod file_processor;
pub mod grammar;
pub mod lexical;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use lexical::{tokenize, LexerError, LexicalAnalyzer, LexicalMetrics};
pub use tokens::{group_by_line, ClassifiedToken, LineGroup, RawToken, TokenStream, TokenType};
