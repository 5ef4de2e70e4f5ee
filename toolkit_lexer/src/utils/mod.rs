//! Shared primitives for the Toolkit lexer
//!
//! Source positions and spans used by tokens, diagnostics and log events.

pub mod span;

pub use span::{Position, SourceMap, Span, Spanned};
