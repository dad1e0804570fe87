//! Shared primitive types used by the tokenizer and its diagnostics.

pub mod span;

pub use span::{caret_line, ExpressionRef};
