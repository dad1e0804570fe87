//! Token model for arithmetic expressions
//!
//! - [`Token`]: a literal, substitutable (variable or function name),
//!   operator, or grouping delimiter
//! - [`TokenCollection`]: the ordered output of one tokenization pass, with
//!   the span list that literal and substitutable tokens index into

pub mod collection;
pub mod token;

pub use collection::TokenCollection;
pub use token::{GroupingKind, Operator, Token};
