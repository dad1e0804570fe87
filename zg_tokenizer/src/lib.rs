// Internal modules
pub mod config;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use lexical::{
    render_error_caret, tokenize, tokenize_with_preferences, LexerError, LexicalAnalyzer,
    LexicalMetrics,
};
pub use tokens::{GroupingKind, Operator, Token, TokenCollection};
pub use utils::ExpressionRef;
