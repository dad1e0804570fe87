//! Lexical analysis errors
//!
//! Every error carries the 0-based offset of the character that triggered it
//! and displays as `"<description> (<1-based position>)"`.

use crate::logging::{codes, Code};
use crate::utils::caret_line;
use std::fmt;

/// Why a numeric literal or identifier was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericFormatReason {
    DuplicatePeriod,
    PeriodInExponent,
    /// Second exponent marker or a non-exponent letter inside a literal
    UnexpectedCharacter,
    PeriodInIdentifier,
    InvalidExponentCharacter,
}

impl NumericFormatReason {
    pub fn description(&self) -> &'static str {
        match self {
            Self::DuplicatePeriod => "Period encountered twice while parsing numeric value",
            Self::PeriodInExponent => "Invalid period encountered in numeric value exponent",
            Self::UnexpectedCharacter => {
                "Unexpected character encountered while parsing numeric value"
            }
            Self::PeriodInIdentifier => {
                "Unexpected period encountered while parsing variable or function name"
            }
            Self::InvalidExponentCharacter => {
                "Invalid character encountered while parsing exponent"
            }
        }
    }
}

impl fmt::Display for NumericFormatReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// What the expression was still waiting for when input ran out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndOfExpressionReason {
    IncompleteExponent,
    MissingOperand,
}

impl EndOfExpressionReason {
    pub fn description(&self) -> &'static str {
        match self {
            Self::IncompleteExponent => "Unexpected end of expression while parsing exponent",
            Self::MissingOperand => {
                "Unexpected end of expression while waiting for right-hand side of operation"
            }
        }
    }
}

impl fmt::Display for EndOfExpressionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("Unrecognized character ({})", .position + 1)]
    UnrecognizedCharacter { position: usize },

    #[error("Unexpected binary operator found; expected left operand ({})", .position + 1)]
    UnexpectedBinaryOperator { position: usize },

    #[error("{reason} ({})", .position + 1)]
    NumericFormat {
        reason: NumericFormatReason,
        position: usize,
    },

    #[error("Unmatched close grouping character ({})", .position + 1)]
    UnmatchedCloseGrouping { position: usize },

    #[error("Mismatched close grouping character ({})", .position + 1)]
    MismatchedCloseGrouping { position: usize },

    #[error("Unmatched open grouping character ({})", .position + 1)]
    UnmatchedOpenGrouping { position: usize },

    #[error("{reason} ({})", .position + 1)]
    UnexpectedEndOfExpression {
        reason: EndOfExpressionReason,
        position: usize,
    },

    #[error("Expression exceeds maximum length of {limit} characters ({})", .position + 1)]
    ExpressionTooLong { limit: usize, position: usize },

    #[error("Expression exceeds maximum of {limit} tokens ({})", .position + 1)]
    TooManyTokens { limit: usize, position: usize },

    #[error("Grouping nested deeper than {limit} levels ({})", .position + 1)]
    GroupingTooDeep { limit: usize, position: usize },

    #[error("Numeric value or name longer than {limit} characters ({})", .position + 1)]
    SpanTooLong { limit: usize, position: usize },

    #[error("{detail} ({})", .position + 1)]
    Internal { detail: String, position: usize },
}

impl LexerError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::UnrecognizedCharacter { .. } => codes::lexical::UNRECOGNIZED_CHARACTER,
            Self::UnexpectedBinaryOperator { .. } => codes::lexical::UNEXPECTED_BINARY_OPERATOR,
            Self::NumericFormat { .. } => codes::lexical::NUMERIC_FORMAT,
            Self::UnmatchedCloseGrouping { .. } => codes::lexical::UNMATCHED_CLOSE_GROUPING,
            Self::MismatchedCloseGrouping { .. } => codes::lexical::MISMATCHED_CLOSE_GROUPING,
            Self::UnmatchedOpenGrouping { .. } => codes::lexical::UNMATCHED_OPEN_GROUPING,
            Self::UnexpectedEndOfExpression { .. } => {
                codes::lexical::UNEXPECTED_END_OF_EXPRESSION
            }
            Self::ExpressionTooLong { .. } => codes::lexical::EXPRESSION_TOO_LONG,
            Self::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
            Self::GroupingTooDeep { .. } => codes::lexical::GROUPING_TOO_DEEP,
            Self::SpanTooLong { .. } => codes::lexical::SPAN_TOO_LONG,
            Self::Internal { .. } => codes::system::INTERNAL_ERROR,
        }
    }

    /// 0-based offset of the offending character
    pub fn position(&self) -> usize {
        match self {
            Self::UnrecognizedCharacter { position }
            | Self::UnexpectedBinaryOperator { position }
            | Self::NumericFormat { position, .. }
            | Self::UnmatchedCloseGrouping { position }
            | Self::MismatchedCloseGrouping { position }
            | Self::UnmatchedOpenGrouping { position }
            | Self::UnexpectedEndOfExpression { position, .. }
            | Self::ExpressionTooLong { position, .. }
            | Self::TooManyTokens { position, .. }
            | Self::GroupingTooDeep { position, .. }
            | Self::SpanTooLong { position, .. }
            | Self::Internal { position, .. } => *position,
        }
    }

    pub fn is_resource_limit(&self) -> bool {
        matches!(
            self,
            Self::ExpressionTooLong { .. }
                | Self::TooManyTokens { .. }
                | Self::GroupingTooDeep { .. }
                | Self::SpanTooLong { .. }
        )
    }
}

/// Source line with a caret under the character the error points at
pub fn render_error_caret(source: &str, error: &LexerError) -> String {
    caret_line(source, error.position())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_use_one_based_positions() {
        let error = LexerError::UnmatchedCloseGrouping { position: 3 };
        assert_eq!(error.to_string(), "Unmatched close grouping character (4)");

        let error = LexerError::NumericFormat {
            reason: NumericFormatReason::DuplicatePeriod,
            position: 3,
        };
        assert_eq!(
            error.to_string(),
            "Period encountered twice while parsing numeric value (4)"
        );

        let error = LexerError::UnexpectedEndOfExpression {
            reason: EndOfExpressionReason::MissingOperand,
            position: 1,
        };
        assert_eq!(
            error.to_string(),
            "Unexpected end of expression while waiting for right-hand side of operation (2)"
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            LexerError::UnrecognizedCharacter { position: 0 }
                .error_code()
                .as_str(),
            "E020"
        );
        assert_eq!(
            LexerError::GroupingTooDeep {
                limit: 1,
                position: 0
            }
            .error_code()
            .as_str(),
            "E029"
        );
        assert_eq!(
            LexerError::Internal {
                detail: "x".into(),
                position: 0
            }
            .error_code()
            .as_str(),
            "ERR001"
        );
    }

    #[test]
    fn test_render_error_caret() {
        let error = LexerError::MismatchedCloseGrouping { position: 4 };
        assert_eq!(render_error_caret("[1+2)", &error), "  | [1+2)\n  |     ^");
    }

    #[test]
    fn test_resource_limit_classification() {
        assert!(LexerError::SpanTooLong {
            limit: 4,
            position: 4
        }
        .is_resource_limit());
        assert!(!LexerError::UnrecognizedCharacter { position: 0 }.is_resource_limit());
    }
}
