//! Lexical analysis of arithmetic expressions
//!
//! Converts an expression string into a [`TokenCollection`] in one pass,
//! validating numeric literal syntax and grouping balance along the way.

pub mod analyzer;
pub mod classifier;
pub mod error;

use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::TokenCollection;

pub use analyzer::{LexicalAnalyzer, LexicalMetrics, LiteralState, ScanState};
pub use classifier::{classify, CharClass};
pub use error::{render_error_caret, EndOfExpressionReason, LexerError, NumericFormatReason};

/// Tokenize with default preferences
pub fn tokenize(source: &str) -> TokenCollection {
    LexicalAnalyzer::new().tokenize(source)
}

pub fn tokenize_with_preferences(
    source: &str,
    preferences: LexicalPreferences,
) -> TokenCollection {
    LexicalAnalyzer::with_preferences(preferences).tokenize(source)
}

pub fn create_analyzer() -> LexicalAnalyzer {
    LexicalAnalyzer::new()
}

pub fn create_analyzer_with_preferences(preferences: LexicalPreferences) -> LexicalAnalyzer {
    LexicalAnalyzer::with_preferences(preferences)
}

// ============================================================================
// MODULE VALIDATION
// ============================================================================

/// Check that every lexical code is registered and the limits are usable
pub fn validate_tokenization() -> Result<(), String> {
    for code in codes::LEXICAL_CODES {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    let limits = get_lexical_limits();
    if limits.max_token_count == 0 || limits.max_grouping_depth == 0 {
        return Err("Lexical limits cannot be zero".to_string());
    }
    if limits.max_token_count < limits.max_expression_length {
        return Err("MAX_TOKEN_COUNT is below MAX_EXPRESSION_LENGTH".to_string());
    }
    if limits.max_grouping_depth < limits.max_expression_length / 2 {
        return Err("MAX_GROUPING_DEPTH is below half of MAX_EXPRESSION_LENGTH".to_string());
    }
    if limits.max_span_length != limits.max_expression_length {
        return Err("MAX_SPAN_LENGTH differs from MAX_EXPRESSION_LENGTH".to_string());
    }

    crate::log_debug!("Lexical limits validated",
        "max_expression_length" => limits.max_expression_length,
        "max_token_count" => limits.max_token_count,
        "max_grouping_depth" => limits.max_grouping_depth,
        "max_span_length" => limits.max_span_length
    );

    Ok(())
}

pub fn get_lexical_limits() -> LexicalLimits {
    LexicalLimits {
        max_expression_length: MAX_EXPRESSION_LENGTH,
        max_token_count: MAX_TOKEN_COUNT,
        max_grouping_depth: MAX_GROUPING_DEPTH,
        max_span_length: MAX_SPAN_LENGTH,
    }
}

/// Compile-time limits applied to every pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalLimits {
    pub max_expression_length: usize,
    pub max_token_count: usize,
    pub max_grouping_depth: usize,
    pub max_span_length: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{GroupingKind, Operator, Token};
    use crate::utils::ExpressionRef;
    use assert_matches::assert_matches;

    fn texts(collection: &TokenCollection) -> Vec<&str> {
        collection
            .spans()
            .iter()
            .filter_map(|span| span.slice(collection.source()))
            .collect()
    }

    #[test]
    fn test_simple_sum() {
        let collection = tokenize("1+2");
        assert!(collection.success());
        assert_eq!(
            collection.tokens(),
            &[
                Token::Literal(0),
                Token::Operator(Operator::Plus),
                Token::Literal(1)
            ]
        );
        assert_eq!(
            collection.spans(),
            &[ExpressionRef::new(0), ExpressionRef::new(2)]
        );
    }

    #[test]
    fn test_whitespace_insensitive() {
        let spaced = tokenize("1 + 2");
        let compact = tokenize("1+2");
        assert_eq!(spaced.tokens(), compact.tokens());
        assert_eq!(texts(&spaced), texts(&compact));
    }

    #[test]
    fn test_span_round_trip() {
        let collection = tokenize("pi * (radius ^ 2) + 6.02e23 - 1e-10");
        assert!(collection.success());
        assert_eq!(texts(&collection), vec!["pi", "radius", "2", "6.02e23", "1e-10"]);

        for (token, text) in collection.iter_with_text() {
            match token {
                Token::Literal(_) | Token::Substitutable(_) => assert!(text.is_some()),
                _ => assert!(text.is_none()),
            }
        }
    }

    #[test]
    fn test_spans_strictly_increasing() {
        let collection = tokenize("a1 + 22 * {b - .5}");
        assert!(collection.success());
        for pair in collection.spans().windows(2) {
            assert!(pair[0].end < pair[1].start);
        }
    }

    #[test]
    fn test_scientific_notation() {
        let collection = tokenize("6.02e23");
        assert_eq!(collection.tokens(), &[Token::Literal(0)]);
        assert_eq!(texts(&collection), vec!["6.02e23"]);

        let collection = tokenize("1e-10");
        assert_eq!(collection.tokens(), &[Token::Literal(0)]);
        assert_eq!(collection.spans(), &[ExpressionRef::covering(0, 4)]);

        let collection = tokenize("2E+5");
        assert!(collection.success());
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_incomplete_exponent() {
        let collection = tokenize("1e");
        assert_matches!(
            collection.error(),
            Some(LexerError::UnexpectedEndOfExpression {
                reason: EndOfExpressionReason::IncompleteExponent,
                position: 1
            })
        );
        assert_eq!(
            collection.error_message(),
            "Unexpected end of expression while parsing exponent (2)"
        );

        let collection = tokenize("1e-");
        assert_matches!(
            collection.error(),
            Some(LexerError::UnexpectedEndOfExpression {
                reason: EndOfExpressionReason::IncompleteExponent,
                position: 2
            })
        );
    }

    #[test]
    fn test_invalid_exponent_character() {
        for (source, position) in [("1e*2", 2), ("1e-+2", 3), ("1e 2", 2), ("1e.5", 2)] {
            let collection = tokenize(source);
            assert_matches!(
                collection.error(),
                Some(LexerError::NumericFormat {
                    reason: NumericFormatReason::InvalidExponentCharacter,
                    position: p
                }) if *p == position,
                "{}",
                source
            );
        }
    }

    #[test]
    fn test_unrecognized_character_beats_exponent_lookahead() {
        let collection = tokenize("1e#");
        assert_matches!(
            collection.error(),
            Some(LexerError::UnrecognizedCharacter { position: 2 })
        );
    }

    #[test]
    fn test_duplicate_period() {
        let collection = tokenize("1.2.3");
        assert_matches!(
            collection.error(),
            Some(LexerError::NumericFormat {
                reason: NumericFormatReason::DuplicatePeriod,
                position: 3
            })
        );
        assert_eq!(
            collection.error_message(),
            "Period encountered twice while parsing numeric value (4)"
        );
    }

    #[test]
    fn test_period_in_exponent() {
        let collection = tokenize("1e5.2");
        assert_matches!(
            collection.error(),
            Some(LexerError::NumericFormat {
                reason: NumericFormatReason::PeriodInExponent,
                position: 3
            })
        );
    }

    #[test]
    fn test_unexpected_letters_in_literal() {
        let collection = tokenize("1e5e2");
        assert_matches!(
            collection.error(),
            Some(LexerError::NumericFormat {
                reason: NumericFormatReason::UnexpectedCharacter,
                position: 3
            })
        );

        let collection = tokenize("12x");
        assert_matches!(
            collection.error(),
            Some(LexerError::NumericFormat {
                reason: NumericFormatReason::UnexpectedCharacter,
                position: 2
            })
        );
    }

    #[test]
    fn test_leading_period_literal() {
        let collection = tokenize(".5 + 1.");
        assert!(collection.success());
        assert_eq!(texts(&collection), vec![".5", "1."]);
    }

    #[test]
    fn test_identifiers() {
        let collection = tokenize("abc123");
        assert_eq!(collection.tokens(), &[Token::Substitutable(0)]);
        assert_eq!(texts(&collection), vec!["abc123"]);

        let collection = tokenize("abc.123");
        assert_matches!(
            collection.error(),
            Some(LexerError::NumericFormat {
                reason: NumericFormatReason::PeriodInIdentifier,
                position: 3
            })
        );
    }

    #[test]
    fn test_literals_and_identifiers_share_span_list() {
        let collection = tokenize("x + 1 + y");
        assert_eq!(
            collection.tokens(),
            &[
                Token::Substitutable(0),
                Token::Operator(Operator::Plus),
                Token::Literal(1),
                Token::Operator(Operator::Plus),
                Token::Substitutable(2),
            ]
        );
    }

    #[test]
    fn test_unmatched_open_grouping() {
        let collection = tokenize("(1+2");
        assert_matches!(
            collection.error(),
            Some(LexerError::UnmatchedOpenGrouping { position: 0 })
        );

        // Innermost unclosed grouping is reported
        let collection = tokenize("(1 + [2");
        assert_matches!(
            collection.error(),
            Some(LexerError::UnmatchedOpenGrouping { position: 5 })
        );
    }

    #[test]
    fn test_unmatched_close_grouping() {
        let collection = tokenize("1+2)");
        assert_matches!(
            collection.error(),
            Some(LexerError::UnmatchedCloseGrouping { position: 3 })
        );
        assert_eq!(
            collection.tokens().last(),
            Some(&Token::CloseGrouping(GroupingKind::Paren))
        );
    }

    #[test]
    fn test_mismatched_close_grouping() {
        let collection = tokenize("[1+2)");
        assert_matches!(
            collection.error(),
            Some(LexerError::MismatchedCloseGrouping { position: 4 })
        );
        assert_eq!(collection.error_message(), "Mismatched close grouping character (5)");
    }

    #[test]
    fn test_nested_groupings_balance() {
        let collection = tokenize("{[(a)]} * ([b] + {c})");
        assert!(collection.success(), "{}", collection.error_message());
    }

    #[test]
    fn test_binary_operator_needs_left_operand() {
        assert_matches!(
            tokenize("*3").error(),
            Some(LexerError::UnexpectedBinaryOperator { position: 0 })
        );
        assert_matches!(
            tokenize("1**3").error(),
            Some(LexerError::UnexpectedBinaryOperator { position: 2 })
        );
        assert_matches!(
            tokenize("(^2)").error(),
            Some(LexerError::UnexpectedBinaryOperator { position: 1 })
        );
    }

    #[test]
    fn test_unary_after_binary_is_legal() {
        let collection = tokenize("1*+3");
        assert!(collection.success());
        assert_eq!(
            collection.tokens(),
            &[
                Token::Literal(0),
                Token::Operator(Operator::Multiply),
                Token::Operator(Operator::Plus),
                Token::Literal(1),
            ]
        );

        assert!(tokenize("-x").success());
        assert!(tokenize("(a) ^ -2").success());
    }

    #[test]
    fn test_missing_right_operand() {
        let collection = tokenize("1+");
        assert_matches!(
            collection.error(),
            Some(LexerError::UnexpectedEndOfExpression {
                reason: EndOfExpressionReason::MissingOperand,
                position: 1
            })
        );
        assert_eq!(
            collection.error_message(),
            "Unexpected end of expression while waiting for right-hand side of operation (2)"
        );

        // Trailing whitespace moves the reported position to the last character
        assert_matches!(
            tokenize("1 + ").error(),
            Some(LexerError::UnexpectedEndOfExpression { position: 3, .. })
        );
    }

    #[test]
    fn test_unrecognized_character() {
        let collection = tokenize("1 + $");
        assert_eq!(collection.error_message(), "Unrecognized character (5)");
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_failed_collection_keeps_prefix_only() {
        let collection = tokenize("ab + 1.2.3 + c");
        assert!(!collection.success());
        assert_eq!(collection.len(), 3);
        assert_eq!(texts(&collection), vec!["ab", "1.2"]);
    }

    #[test]
    fn test_empty_and_blank_input() {
        for source in ["", "   ", "\t\r\n"] {
            let collection = tokenize(source);
            assert!(collection.success());
            assert!(collection.is_empty());
            assert!(collection.spans().is_empty());
        }
    }

    #[test]
    fn test_expression_too_long() {
        let source = "1".repeat(MAX_EXPRESSION_LENGTH + 1);
        let collection = tokenize(&source);
        assert_matches!(
            collection.error(),
            Some(LexerError::ExpressionTooLong { position, .. }) if *position == MAX_EXPRESSION_LENGTH
        );
        assert!(collection.is_empty());
    }

    #[test]
    fn test_name_as_long_as_expression_limit() {
        let source = "x".repeat(MAX_EXPRESSION_LENGTH);
        let collection = tokenize(&source);
        assert!(collection.success(), "{}", collection.error_message());
        assert_eq!(collection.spans(), &[ExpressionRef::covering(0, MAX_EXPRESSION_LENGTH - 1)]);

        let literal = "7".repeat(MAX_EXPRESSION_LENGTH);
        assert!(tokenize(&literal).success());
    }

    #[test]
    fn test_grouping_too_deep() {
        if MAX_GROUPING_DEPTH + 1 > MAX_EXPRESSION_LENGTH {
            return;
        }
        let source = "(".repeat(MAX_GROUPING_DEPTH + 1);
        let collection = tokenize(&source);
        assert_matches!(
            collection.error(),
            Some(LexerError::GroupingTooDeep { position, .. }) if *position == MAX_GROUPING_DEPTH
        );
    }

    #[test]
    fn test_deepest_nesting_within_expression_limit() {
        let depth = (MAX_EXPRESSION_LENGTH - 1) / 2;
        let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        assert!(source.len() <= MAX_EXPRESSION_LENGTH);

        let collection = tokenize(&source);
        assert!(collection.success(), "{}", collection.error_message());
        assert_eq!(collection.len(), 2 * depth + 1);
    }

    #[test]
    fn test_sum_as_long_as_expression_limit() {
        let mut source = vec!["1"; (MAX_EXPRESSION_LENGTH + 1) / 2].join("+");
        if source.len() < MAX_EXPRESSION_LENGTH {
            source.insert(0, '9');
        }
        assert_eq!(source.len(), MAX_EXPRESSION_LENGTH);

        let collection = tokenize(&source);
        assert!(collection.success(), "{}", collection.error_message());
        assert_eq!(collection.len(), 2 * ((MAX_EXPRESSION_LENGTH + 1) / 2) - 1);

        // Operators alone cannot outrun the token limit either
        let operators = format!("{}1", "-".repeat(MAX_EXPRESSION_LENGTH - 1));
        assert!(tokenize(&operators).success());
    }

    #[test]
    fn test_render_caret_for_failure() {
        let collection = tokenize("2 * (3 + 4]");
        let error = collection.error().unwrap();
        assert_eq!(
            render_error_caret(collection.source(), error),
            "  | 2 * (3 + 4]\n  |           ^"
        );
    }

    #[test]
    fn test_create_analyzer_with_preferences() {
        let preferences = LexicalPreferences {
            collect_detailed_metrics: false,
            track_operator_patterns: true,
            log_token_details: true,
        };
        let mut analyzer = create_analyzer_with_preferences(preferences);
        assert!(!analyzer.preferences().collect_detailed_metrics);
        assert!(analyzer.tokenize("a+b").success());
        assert!(create_analyzer().tokenize("a+").error().is_some());
    }

    #[test]
    fn test_tokenize_with_preferences_matches_default_output() {
        let preferences = LexicalPreferences {
            collect_detailed_metrics: true,
            track_operator_patterns: true,
            log_token_details: false,
        };
        assert_eq!(
            tokenize_with_preferences("x^2", preferences).tokens(),
            tokenize("x^2").tokens()
        );
    }

    #[test]
    fn test_validate_tokenization() {
        assert!(validate_tokenization().is_ok());
        let limits = get_lexical_limits();
        assert_eq!(limits.max_token_count, MAX_TOKEN_COUNT);
    }
}
