//! Single-pass lexical analyzer for arithmetic expressions
//!
//! Scans the source one character at a time, emitting tokens and spans into
//! a fresh [`TokenCollection`]. The first violation halts the pass; its error
//! is recorded once and never overwritten.

use super::classifier::{classify, CharClass};
use super::error::{EndOfExpressionReason, LexerError, NumericFormatReason};
use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::{GroupingKind, Operator, Token, TokenCollection};
use crate::utils::ExpressionRef;
use crate::{log_debug, log_success, log_warning};
use std::collections::HashMap;

/// Progress through a numeric literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralState {
    Integer,
    /// A period has been consumed
    Fraction,
    /// Just consumed `e`/`E`; a digit or sign must follow
    ExponentMarker,
    /// Just consumed the exponent sign; a digit must follow
    ExponentSign,
    Exponent,
}

impl LiteralState {
    /// Whether the next character is constrained by an exponent lookahead
    pub fn exponent_armed(&self) -> bool {
        matches!(self, Self::ExponentMarker | Self::ExponentSign)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// No left operand available
    Blank,
    /// Between tokens, after a value or closed group
    BlankWithLHS,
    InLiteral(LiteralState),
    InSubstitutable,
}

/// Characters that build literals and identifiers
#[derive(Debug, Clone, Copy)]
enum ValueChar {
    Digit,
    Letter(char),
    Period,
}

/// Per-pass counters
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub literal_tokens: usize,
    pub substitutable_tokens: usize,
    pub operator_tokens: usize,
    pub grouping_tokens: usize,
    pub max_grouping_depth: usize,
    pub whitespace_skipped: usize,

    // Only filled when operator tracking is enabled
    pub operator_usage_patterns: HashMap<char, usize>,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        self.total_tokens += 1;

        if !preferences.collect_detailed_metrics {
            return;
        }

        match token {
            Token::Literal(_) => self.literal_tokens += 1,
            Token::Substitutable(_) => self.substitutable_tokens += 1,
            Token::Operator(op) => {
                self.operator_tokens += 1;

                if preferences.track_operator_patterns {
                    *self.operator_usage_patterns.entry(op.glyph()).or_insert(0) += 1;
                }
            }
            Token::OpenGrouping(_) | Token::CloseGrouping(_) => self.grouping_tokens += 1,
        }
    }

    pub(crate) fn record_grouping_depth(&mut self, depth: usize) {
        self.max_grouping_depth = self.max_grouping_depth.max(depth);
    }

    pub(crate) fn record_whitespace(&mut self) {
        self.whitespace_skipped += 1;
    }
}

/// Reusable analyzer; every call to [`LexicalAnalyzer::tokenize`] starts fresh
pub struct LexicalAnalyzer {
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self::with_preferences(LexicalPreferences::default())
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            metrics: LexicalMetrics::default(),
            preferences,
        }
    }

    /// Tokenize one expression into a new collection
    pub fn tokenize(&mut self, source: &str) -> TokenCollection {
        self.metrics = LexicalMetrics::default();

        log_debug!("Starting lexical analysis",
            "length" => source.len(),
            "max_expression_length" => MAX_EXPRESSION_LENGTH,
            "max_tokens_allowed" => MAX_TOKEN_COUNT
        );

        let mut scanner = Scanner::new(source, &self.preferences, &mut self.metrics);
        let outcome = scanner.run();
        let (tokens, spans, error) = scanner.conclude(outcome);

        match &error {
            // A rejected expression is an outcome for the caller, not a fault
            Some(error) => {
                log_warning!(code = error.error_code(), &error.to_string(),
                    span = ExpressionRef::new(error.position()),
                    "position" => error.position() + 1,
                    "resource_limit" => error.is_resource_limit(),
                    "tokens_before_failure" => tokens.len()
                );
            }
            None => {
                log_success!(codes::success::TOKENIZATION_COMPLETE, "Tokenization completed",
                    "tokens" => self.metrics.total_tokens,
                    "spans" => spans.len(),
                    "literals" => self.metrics.literal_tokens,
                    "substitutables" => self.metrics.substitutable_tokens,
                    "operators" => self.metrics.operator_tokens,
                    "max_grouping_depth" => self.metrics.max_grouping_depth
                );
            }
        }

        TokenCollection::new(source, tokens, spans, error)
    }

    /// Metrics from the most recent pass
    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    pub fn set_preferences(&mut self, preferences: LexicalPreferences) {
        self.preferences = preferences;
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// State of one tokenization pass
struct Scanner<'a> {
    source: &'a str,
    preferences: &'a LexicalPreferences,
    metrics: &'a mut LexicalMetrics,
    tokens: Vec<Token>,
    spans: Vec<ExpressionRef>,
    state: ScanState,
    /// Open groupings, innermost last
    groupings: Vec<(usize, GroupingKind)>,
    error: Option<LexerError>,
}

impl<'a> Scanner<'a> {
    fn new(
        source: &'a str,
        preferences: &'a LexicalPreferences,
        metrics: &'a mut LexicalMetrics,
    ) -> Self {
        Self {
            source,
            preferences,
            metrics,
            tokens: Vec::new(),
            spans: Vec::new(),
            state: ScanState::Blank,
            groupings: Vec::new(),
            error: None,
        }
    }

    fn run(&mut self) -> Result<(), LexerError> {
        if self.source.len() > MAX_EXPRESSION_LENGTH {
            return self.fail(LexerError::ExpressionTooLong {
                limit: MAX_EXPRESSION_LENGTH,
                position: MAX_EXPRESSION_LENGTH,
            });
        }

        for (offset, ch) in self.source.char_indices() {
            self.step(offset, ch)?;
        }

        self.finish_input()
    }

    /// Record the first error of the pass and halt
    fn fail(&mut self, error: LexerError) -> Result<(), LexerError> {
        Err(self.error.get_or_insert(error).clone())
    }

    fn step(&mut self, offset: usize, ch: char) -> Result<(), LexerError> {
        let class = classify(ch);
        if class == CharClass::Unrecognized {
            return self.fail(LexerError::UnrecognizedCharacter { position: offset });
        }

        self.check_exponent_lookahead(offset, class)?;

        match class {
            CharClass::Digit => self.value_char(offset, ValueChar::Digit),
            CharClass::Letter => self.value_char(offset, ValueChar::Letter(ch)),
            CharClass::Period => self.value_char(offset, ValueChar::Period),
            CharClass::UnaryGlyph(op) => self.operator(offset, op, true),
            CharClass::BinaryGlyph(op) => self.operator(offset, op, false),
            CharClass::Whitespace => {
                self.whitespace();
                Ok(())
            }
            CharClass::OpenGrouping(kind) => self.open_grouping(offset, kind),
            CharClass::CloseGrouping(kind) => self.close_grouping(offset, kind),
            // Rejected before the lookahead check
            CharClass::Unrecognized => Ok(()),
        }
    }

    fn check_exponent_lookahead(
        &mut self,
        offset: usize,
        class: CharClass,
    ) -> Result<(), LexerError> {
        let allowed = match self.state {
            ScanState::InLiteral(LiteralState::ExponentMarker) => {
                matches!(class, CharClass::Digit | CharClass::UnaryGlyph(_))
            }
            ScanState::InLiteral(LiteralState::ExponentSign) => class == CharClass::Digit,
            _ => true,
        };

        if allowed {
            Ok(())
        } else {
            self.fail(LexerError::NumericFormat {
                reason: NumericFormatReason::InvalidExponentCharacter,
                position: offset,
            })
        }
    }

    fn value_char(&mut self, offset: usize, ch: ValueChar) -> Result<(), LexerError> {
        match self.state {
            ScanState::Blank | ScanState::BlankWithLHS => self.begin_value(offset, ch),
            ScanState::InLiteral(literal) => self.continue_literal(offset, ch, literal),
            ScanState::InSubstitutable => match ch {
                ValueChar::Period => self.fail(LexerError::NumericFormat {
                    reason: NumericFormatReason::PeriodInIdentifier,
                    position: offset,
                }),
                ValueChar::Digit | ValueChar::Letter(_) => self.extend_span(offset),
            },
        }
    }

    fn begin_value(&mut self, offset: usize, ch: ValueChar) -> Result<(), LexerError> {
        let index = self.spans.len();
        let (token, state) = match ch {
            ValueChar::Digit => (
                Token::Literal(index),
                ScanState::InLiteral(LiteralState::Integer),
            ),
            ValueChar::Period => (
                Token::Literal(index),
                ScanState::InLiteral(LiteralState::Fraction),
            ),
            ValueChar::Letter(_) => (Token::Substitutable(index), ScanState::InSubstitutable),
        };

        self.push_token(offset, token)?;
        self.spans.push(ExpressionRef::new(offset));
        self.state = state;
        Ok(())
    }

    fn continue_literal(
        &mut self,
        offset: usize,
        ch: ValueChar,
        literal: LiteralState,
    ) -> Result<(), LexerError> {
        use LiteralState::*;

        let next = match (ch, literal) {
            (ValueChar::Digit, ExponentMarker | ExponentSign) => Exponent,
            (ValueChar::Digit, other) => other,

            (ValueChar::Letter('e' | 'E'), Integer | Fraction) => ExponentMarker,
            (ValueChar::Letter(_), _) => {
                return self.fail(LexerError::NumericFormat {
                    reason: NumericFormatReason::UnexpectedCharacter,
                    position: offset,
                });
            }

            (ValueChar::Period, Integer) => Fraction,
            (ValueChar::Period, Fraction) => {
                return self.fail(LexerError::NumericFormat {
                    reason: NumericFormatReason::DuplicatePeriod,
                    position: offset,
                });
            }
            (ValueChar::Period, ExponentMarker | ExponentSign | Exponent) => {
                return self.fail(LexerError::NumericFormat {
                    reason: NumericFormatReason::PeriodInExponent,
                    position: offset,
                });
            }
        };

        self.extend_span(offset)?;
        self.state = ScanState::InLiteral(next);
        Ok(())
    }

    /// Grow the open span to cover `offset`
    fn extend_span(&mut self, offset: usize) -> Result<(), LexerError> {
        let current_len = match self.spans.last() {
            Some(span) => span.len(),
            None => {
                return self.fail(LexerError::Internal {
                    detail: "Internal error: unable to locate existing expression to update"
                        .to_string(),
                    position: offset,
                });
            }
        };

        if current_len >= MAX_SPAN_LENGTH {
            return self.fail(LexerError::SpanTooLong {
                limit: MAX_SPAN_LENGTH,
                position: offset,
            });
        }

        if let Some(span) = self.spans.last_mut() {
            span.extend_to(offset);
        }
        Ok(())
    }

    fn operator(&mut self, offset: usize, op: Operator, unary: bool) -> Result<(), LexerError> {
        if unary && self.state == ScanState::InLiteral(LiteralState::ExponentMarker) {
            // Exponent sign belongs to the literal
            self.extend_span(offset)?;
            self.state = ScanState::InLiteral(LiteralState::ExponentSign);
            return Ok(());
        }

        if !unary && self.state == ScanState::Blank {
            return self.fail(LexerError::UnexpectedBinaryOperator { position: offset });
        }

        self.push_token(offset, Token::Operator(op))?;
        self.state = ScanState::Blank;
        Ok(())
    }

    fn whitespace(&mut self) {
        self.metrics.record_whitespace();
        self.state = match self.state {
            ScanState::Blank => ScanState::Blank,
            ScanState::BlankWithLHS | ScanState::InLiteral(_) | ScanState::InSubstitutable => {
                ScanState::BlankWithLHS
            }
        };
    }

    fn open_grouping(&mut self, offset: usize, kind: GroupingKind) -> Result<(), LexerError> {
        if self.groupings.len() >= MAX_GROUPING_DEPTH {
            return self.fail(LexerError::GroupingTooDeep {
                limit: MAX_GROUPING_DEPTH,
                position: offset,
            });
        }

        self.push_token(offset, Token::OpenGrouping(kind))?;
        self.groupings.push((offset, kind));
        self.metrics.record_grouping_depth(self.groupings.len());
        self.state = ScanState::Blank;
        Ok(())
    }

    fn close_grouping(&mut self, offset: usize, kind: GroupingKind) -> Result<(), LexerError> {
        // The close token is kept even when it turns out to be unbalanced
        self.push_token(offset, Token::CloseGrouping(kind))?;

        match self.groupings.last() {
            None => self.fail(LexerError::UnmatchedCloseGrouping { position: offset }),
            Some(&(_, open)) if open != kind => {
                self.fail(LexerError::MismatchedCloseGrouping { position: offset })
            }
            Some(_) => {
                self.groupings.pop();
                self.state = ScanState::BlankWithLHS;
                Ok(())
            }
        }
    }

    fn push_token(&mut self, offset: usize, token: Token) -> Result<(), LexerError> {
        if self.tokens.len() >= MAX_TOKEN_COUNT {
            return self.fail(LexerError::TooManyTokens {
                limit: MAX_TOKEN_COUNT,
                position: offset,
            });
        }

        self.metrics.record_token(&token, self.preferences);
        if self.preferences.log_token_details {
            log_debug!("Token emitted",
                span = ExpressionRef::new(offset),
                "kind" => token.type_name(),
                "value" => token
            );
        }

        self.tokens.push(token);
        Ok(())
    }

    /// Release the pass results, reconciling the returned outcome with the recorded error
    fn conclude(
        self,
        outcome: Result<(), LexerError>,
    ) -> (Vec<Token>, Vec<ExpressionRef>, Option<LexerError>) {
        // A clean return must not leave a recorded error behind
        let error = match (outcome, self.error) {
            (Err(error), _) => Some(error),
            (Ok(()), Some(recorded)) => Some(LexerError::Internal {
                detail: format!(
                    "Failed to properly return from error condition. Original error: {}",
                    recorded
                ),
                position: 0,
            }),
            (Ok(()), None) => None,
        };

        (self.tokens, self.spans, error)
    }

    fn finish_input(&mut self) -> Result<(), LexerError> {
        if let Some(&(position, _)) = self.groupings.last() {
            return self.fail(LexerError::UnmatchedOpenGrouping { position });
        }

        let last = self.source.len().saturating_sub(1);

        if matches!(self.state, ScanState::InLiteral(literal) if literal.exponent_armed()) {
            return self.fail(LexerError::UnexpectedEndOfExpression {
                reason: EndOfExpressionReason::IncompleteExponent,
                position: last,
            });
        }

        if self.tokens.last().is_some_and(Token::is_operator) {
            return self.fail(LexerError::UnexpectedEndOfExpression {
                reason: EndOfExpressionReason::MissingOperand,
                position: last,
            });
        }

        Ok(())
    }
}
