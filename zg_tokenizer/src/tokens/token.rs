//! Token types produced by the lexical analyzer
//!
//! Literal and substitutable tokens carry an index into the collection's
//! span list; operators and grouping tokens carry their glyph directly.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Arithmetic operator glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Plus,     // +
    Minus,    // -
    Multiply, // *
    Divide,   // /
    Power,    // ^
}

impl Operator {
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '+' => Some(Self::Plus),
            '-' => Some(Self::Minus),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            '^' => Some(Self::Power),
            _ => None,
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
            Self::Power => '^',
        }
    }

    /// `+` and `-` may also act as prefix signs
    pub fn is_unary(&self) -> bool {
        matches!(self, Self::Plus | Self::Minus)
    }
}

/// Bracket family shared by an open and close grouping glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupingKind {
    Paren,   // ( )
    Bracket, // [ ]
    Brace,   // { }
}

impl GroupingKind {
    pub fn from_open(glyph: char) -> Option<Self> {
        match glyph {
            '(' => Some(Self::Paren),
            '[' => Some(Self::Bracket),
            '{' => Some(Self::Brace),
            _ => None,
        }
    }

    pub fn from_close(glyph: char) -> Option<Self> {
        match glyph {
            ')' => Some(Self::Paren),
            ']' => Some(Self::Bracket),
            '}' => Some(Self::Brace),
            _ => None,
        }
    }

    pub fn open_glyph(&self) -> char {
        match self {
            Self::Paren => '(',
            Self::Bracket => '[',
            Self::Brace => '{',
        }
    }

    pub fn close_glyph(&self) -> char {
        match self {
            Self::Paren => ')',
            Self::Bracket => ']',
            Self::Brace => '}',
        }
    }
}

/// A recognized lexical unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token {
    /// Numeric constant; index into the span list
    Literal(usize),
    /// Variable or function name; index into the span list
    Substitutable(usize),
    Operator(Operator),
    OpenGrouping(GroupingKind),
    CloseGrouping(GroupingKind),
}

impl Token {
    /// Category name used in diagnostic output
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Literal(_) => "Literal",
            Self::Substitutable(_) => "Substitutable",
            Self::Operator(_) => "Operator",
            Self::OpenGrouping(_) => "OpenGrouping",
            Self::CloseGrouping(_) => "CloseGrouping",
        }
    }

    /// Span index for value-bearing tokens
    pub fn span_index(&self) -> Option<usize> {
        match self {
            Self::Literal(index) | Self::Substitutable(index) => Some(*index),
            _ => None,
        }
    }

    /// Glyph for operator and grouping tokens
    pub fn glyph(&self) -> Option<char> {
        match self {
            Self::Operator(op) => Some(op.glyph()),
            Self::OpenGrouping(kind) => Some(kind.open_glyph()),
            Self::CloseGrouping(kind) => Some(kind.close_glyph()),
            Self::Literal(_) | Self::Substitutable(_) => None,
        }
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }
}

/// Renders the raw value: the span index or the glyph
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.span_index(), self.glyph()) {
            (Some(index), _) => write!(f, "{}", index),
            (None, Some(glyph)) => write!(f, "{}", glyph),
            (None, None) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_glyphs() {
        for glyph in ['+', '-', '*', '/', '^'] {
            let op = Operator::from_glyph(glyph).unwrap();
            assert_eq!(op.glyph(), glyph);
        }
        assert!(Operator::Minus.is_unary());
        assert!(!Operator::Power.is_unary());
        assert_eq!(Operator::from_glyph('%'), None);
    }

    #[test]
    fn test_grouping_pairs() {
        for (open, close) in [('(', ')'), ('[', ']'), ('{', '}')] {
            let kind = GroupingKind::from_open(open).unwrap();
            assert_eq!(GroupingKind::from_close(close), Some(kind));
            assert_eq!(kind.close_glyph(), close);
        }
        assert_eq!(GroupingKind::from_open(')'), None);
    }

    #[test]
    fn test_display_renders_raw_value() {
        assert_eq!(Token::Literal(3).to_string(), "3");
        assert_eq!(Token::Substitutable(0).to_string(), "0");
        assert_eq!(Token::Operator(Operator::Power).to_string(), "^");
        assert_eq!(Token::OpenGrouping(GroupingKind::Bracket).to_string(), "[");
        assert_eq!(Token::CloseGrouping(GroupingKind::Brace).to_string(), "}");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Token::Literal(0).type_name(), "Literal");
        assert_eq!(
            Token::CloseGrouping(GroupingKind::Paren).type_name(),
            "CloseGrouping"
        );
        assert!(Token::Operator(Operator::Plus).is_operator());
        assert!(!Token::OpenGrouping(GroupingKind::Paren).is_operator());
        assert_eq!(Token::Operator(Operator::Plus).span_index(), None);
    }
}
