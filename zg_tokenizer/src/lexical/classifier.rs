//! Character classification for the expression alphabet

use crate::tokens::{GroupingKind, Operator};

/// Category of a single input character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Digit,
    Letter,
    Period,
    /// `+` or `-`: prefix sign or binary operator
    UnaryGlyph(Operator),
    /// `*`, `/` or `^`: requires a left operand
    BinaryGlyph(Operator),
    OpenGrouping(GroupingKind),
    CloseGrouping(GroupingKind),
    Whitespace,
    Unrecognized,
}

pub fn classify(ch: char) -> CharClass {
    match ch {
        '0'..='9' => CharClass::Digit,
        'a'..='z' | 'A'..='Z' => CharClass::Letter,
        '.' => CharClass::Period,
        ' ' | '\t' | '\r' | '\n' => CharClass::Whitespace,
        _ => {
            if let Some(op) = Operator::from_glyph(ch) {
                if op.is_unary() {
                    CharClass::UnaryGlyph(op)
                } else {
                    CharClass::BinaryGlyph(op)
                }
            } else if let Some(kind) = GroupingKind::from_open(ch) {
                CharClass::OpenGrouping(kind)
            } else if let Some(kind) = GroupingKind::from_close(ch) {
                CharClass::CloseGrouping(kind)
            } else {
                CharClass::Unrecognized
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_alphabet() {
        assert_eq!(classify('7'), CharClass::Digit);
        assert_eq!(classify('q'), CharClass::Letter);
        assert_eq!(classify('E'), CharClass::Letter);
        assert_eq!(classify('.'), CharClass::Period);
        assert_eq!(classify('-'), CharClass::UnaryGlyph(Operator::Minus));
        assert_eq!(classify('^'), CharClass::BinaryGlyph(Operator::Power));
        assert_eq!(classify('\t'), CharClass::Whitespace);
        assert_eq!(classify('['), CharClass::OpenGrouping(GroupingKind::Bracket));
        assert_eq!(classify('}'), CharClass::CloseGrouping(GroupingKind::Brace));
    }

    #[test]
    fn test_unrecognized_characters() {
        for ch in ['#', '%', '_', ',', 'é', '٣', '\u{0}'] {
            assert_eq!(classify(ch), CharClass::Unrecognized, "{:?}", ch);
        }
    }

    #[test]
    fn test_operator_glyph_classes() {
        assert_eq!(classify('+'), CharClass::UnaryGlyph(Operator::Plus));
        assert_eq!(classify('*'), CharClass::BinaryGlyph(Operator::Multiply));
        assert_eq!(classify('/'), CharClass::BinaryGlyph(Operator::Divide));
    }
}
