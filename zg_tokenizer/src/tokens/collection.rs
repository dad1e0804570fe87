//! Result set of one tokenization pass

use super::token::Token;
use crate::lexical::LexerError;
use crate::utils::ExpressionRef;
use serde::Serialize;
use std::fmt::Write as _;

/// Tokens, spans and outcome of tokenizing one expression.
///
/// Built once by the analyzer and read-only afterwards. On failure the token
/// and span lists hold only the prefix scanned before the error.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenCollection {
    source: String,
    tokens: Vec<Token>,
    spans: Vec<ExpressionRef>,
    error: Option<LexerError>,
}

#[derive(Serialize)]
struct TokenView<'a> {
    kind: &'static str,
    value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

#[derive(Serialize)]
struct CollectionView<'a> {
    source: &'a str,
    success: bool,
    error_message: String,
    tokens: Vec<TokenView<'a>>,
    spans: &'a [ExpressionRef],
}

impl TokenCollection {
    pub(crate) fn new(
        source: &str,
        tokens: Vec<Token>,
        spans: Vec<ExpressionRef>,
        error: Option<LexerError>,
    ) -> Self {
        Self {
            source: source.to_string(),
            tokens,
            spans,
            error,
        }
    }

    pub fn success(&self) -> bool {
        self.error.is_none()
    }

    /// `"<description> (<1-based position>)"`, or empty on success
    pub fn error_message(&self) -> String {
        self.error
            .as_ref()
            .map(|error| error.to_string())
            .unwrap_or_default()
    }

    pub fn error(&self) -> Option<&LexerError> {
        self.error.as_ref()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn spans(&self) -> &[ExpressionRef] {
        &self.spans
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Source text behind a literal or substitutable token
    pub fn text_of(&self, token: &Token) -> Option<&str> {
        token
            .span_index()
            .and_then(|index| self.spans.get(index))
            .and_then(|span| span.slice(&self.source))
    }

    /// Tokens paired with their source text where they have one
    pub fn iter_with_text(&self) -> impl Iterator<Item = (&Token, Option<&str>)> + '_ {
        self.tokens.iter().map(move |token| (token, self.text_of(token)))
    }

    /// Diagnostic dump of the span list followed by the token list
    pub fn info(&self) -> String {
        let mut builder = String::from("Spans:\n");
        for (index, span) in self.spans.iter().enumerate() {
            let _ = writeln!(
                builder,
                "{}: {} {}",
                index,
                span,
                span.slice(&self.source).unwrap_or_default()
            );
        }

        builder.push_str("\nTokens:\n");
        for token in &self.tokens {
            let _ = writeln!(builder, "{}: {}", token.type_name(), token);
        }

        builder
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let view = CollectionView {
            source: &self.source,
            success: self.success(),
            error_message: self.error_message(),
            tokens: self
                .iter_with_text()
                .map(|(token, text)| TokenView {
                    kind: token.type_name(),
                    value: token.to_string(),
                    text,
                })
                .collect(),
            spans: &self.spans,
        };

        serde_json::to_string_pretty(&view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::Operator;
    use assert_matches::assert_matches;

    fn one_plus_two() -> TokenCollection {
        TokenCollection::new(
            "1+2",
            vec![
                Token::Literal(0),
                Token::Operator(Operator::Plus),
                Token::Literal(1),
            ],
            vec![ExpressionRef::new(0), ExpressionRef::new(2)],
            None,
        )
    }

    #[test]
    fn test_info_rendering() {
        let expected = "Spans:\n\
                        0: (0, 0) 1\n\
                        1: (2, 2) 2\n\
                        \n\
                        Tokens:\n\
                        Literal: 0\n\
                        Operator: +\n\
                        Literal: 1\n";
        assert_eq!(one_plus_two().info(), expected);
    }

    #[test]
    fn test_text_lookup() {
        let collection = one_plus_two();
        let texts: Vec<_> = collection.iter_with_text().map(|(_, t)| t).collect();
        assert_eq!(texts, vec![Some("1"), None, Some("2")]);
        assert_eq!(collection.text_of(&Token::Literal(7)), None);
    }

    #[test]
    fn test_failed_collection() {
        let collection = TokenCollection::new(
            "1$",
            vec![Token::Literal(0)],
            vec![ExpressionRef::new(0)],
            Some(LexerError::UnrecognizedCharacter { position: 1 }),
        );

        assert!(!collection.success());
        assert_eq!(collection.error_message(), "Unrecognized character (2)");
        assert_matches!(
            collection.error(),
            Some(LexerError::UnrecognizedCharacter { position: 1 })
        );
    }

    #[test]
    fn test_successful_collection_has_empty_message() {
        let collection = one_plus_two();
        assert!(collection.success());
        assert!(collection.error_message().is_empty());
        assert_eq!(collection.len(), 3);
        assert!(collection.error().is_none());
    }

    #[test]
    fn test_json_shape() {
        let json = one_plus_two().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["error_message"], "");
        assert_eq!(value["tokens"][1]["kind"], "Operator");
        assert_eq!(value["tokens"][1]["value"], "+");
        assert!(value["tokens"][1].get("text").is_none());
        assert_eq!(value["tokens"][2]["text"], "2");
        assert_eq!(value["spans"][1]["start"], 2);
    }
}
