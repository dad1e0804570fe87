//! Source location tracking for the tokenizer
//!
//! An [`ExpressionRef`] locates the exact text of a literal or identifier
//! within the expression it was scanned from. Both offsets are inclusive.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive `[start, end]` byte-offset pair into the source expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpressionRef {
    /// Offset of the first character (0-based)
    pub start: usize,
    /// Offset of the last character (0-based, inclusive)
    pub end: usize,
}

impl ExpressionRef {
    /// Create a single-character span starting at `start`
    pub fn new(start: usize) -> Self {
        Self { start, end: start }
    }

    /// Create a span covering `start..=end`
    pub fn covering(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "Span start must not be after end");
        Self { start, end }
    }

    /// Advance the end of this span to `offset`
    pub fn extend_to(&mut self, offset: usize) {
        debug_assert!(offset >= self.end, "Spans only grow forward");
        self.end = offset;
    }

    /// Number of bytes covered
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Spans always cover at least one character
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset <= self.end
    }

    /// Get the source text for this span, or `None` if it lies outside `source`
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start..=self.end)
    }
}

impl fmt::Display for ExpressionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.start, self.end)
    }
}

/// Render `source` with a caret under the character at `offset`.
///
/// Offsets at or past the end of `source` place the caret just after the
/// last character.
pub fn caret_line(source: &str, offset: usize) -> String {
    let column = source
        .char_indices()
        .take_while(|(i, _)| *i < offset)
        .count();

    let mut result = String::with_capacity(source.len() * 2 + 8);
    result.push_str("  | ");
    result.push_str(source);
    result.push('\n');
    result.push_str("  | ");
    result.push_str(&" ".repeat(column));
    result.push('^');
    result
}
