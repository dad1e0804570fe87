//! Error and success codes with their classification metadata
//!
//! Single source of truth for every code the tokenizer and its console
//! emit, together with severity, recoverability and recommended action.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const UNRECOGNIZED_CHARACTER: Code = Code::new("E020");
    pub const UNEXPECTED_BINARY_OPERATOR: Code = Code::new("E021");
    pub const NUMERIC_FORMAT: Code = Code::new("E022");
    pub const UNMATCHED_CLOSE_GROUPING: Code = Code::new("E023");
    pub const MISMATCHED_CLOSE_GROUPING: Code = Code::new("E024");
    pub const UNMATCHED_OPEN_GROUPING: Code = Code::new("E025");
    pub const UNEXPECTED_END_OF_EXPRESSION: Code = Code::new("E026");

    // Resource limits
    pub const EXPRESSION_TOO_LONG: Code = Code::new("E027");
    pub const TOO_MANY_TOKENS: Code = Code::new("E028");
    pub const GROUPING_TOO_DEEP: Code = Code::new("E029");
    pub const SPAN_TOO_LONG: Code = Code::new("E030");
}

/// Console session error codes
pub mod console {
    use super::Code;

    pub const INPUT_READ_FAILURE: Code = Code::new("C001");
    pub const OUTPUT_WRITE_FAILURE: Code = Code::new("C002");
    pub const CONFIG_LOAD_FAILURE: Code = Code::new("C003");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const SESSION_COMPLETED: Code = Code::new("I005");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
}

/// Every lexical error code, in numeric order
pub const LEXICAL_CODES: [Code; 11] = [
    lexical::UNRECOGNIZED_CHARACTER,
    lexical::UNEXPECTED_BINARY_OPERATOR,
    lexical::NUMERIC_FORMAT,
    lexical::UNMATCHED_CLOSE_GROUPING,
    lexical::MISMATCHED_CLOSE_GROUPING,
    lexical::UNMATCHED_OPEN_GROUPING,
    lexical::UNEXPECTED_END_OF_EXPRESSION,
    lexical::EXPRESSION_TOO_LONG,
    lexical::TOO_MANY_TOKENS,
    lexical::GROUPING_TOO_DEEP,
    lexical::SPAN_TOO_LONG,
];

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let entries = [
            // System errors
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal tokenizer error",
                "File a bug report with the expression that triggered it",
            ),
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "Logging or configuration initialization failed",
                "Check environment variables and configuration files",
            ),
            // Lexical errors: malformed input, never recoverable within a pass
            ErrorMetadata::new(
                "E020",
                "Lexical",
                Severity::High,
                false,
                true,
                "Character outside the expression alphabet",
                "Use only digits, letters, '.', + - * / ^, brackets and whitespace",
            ),
            ErrorMetadata::new(
                "E021",
                "Lexical",
                Severity::High,
                false,
                true,
                "Binary operator without a left operand",
                "Place a value or closed group before * / ^",
            ),
            ErrorMetadata::new(
                "E022",
                "Lexical",
                Severity::High,
                false,
                true,
                "Malformed numeric literal or identifier",
                "Use at most one period and one exponent, with digits after the exponent",
            ),
            ErrorMetadata::new(
                "E023",
                "Lexical",
                Severity::High,
                false,
                true,
                "Close grouping character without a matching open",
                "Remove the extra close bracket or add its opening partner",
            ),
            ErrorMetadata::new(
                "E024",
                "Lexical",
                Severity::High,
                false,
                true,
                "Close grouping character of the wrong kind",
                "Close brackets in the reverse order they were opened",
            ),
            ErrorMetadata::new(
                "E025",
                "Lexical",
                Severity::High,
                false,
                true,
                "Open grouping character never closed",
                "Add the matching close bracket",
            ),
            ErrorMetadata::new(
                "E026",
                "Lexical",
                Severity::High,
                false,
                true,
                "Expression ended before it was complete",
                "Finish the exponent or the right-hand operand",
            ),
            ErrorMetadata::new(
                "E027",
                "Limits",
                Severity::Medium,
                false,
                true,
                "Expression exceeds the configured length limit",
                "Split the expression or raise max_expression_length",
            ),
            ErrorMetadata::new(
                "E028",
                "Limits",
                Severity::Medium,
                false,
                true,
                "Expression exceeds the configured token limit",
                "Split the expression or raise max_token_count",
            ),
            ErrorMetadata::new(
                "E029",
                "Limits",
                Severity::Medium,
                false,
                true,
                "Grouping nesting exceeds the configured depth limit",
                "Flatten the expression or raise max_grouping_depth",
            ),
            ErrorMetadata::new(
                "E030",
                "Limits",
                Severity::Medium,
                false,
                true,
                "Literal or identifier exceeds the configured length limit",
                "Shorten the value or raise max_span_length",
            ),
            // Console errors
            ErrorMetadata::new(
                "C001",
                "Console",
                Severity::High,
                false,
                true,
                "Failed to read from standard input",
                "Check the input stream",
            ),
            ErrorMetadata::new(
                "C002",
                "Console",
                Severity::High,
                false,
                true,
                "Failed to write to standard output",
                "Check the output stream",
            ),
            ErrorMetadata::new(
                "C003",
                "Console",
                Severity::Medium,
                true,
                false,
                "Failed to load runtime configuration",
                "Fix the configuration file or omit --config",
            ),
            // Success codes
            ErrorMetadata::new(
                "I004",
                "System",
                Severity::Low,
                true,
                false,
                "System initialization completed successfully",
                "Continue normal operation",
            ),
            ErrorMetadata::new(
                "I005",
                "Console",
                Severity::Low,
                true,
                false,
                "Console session completed",
                "Continue normal operation",
            ),
            ErrorMetadata::new(
                "I020",
                "Lexical",
                Severity::Low,
                true,
                false,
                "Tokenization completed successfully",
                "Hand the token collection to its consumer",
            ),
        ];

        entries
            .into_iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_lexical_code_has_metadata() {
        for code in LEXICAL_CODES {
            let metadata = get_error_metadata(code.as_str());
            assert!(metadata.is_some(), "missing metadata for {}", code);
            assert!(requires_halt(code.as_str()));
            assert!(!is_recoverable(code.as_str()));
        }
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("X999"), "Unknown error");
        assert_eq!(get_category("X999"), "Unknown");
        assert_eq!(get_severity("X999"), Severity::Medium);
        assert!(is_recoverable("X999"));
        assert!(!requires_halt("X999"));
    }

    #[test]
    fn test_internal_error_is_critical() {
        let code = system::INTERNAL_ERROR.as_str();
        assert_eq!(get_severity(code), Severity::Critical);
        assert_eq!(get_category(code), "System");
    }

    #[test]
    fn test_success_codes_are_low_severity() {
        assert_eq!(
            get_severity(success::TOKENIZATION_COMPLETE.as_str()),
            Severity::Low
        );
        assert_eq!(success::TOKENIZATION_COMPLETE.to_string(), "I020");
    }
}
