//! Logging macros taking `Code` values and `Display` context
//!
//! Every macro is a no-op until the global logger has been initialized.

/// Log error with code, optional span and `key => value` context
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr) => {
        $crate::logging::log_error_with_context($code, $message, None, vec![])
    };

    ($code:expr, $message:expr, span = $span:expr) => {
        $crate::logging::log_error_with_context($code, $message, Some($span), vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_error_with_context($code, $message, None, context_refs)
        }
    };

    ($code:expr, $message:expr, span = $span:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_error_with_context($code, $message, Some($span), context_refs)
        }
    };
}

/// Log success with code and `key => value` context
#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr) => {
        $crate::logging::log_success_with_context($code, $message, vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_success_with_context($code, $message, context_refs)
        }
    };
}

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        $crate::logging::log_info_with_context($message, vec![])
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_info_with_context($message, context_refs)
        }
    };
}

/// Log warning message, optionally carrying a code and span
#[macro_export]
macro_rules! log_warning {
    (code = $code:expr, $message:expr, span = $span:expr, $($key:expr => $value:expr),+) => {
        if let Some(logger) = $crate::logging::try_get_global_logger() {
            let mut event = $crate::logging::LogEvent::warning_with_code($code, $message)
                .with_span($span);
            $(
                event = event.with_context($key, &format!("{}", $value));
            )+
            logger.log_event(event);
        }
    };

    ($message:expr) => {
        if let Some(logger) = $crate::logging::try_get_global_logger() {
            logger.log_event($crate::logging::LogEvent::warning($message));
        }
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        if let Some(logger) = $crate::logging::try_get_global_logger() {
            let mut event = $crate::logging::LogEvent::warning($message);
            $(
                event = event.with_context($key, &format!("{}", $value));
            )+
            logger.log_event(event);
        }
    };
}

/// Log debug message; context is only formatted when debug is enabled
#[macro_export]
macro_rules! log_debug {
    ($message:expr) => {
        if $crate::logging::debug_enabled() {
            $crate::logging::log_debug_with_context($message, None, vec![])
        }
    };

    ($message:expr, span = $span:expr) => {
        if $crate::logging::debug_enabled() {
            $crate::logging::log_debug_with_context($message, Some($span), vec![])
        }
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        if $crate::logging::debug_enabled() {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_debug_with_context($message, None, context_refs)
        }
    };

    ($message:expr, span = $span:expr, $($key:expr => $value:expr),+) => {
        if $crate::logging::debug_enabled() {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_debug_with_context($message, Some($span), context_refs)
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::logging::codes;
    use crate::utils::ExpressionRef;

    #[test]
    fn test_macros_accept_display_context() {
        let position: usize = 4;

        log_error!(codes::lexical::UNRECOGNIZED_CHARACTER, "Unrecognized character",
            "position" => position,
            "char" => '#'
        );
        log_error!(
            codes::lexical::NUMERIC_FORMAT,
            "Bad literal",
            span = ExpressionRef::covering(0, 3)
        );
        log_success!(codes::success::TOKENIZATION_COMPLETE, "Tokenization completed",
            "tokens" => 3,
            "spans" => 2
        );
        log_info!("Session started", "interactive" => true);
        log_warning!("Configuration file ignored", "path" => "zgcalc.toml");
        log_warning!(code = codes::lexical::MISMATCHED_CLOSE_GROUPING, "Expression rejected",
            span = ExpressionRef::new(4),
            "position" => position + 1
        );
        log_debug!("Token emitted", span = ExpressionRef::new(1), "kind" => "Operator");
    }
}
