//! Logging preferences storage
//!
//! Message length and memory capacity are compile-time limits; level and
//! output format are runtime preferences installed once at startup.

use crate::config::compile_time::logging::{MAX_LOG_MESSAGE_LENGTH, MEMORY_LOG_CAPACITY};
use crate::config::runtime::LoggingPreferences;
use crate::logging::events::LogLevel;
use std::sync::OnceLock;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Install runtime preferences; fails if already installed
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized".to_string())
}

fn get_runtime_preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

pub fn get_min_log_level() -> LogLevel {
    get_runtime_preferences().min_log_level
}

pub fn use_structured_logging() -> bool {
    get_runtime_preferences().use_structured_logging
}

pub fn use_console_logging() -> bool {
    get_runtime_preferences().enable_console_logging
}

pub fn get_max_log_message_length() -> usize {
    MAX_LOG_MESSAGE_LENGTH
}

pub fn get_memory_log_capacity() -> usize {
    MEMORY_LOG_CAPACITY
}

/// Check the compile-time logging limits
pub fn validate_config() -> Result<(), String> {
    if MEMORY_LOG_CAPACITY == 0 {
        return Err("Memory log capacity must be non-zero".to_string());
    }

    if MAX_LOG_MESSAGE_LENGTH < 64 {
        return Err(format!(
            "Log message length too small: {}",
            MAX_LOG_MESSAGE_LENGTH
        ));
    }

    Ok(())
}

pub fn get_config_summary() -> String {
    let preferences = get_runtime_preferences();

    format!(
        "Logging Configuration:\n\
         - Max message length: {}\n\
         - Memory log capacity: {}\n\
         - Min log level: {:?}\n\
         - Structured logging: {}\n\
         - Console logging: {}",
        MAX_LOG_MESSAGE_LENGTH,
        MEMORY_LOG_CAPACITY,
        preferences.min_log_level,
        preferences.use_structured_logging,
        preferences.enable_console_logging,
    )
}
