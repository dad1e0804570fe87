//! Routes tokenizer log events into the `log` facade
//!
//! Plain output goes through `env_logger` (so `RUST_LOG` still applies);
//! `--structured-logs` keeps the tokenizer's own JSON-lines logger instead.

use crate::error::SessionError;
use std::sync::Arc;
use zg_tokenizer::config::LoggingPreferences;
use zg_tokenizer::logging::{self, LogEvent, LogLevel, Logger, LoggingService, StructuredLogger};

pub struct LogBridge;

pub fn to_log_level(level: LogLevel) -> log::Level {
    match level {
        LogLevel::Error => log::Level::Error,
        LogLevel::Warning => log::Level::Warn,
        LogLevel::Info => log::Level::Info,
        LogLevel::Debug => log::Level::Debug,
    }
}

/// Event text with its context appended in key order
pub fn render_event(event: &LogEvent) -> String {
    let mut line = format!("{} - {}", event.code, event.message);

    let mut keys: Vec<_> = event.context.keys().collect();
    keys.sort();
    for key in keys {
        line.push_str(&format!(" {}={}", key, event.context[key]));
    }

    line
}

impl Logger for LogBridge {
    fn log(&self, event: &LogEvent) {
        log::log!(target: "zg_tokenizer", to_log_level(event.level), "{}", render_event(event));
    }
}

/// Install the global tokenizer logger for the console
pub fn init(preferences: &LoggingPreferences) -> Result<(), SessionError> {
    logging::config::init_runtime_preferences(preferences.clone()).map_err(SessionError::Logging)?;

    if !preferences.enable_console_logging {
        return Ok(());
    }

    let level = preferences.min_log_level;
    let logger: Arc<dyn Logger> = if preferences.use_structured_logging {
        Arc::new(StructuredLogger::new(level))
    } else {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(to_log_level(level).as_str()),
        )
        .try_init()
        .map_err(|e| SessionError::Logging(e.to_string()))?;
        Arc::new(LogBridge)
    };

    logging::init_global_logging_with_service(Arc::new(LoggingService::new(logger, level)))
        .map_err(SessionError::Logging)?;

    logging::log_success_with_context(
        logging::codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Console logging initialized",
        vec![("structured", if preferences.use_structured_logging { "true" } else { "false" })],
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use zg_tokenizer::logging::codes;

    #[test]
    fn test_level_mapping() {
        assert_eq!(to_log_level(LogLevel::Warning), log::Level::Warn);
        assert_eq!(to_log_level(LogLevel::Debug), log::Level::Debug);
    }

    #[test]
    fn test_render_event_sorts_context() {
        let event = LogEvent::error(codes::lexical::NUMERIC_FORMAT, "bad literal")
            .with_context("position", "4")
            .with_context("length", "5");

        assert_eq!(
            render_event(&event),
            "E022 - bad literal length=5 position=4"
        );
    }

    #[test]
    fn test_bridge_accepts_events_without_logger() {
        LogBridge.log(&LogEvent::info("no logger installed"));
    }
}
