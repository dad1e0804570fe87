use std::path::PathBuf;
use zg_tokenizer::config::ConfigError;
use zg_tokenizer::logging::{codes, Code};

/// Failures of the console itself; tokenization errors are reported inline
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Failed to read input: {0}")]
    Input(#[source] std::io::Error),

    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),

    #[error("Failed to load configuration from {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    #[error("Failed to serialize token collection: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SessionError {
    pub fn error_code(&self) -> Code {
        match self {
            SessionError::Input(_) => codes::console::INPUT_READ_FAILURE,
            SessionError::Output(_) | SessionError::Serialization(_) => {
                codes::console::OUTPUT_WRITE_FAILURE
            }
            SessionError::Config { .. } => codes::console::CONFIG_LOAD_FAILURE,
            SessionError::Logging(_) => codes::system::INITIALIZATION_FAILURE,
        }
    }
}
