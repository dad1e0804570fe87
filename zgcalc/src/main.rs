//! # zgcalc
//!
//! Console front end for the expression tokenizer. Without `--expression`
//! it reads expressions from standard input until `exit`.

mod error;
mod log_bridge;
mod repl;

use clap::Parser;
use error::SessionError;
use repl::{OutputFormat, Session};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use zg_tokenizer::config::runtime::parse_log_level;
use zg_tokenizer::config::{LogLevel, RuntimeConfig};
use zg_tokenizer::logging;
use zg_tokenizer::LexicalAnalyzer;

/// Tokenize arithmetic expressions and show their tokens and spans
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Tokenize a single expression and exit
    #[arg(short, long)]
    expression: Option<String>,

    /// Print token collections as JSON
    #[arg(long)]
    json: bool,

    /// Emit log events as JSON lines
    #[arg(long)]
    structured_logs: bool,

    /// Minimum log level (error, warn, info, debug)
    #[arg(long, value_parser = parse_level_arg)]
    log_level: Option<LogLevel>,

    /// TOML file with lexical and logging preferences
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_level_arg(value: &str) -> Result<LogLevel, String> {
    parse_log_level(value).ok_or_else(|| format!("unknown log level '{}'", value))
}

fn load_config(cli: &Cli) -> Result<RuntimeConfig, SessionError> {
    let mut config = match &cli.config {
        Some(path) => {
            RuntimeConfig::from_toml_file(path).map_err(|source| SessionError::Config {
                path: path.clone(),
                source,
            })?
        }
        None => RuntimeConfig::default(),
    };

    if let Some(level) = cli.log_level {
        config.logging.min_log_level = level;
    }
    if cli.structured_logs {
        config.logging.use_structured_logging = true;
    }

    Ok(config)
}

fn run(cli: Cli) -> Result<ExitCode, SessionError> {
    let config = load_config(&cli)?;
    log_bridge::init(&config.logging)?;

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let mut session = Session::new(LexicalAnalyzer::with_preferences(config.lexical), format);
    let mut stdout = io::stdout().lock();

    match cli.expression {
        Some(expression) => {
            let succeeded = session.evaluate(&repl::normalize(&expression), &mut stdout)?;
            Ok(if succeeded {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        None => {
            session.run(io::stdin().lock(), &mut stdout)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(error) => {
            if logging::is_initialized() {
                logging::safe_log_error(error.error_code(), &error.to_string());
            }
            let _ = writeln!(io::stderr(), "Error: {}", error);
            ExitCode::FAILURE
        }
    }
}
