//! Interactive read-eval loop over any line source

use crate::error::SessionError;
use std::io::{BufRead, Write};
use zg_tokenizer::logging::codes;
use zg_tokenizer::{log_debug, log_success};
use zg_tokenizer::{render_error_caret, LexicalAnalyzer, TokenCollection};

pub const BANNER: &str = "Enter an expression to evaluate, or \"exit\" to exit";
pub const EXIT_COMMAND: &str = "exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Span and token listing
    Text,
    Json,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub evaluated: usize,
    pub failed: usize,
}

pub struct Session {
    analyzer: LexicalAnalyzer,
    format: OutputFormat,
    summary: SessionSummary,
}

/// Trim and lowercase a raw input line
pub fn normalize(line: &str) -> String {
    line.trim().to_lowercase()
}

impl Session {
    pub fn new(analyzer: LexicalAnalyzer, format: OutputFormat) -> Self {
        Self {
            analyzer,
            format,
            summary: SessionSummary::default(),
        }
    }

    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    /// Tokenize one expression and print the outcome; returns whether it succeeded
    pub fn evaluate<W: Write>(
        &mut self,
        expression: &str,
        output: &mut W,
    ) -> Result<bool, SessionError> {
        let collection = self.analyzer.tokenize(expression);

        self.summary.evaluated += 1;
        if !collection.success() {
            self.summary.failed += 1;
        }

        let rendered = render(&collection, self.format)?;
        output
            .write_all(rendered.as_bytes())
            .and_then(|_| output.flush())
            .map_err(SessionError::Output)?;

        Ok(collection.success())
    }

    /// Print the banner, then evaluate lines until `exit` or end of input
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        output: &mut W,
    ) -> Result<SessionSummary, SessionError> {
        writeln!(output, "{}", BANNER)
            .and_then(|_| output.flush())
            .map_err(SessionError::Output)?;

        for line in input.lines() {
            let command = normalize(&line.map_err(SessionError::Input)?);

            if command == EXIT_COMMAND {
                log_debug!("Exit command received");
                break;
            }
            if command.is_empty() {
                continue;
            }

            self.evaluate(&command, output)?;
        }

        log_success!(codes::success::SESSION_COMPLETED, "Console session completed",
            "evaluated" => self.summary.evaluated,
            "failed" => self.summary.failed
        );

        Ok(self.summary.clone())
    }
}

/// Rendering of one collection, newline-terminated
pub fn render(collection: &TokenCollection, format: OutputFormat) -> Result<String, SessionError> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", collection.to_json()?)),
        OutputFormat::Text => match collection.error() {
            None => Ok(format!("{}\n", collection.info())),
            Some(error) => Ok(format!(
                "Error: {}\n{}\n",
                error,
                render_error_caret(collection.source(), error)
            )),
        },
    }
}
