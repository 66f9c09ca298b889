//! The `stdout` output kind.
//!
//! ```toml
//! [outputs.console]
//! type = "stdout"
//! format = "json"
//! ```

use collector_registry::config::ConfigError;
use collector_registry::{Configuration, EntryConfig, Factory, Output, OutputConfiguration, Service};
use serde::Deserialize;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::trace;
use validator::Validate;

/// The `type` value handled by this crate.
pub const TYPE: &str = "stdout";

/// Line layout written for each message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `<source>: <message>`
    #[default]
    Plain,
    /// `{"source":"<source>","message":"<message>"}`
    Json,
}

/// `outputs.<id>` entries with `type = "stdout"`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct StdoutOutputConfiguration {
    #[serde(skip)]
    id: String,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Configuration for StdoutOutputConfiguration {
    fn id(&self) -> &str {
        &self.id
    }

    fn type_name(&self) -> &str {
        TYPE
    }
}

impl OutputConfiguration for StdoutOutputConfiguration {
    fn create_output(&self) -> Arc<dyn Output> {
        Arc::new(StdoutOutput { id: self.id.clone(), format: self.format })
    }
}

/// Factory for `type = "stdout"` entries.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutOutputFactory;

impl Factory<dyn OutputConfiguration> for StdoutOutputFactory {
    fn create(&self, id: &str, entry: &EntryConfig) -> Result<Box<dyn OutputConfiguration>, ConfigError> {
        let mut configuration: StdoutOutputConfiguration = entry.deserialize()?;
        configuration.id = id.to_owned();
        trace!(id, format = ?configuration.format, "Stdout output configuration read");
        Ok(Box::new(configuration))
    }
}

/// Output service writing one line per message.
#[derive(Debug)]
pub struct StdoutOutput {
    id: String,
    format: OutputFormat,
}

impl StdoutOutput {
    #[must_use]
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    /// Formats one message without a trailing newline.
    #[must_use]
    pub fn render(&self, source: &str, message: &str) -> String {
        match self.format {
            OutputFormat::Plain => format!("{source}: {message}"),
            OutputFormat::Json => serde_json::json!({ "source": source, "message": message }).to_string(),
        }
    }

    /// Writes one rendered line to `out`.
    ///
    /// # Errors
    /// Whatever the writer reports.
    pub fn write_to(&self, out: &mut impl Write, source: &str, message: &str) -> io::Result<()> {
        writeln!(out, "{}", self.render(source, message))
    }

    /// Writes one rendered line to the process standard output.
    ///
    /// # Errors
    /// Whatever stdout reports (closed pipe, ...).
    pub fn write(&self, source: &str, message: &str) -> io::Result<()> {
        self.write_to(&mut io::stdout().lock(), source, message)
    }
}

impl Service for StdoutOutput {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Output for StdoutOutput {}
