//! # Logger
//!
//! Process-wide `tracing` bootstrap for collector binaries.
//!
//! * Console output goes to **stderr**, so stdout stays free for output services
//!   (the `stdout` output writes there).
//! * File output uses a rolling, non-blocking appender. Keep the returned [`Logger`]
//!   alive until shutdown or buffered lines are lost.
//! * Without [`LoggerBuilder::env_filter`], `RUST_LOG` wins over the programmatic level.
//!   Explicit directives replace `RUST_LOG` entirely.
//!
//! ## Example
//!
//! ```rust
//! use collector_logger::{LevelFilter, Logger};
//!
//! let _logger = Logger::builder("collector")
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

const DEFAULT_MAX_FILES: usize = 7;
const LOG_FILE_SUFFIX: &str = "log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Rolling log file settings.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
    rotation: Rotation,
    max_files: usize,
    json: bool,
}

impl FileSink {
    /// Daily rotation, seven files kept, plain text.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), rotation: Rotation::DAILY, max_files: DEFAULT_MAX_FILES, json: false }
    }

    #[must_use]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.max_files = max;
        self
    }

    /// Writes one JSON object per line instead of the human-readable format.
    #[must_use]
    pub const fn json(mut self) -> Self {
        self.json = true;
        self
    }
}

/// Configures and installs the global subscriber.
#[must_use = "The builder does nothing until `.init()` is called."]
#[derive(Debug)]
pub struct LoggerBuilder {
    name: String,
    level: LevelFilter,
    console: bool,
    console_json: bool,
    file: Option<FileSink>,
    env_filter: Option<String>,
}

impl LoggerBuilder {
    /// Minimum level for targets no directive mentions.
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Enables or disables the stderr layer.
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Switches the stderr layer to JSON lines.
    pub const fn console_json(mut self, enabled: bool) -> Self {
        self.console_json = enabled;
        self
    }

    /// Adds a rolling file layer. Files are named `<name>.<date>.log`.
    pub fn file(mut self, sink: FileSink) -> Self {
        self.file = Some(sink);
        self
    }

    /// Fixed directives, e.g. `collector_registry=debug,config=warn`. `RUST_LOG` is ignored once set.
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Installs the subscriber.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, zero `max_files`,
    ///   an unparsable filter, or no enabled layer.
    /// * [`LoggerError::Appender`] if the rolling appender cannot be created.
    /// * [`LoggerError::Subscriber`] if a global subscriber is already installed.
    pub fn init(self) -> Result<Logger, LoggerError> {
        self.validate()?;
        let filter = self.build_filter()?;

        let mut layers: Vec<BoxedLayer> = Vec::new();

        if self.console {
            let console = layer().with_writer(std::io::stderr).with_ansi(true);
            layers.push(if self.console_json {
                console.json().boxed()
            } else {
                console.compact().boxed()
            });
        }

        let guard = match &self.file {
            Some(sink) => {
                let (file_layer, guard) = file_layer(&self.name, sink)?;
                layers.push(file_layer);
                Some(guard)
            },
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging layers enabled. Enable console or file output.".into(),
                context: Some(self.name.into()),
            });
        }

        tracing_subscriber::registry().with(layers).with(filter).try_init()?;

        Ok(Logger { guard })
    }

    fn validate(&self) -> Result<(), LoggerError> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "Logger name cannot be empty".into(),
                context: None,
            });
        }

        if self.file.as_ref().is_some_and(|sink| sink.max_files == 0) {
            return Err(LoggerError::InvalidConfiguration {
                message: "max_files must be greater than zero".into(),
                context: Some(self.name.clone().into()),
            });
        }

        Ok(())
    }

    fn build_filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        match &self.env_filter {
            None => Ok(builder.from_env_lossy()),
            Some(directives) => {
                builder.parse(directives).map_err(|e| LoggerError::InvalidConfiguration {
                    message: format!("Invalid env filter '{directives}': {e}").into(),
                    context: None,
                })
            },
        }
    }
}

fn file_layer(name: &str, sink: &FileSink) -> Result<(BoxedLayer, WorkerGuard), LoggerError> {
    fs::create_dir_all(&sink.dir).map_err(|e| LoggerError::Internal {
        message: e.to_string().into(),
        context: Some(format!("Failed to create log directory {}", sink.dir.display()).into()),
    })?;

    let appender = RollingFileAppender::builder()
        .rotation(sink.rotation.clone())
        .filename_prefix(name)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(sink.max_files)
        .build(&sink.dir)
        .context("Building rolling file appender")?;

    let (writer, guard) = tracing_appender::non_blocking(appender);
    let plain = layer().with_writer(writer).with_ansi(false);
    let boxed = if sink.json { plain.json().boxed() } else { plain.boxed() };

    Ok((boxed, guard))
}

/// Handle to the installed logging system.
///
/// Holds the non-blocking writer guard when file logging is enabled.
#[must_use = "Dropping this handle stops the background log writer."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts configuring a logger. `name` prefixes rolling log files.
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder {
            name: name.into(),
            level: LevelFilter::INFO,
            console: true,
            console_json: false,
            file: None,
            env_filter: None,
        }
    }

    /// Whether a file writer is attached.
    #[must_use]
    pub const fn has_file_writer(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::debug!("Flushing file log writer");
        }
    }
}
