use crate::error::{KernelError, KernelErrorExt};
use crate::{DEFAULT_DOCUMENT, ENV_PREFIX, ENV_SEPARATOR};
use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::info;

/// Loads the configuration document that describes inputs and outputs.
///
/// Layers, lowest priority first:
/// 1. **Base File**: `path`, or `collector` in the working directory when `None`.
///    The format follows the extension; a bare stem tries every supported extension.
/// 2. **Environment Overrides**: variables prefixed with `COLLECTOR__`, nested with
///    double underscores (`COLLECTOR__INPUTS__SYSLOG__PATH` maps to `inputs.syslog.path`).
///
/// The document is returned untyped; the registry walks its `inputs` and `outputs`
/// tables itself so that one bad entry does not hide the others.
///
/// # Errors
/// Returns [`KernelError::Config`] if the file is missing or cannot be parsed.
pub fn load_document(path: Option<impl AsRef<Path>>) -> Result<Config, KernelError> {
    build_document(&resolve(path), environment())
}

/// Loads the document and deserializes it into `T` in one go.
///
/// Useful for sections that do not go through the registry (logging, runtime knobs).
///
/// # Errors
/// Returns [`KernelError::Config`] if loading fails or the document does not match `T`.
///
/// # Example
/// ```rust
/// use collector_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct LogSection {
///     level: Option<String>,
/// }
///
/// let cfg: LogSection = load_config(Some("config/missing")).unwrap_or_default();
/// assert!(cfg.level.is_none());
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, KernelError>
where
    T: DeserializeOwned,
{
    load_document(path)?.try_deserialize::<T>().context("Failed to deserialize config")
}

fn resolve(path: Option<impl AsRef<Path>>) -> PathBuf {
    path.map_or_else(|| PathBuf::from(DEFAULT_DOCUMENT), |p| p.as_ref().to_path_buf())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR)
}

pub(crate) fn build_document(path: &Path, env: Environment) -> Result<Config, KernelError> {
    info!("Loading configuration document from {}", path.display());

    Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(env)
        .build()
        .context("Failed to build configuration document")
}
