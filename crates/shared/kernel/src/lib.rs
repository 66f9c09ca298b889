//! Kernel utilities shared by the collector crates.
//! Keep this crate lightweight: it only knows how to turn files and environment
//! variables into a configuration document.
//!
//! ## Loading the document
//! ```rust,ignore
//! use collector_kernel::config::load_document;
//!
//! let document = load_document(Some("collector.toml"))?;
//! let inputs = document.get_table("inputs")?;
//! ```

pub mod config;
mod error;

pub use crate::error::{KernelError, KernelErrorExt};
pub use ::config::{Config as Document, ConfigError as DocumentError};

/// Prefix for environment overrides (`COLLECTOR__OUTPUTS__CONSOLE__FORMAT=json`).
pub const ENV_PREFIX: &str = "COLLECTOR";
/// Separator between nested keys in environment overrides.
pub const ENV_SEPARATOR: &str = "__";
/// File stem used when no path is given; the extension is searched for (`.toml`, `.yaml`, `.json`, ...).
pub const DEFAULT_DOCUMENT: &str = "collector";
