//! The `file` input kind.
//!
//! ```toml
//! [inputs.syslog]
//! type = "file"
//! path = "/var/log/syslog"
//! reader-interval = 250
//! content-splitter = "PATTERN"
//! content-splitter-pattern = "\n\n"
//! ```

mod config;
mod service;

pub use crate::config::{ContentSplitter, FileInputConfiguration};
pub use crate::service::FileInput;

use collector_registry::config::ConfigError;
use collector_registry::{EntryConfig, Factory, InputConfiguration};
use tracing::trace;

/// The `type` value handled by this crate.
pub const TYPE: &str = "file";

/// Factory for `type = "file"` entries.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileInputFactory;

impl Factory<dyn InputConfiguration> for FileInputFactory {
    fn create(&self, id: &str, entry: &EntryConfig) -> Result<Box<dyn InputConfiguration>, ConfigError> {
        let mut configuration: FileInputConfiguration = entry.deserialize()?;
        configuration.id = id.to_owned();
        trace!(id, path = %configuration.path, "File input configuration read");
        Ok(Box::new(configuration))
    }
}
