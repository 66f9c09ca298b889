use crate::service::FileInput;
use collector_registry::{Configuration, Input, InputConfiguration};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use validator::{Validate, ValidationError};

/// How the file content is cut into messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContentSplitter {
    /// One message per line; `\n` and `\r\n` both end a line.
    #[default]
    Newline,
    /// Messages are separated by `content-splitter-pattern`, matched literally.
    Pattern,
}

/// `inputs.<id>` entries with `type = "file"`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "kebab-case")]
#[validate(schema(function = "splitter_has_pattern"))]
pub struct FileInputConfiguration {
    #[serde(skip)]
    pub(crate) id: String,

    #[validate(length(min = 1, message = "must not be empty"))]
    pub path: String,

    /// Poll interval in milliseconds.
    #[serde(default = "default_reader_interval")]
    #[validate(range(min = 1, max = 60_000, message = "must be between 1 and 60000 milliseconds"))]
    pub reader_interval: u64,

    #[serde(default)]
    pub content_splitter: ContentSplitter,

    pub content_splitter_pattern: Option<String>,

    #[serde(default = "default_charset")]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub charset: String,
}

const fn default_reader_interval() -> u64 {
    100
}

fn default_charset() -> String {
    "UTF-8".to_owned()
}

fn splitter_has_pattern(configuration: &FileInputConfiguration) -> Result<(), ValidationError> {
    let has_pattern = configuration.content_splitter_pattern.as_deref().is_some_and(|p| !p.is_empty());
    if configuration.content_splitter == ContentSplitter::Pattern && !has_pattern {
        return Err(ValidationError::new("missing_pattern")
            .with_message("content-splitter-pattern is required for the PATTERN splitter".into()));
    }
    Ok(())
}

impl FileInputConfiguration {
    #[must_use]
    pub fn path(&self) -> &Path {
        Path::new(&self.path)
    }

    #[must_use]
    pub const fn reader_interval(&self) -> Duration {
        Duration::from_millis(self.reader_interval)
    }
}

impl Configuration for FileInputConfiguration {
    fn id(&self) -> &str {
        &self.id
    }

    fn type_name(&self) -> &str {
        crate::TYPE
    }
}

impl InputConfiguration for FileInputConfiguration {
    fn create_input(&self) -> Arc<dyn Input> {
        Arc::new(FileInput::new(self.clone()))
    }
}
