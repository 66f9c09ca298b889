use crate::config::{ContentSplitter, FileInputConfiguration};
use collector_registry::{Input, Service};
use std::path::Path;
use std::time::Duration;

/// Input service reading messages from one file.
#[derive(Debug)]
pub struct FileInput {
    config: FileInputConfiguration,
}

impl FileInput {
    pub(crate) const fn new(config: FileInputConfiguration) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.config.path()
    }

    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.config.reader_interval()
    }

    /// Cuts `content` into messages. Empty messages are skipped.
    pub fn split<'a>(&'a self, content: &'a str) -> Vec<&'a str> {
        let parts: Box<dyn Iterator<Item = &'a str>> = match self.config.content_splitter {
            ContentSplitter::Newline => Box::new(content.lines()),
            ContentSplitter::Pattern => match self.config.content_splitter_pattern.as_deref() {
                Some(pattern) if !pattern.is_empty() => Box::new(content.split(pattern)),
                _ => Box::new(std::iter::once(content)),
            },
        };
        parts.filter(|part| !part.is_empty()).collect()
    }
}

impl Service for FileInput {
    fn id(&self) -> &str {
        &self.config.id
    }
}

impl Input for FileInput {}
