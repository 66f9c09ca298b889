#![allow(dead_code, unreachable_pub)]

use collector_registry::config::{Config, ConfigError, File, FileFormat};
use collector_registry::{
    Configuration, ConfigurationError, ConfigurationValidator, EntryConfig, InputConfiguration, InputFactories,
    OutputConfiguration, OutputFactories, Service,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

/// Builds a document from JSON. Keys keep their insertion order.
pub fn document(value: &serde_json::Value) -> Config {
    Config::builder()
        .add_source(File::from_str(&value.to_string(), FileFormat::Json))
        .build()
        .expect("test document must parse")
}

#[derive(Debug)]
pub struct Recorded {
    pub id: String,
    pub type_name: String,
}

impl Service for Recorded {
    fn id(&self) -> &str {
        &self.id
    }
}

impl collector_registry::Input for Recorded {}
impl collector_registry::Output for Recorded {}

/// Input configuration with one constrained field.
#[derive(Debug, Deserialize, Validate)]
pub struct PathConfiguration {
    #[serde(skip)]
    pub id: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub path: String,
}

impl Configuration for PathConfiguration {
    fn id(&self) -> &str {
        &self.id
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }
}

impl InputConfiguration for PathConfiguration {
    fn create_input(&self) -> Arc<dyn collector_registry::Input> {
        Arc::new(Recorded { id: self.id.clone(), type_name: self.type_name.clone() })
    }
}

/// Output configuration without required fields.
#[derive(Debug, Deserialize, Validate)]
pub struct SinkConfiguration {
    #[serde(skip)]
    pub id: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[validate(length(max = 8))]
    pub label: Option<String>,
}

impl Configuration for SinkConfiguration {
    fn id(&self) -> &str {
        &self.id
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }
}

impl OutputConfiguration for SinkConfiguration {
    fn create_output(&self) -> Arc<dyn collector_registry::Output> {
        Arc::new(Recorded { id: self.id.clone(), type_name: self.type_name.clone() })
    }
}

pub fn path_input(id: &str, entry: &EntryConfig) -> Result<Box<dyn InputConfiguration>, ConfigError> {
    let mut configuration: PathConfiguration = entry.deserialize()?;
    configuration.id = id.to_owned();
    Ok(Box::new(configuration))
}

pub fn sink_output(id: &str, entry: &EntryConfig) -> Result<Box<dyn OutputConfiguration>, ConfigError> {
    let mut configuration: SinkConfiguration = entry.deserialize()?;
    configuration.id = id.to_owned();
    Ok(Box::new(configuration))
}

/// `file` inputs and `stdout` outputs, backed by the fixtures above.
pub fn factories() -> (InputFactories, OutputFactories) {
    let mut inputs = InputFactories::new();
    inputs.register_fn("file", path_input).expect("fresh map");
    let mut outputs = OutputFactories::new();
    outputs.register_fn("stdout", sink_output).expect("fresh map");
    (inputs, outputs)
}

/// Rejects every configuration and never explains why.
#[derive(Debug, Default)]
pub struct RejectSilently {
    pub calls: usize,
}

impl ConfigurationValidator for RejectSilently {
    fn is_valid(&mut self, _: &dyn Configuration) -> bool {
        self.calls += 1;
        false
    }

    fn take_errors(&mut self) -> Vec<ConfigurationError> {
        Vec::new()
    }
}
