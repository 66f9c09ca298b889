use crate::service::{Input, Output};
use std::fmt::Debug;
use std::sync::Arc;
use validator::Validate;

/// A typed, not yet validated configuration object produced by a factory.
///
/// Constraints are declared with `#[derive(validator::Validate)]`; the registry
/// only ever sees them through a [`ConfigurationValidator`](crate::ConfigurationValidator).
pub trait Configuration: Validate + Debug + Send + Sync {
    /// The entry id the object was built for.
    fn id(&self) -> &str;

    /// The `type` discriminator that selected the factory.
    fn type_name(&self) -> &str;
}

/// Configuration for an input. Called only after validation succeeded.
pub trait InputConfiguration: Configuration {
    fn create_input(&self) -> Arc<dyn Input>;
}

/// Configuration for an output. Called only after validation succeeded.
pub trait OutputConfiguration: Configuration {
    fn create_output(&self) -> Arc<dyn Output>;
}
