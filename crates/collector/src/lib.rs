//! Facade crate for the collector.
//! Re-exports kernel/registry primitives and wires the built-in input and output kinds.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Enable the kinds you need (`file`, `stdout`; both on by default).
//! - Call [`build_registry`] with a loaded document and check `is_valid()`.

pub use collector_kernel as kernel;
pub use collector_registry as registry;

use collector_kernel::Document;
use collector_registry::{ConfigurationRegistry, InputFactories, OutputFactories};
use tracing::debug;

/// Kind registry for runtime introspection.
pub mod features {
    #[cfg(feature = "file")]
    pub use collector_file as file;
    #[cfg(feature = "stdout")]
    pub use collector_stdout as stdout;

    /// Input `type` values compiled in.
    pub const INPUTS: &[&str] = &[
        #[cfg(feature = "file")]
        collector_file::TYPE,
    ];

    /// Output `type` values compiled in.
    pub const OUTPUTS: &[&str] = &[
        #[cfg(feature = "stdout")]
        collector_stdout::TYPE,
    ];

    #[must_use]
    pub fn is_enabled(type_name: &str) -> bool {
        INPUTS.contains(&type_name) || OUTPUTS.contains(&type_name)
    }
}

/// Input factories for every compiled-in kind.
#[must_use]
pub fn input_factories() -> InputFactories {
    #[allow(unused_mut)]
    let mut factories = InputFactories::new();

    #[cfg(feature = "file")]
    if let Err(e) = factories.register(collector_file::TYPE, collector_file::FileInputFactory) {
        tracing::error!(error = %e, "Built-in input kind was not registered");
    }

    factories
}

/// Output factories for every compiled-in kind.
#[must_use]
pub fn output_factories() -> OutputFactories {
    #[allow(unused_mut)]
    let mut factories = OutputFactories::new();

    #[cfg(feature = "stdout")]
    if let Err(e) = factories.register(collector_stdout::TYPE, collector_stdout::StdoutOutputFactory) {
        tracing::error!(error = %e, "Built-in output kind was not registered");
    }

    factories
}

/// Builds the registry for `document` with the built-in kinds and the default validator.
#[must_use]
pub fn build_registry(document: &Document) -> ConfigurationRegistry {
    let inputs = input_factories();
    let outputs = output_factories();
    debug!(inputs = ?inputs.types(), outputs = ?outputs.types(), "Building registry with built-in kinds");
    ConfigurationRegistry::new(document, &inputs, &outputs)
}
