//! Configuration-driven service registry.
//!
//! A configuration document carries two sections, `inputs` and `outputs`, each a
//! mapping from an entry id to a sub-tree with a `type` field. The registry looks
//! up a [`Factory`] by that type, turns the sub-tree into a typed
//! [`Configuration`], validates it, and asks it to create a [`Service`].
//!
//! Nothing in here returns early on a bad entry. Errors are collected in
//! document order and the registry is always constructed; check
//! [`ConfigurationRegistry::is_valid`] before starting anything.
//!
//! ```rust,ignore
//! use collector_registry::ConfigurationRegistry;
//!
//! let registry = ConfigurationRegistry::builder()
//!     .input("file", FileInputFactory)
//!     .output("stdout", StdoutOutputFactory)
//!     .build(&document)?;
//!
//! for message in registry.error_messages() {
//!     eprintln!("{message}");
//! }
//! ```

mod configuration;
mod dispatch;
mod entry;
mod error;
mod factory;
mod registry;
mod service;
mod validator;

pub use crate::configuration::{Configuration, InputConfiguration, OutputConfiguration};
pub use crate::entry::{EntryConfig, TYPE_FIELD};
pub use crate::error::{ConfigurationError, ErrorClass, RegistryError, RegistryErrorExt};
pub use crate::factory::{Factories, Factory, InputFactories, OutputFactories};
pub use crate::registry::{ConfigurationRegistry, RegistryBuilder, RegistrySummary};
pub use crate::service::{Input, Output, Service, ServiceKey, ServiceKind, ServiceSet};
pub use crate::validator::{AcceptAll, ConfigurationValidator, ConstraintValidator};

/// The configuration crate the document model comes from.
pub use config;
