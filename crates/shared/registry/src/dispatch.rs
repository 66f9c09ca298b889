use crate::entry::EntryConfig;
use crate::error::ConfigurationError;
use crate::factory::{Factories, Factory};
use crate::service::{Input, Output, Service, ServiceKey, ServiceKind, ServiceSet};
use config::{Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// Mutable state threaded through both phases of a build.
///
/// Ownership moves into [`dispatch`] and back out, so no phase can observe a
/// half-finished context from another.
#[derive(Debug, Default)]
pub(crate) struct BuildContext {
    pub(crate) errors: Vec<ConfigurationError>,
    pub(crate) services: ServiceSet<dyn Service>,
    pub(crate) inputs: ServiceSet<dyn Input>,
    pub(crate) outputs: ServiceSet<dyn Output>,
}

impl BuildContext {
    pub(crate) fn record(&mut self, error: ConfigurationError) {
        warn!(class = ?error.class(), "{error}");
        self.errors.push(error);
    }

    /// Runs the factory and records its failure against the entry id.
    pub(crate) fn materialize<C: ?Sized>(&mut self, factory: &dyn Factory<C>, entry: &EntryConfig) -> Option<Box<C>> {
        match factory.create(entry.id(), entry) {
            Ok(configuration) => Some(configuration),
            Err(cause) => {
                self.record(ConfigurationError::coercion(entry.id(), &cause));
                None
            },
        }
    }

    pub(crate) fn add_input(&mut self, id: &str, input: Arc<dyn Input>) {
        let key = ServiceKey::input(id);
        self.services.insert(key.clone(), input.clone());
        self.inputs.insert(key, input);
        debug!(id, "Input service created");
    }

    pub(crate) fn add_output(&mut self, id: &str, output: Arc<dyn Output>) {
        let key = ServiceKey::output(id);
        self.services.insert(key.clone(), output.clone());
        self.outputs.insert(key, output);
        debug!(id, "Output service created");
    }
}

/// Walks one section, resolving each entry's factory before handing it to `handle`.
///
/// Entry-level problems (not a table, missing or unknown `type`) are recorded
/// and the entry is skipped; the walk itself never stops early.
pub(crate) fn dispatch<C, H>(
    mut ctx: BuildContext,
    kind: ServiceKind,
    entries: Map<String, Value>,
    factories: &Factories<C>,
    mut handle: H,
) -> BuildContext
where
    C: ?Sized,
    H: FnMut(&mut BuildContext, &dyn Factory<C>, &EntryConfig),
{
    for (id, raw) in entries {
        let table = match raw.into_table() {
            Ok(table) => table,
            Err(cause) => {
                ctx.record(ConfigurationError::coercion(&id, &cause));
                continue;
            },
        };
        let entry = EntryConfig::new(id, table);

        let type_name = match entry.type_name() {
            Ok(Some(type_name)) => type_name,
            Ok(None) => {
                ctx.record(ConfigurationError::missing_type(&entry));
                continue;
            },
            Err(cause) => {
                ctx.record(ConfigurationError::coercion(entry.id(), &cause));
                continue;
            },
        };

        let Some(factory) = factories.get(&type_name) else {
            ctx.record(ConfigurationError::unknown_type(kind, &type_name, entry.id()));
            continue;
        };

        handle(&mut ctx, factory, &entry);
    }
    ctx
}

/// Drops an entry the validator rejected. Nothing is recorded here; the
/// validator is the only source of messages for rejected entries.
pub(crate) fn drop_rejected(kind: ServiceKind, id: &str) {
    debug!(%kind, id, "Entry rejected by validator");
}
