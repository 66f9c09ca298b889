use crate::configuration::{InputConfiguration, OutputConfiguration};
use crate::dispatch::{BuildContext, dispatch, drop_rejected};
use crate::error::{ConfigurationError, RegistryError};
use crate::factory::{Factory, InputFactories, OutputFactories};
use crate::service::{Input, Output, Service, ServiceKind, ServiceSet};
use crate::validator::{ConfigurationValidator, ConstraintValidator};
use config::{Config, ConfigError, Map, Value};
use std::fmt;
use tracing::{error, info, instrument};

/// The outcome of turning a configuration document into services.
///
/// Construction never fails. Every problem found along the way is kept in
/// [`errors`](Self::errors), in the order it was found, and every entry that
/// survived is available as a service.
///
/// Build order:
/// 1. `inputs` and `outputs` are looked up as tables. If either lookup fails, its
///    message is the only error and nothing else happens.
/// 2. Each input entry is dispatched to its factory, validated, and turned into a service.
/// 3. The same for outputs.
/// 4. The validator's messages are appended after everything else.
///
/// Entries the validator rejects without saying why are dropped without a trace
/// in [`errors`](Self::errors).
#[derive(Debug)]
pub struct ConfigurationRegistry {
    errors: Vec<ConfigurationError>,
    services: ServiceSet<dyn Service>,
    inputs: ServiceSet<dyn Input>,
    outputs: ServiceSet<dyn Output>,
}

struct Sections {
    inputs: Map<String, Value>,
    outputs: Map<String, Value>,
}

impl ConfigurationRegistry {
    /// Builds the registry with the default [`ConstraintValidator`].
    #[must_use]
    pub fn new(document: &Config, inputs: &InputFactories, outputs: &OutputFactories) -> Self {
        Self::with_validator(document, inputs, outputs, &mut ConstraintValidator::new())
    }

    /// Builds the registry with a caller-supplied validator.
    #[instrument(name = "registry.build", skip_all)]
    pub fn with_validator(
        document: &Config,
        inputs: &InputFactories,
        outputs: &OutputFactories,
        validator: &mut dyn ConfigurationValidator,
    ) -> Self {
        let mut ctx = BuildContext::default();

        match sections(document) {
            Err(cause) => {
                error!(error = %cause, "Configuration document is missing a required section");
                ctx.errors.push(ConfigurationError::structural(&cause));
            },
            Ok(Sections { inputs: input_entries, outputs: output_entries }) => {
                ctx = build_inputs(ctx, input_entries, inputs, validator);
                ctx = build_outputs(ctx, output_entries, outputs, validator);
                for reported in validator.take_errors() {
                    ctx.record(reported);
                }
            },
        }

        let registry = Self::from(ctx);
        info!(
            inputs = registry.inputs.len(),
            outputs = registry.outputs.len(),
            errors = registry.errors.len(),
            "Configuration registry built"
        );
        registry
    }

    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// `true` exactly when no error was recorded.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn errors(&self) -> &[ConfigurationError] {
        &self.errors
    }

    /// The error messages, in order.
    pub fn error_messages(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(ConfigurationError::message)
    }

    /// Every built service, inputs and outputs alike.
    #[must_use]
    pub const fn services(&self) -> &ServiceSet<dyn Service> {
        &self.services
    }

    #[must_use]
    pub const fn inputs(&self) -> &ServiceSet<dyn Input> {
        &self.inputs
    }

    #[must_use]
    pub const fn outputs(&self) -> &ServiceSet<dyn Output> {
        &self.outputs
    }

    #[must_use]
    pub fn summary(&self) -> RegistrySummary {
        RegistrySummary {
            inputs: self.inputs.len(),
            outputs: self.outputs.len(),
            errors: self.errors.len(),
        }
    }

    /// Converts an invalid registry into an error carrying every message.
    ///
    /// # Errors
    /// [`RegistryError::Invalid`] if at least one error was recorded.
    pub fn into_result(self) -> Result<Self, RegistryError> {
        if self.is_valid() {
            return Ok(self);
        }
        let joined = self.error_messages().collect::<Vec<_>>().join("; ");
        Err(RegistryError::Invalid {
            message: format!("{} error(s): {joined}", self.errors.len()).into(),
            context: None,
        })
    }
}

impl From<BuildContext> for ConfigurationRegistry {
    fn from(ctx: BuildContext) -> Self {
        Self { errors: ctx.errors, services: ctx.services, inputs: ctx.inputs, outputs: ctx.outputs }
    }
}

fn sections(document: &Config) -> Result<Sections, ConfigError> {
    let inputs = document.get_table(ServiceKind::Input.section())?;
    let outputs = document.get_table(ServiceKind::Output.section())?;
    Ok(Sections { inputs, outputs })
}

fn build_inputs(
    ctx: BuildContext,
    entries: Map<String, Value>,
    factories: &InputFactories,
    validator: &mut dyn ConfigurationValidator,
) -> BuildContext {
    dispatch(ctx, ServiceKind::Input, entries, factories, |ctx, factory, entry| {
        let Some(configuration) = ctx.materialize(factory, entry) else { return };
        if validator.is_valid(&*configuration) {
            ctx.add_input(entry.id(), configuration.create_input());
        } else {
            drop_rejected(ServiceKind::Input, entry.id());
        }
    })
}

fn build_outputs(
    ctx: BuildContext,
    entries: Map<String, Value>,
    factories: &OutputFactories,
    validator: &mut dyn ConfigurationValidator,
) -> BuildContext {
    dispatch(ctx, ServiceKind::Output, entries, factories, |ctx, factory, entry| {
        let Some(configuration) = ctx.materialize(factory, entry) else { return };
        if validator.is_valid(&*configuration) {
            ctx.add_output(entry.id(), configuration.create_output());
        } else {
            drop_rejected(ServiceKind::Output, entry.id());
        }
    })
}

/// Counts reported once the registry is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrySummary {
    pub inputs: usize,
    pub outputs: usize,
    pub errors: usize,
}

impl RegistrySummary {
    #[must_use]
    pub const fn services(&self) -> usize {
        self.inputs + self.outputs
    }
}

impl fmt::Display for RegistrySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} input(s), {} output(s), {} error(s)", self.inputs, self.outputs, self.errors)
    }
}

/// Collects factories (and optionally a validator) before building.
///
/// Registration problems are remembered and surface from [`build`](Self::build),
/// so the fluent chain does not need `?` at every step.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    inputs: InputFactories,
    outputs: OutputFactories,
    validator: Option<Box<dyn ConfigurationValidator>>,
    problem: Option<RegistryError>,
}

impl RegistryBuilder {
    #[must_use]
    pub fn input(mut self, type_name: impl Into<String>, factory: impl Factory<dyn InputConfiguration> + 'static) -> Self {
        if self.problem.is_none()
            && let Err(problem) = self.inputs.register(type_name, factory)
        {
            self.problem = Some(problem);
        }
        self
    }

    #[must_use]
    pub fn output(mut self, type_name: impl Into<String>, factory: impl Factory<dyn OutputConfiguration> + 'static) -> Self {
        if self.problem.is_none()
            && let Err(problem) = self.outputs.register(type_name, factory)
        {
            self.problem = Some(problem);
        }
        self
    }

    /// Replaces the default [`ConstraintValidator`].
    #[must_use]
    pub fn validator(mut self, validator: impl ConfigurationValidator + 'static) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    /// Builds against `document`.
    ///
    /// # Errors
    /// The first [`RegistryError::Registration`] hit while collecting factories.
    /// Problems in the document itself are reported by the registry, not here.
    pub fn build(self, document: &Config) -> Result<ConfigurationRegistry, RegistryError> {
        if let Some(problem) = self.problem {
            return Err(problem);
        }
        let mut validator = self.validator.unwrap_or_else(|| Box::new(ConstraintValidator::new()));
        Ok(ConfigurationRegistry::with_validator(document, &self.inputs, &self.outputs, validator.as_mut()))
    }
}

