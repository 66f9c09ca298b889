use crate::entry::EntryConfig;
use crate::service::ServiceKind;
use std::borrow::Cow;
use std::fmt;

/// Which stage of the build produced a [`ConfigurationError`].
///
/// The message is the compatibility surface; the class exists for callers that
/// want to branch without parsing strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The `inputs` or `outputs` section is missing or not a table.
    Structural,
    /// An entry (or one of its fields) could not be read as the expected type.
    Coercion,
    /// An entry has no `type`, or an empty one.
    MissingType,
    /// No factory is registered for the entry's `type`.
    UnknownType,
    /// Reported by the validator after both phases.
    Validation,
}

/// One recorded problem with the configuration document.
///
/// Errors are kept in the order they were found and are never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigurationError {
    class: ErrorClass,
    message: String,
}

impl ConfigurationError {
    /// Wraps an arbitrary message. Mostly useful for custom validators.
    pub fn new(class: ErrorClass, message: impl Into<String>) -> Self {
        Self { class, message: message.into() }
    }

    /// The lookup failure for a mandatory section, verbatim.
    pub(crate) fn structural(cause: &config::ConfigError) -> Self {
        Self::new(ErrorClass::Structural, cause.to_string())
    }

    /// `[<id>] <cause>`
    pub(crate) fn coercion(id: &str, cause: &config::ConfigError) -> Self {
        Self::new(ErrorClass::Coercion, format!("[{id}] {cause}"))
    }

    /// `Missing type field for <id> (<entry>)`
    pub(crate) fn missing_type(entry: &EntryConfig) -> Self {
        Self::new(ErrorClass::MissingType, format!("Missing type field for {} ({entry})", entry.id()))
    }

    /// `Unknown <kind> type "<type>" for <id>`
    pub(crate) fn unknown_type(kind: ServiceKind, type_name: &str, id: &str) -> Self {
        Self::new(ErrorClass::UnknownType, format!("Unknown {kind} type \"{type_name}\" for {id}"))
    }

    /// `Invalid <field> for <id>: <detail>`
    pub(crate) fn validation(id: &str, field: &str, detail: &str) -> Self {
        Self::new(ErrorClass::Validation, format!("Invalid {field} for {id}: {detail}"))
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        self.class
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ConfigurationError {}

/// Errors raised around the registry, never by the build itself.
#[collector_derive::collector_error]
pub enum RegistryError {
    /// A factory could not be registered (empty or duplicate type name).
    #[error("Factory registration error{}: {message}", format_context(.context))]
    Registration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The document was processed and rejected.
    #[error("Invalid configuration{}: {message}", format_context(.context))]
    Invalid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal registry error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
