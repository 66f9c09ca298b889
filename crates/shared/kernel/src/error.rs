use std::borrow::Cow;

/// A specialized [`KernelError`] enum of this crate.
#[collector_derive::collector_error]
pub enum KernelError {
    /// The document could not be read, merged, or deserialized.
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal kernel error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
