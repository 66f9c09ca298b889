use crate::configuration::{InputConfiguration, OutputConfiguration};
use crate::entry::EntryConfig;
use crate::error::RegistryError;
use config::ConfigError;
use fxhash::FxHashMap;
use std::fmt;

/// Builds a typed configuration object from an entry sub-tree.
///
/// Any [`ConfigError`] returned here is recorded as `[<id>] <message>`.
pub trait Factory<C: ?Sized>: Send + Sync {
    /// # Errors
    /// Returns the coercion error for the first field that cannot be read.
    fn create(&self, id: &str, entry: &EntryConfig) -> Result<Box<C>, ConfigError>;
}

impl<C, F> Factory<C> for F
where
    C: ?Sized,
    F: Fn(&str, &EntryConfig) -> Result<Box<C>, ConfigError> + Send + Sync,
{
    fn create(&self, id: &str, entry: &EntryConfig) -> Result<Box<C>, ConfigError> {
        self(id, entry)
    }
}

/// Factories keyed by `type` name. Lookups are exact and case-sensitive.
pub struct Factories<C: ?Sized> {
    by_type: FxHashMap<String, Box<dyn Factory<C>>>,
}

/// Input factories keyed by `type` name.
pub type InputFactories = Factories<dyn InputConfiguration>;
/// Output factories keyed by `type` name.
pub type OutputFactories = Factories<dyn OutputConfiguration>;

impl<C: ?Sized> Default for Factories<C> {
    fn default() -> Self {
        Self { by_type: FxHashMap::default() }
    }
}

impl<C: ?Sized> fmt::Debug for Factories<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factories").field("types", &self.types()).finish()
    }
}

impl<C: ?Sized> Factories<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` under `type_name`.
    ///
    /// # Errors
    /// [`RegistryError::Registration`] if the name is empty or already taken.
    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        factory: impl Factory<C> + 'static,
    ) -> Result<&mut Self, RegistryError> {
        let type_name = type_name.into();
        if type_name.is_empty() {
            return Err(RegistryError::Registration {
                message: "type name must not be empty".into(),
                context: None,
            });
        }
        if self.by_type.contains_key(&type_name) {
            return Err(RegistryError::Registration {
                message: format!("type \"{type_name}\" is already registered").into(),
                context: None,
            });
        }
        self.by_type.insert(type_name, Box::new(factory));
        Ok(self)
    }

    /// Registers a closure. Same rules as [`Factories::register`].
    ///
    /// # Errors
    /// [`RegistryError::Registration`] if the name is empty or already taken.
    pub fn register_fn<F>(&mut self, type_name: impl Into<String>, factory: F) -> Result<&mut Self, RegistryError>
    where
        F: Fn(&str, &EntryConfig) -> Result<Box<C>, ConfigError> + Send + Sync + 'static,
    {
        self.register(type_name, factory)
    }

    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<&dyn Factory<C>> {
        self.by_type.get(type_name).map(|factory| &**factory)
    }

    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.by_type.contains_key(type_name)
    }

    /// Registered type names, sorted.
    #[must_use]
    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.by_type.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}
