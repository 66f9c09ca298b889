use fxhash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// A running component produced from a validated configuration entry.
pub trait Service: fmt::Debug + Send + Sync {
    /// The entry id this service was built from.
    fn id(&self) -> &str;
}

/// A service that produces events.
pub trait Input: Service {}

/// A service that consumes events.
pub trait Output: Service {}

/// The document section an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ServiceKind {
    Input,
    Output,
}

impl ServiceKind {
    /// Name of the top-level document section holding entries of this kind.
    #[must_use]
    pub const fn section(self) -> &'static str {
        match self {
            Self::Input => "inputs",
            Self::Output => "outputs",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a built service. An input and an output may share an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceKey {
    pub kind: ServiceKind,
    pub id: String,
}

impl ServiceKey {
    pub fn new(kind: ServiceKind, id: impl Into<String>) -> Self {
        Self { kind, id: id.into() }
    }

    #[must_use]
    pub fn input(id: impl Into<String>) -> Self {
        Self::new(ServiceKind::Input, id)
    }

    #[must_use]
    pub fn output(id: impl Into<String>) -> Self {
        Self::new(ServiceKind::Output, id)
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}

/// An unordered set of services keyed by [`ServiceKey`].
#[derive(Debug)]
pub struct ServiceSet<S: ?Sized> {
    members: FxHashMap<ServiceKey, Arc<S>>,
}

impl<S: ?Sized> Default for ServiceSet<S> {
    fn default() -> Self {
        Self { members: FxHashMap::default() }
    }
}

impl<S: ?Sized> Clone for ServiceSet<S> {
    fn clone(&self) -> Self {
        Self { members: self.members.clone() }
    }
}

impl<S: ?Sized> ServiceSet<S> {
    /// Returns `false` and keeps the existing member if the key is taken.
    pub(crate) fn insert(&mut self, key: ServiceKey, service: Arc<S>) -> bool {
        match self.members.entry(key) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(service);
                true
            },
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn contains(&self, key: &ServiceKey) -> bool {
        self.members.contains_key(key)
    }

    #[must_use]
    pub fn get(&self, key: &ServiceKey) -> Option<&Arc<S>> {
        self.members.get(key)
    }

    /// Finds a member by entry id, whatever its kind.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Arc<S>> {
        self.members.iter().find(|(key, _)| key.id == id).map(|(_, service)| service)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ServiceKey, &Arc<S>)> {
        self.members.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &Arc<S>> {
        self.members.values()
    }

    /// Keys in a stable order, for logs and assertions.
    #[must_use]
    pub fn sorted_keys(&self) -> Vec<&ServiceKey> {
        let mut keys: Vec<_> = self.members.keys().collect();
        keys.sort();
        keys
    }
}
