//! Fixture value handles, the raw value cache, and definition metadata.
//!
//! `FixtureValue` is an opaque shared handle because fixture payloads belong
//! to the host; the compatibility layer moves them around without knowing
//! their types. Callers recover concrete types with `downcast_ref`, the same
//! way step contexts read their fixtures. The cache uses interior mutability
//! so writes can land through the shared request reference the host hands
//! out; like the host request object itself, it is single-thread affine.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use derive_more::{Deref, From};

/// Opaque shared handle to a resolved fixture value.
pub type FixtureValue = Rc<dyn Any>;

/// Raw cache of already-computed fixture values, keyed by fixture name.
///
/// Models the host's internal value store. Entries are whatever the host (or
/// a test injecting a double) put there; no resolution happens on lookup.
#[derive(Default)]
pub struct FixtureCache {
    values: RefCell<HashMap<String, FixtureValue>>,
}

impl FixtureCache {
    /// Construct an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `name`, if one has been computed.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<FixtureValue> {
        self.values.borrow().get(name).map(Rc::clone)
    }

    /// Store `value` under `name`, replacing any previous entry.
    pub fn store(&self, name: impl Into<String>, value: FixtureValue) {
        self.values.borrow_mut().insert(name.into(), value);
    }

    /// Return `true` when a value is cached under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.borrow().contains_key(name)
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    /// Return `true` when nothing has been cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl fmt::Debug for FixtureCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self.values.borrow();
        let mut names: Vec<&str> = values.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("FixtureCache").field("names", &names).finish()
    }
}

/// Lifetime scope a fixture definition is cached at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixtureScope {
    /// Recomputed for every test function.
    Function,
    /// Shared across the tests of one class or group.
    Class,
    /// Shared across one module.
    Module,
    /// Computed once per test session.
    Session,
}

impl FixtureScope {
    /// Scope name as the host spells it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Class => "class",
            Self::Module => "module",
            Self::Session => "session",
        }
    }
}

/// Metadata describing one fixture definition known to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureDef {
    name: String,
    scope: FixtureScope,
    location: Option<String>,
}

impl FixtureDef {
    /// Describe a fixture `name` cached at `scope`.
    #[must_use]
    pub fn new(name: impl Into<String>, scope: FixtureScope) -> Self {
        Self {
            name: name.into(),
            scope,
            location: None,
        }
    }

    /// Attach the `file:line` source location of the definition.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// The fixture name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The caching scope.
    #[must_use]
    pub fn scope(&self) -> FixtureScope {
        self.scope
    }

    /// Source location of the definition, when the host records one.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

/// Registry of fixture definitions keyed by fixture name.
///
/// Dereferences to the underlying map for lookup and iteration.
#[derive(Debug, Default, Clone, Deref, From)]
pub struct FixtureDefRegistry(hashbrown::HashMap<String, FixtureDef>);

impl FixtureDefRegistry {
    /// Construct an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `def` under its own name, returning any displaced entry.
    pub fn insert(&mut self, def: FixtureDef) -> Option<FixtureDef> {
        self.0.insert(def.name().to_owned(), def)
    }
}

impl FromIterator<FixtureDef> for FixtureDefRegistry {
    fn from_iter<I: IntoIterator<Item = FixtureDef>>(defs: I) -> Self {
        let mut registry = Self::new();
        for def in defs {
            registry.insert(def);
        }
        registry
    }
}
