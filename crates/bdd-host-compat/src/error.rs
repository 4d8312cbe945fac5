//! Error types for fixture resolution through the compatibility surface.

use thiserror::Error;

/// Host-side failure to resolve a fixture name within the current scope.
///
/// Resolvers raise this when asked for a name that is not a fixture visible
/// to the running test. The compatibility layer passes it through without
/// wrapping or added context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("fixture '{name}' is not available in the current scope")]
pub struct FixtureLookupError {
    name: String,
}

impl FixtureLookupError {
    /// Build a lookup error for `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The fixture name that failed to resolve.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Failure modes of [`fixture_value`](crate::fixture_value).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixtureValueError {
    /// The request context exposes a resolver under neither historical name.
    /// This is a host-contract violation, not ordinary version skew.
    #[error("request context exposes no fixture resolver")]
    ResolverUnavailable,
    /// Host-side lookup failure, propagated unmodified.
    #[error(transparent)]
    Lookup(#[from] FixtureLookupError),
}
