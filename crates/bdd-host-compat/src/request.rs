//! Request-context adapter trait and version-tolerant fixture accessors.
//!
//! The host's per-test request object has renamed most of its introspection
//! surface at least once: the by-name resolver, the raw value cache, and the
//! fixture-definition registry each exist under two historical spellings.
//! [`RequestContext`] exposes one capability accessor per spelling; an
//! adapter for a given host release implements the accessors that release
//! actually has and leaves the rest at the `None` default. The free
//! functions below probe the spellings in a fixed modern-then-legacy order
//! and act through the first one present.

use std::sync::LazyLock;

use crate::error::{FixtureLookupError, FixtureValueError};
use crate::fixtures::{FixtureCache, FixtureDefRegistry, FixtureValue};

/// By-name fixture resolution surface of the host.
pub trait FixtureResolver {
    /// Resolve `name` to its value within the current scope, computing it if
    /// the host has not done so yet.
    ///
    /// # Errors
    /// Returns the host's own [`FixtureLookupError`] when `name` is not a
    /// fixture visible to the running test.
    fn resolve(&self, name: &str) -> Result<FixtureValue, FixtureLookupError>;
}

/// Adapter over one host generation's request-context object.
///
/// Every accessor except [`fixture_names_closure`](Self::fixture_names_closure)
/// is a capability probe: `None` means the running host does not expose that
/// member. Implementations cover exactly one host release line each.
pub trait RequestContext {
    /// Current-generation by-name resolver.
    fn fixture_resolver(&self) -> Option<&dyn FixtureResolver> {
        None
    }

    /// Resolver under its earlier name, on hosts predating the rename.
    fn funcarg_resolver(&self) -> Option<&dyn FixtureResolver> {
        None
    }

    /// Raw cache of computed values under the current naming scheme.
    fn fixture_value_cache(&self) -> Option<&FixtureCache> {
        None
    }

    /// Raw value cache under the older `funcargs` naming scheme.
    fn funcarg_cache(&self) -> Option<&FixtureCache> {
        None
    }

    /// Fixture-definition registry under the current naming scheme.
    fn fixture_def_registry(&self) -> Option<&FixtureDefRegistry> {
        None
    }

    /// Fixture-definition registry under the older naming scheme.
    fn legacy_fixture_def_registry(&self) -> Option<&FixtureDefRegistry> {
        None
    }

    /// Ordered names of every fixture visible to the current test item: the
    /// transitive closure of what the test and its fixtures request. All
    /// supported hosts expose this through a single fixed path.
    fn fixture_names_closure(&self) -> &[String];
}

/// Resolve the fixture `name` through whichever resolver generation the host
/// exposes.
///
/// # Errors
/// Propagates the host's [`FixtureLookupError`] unmodified when `name` is
/// not a fixture in scope, and reports
/// [`FixtureValueError::ResolverUnavailable`] when the request exposes a
/// resolver under neither name.
pub fn fixture_value(
    request: &dyn RequestContext,
    name: &str,
) -> Result<FixtureValue, FixtureValueError> {
    let resolver = request
        .fixture_resolver()
        .or_else(|| request.funcarg_resolver())
        .ok_or(FixtureValueError::ResolverUnavailable)?;
    Ok(resolver.resolve(name)?)
}

/// Read the raw cached value for `name` without triggering resolution.
///
/// Probes the two cache schemes in order and consults only the first one
/// present; a miss there does not fall through to the other scheme. Returns
/// `None` when the value is uncomputed or when the host exposes neither
/// cache.
#[must_use]
pub fn fixture_value_raw(request: &dyn RequestContext, name: &str) -> Option<FixtureValue> {
    request
        .fixture_value_cache()
        .or_else(|| request.funcarg_cache())
        .and_then(|cache| cache.lookup(name))
}

/// Store `value` directly into whichever raw cache the host exposes,
/// bypassing normal fixture resolution.
///
/// This is an escape hatch for injecting test doubles. It writes to
/// undocumented host internals and is fragile by nature; a host that exposes
/// neither cache scheme silently drops the write.
pub fn set_fixture_value(request: &dyn RequestContext, name: &str, value: FixtureValue) {
    request
        .fixture_value_cache()
        .or_else(|| request.funcarg_cache())
        .map_or_else(
            || log::trace!("host exposes no raw fixture cache; dropping value for '{name}'"),
            |cache| cache.store(name, value),
        );
}

fn empty_registry() -> &'static FixtureDefRegistry {
    static EMPTY: LazyLock<FixtureDefRegistry> = LazyLock::new(FixtureDefRegistry::new);
    &EMPTY
}

/// The host's fixture-definition registry, under whichever name it carries.
///
/// Returns a shared empty registry when the request exposes neither scheme.
#[must_use]
pub fn request_fixture_defs(request: &dyn RequestContext) -> &FixtureDefRegistry {
    request
        .fixture_def_registry()
        .or_else(|| request.legacy_fixture_def_registry())
        .unwrap_or_else(|| empty_registry())
}

/// Ordered names of every fixture in the enclosing scope of `request`.
#[must_use]
pub fn request_fixture_names(request: &dyn RequestContext) -> &[String] {
    request.fixture_names_closure()
}
