//! Doubles for host-framework objects.
//!
//! Builder-style fakes implementing the adapter traits with every capability
//! individually present or absent, so tests can stand in for any host
//! generation — including ones that expose nothing at all. Gated behind the
//! `test-support` feature to keep them out of production builds; plugin
//! crates testing against this surface enable the feature explicitly.

use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::FixtureLookupError;
use crate::fixtures::{FixtureCache, FixtureDefRegistry, FixtureValue};
use crate::markers::{MarkerChain, MarkerIndex, MarkerLookup, MarkerNode};
use crate::request::{FixtureResolver, RequestContext};
use crate::signature::{CallableSignature, Param, ParamKind};

/// Map-backed [`FixtureResolver`]; unknown names fail with the host's
/// lookup error.
#[derive(Default)]
pub struct StubResolver {
    values: HashMap<String, FixtureValue>,
}

impl StubResolver {
    /// Construct a resolver that knows no fixtures.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Teach the resolver to resolve `name` to `value`.
    #[must_use]
    pub fn with_value<T: Any>(mut self, name: impl Into<String>, value: T) -> Self {
        self.values.insert(name.into(), Rc::new(value));
        self
    }
}

impl FixtureResolver for StubResolver {
    fn resolve(&self, name: &str) -> Result<FixtureValue, FixtureLookupError> {
        self.values
            .get(name)
            .map(Rc::clone)
            .ok_or_else(|| FixtureLookupError::new(name))
    }
}

/// Builder-style [`RequestContext`] double.
///
/// A fresh `FakeRequest` exposes no capabilities and an empty names
/// closure; each `with_*` call switches one capability on.
#[derive(Default)]
pub struct FakeRequest {
    resolver: Option<StubResolver>,
    legacy_resolver: Option<StubResolver>,
    value_cache: Option<FixtureCache>,
    funcarg_cache: Option<FixtureCache>,
    defs: Option<FixtureDefRegistry>,
    legacy_defs: Option<FixtureDefRegistry>,
    names: Vec<String>,
}

impl FakeRequest {
    /// Construct a request exposing no capabilities.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Expose `resolver` under the current-generation name.
    #[must_use]
    pub fn with_resolver(mut self, resolver: StubResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Expose `resolver` under the legacy name.
    #[must_use]
    pub fn with_legacy_resolver(mut self, resolver: StubResolver) -> Self {
        self.legacy_resolver = Some(resolver);
        self
    }

    /// Expose `cache` under the current-generation naming scheme.
    #[must_use]
    pub fn with_value_cache(mut self, cache: FixtureCache) -> Self {
        self.value_cache = Some(cache);
        self
    }

    /// Expose `cache` under the legacy `funcargs` naming scheme.
    #[must_use]
    pub fn with_funcarg_cache(mut self, cache: FixtureCache) -> Self {
        self.funcarg_cache = Some(cache);
        self
    }

    /// Expose `registry` under the current-generation naming scheme.
    #[must_use]
    pub fn with_fixture_defs(mut self, registry: FixtureDefRegistry) -> Self {
        self.defs = Some(registry);
        self
    }

    /// Expose `registry` under the legacy naming scheme.
    #[must_use]
    pub fn with_legacy_fixture_defs(mut self, registry: FixtureDefRegistry) -> Self {
        self.legacy_defs = Some(registry);
        self
    }

    /// Set the fixture names closure of the current test item.
    #[must_use]
    pub fn with_names<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }
}

impl RequestContext for FakeRequest {
    fn fixture_resolver(&self) -> Option<&dyn FixtureResolver> {
        self.resolver
            .as_ref()
            .map(|resolver| resolver as &dyn FixtureResolver)
    }

    fn funcarg_resolver(&self) -> Option<&dyn FixtureResolver> {
        self.legacy_resolver
            .as_ref()
            .map(|resolver| resolver as &dyn FixtureResolver)
    }

    fn fixture_value_cache(&self) -> Option<&FixtureCache> {
        self.value_cache.as_ref()
    }

    fn funcarg_cache(&self) -> Option<&FixtureCache> {
        self.funcarg_cache.as_ref()
    }

    fn fixture_def_registry(&self) -> Option<&FixtureDefRegistry> {
        self.defs.as_ref()
    }

    fn legacy_fixture_def_registry(&self) -> Option<&FixtureDefRegistry> {
        self.legacy_defs.as_ref()
    }

    fn fixture_names_closure(&self) -> &[String] {
        &self.names
    }
}

/// Builder-style [`MarkerNode`] double.
#[derive(Default)]
pub struct FakeNode {
    chain: Option<MarkerChain>,
    local: Option<MarkerIndex>,
}

impl FakeNode {
    /// Construct a node exposing no marker capabilities.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Expose the ancestor-walking lookup backed by `chain`.
    #[must_use]
    pub fn with_marker_chain(mut self, chain: MarkerChain) -> Self {
        self.chain = Some(chain);
        self
    }

    /// Expose the legacy node-local marker mapping.
    #[must_use]
    pub fn with_keyword_markers(mut self, markers: MarkerIndex) -> Self {
        self.local = Some(markers);
        self
    }
}

impl MarkerNode for FakeNode {
    fn marker_lookup(&self) -> Option<&dyn MarkerLookup> {
        self.chain.as_ref().map(|chain| chain as &dyn MarkerLookup)
    }

    fn keyword_markers(&self) -> Option<&MarkerIndex> {
        self.local.as_ref()
    }
}

/// Builder-style [`CallableSignature`] double.
#[derive(Default)]
pub struct FakeCallable {
    params: Option<Vec<Param>>,
    raw: Vec<String>,
}

impl FakeCallable {
    /// Construct a callable with no structured reflection and an empty
    /// legacy listing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the structured parameter list wholesale.
    #[must_use]
    pub fn with_parameters(mut self, params: Vec<Param>) -> Self {
        self.params = Some(params);
        self
    }

    /// Append one structured parameter, enabling structured reflection.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, kind: ParamKind) -> Self {
        self.params
            .get_or_insert_with(Vec::new)
            .push(Param::new(name, kind));
        self
    }

    /// Set the flat legacy argument-name listing.
    #[must_use]
    pub fn with_raw_arg_names<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.raw = names.into_iter().map(Into::into).collect();
        self
    }
}

impl CallableSignature for FakeCallable {
    fn parameters(&self) -> Option<&[Param]> {
        self.params.as_deref()
    }

    fn raw_arg_names(&self) -> &[String] {
        &self.raw
    }
}
