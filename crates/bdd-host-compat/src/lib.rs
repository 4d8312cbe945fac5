//! Host-harness compatibility helpers for BDD test plugins.
//!
//! Host test harnesses rename and relocate their introspection internals
//! between releases: the by-name fixture resolver, the raw value cache, the
//! fixture-definition registry, and the marker lookup have all changed names
//! at least once. A plugin that reaches for one spelling breaks on hosts
//! using the other. This crate absorbs that churn behind a stable surface.
//!
//! Each host object is modelled as a narrow adapter trait whose capability
//! accessors return `Option` — `None` meaning the running host generation
//! does not expose that member. Every compatibility operation then probes an
//! ordered list of capabilities: the first one present wins, and exhausting
//! the list yields the operation's documented default (an error for value
//! resolution, `None` or an empty registry everywhere else). Falling back is
//! the normal operating mode across host versions, so it is never reported.
//!
//! The adapter traits deliberately cover undocumented host internals (the
//! raw caches in particular). Hosts are expected to ship one adapter per
//! supported release line and keep the fragility contained there.

mod error;
mod fixtures;
mod markers;
mod request;
mod signature;

#[cfg(feature = "diagnostics")]
pub mod diagnostics;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use error::{FixtureLookupError, FixtureValueError};
pub use fixtures::{FixtureCache, FixtureDef, FixtureDefRegistry, FixtureScope, FixtureValue};
pub use markers::{
    Marker, MarkerArg, MarkerArgs, MarkerChain, MarkerIndex, MarkerLookup, MarkerNode,
    closest_marker_args, closest_marker_args_by_walk, legacy_marker_args,
};
pub use request::{
    FixtureResolver, RequestContext, fixture_value, fixture_value_raw, request_fixture_defs,
    request_fixture_names, set_fixture_value,
};
pub use signature::{CallableSignature, Param, ParamKind, arg_names};
