//! Capability probes for debugging host version skew.
//!
//! When a plugin misbehaves on an unfamiliar host release, the first
//! question is which introspection surfaces that release actually exposes.
//! These probes answer it in one shot, in a form external tooling can
//! ingest. Probing is read-only and has no effect on subsequent accessor
//! behaviour.

use serde::Serialize;

use crate::markers::MarkerNode;
use crate::request::RequestContext;

/// Which request-context capabilities the running host generation exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RequestCapabilities {
    /// Current-generation by-name resolver present.
    pub fixture_resolver: bool,
    /// Legacy-named resolver present.
    pub funcarg_resolver: bool,
    /// Current-generation raw value cache present.
    pub fixture_value_cache: bool,
    /// Legacy `funcargs` raw value cache present.
    pub funcarg_cache: bool,
    /// Current-generation fixture-definition registry present.
    pub fixture_def_registry: bool,
    /// Legacy-named fixture-definition registry present.
    pub legacy_fixture_def_registry: bool,
    /// Number of names in the request's fixture closure.
    pub closure_len: usize,
}

impl RequestCapabilities {
    /// Probe every request-side capability of `request`.
    #[must_use]
    pub fn probe(request: &dyn RequestContext) -> Self {
        let capabilities = Self {
            fixture_resolver: request.fixture_resolver().is_some(),
            funcarg_resolver: request.funcarg_resolver().is_some(),
            fixture_value_cache: request.fixture_value_cache().is_some(),
            funcarg_cache: request.funcarg_cache().is_some(),
            fixture_def_registry: request.fixture_def_registry().is_some(),
            legacy_fixture_def_registry: request.legacy_fixture_def_registry().is_some(),
            closure_len: request.fixture_names_closure().len(),
        };
        log::debug!("request capabilities: {capabilities:?}");
        capabilities
    }

    /// Serialise the probe result as a JSON object.
    ///
    /// # Errors
    /// Returns the underlying `serde_json` error when serialisation fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Which marker capabilities a node's host generation exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeCapabilities {
    /// Ancestor-walking marker lookup present.
    pub marker_lookup: bool,
    /// Legacy node-local marker mapping present.
    pub keyword_markers: bool,
}

impl NodeCapabilities {
    /// Probe the marker-side capabilities of `node`.
    #[must_use]
    pub fn probe(node: &dyn MarkerNode) -> Self {
        let capabilities = Self {
            marker_lookup: node.marker_lookup().is_some(),
            keyword_markers: node.keyword_markers().is_some(),
        };
        log::debug!("node capabilities: {capabilities:?}");
        capabilities
    }

    /// Serialise the probe result as a JSON object.
    ///
    /// # Errors
    /// Returns the underlying `serde_json` error when serialisation fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
