//! Marker model and version-tolerant marker-argument lookup.
//!
//! Markers are named annotations on a test item or one of its enclosing
//! collection nodes, optionally carrying positional arguments. Modern hosts
//! answer "nearest marker with this name" themselves by walking the ancestor
//! chain; older hosts only expose the node's own keyword-indexed marker
//! mapping. The two paths are not equivalent — the legacy one sees no
//! ancestors and yields at most the first two arguments — and that narrowing
//! is kept as-is for parity with legacy hosts rather than papered over.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use derive_more::{Deref, From};

/// One opaque positional marker argument.
pub type MarkerArg = Rc<dyn Any>;

/// Ordered positional arguments of a marker.
pub type MarkerArgs = Vec<MarkerArg>;

/// A named annotation with ordered positional arguments.
#[derive(Clone)]
pub struct Marker {
    name: String,
    args: MarkerArgs,
}

impl Marker {
    /// Construct a marker named `name` with no arguments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Append a positional argument.
    #[must_use]
    pub fn with_arg<T: Any>(mut self, arg: T) -> Self {
        self.args.push(Rc::new(arg));
        self
    }

    /// The marker name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The positional arguments, in declaration order.
    #[must_use]
    pub fn args(&self) -> &[MarkerArg] {
        &self.args
    }
}

impl fmt::Debug for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Marker")
            .field("name", &self.name)
            .field("args", &self.args.len())
            .finish()
    }
}

/// Node-local marker mapping, keyed by marker name.
///
/// Models the legacy keyword-indexed collection. Dereferences to the
/// underlying map for lookup and iteration.
#[derive(Debug, Default, Clone, Deref, From)]
pub struct MarkerIndex(hashbrown::HashMap<String, Marker>);

impl MarkerIndex {
    /// Construct an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `marker` under its own name, returning any displaced entry.
    pub fn insert(&mut self, marker: Marker) -> Option<Marker> {
        self.0.insert(marker.name().to_owned(), marker)
    }
}

impl FromIterator<Marker> for MarkerIndex {
    fn from_iter<I: IntoIterator<Item = Marker>>(markers: I) -> Self {
        let mut index = Self::new();
        for marker in markers {
            index.insert(marker);
        }
        index
    }
}

/// Ancestor-walking marker lookup surface of the host.
pub trait MarkerLookup {
    /// The nearest marker named `name` on the node or its ancestors.
    fn closest(&self, name: &str) -> Option<&Marker>;
}

/// A node-to-root chain of marker indexes.
///
/// Ready-made [`MarkerLookup`] for hosts and doubles that materialise the
/// ancestor chain: levels are searched in push order, so the first level is
/// the node itself and later levels are progressively further ancestors.
#[derive(Debug, Default, Clone)]
pub struct MarkerChain {
    levels: Vec<MarkerIndex>,
}

impl MarkerChain {
    /// Construct an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next-outermost level of the chain.
    #[must_use]
    pub fn with_level(mut self, level: MarkerIndex) -> Self {
        self.levels.push(level);
        self
    }
}

impl MarkerLookup for MarkerChain {
    fn closest(&self, name: &str) -> Option<&Marker> {
        self.levels.iter().find_map(|level| level.get(name))
    }
}

/// Adapter over one host generation's test-item or collection node.
///
/// Both accessors are capability probes; an adapter implements whichever its
/// host release actually supports.
pub trait MarkerNode {
    /// Ancestor-walking marker lookup, on hosts that provide it.
    fn marker_lookup(&self) -> Option<&dyn MarkerLookup> {
        None
    }

    /// The node's own keyword-indexed marker mapping, kept for hosts without
    /// the walk.
    fn keyword_markers(&self) -> Option<&MarkerIndex> {
        None
    }
}

/// Positional arguments of the nearest marker named `name`, through
/// whichever lookup path the host supports.
///
/// When the ancestor walk is available it is authoritative: a miss returns
/// `None` without consulting the node-local mapping. Only hosts lacking the
/// walk entirely use [`legacy_marker_args`], with its narrower semantics.
/// A node exposing neither path resolves to `None`.
#[must_use]
pub fn closest_marker_args(node: &dyn MarkerNode, name: &str) -> Option<MarkerArgs> {
    node.marker_lookup().map_or_else(
        || legacy_marker_args(node, name),
        |lookup| closest_marker_args_by_walk(lookup, name),
    )
}

/// Full argument vector of the nearest marker named `name`, or `None` when
/// no such marker exists anywhere in the chain.
#[must_use]
pub fn closest_marker_args_by_walk(lookup: &dyn MarkerLookup, name: &str) -> Option<MarkerArgs> {
    lookup.closest(name).map(|marker| marker.args().to_vec())
}

/// Arguments of the marker named `name` in the node's own mapping only.
///
/// Legacy hosts neither walk ancestors nor hand back the full argument
/// tuple; this path sees only the node itself and yields at most the first
/// two arguments, matching their behaviour.
#[must_use]
pub fn legacy_marker_args(node: &dyn MarkerNode, name: &str) -> Option<MarkerArgs> {
    let markers = node.keyword_markers()?;
    markers
        .get(name)
        .map(|marker| marker.args().iter().take(2).cloned().collect())
}
