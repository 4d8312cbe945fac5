//! Callable-signature reflection across host runtime generations.
//!
//! Plugins need the declared parameter names of a step callable to know
//! which fixtures to inject. Modern runtimes reflect a structured parameter
//! list with per-parameter kinds; older ones only produce a flat name
//! listing. [`arg_names`] prefers the structured form when the adapter
//! reports it, detected by capability presence rather than by comparing
//! version numbers.

/// How a parameter may be supplied at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Ordinary parameter, fillable positionally or by name. Only these
    /// participate in fixture injection.
    PositionalOrKeyword,
    /// Catch-all for excess positional arguments.
    VarPositional,
    /// Catch-all for excess named arguments.
    VarKeyword,
    /// Parameter fillable by name only.
    KeywordOnly,
}

/// One declared parameter of a callable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    name: String,
    kind: ParamKind,
}

impl Param {
    /// Describe a parameter `name` of the given `kind`.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// The parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameter kind.
    #[must_use]
    pub fn kind(&self) -> ParamKind {
        self.kind
    }
}

/// Adapter over the host runtime's reflection of one callable.
pub trait CallableSignature {
    /// Structured parameter reflection, in declaration order. `None` on
    /// runtimes without it.
    fn parameters(&self) -> Option<&[Param]> {
        None
    }

    /// Flat argument-name listing from the legacy inspector. Always
    /// available, but carries no kind information.
    fn raw_arg_names(&self) -> &[String];
}

/// Ordered names of the callable's positional-or-keyword parameters.
///
/// With structured reflection present, variadic and keyword-only parameters
/// are excluded. The legacy listing has no kinds to filter on and is
/// returned verbatim.
#[must_use]
pub fn arg_names(callable: &dyn CallableSignature) -> Vec<String> {
    callable.parameters().map_or_else(
        || callable.raw_arg_names().to_vec(),
        |params| {
            params
                .iter()
                .filter(|param| param.kind() == ParamKind::PositionalOrKeyword)
                .map(|param| param.name().to_owned())
                .collect()
        },
    )
}
