//! Behaviour tests driving the compatibility surface the way a plugin
//! would: one adapter per simulated host release line, exercised through
//! the public traits only.

use std::rc::Rc;

use bdd_host_compat::{
    CallableSignature, FixtureCache, FixtureDef, FixtureDefRegistry, FixtureLookupError,
    FixtureResolver, FixtureScope, FixtureValue, Marker, MarkerChain, MarkerIndex, MarkerLookup,
    MarkerNode, Param, ParamKind, RequestContext, arg_names, closest_marker_args, fixture_value,
    fixture_value_raw, request_fixture_defs, request_fixture_names, set_fixture_value,
};

struct ScopeResolver {
    names: Vec<String>,
}

impl FixtureResolver for ScopeResolver {
    fn resolve(&self, name: &str) -> Result<FixtureValue, FixtureLookupError> {
        if self.names.iter().any(|known| known == name) {
            Ok(Rc::new(format!("value of {name}")))
        } else {
            Err(FixtureLookupError::new(name))
        }
    }
}

/// A current host release: renamed resolver, renamed value cache, renamed
/// definition registry, ancestor-walking marker lookup.
struct ModernHost {
    resolver: ScopeResolver,
    cache: FixtureCache,
    defs: FixtureDefRegistry,
    names: Vec<String>,
    markers: MarkerChain,
}

impl ModernHost {
    fn new() -> Self {
        let names = vec!["request".to_owned(), "db".to_owned()];
        let defs = [FixtureDef::new("db", FixtureScope::Session).with_location("steps.rs:40")]
            .into_iter()
            .collect();
        let own: MarkerIndex = [Marker::new("timeout").with_arg(30_u64)].into_iter().collect();
        let feature: MarkerIndex = [Marker::new("slow").with_arg("ci".to_owned())]
            .into_iter()
            .collect();
        Self {
            resolver: ScopeResolver {
                names: names.clone(),
            },
            cache: FixtureCache::new(),
            defs,
            names,
            markers: MarkerChain::new().with_level(own).with_level(feature),
        }
    }
}

impl RequestContext for ModernHost {
    fn fixture_resolver(&self) -> Option<&dyn FixtureResolver> {
        Some(&self.resolver)
    }

    fn fixture_value_cache(&self) -> Option<&FixtureCache> {
        Some(&self.cache)
    }

    fn fixture_def_registry(&self) -> Option<&FixtureDefRegistry> {
        Some(&self.defs)
    }

    fn fixture_names_closure(&self) -> &[String] {
        &self.names
    }
}

impl MarkerNode for ModernHost {
    fn marker_lookup(&self) -> Option<&dyn MarkerLookup> {
        Some(&self.markers)
    }
}

/// An old host release: the resolver and cache exist only under their
/// original names, no definition registry, node-local markers only.
struct LegacyHost {
    resolver: ScopeResolver,
    funcargs: FixtureCache,
    names: Vec<String>,
    markers: MarkerIndex,
}

impl LegacyHost {
    fn new() -> Self {
        let names = vec!["request".to_owned(), "db".to_owned()];
        Self {
            resolver: ScopeResolver {
                names: names.clone(),
            },
            funcargs: FixtureCache::new(),
            names,
            markers: [Marker::new("retries").with_arg(2_i32).with_arg(5_i32).with_arg(8_i32)]
                .into_iter()
                .collect(),
        }
    }
}

impl RequestContext for LegacyHost {
    fn funcarg_resolver(&self) -> Option<&dyn FixtureResolver> {
        Some(&self.resolver)
    }

    fn funcarg_cache(&self) -> Option<&FixtureCache> {
        Some(&self.funcargs)
    }

    fn fixture_names_closure(&self) -> &[String] {
        &self.names
    }
}

impl MarkerNode for LegacyHost {
    fn keyword_markers(&self) -> Option<&MarkerIndex> {
        Some(&self.markers)
    }
}

struct StepCallable {
    params: Option<Vec<Param>>,
    raw: Vec<String>,
}

impl CallableSignature for StepCallable {
    fn parameters(&self) -> Option<&[Param]> {
        self.params.as_deref()
    }

    fn raw_arg_names(&self) -> &[String] {
        &self.raw
    }
}

fn expect_string(value: Result<FixtureValue, bdd_host_compat::FixtureValueError>) -> String {
    match value {
        Ok(value) => match value.downcast_ref::<String>() {
            Some(text) => text.clone(),
            None => panic!("fixture value was not a String"),
        },
        Err(error) => panic!("fixture resolution failed: {error}"),
    }
}

#[test]
fn both_host_generations_resolve_fixtures_identically() {
    let modern = ModernHost::new();
    let legacy = LegacyHost::new();
    assert_eq!(expect_string(fixture_value(&modern, "db")), "value of db");
    assert_eq!(expect_string(fixture_value(&legacy, "db")), "value of db");
}

#[test]
fn unknown_names_fail_the_same_way_on_both_generations() {
    let modern = ModernHost::new();
    let legacy = LegacyHost::new();
    assert!(fixture_value(&modern, "ghost").is_err());
    assert!(fixture_value(&legacy, "ghost").is_err());
}

#[test]
fn raw_injection_round_trips_on_both_generations() {
    let modern = ModernHost::new();
    set_fixture_value(&modern, "db", Rc::new("stub".to_owned()));
    let value = fixture_value_raw(&modern, "db");
    assert_eq!(
        value
            .as_ref()
            .and_then(|value| value.downcast_ref::<String>()),
        Some(&"stub".to_owned())
    );

    let legacy = LegacyHost::new();
    set_fixture_value(&legacy, "db", Rc::new("stub".to_owned()));
    assert!(fixture_value_raw(&legacy, "db").is_some());
}

#[test]
fn definition_registry_is_empty_rather_than_missing_on_old_hosts() {
    let modern = ModernHost::new();
    let legacy = LegacyHost::new();
    assert!(request_fixture_defs(&modern).contains_key("db"));
    assert!(request_fixture_defs(&legacy).is_empty());
}

#[test]
fn names_closure_reads_the_same_on_both_generations() {
    let modern = ModernHost::new();
    let legacy = LegacyHost::new();
    assert_eq!(request_fixture_names(&modern), request_fixture_names(&legacy));
}

#[test]
fn modern_marker_lookup_walks_up_to_the_feature_level() {
    let modern = ModernHost::new();
    let args = closest_marker_args(&modern, "slow");
    let first = args.as_ref().and_then(|args| args.first());
    assert_eq!(
        first.and_then(|arg| arg.downcast_ref::<String>()),
        Some(&"ci".to_owned())
    );
    assert!(closest_marker_args(&modern, "absent").is_none());
}

#[test]
fn legacy_marker_lookup_truncates_to_two_arguments() {
    let legacy = LegacyHost::new();
    let args = closest_marker_args(&legacy, "retries");
    assert_eq!(args.as_ref().map(Vec::len), Some(2));
}

#[test]
fn signature_introspection_matches_across_runtime_generations() {
    let modern_runtime = StepCallable {
        params: Some(vec![
            Param::new("request", ParamKind::PositionalOrKeyword),
            Param::new("db", ParamKind::PositionalOrKeyword),
            Param::new("extras", ParamKind::VarPositional),
        ]),
        raw: Vec::new(),
    };
    let legacy_runtime = StepCallable {
        params: None,
        raw: vec!["request".to_owned(), "db".to_owned()],
    };
    assert_eq!(arg_names(&modern_runtime), arg_names(&legacy_runtime));
}
