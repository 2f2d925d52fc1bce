mod fixtures;

use autoscope::{stmt::Value, Registry};
use fixtures::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[test]
fn resolve_caches_compiled_scopes() {
    let schema = schema();
    let registry = Registry::new();

    assert!(registry.is_empty());
    assert!(registry.get(TEAM, "is").is_none());

    let first = registry.resolve(&schema, TEAM, "is").unwrap().unwrap();
    let second = registry.resolve(&schema, TEAM, "is").unwrap().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first, second);
    assert_eq!(registry.len(), 1);
    assert!(Arc::ptr_eq(&first, &registry.get(TEAM, "is").unwrap()));
}

#[test]
fn cache_hits_do_not_consult_metadata() {
    let schema = schema();
    let registry = Registry::new();

    let compiled = registry.resolve(&schema, TEAM, "name_is").unwrap().unwrap();

    // A provider that can no longer answer still gets the cached scope
    let cached = registry.resolve(&Offline, TEAM, "name_is").unwrap().unwrap();
    assert!(Arc::ptr_eq(&compiled, &cached));
}

#[test]
fn no_match_is_not_cached() {
    let schema = schema();
    let registry = Registry::new();

    assert!(registry.resolve(&schema, TEAM, "flying").unwrap().is_none());
    assert!(registry.get(TEAM, "flying").is_none());
    assert!(registry.is_empty());
}

#[test]
fn scopes_are_per_model() {
    let schema = schema();
    let registry = Registry::new();

    let team = registry.resolve(&schema, TEAM, "is").unwrap().unwrap();
    let player = registry.resolve(&schema, PLAYER, "is").unwrap().unwrap();

    assert_eq!(registry.len(), 2);
    assert_eq!(team.model, TEAM);
    assert_eq!(player.model, PLAYER);
    assert!(team.pattern != player.pattern);
}

#[test]
fn subclasses_compile_lazily() {
    let schema = schema();
    let registry = Registry::new();

    let player = registry.resolve(&schema, PLAYER, "team_is").unwrap().unwrap();
    assert!(registry.get(VETERAN, "team_is").is_none());

    let veteran = registry.resolve(&schema, VETERAN, "team_is").unwrap().unwrap();
    assert_eq!(veteran.model, VETERAN);
    assert_eq!(veteran.pattern, player.pattern);
    assert_eq!(registry.len(), 2);
}

#[test]
fn concurrent_resolution_shares_one_scope() {
    let schema = schema();
    let registry = Registry::new();

    let scopes: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| registry.resolve(&schema, TEAM, "name_contains").unwrap().unwrap()))
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for scope in &scopes {
        assert!(Arc::ptr_eq(scope, &scopes[0]));
    }
    assert_eq!(registry.len(), 1);
}

#[test]
fn unavailable_metadata_resolves_to_nothing() {
    let registry = Registry::new();

    assert!(registry.resolve(&Offline, TEAM, "name_is").unwrap().is_none());
    assert!(registry.is_empty());
}

#[test]
fn unavailable_metadata_during_a_call_propagates() {
    let schema = schema();
    let registry = Registry::new();

    let scope = registry.resolve(&schema, TEAM, "with_player").unwrap().unwrap();
    let err = scope.call(&Offline, &["alice".into()]).unwrap_err();

    assert!(err.is_metadata_unavailable());
}

#[test]
fn call_unknown_scope() {
    let schema = schema();
    let registry = Registry::new();

    let err = registry
        .call(&schema, TEAM, "flying", &[Value::from(true)])
        .unwrap_err();

    assert!(err.is_unknown_scope());
    assert_eq!(err.to_string(), "unknown scope `flying` for model `Team`");
}

#[test]
fn call_invokes_the_cached_scope() {
    let schema = schema();
    let registry = Registry::new();

    let fragment = registry
        .call(&schema, TEAM, "name_starts", &["Ro".into()])
        .unwrap();

    assert_eq!(condition(&fragment), "teams.name LIKE ?");
    assert_eq!(fragment.params, vec![Value::from("Ro%")]);
    assert_eq!(registry.len(), 1);
}
