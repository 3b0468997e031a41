//! Integration tests for component registration and flag state.
//!
//! These tests verify the all-or-nothing registration contract, ordered id
//! assignment, state toggling, and rejection of foreign identifiers.

use flags::{FlagRegistry, RegistryError};

// ============================================================================
// Registration Tests
// ============================================================================

/// Verifies ids are assigned in declaration order, component order first.
#[test]
fn ids_follow_declaration_order() {
    let registry = FlagRegistry::new();
    let engine = registry
        .register("engine", &[("setup", ""), ("media", ""), ("teardown", "")])
        .unwrap();
    let routing = registry.register("routing", &[("resolve", "")]).unwrap();

    let names: Vec<&str> = engine.iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["setup", "media", "teardown"]);

    let mut ids: Vec<_> = engine.ids().collect();
    ids.extend(routing.ids());
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted, "ids must be monotone across components");
}

/// Verifies a registered flag starts disabled and carries its metadata.
#[test]
fn flags_start_disabled_with_metadata() {
    let registry = FlagRegistry::new();
    let map = registry
        .register("engine", &[("setup", "call setup and teardown")])
        .unwrap();
    let id = map.get("setup").unwrap();

    let flag = registry.flag(id).unwrap();
    assert_eq!(flag.name(), "setup");
    assert_eq!(flag.component(), "engine");
    assert_eq!(flag.description(), "call setup and teardown");
    assert!(!flag.is_enabled());
}

/// Verifies a duplicate component name is rejected and allocates nothing.
#[test]
fn duplicate_component_commits_nothing() {
    let registry = FlagRegistry::new();
    registry.register("engine", &[("setup", "")]).unwrap();
    let before = registry.len();

    let error = registry
        .register("engine", &[("other", ""), ("more", "")])
        .unwrap_err();

    assert!(matches!(
        error,
        RegistryError::DuplicateComponent { component } if component == "engine"
    ));
    assert_eq!(registry.len(), before, "no ids from the failed attempt");
}

/// Verifies a duplicate flag name within one call is rejected and
/// allocates nothing, including for the flags preceding the duplicate.
#[test]
fn duplicate_flag_commits_nothing() {
    let registry = FlagRegistry::new();

    let error = registry
        .register("engine", &[("setup", ""), ("media", ""), ("setup", "")])
        .unwrap_err();

    assert!(matches!(
        error,
        RegistryError::DuplicateFlag { flag, .. } if flag == "setup"
    ));
    assert!(registry.is_empty());
    assert!(!registry.contains_component("engine"));
}

/// Verifies the same flag name may appear in different components.
#[test]
fn same_flag_name_in_different_components() {
    let registry = FlagRegistry::new();
    let a = registry.register("a", &[("verbose", "")]).unwrap();
    let b = registry.register("b", &[("verbose", "")]).unwrap();

    let id_a = a.get("verbose").unwrap();
    let id_b = b.get("verbose").unwrap();
    assert_ne!(id_a, id_b);

    registry.set(id_a, true).unwrap();
    assert!(registry.is_enabled(id_a).unwrap());
    assert!(!registry.is_enabled(id_b).unwrap());
}

// ============================================================================
// State Tests
// ============================================================================

/// Verifies toggling is visible to subsequent reads and returns the
/// previous state.
#[test]
fn set_toggles_and_reports_previous_state() {
    let registry = FlagRegistry::new();
    let map = registry.register("engine", &[("setup", "")]).unwrap();
    let id = map.get("setup").unwrap();

    assert!(!registry.set(id, true).unwrap());
    assert!(registry.is_enabled(id).unwrap());

    // Re-enabling an enabled flag is a no-op that reports the old state.
    assert!(registry.set(id, true).unwrap());

    assert!(registry.set(id, false).unwrap());
    assert!(!registry.is_enabled(id).unwrap());
}

/// Verifies flags toggle independently of one another.
#[test]
fn flags_toggle_independently() {
    let registry = FlagRegistry::new();
    let map = registry
        .register("engine", &[("setup", ""), ("media", "")])
        .unwrap();
    let setup = map.get("setup").unwrap();
    let media = map.get("media").unwrap();

    registry.set(setup, true).unwrap();

    assert!(registry.is_enabled(setup).unwrap());
    assert!(!registry.is_enabled(media).unwrap());
}

// ============================================================================
// Foreign Id Tests
// ============================================================================

/// Verifies ids issued by one registry are rejected by another, even when
/// the slot index exists there.
#[test]
fn foreign_ids_are_rejected() {
    let a = FlagRegistry::new();
    let b = FlagRegistry::new();
    let map_a = a.register("engine", &[("setup", "")]).unwrap();
    b.register("engine", &[("setup", "")]).unwrap();

    let foreign = map_a.get("setup").unwrap();

    assert!(matches!(
        b.set(foreign, true).unwrap_err(),
        RegistryError::UnknownFlag { .. }
    ));
    assert!(matches!(
        b.is_enabled(foreign).unwrap_err(),
        RegistryError::UnknownFlag { .. }
    ));
    assert!(matches!(
        b.flag(foreign).unwrap_err(),
        RegistryError::UnknownFlag { .. }
    ));
}

// ============================================================================
// Introspection Tests
// ============================================================================

/// Verifies components and their flags enumerate in registration order
/// with live state.
#[test]
fn introspection_lists_components_and_flags() {
    let registry = FlagRegistry::new();
    let engine = registry
        .register("engine", &[("setup", "s"), ("media", "m")])
        .unwrap();
    registry.register("routing", &[("resolve", "r")]).unwrap();

    assert_eq!(registry.components(), ["engine", "routing"]);

    registry.set(engine.get("media").unwrap(), true).unwrap();

    let flags = registry.flags_of("engine").unwrap();
    let listed: Vec<(&str, bool)> = flags
        .iter()
        .map(|flag| (flag.name(), flag.is_enabled()))
        .collect();
    assert_eq!(listed, [("setup", false), ("media", true)]);

    assert!(registry.flags_of("nope").is_none());
}
