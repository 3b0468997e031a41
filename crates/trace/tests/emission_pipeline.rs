//! Integration tests for the emission pipeline.
//!
//! These tests drive the full three-way gate through `TraceContext`:
//! context switch, per-flag state, and filter evaluation, plus the
//! deny-path guarantee that neither the formatter nor the sink is ever
//! invoked for a suppressed write.

use tags::tags;
use test_support::{CountingFormatter, RecordingSink};
use trace::{FilterKind, FlagId, TraceContext, TraceError, trace_write};

/// Opens an enabled context with one component and its first flag on.
fn open_ready() -> (TraceContext, FlagId) {
    let context = TraceContext::open("test");
    let map = context
        .register_component("engine", &[("setup", "call setup")])
        .unwrap();
    let setup = map.get("setup").unwrap();
    context.set_enabled(true);
    context.set_flag(setup, true).unwrap();
    (context, setup)
}

// ============================================================================
// Gate Combination Tests
// ============================================================================

/// Verifies nothing emits while the context switch is off, whatever the
/// flag and filter state.
#[test]
fn context_switch_gates_everything() {
    let (context, setup) = open_ready();
    context.add_filter(FilterKind::Exact, "all").unwrap();

    context.set_enabled(false);

    assert!(!context.should_emit(setup, &tags! {}).unwrap());
    assert!(!context.should_emit(setup, &tags! { "i" => "10" }).unwrap());
}

/// Verifies disabling a flag suppresses its writes until re-enabled,
/// independent of other flags.
#[test]
fn flag_state_gates_independently() {
    let context = TraceContext::open("test");
    let map = context
        .register_component("engine", &[("setup", ""), ("media", "")])
        .unwrap();
    let setup = map.get("setup").unwrap();
    let media = map.get("media").unwrap();
    context.set_enabled(true);
    context.set_flag(setup, true).unwrap();
    context.set_flag(media, true).unwrap();
    context.add_filter(FilterKind::Exact, "all").unwrap();

    context.set_flag(setup, false).unwrap();

    assert!(!context.should_emit(setup, &tags! {}).unwrap());
    assert!(context.should_emit(media, &tags! {}).unwrap());

    context.set_flag(setup, true).unwrap();
    assert!(context.should_emit(setup, &tags! {}).unwrap());
}

/// Verifies the fail-closed default: with no filters installed nothing
/// emits, even with context and flag on and even for empty tags.
#[test]
fn empty_filter_set_denies() {
    let (context, setup) = open_ready();

    assert!(!context.should_emit(setup, &tags! {}).unwrap());
    assert!(!context.should_emit(setup, &tags! { "i" => "10" }).unwrap());
}

/// Verifies the wildcard filter admits every tag set.
#[test]
fn wildcard_filter_admits_all() {
    let (context, setup) = open_ready();
    context.add_filter(FilterKind::Exact, "all").unwrap();

    assert!(context.should_emit(setup, &tags! {}).unwrap());
    assert!(
        context
            .should_emit(setup, &tags! { "i" => "10", "j" => "7" })
            .unwrap()
    );
}

/// Verifies filter disjunction and conjunction through the pipeline.
#[test]
fn filters_gate_by_tags() {
    let (context, setup) = open_ready();
    context.add_filter(FilterKind::Exact, "i=5").unwrap();
    context
        .add_filter(FilterKind::Regex, "i=10 j=^(1|3|5|7|9)$")
        .unwrap();

    assert!(
        !context
            .should_emit(setup, &tags! { "i" => "10", "j" => "4" })
            .unwrap()
    );
    assert!(
        context
            .should_emit(setup, &tags! { "i" => "10", "j" => "7" })
            .unwrap()
    );
    assert!(
        context
            .should_emit(setup, &tags! { "i" => "5", "j" => "99" })
            .unwrap()
    );
}

/// Verifies resetting filters restores the deny-all default.
#[test]
fn reset_filters_restores_deny() {
    let (context, setup) = open_ready();
    context.add_filter(FilterKind::Exact, "all").unwrap();
    assert!(context.should_emit(setup, &tags! {}).unwrap());

    context.reset_filters();

    assert_eq!(context.filter_count(), 0);
    assert!(!context.should_emit(setup, &tags! {}).unwrap());
}

// ============================================================================
// Foreign Id Tests
// ============================================================================

/// Verifies ids from one context are rejected by another for every entry
/// point that takes an id.
#[test]
fn foreign_ids_are_rejected() {
    let (a, setup_a) = open_ready();
    let (b, _) = open_ready();
    drop(a);

    assert!(matches!(
        b.set_flag(setup_a, true).unwrap_err(),
        TraceError::Registry(_)
    ));
    assert!(matches!(
        b.should_emit(setup_a, &tags! {}).unwrap_err(),
        TraceError::Registry(_)
    ));
    assert!(matches!(
        b.write(setup_a, &tags! {}, format_args!("x")).unwrap_err(),
        TraceError::Registry(_)
    ));
}

/// Verifies the unknown-flag check applies even when the context is
/// enabled and a wildcard filter is installed.
#[test]
fn unknown_flag_beats_gating() {
    let (a, setup_a) = open_ready();
    let (b, _) = open_ready();
    b.add_filter(FilterKind::Exact, "all").unwrap();
    drop(a);

    assert!(b.should_emit(setup_a, &tags! {}).is_err());
}

// ============================================================================
// Deny Path Tests
// ============================================================================

/// Verifies a denied write invokes neither the formatter nor the sink.
#[test]
fn denied_write_formats_nothing() {
    let sink = RecordingSink::new();
    let formatter = CountingFormatter::new();

    let mut context = TraceContext::open("test");
    context.set_sink(Box::new(sink.clone()));
    context.set_formatter(Box::new(formatter.clone()));
    let map = context.register_component("engine", &[("setup", "")]).unwrap();
    let setup = map.get("setup").unwrap();
    context.set_enabled(true);
    context.set_flag(setup, true).unwrap();

    // No filters installed: the write is denied.
    context
        .write(setup, &tags! { "i" => "10" }, format_args!("ringing"))
        .unwrap();

    assert_eq!(formatter.render_count(), 0);
    assert_eq!(sink.emit_count(), 0);
}

/// Verifies an admitted write renders once and reaches the sink once,
/// with the tags forwarded alongside the record.
#[test]
fn admitted_write_renders_and_emits_once() {
    let sink = RecordingSink::new();
    let formatter = CountingFormatter::new();

    let mut context = TraceContext::open("test");
    context.set_sink(Box::new(sink.clone()));
    context.set_formatter(Box::new(formatter.clone()));
    let map = context.register_component("engine", &[("setup", "")]).unwrap();
    let setup = map.get("setup").unwrap();
    context.set_enabled(true);
    context.set_flag(setup, true).unwrap();
    context.add_filter(FilterKind::Exact, "leg=1").unwrap();

    let tags = tags! { "leg" => "1" };
    context
        .write(setup, &tags, format_args!("leg {} ringing", 1))
        .unwrap();

    assert_eq!(formatter.render_count(), 1);
    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, "engine/setup: leg 1 ringing");
    assert_eq!(records[0].1, tags);
}

/// Verifies `trace_write!` does not evaluate its format arguments while
/// the context is disabled.
#[test]
fn macro_skips_argument_evaluation_when_disabled() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    let (context, setup) = open_ready();
    context.add_filter(FilterKind::Exact, "all").unwrap();
    context.set_enabled(false);

    let evaluations = AtomicUsize::new(0);
    let count = || evaluations.fetch_add(1, Ordering::Relaxed);

    trace_write!(context, setup, &tags! {}, "n={}", count()).unwrap();
    assert_eq!(evaluations.load(Ordering::Relaxed), 0);

    context.set_enabled(true);
    trace_write!(context, setup, &tags! {}, "n={}", count()).unwrap();
    assert_eq!(evaluations.load(Ordering::Relaxed), 1);
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

/// Verifies the context switch setter reports the previous state.
#[test]
fn set_enabled_returns_previous_state() {
    let context = TraceContext::open("test");

    assert!(!context.set_enabled(true));
    assert!(context.set_enabled(true));
    assert!(context.set_enabled(false));
}

/// Verifies closing a context flushes its sink.
#[test]
fn close_flushes_sink() {
    let sink = RecordingSink::new();

    let mut context = TraceContext::open("test");
    context.set_sink(Box::new(sink.clone()));
    context.close();

    assert!(sink.flush_count() >= 1);
}

/// Verifies a context reports its name and starts fully closed down.
#[test]
fn fresh_context_denies_by_default() {
    let context = TraceContext::open("sip");
    assert_eq!(context.name(), "sip");
    assert!(!context.is_enabled());
    assert_eq!(context.filter_count(), 0);
    assert!(context.components().is_empty());
}
