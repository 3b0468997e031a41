//! Tracing events for context configuration and admitted records.
//!
//! Conditionally compiled behind the `tracing` feature flag; every helper
//! collapses to a no-op inline function when the feature is disabled.

use flags::FlagId;

/// Target name for tracing events.
#[cfg(feature = "tracing")]
const CONTEXT_TARGET: &str = "trace::context";

/// Traces the context-wide switch being toggled.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn context_toggled(context: &str, on: bool, previous: bool) {
    tracing::debug!(
        target: CONTEXT_TARGET,
        context = %context,
        on = on,
        previous = previous,
        "context_toggled"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn context_toggled(_context: &str, _on: bool, _previous: bool) {}

/// Traces one flag being toggled.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn flag_toggled(context: &str, id: FlagId, on: bool, previous: bool) {
    tracing::debug!(
        target: CONTEXT_TARGET,
        context = %context,
        id = ?id,
        on = on,
        previous = previous,
        "flag_toggled"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn flag_toggled(_context: &str, _id: FlagId, _on: bool, _previous: bool) {}

/// Traces a record passing the emission gate.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn record_admitted(context: &str, flag: &str) {
    tracing::trace!(
        target: CONTEXT_TARGET,
        context = %context,
        flag = %flag,
        "record_admitted"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn record_admitted(_context: &str, _flag: &str) {}
