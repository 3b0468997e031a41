//! Tracing events for filter configuration changes.
//!
//! Conditionally compiled behind the `tracing` feature flag; every helper
//! collapses to a no-op inline function when the feature is disabled.

use crate::FilterKind;

/// Target name for tracing events.
#[cfg(feature = "tracing")]
const FILTER_TARGET: &str = "trace::filter";

/// Traces a filter rule being installed.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn rule_added(kind: FilterKind, spec: &str) {
    tracing::debug!(
        target: FILTER_TARGET,
        kind = %kind,
        spec = %spec,
        "filter_rule_added"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn rule_added(_kind: FilterKind, _spec: &str) {}

/// Traces the rule set being cleared.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn rules_reset(dropped: usize) {
    tracing::debug!(target: FILTER_TARGET, dropped = dropped, "filter_rules_reset");
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn rules_reset(_dropped: usize) {}
