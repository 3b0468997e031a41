#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `trace` is the aggregate of the trace workspace: a [`TraceContext`]
//! owns one flag registry, one filter engine, a context-wide enable
//! switch, and the sink admitted records are delivered to. Call sites tag
//! every write with a flag id and a [`TagSet`](tags::TagSet); the emission
//! pipeline combines the three gates into one admit/deny verdict and only
//! formats and forwards the record on admit.
//!
//! # Design
//!
//! - [`TraceContext::should_emit`] is the single decision point: context
//!   enabled AND flag enabled AND filters satisfied. The deny path does no
//!   formatting and touches no sink.
//! - The fast path is lock-free. Flag state and filter rules are read from
//!   atomically published snapshots; configuration calls publish
//!   replacements without ever blocking a concurrent write, and the sink
//!   is invoked with no configuration lock held.
//! - The [`Sink`] and [`Formatter`] traits are the boundary: concrete
//!   transports and decoration policy live outside the core. [`NullSink`],
//!   [`WriterSink`] and [`PlainFormatter`] are the provided seam adapters.
//! - [`trace_write!`] wraps [`TraceContext::write`] the way call sites
//!   should use it: the format arguments are captured lazily and not even
//!   evaluated while the context is disabled.
//!
//! # Examples
//!
//! Trace one call leg of a telephony engine, filtering on its leg id:
//!
//! ```
//! use filters::FilterKind;
//! use tags::tags;
//! use trace::{TraceContext, trace_write};
//!
//! let context = TraceContext::open("sip");
//! let engine = context
//!     .register_component("engine", &[
//!         ("setup", "call setup and teardown"),
//!         ("media", "media negotiation"),
//!     ])
//!     .unwrap();
//! let setup = engine.get("setup").unwrap();
//!
//! context.set_enabled(true);
//! context.set_flag(setup, true).unwrap();
//! context.add_filter(FilterKind::Exact, "leg=1").unwrap();
//!
//! // Admitted: the leg tag satisfies the filter.
//! trace_write!(context, setup, &tags! { "leg" => "1" }, "ringing").unwrap();
//! // Denied silently: no filter admits leg 2.
//! trace_write!(context, setup, &tags! { "leg" => "2" }, "ringing").unwrap();
//! ```
//!
//! # See also
//!
//! - The `flags` crate for registration and id semantics.
//! - The `filters` crate for the filter spec grammar and evaluation rules.

mod context;
mod debug;
mod error;
mod format;
mod sink;

pub use context::TraceContext;
pub use error::TraceError;
pub use format::{Formatter, PlainFormatter};
pub use sink::{LineMode, NullSink, Sink, WriterSink};

// Re-exported so call sites can name flag and filter types without
// depending on the member crates directly.
pub use filters::{FilterKind, FilterRule};
pub use flags::{Flag, FlagId, FlagMap};

/// Writes a trace record through a context's emission gate.
///
/// Expands to a [`TraceContext::write`] call with lazily captured format
/// arguments, guarded by the context-wide switch: while the context is
/// disabled the macro evaluates nothing at all, so call sites can tag hot
/// paths freely.
///
/// Evaluates to `Result<(), TraceError>`; the only error is `UnknownFlag`
/// for a foreign id, and a disabled context short-circuits to `Ok(())`
/// before that check, like the write entry point of every other gate.
///
/// # Examples
///
/// ```
/// use filters::FilterKind;
/// use tags::tags;
/// use trace::{TraceContext, trace_write};
///
/// let context = TraceContext::open("sip");
/// let map = context.register_component("engine", &[("setup", "")]).unwrap();
/// let setup = map.get("setup").unwrap();
///
/// // Disabled context: nothing is evaluated, nothing is emitted.
/// trace_write!(context, setup, &tags! {}, "leg {} ringing", 1).unwrap();
/// ```
#[macro_export]
macro_rules! trace_write {
    ($context:expr, $flag:expr, $tags:expr, $($arg:tt)+) => {{
        let context = &$context;
        if context.is_enabled() {
            context.write($flag, $tags, ::core::format_args!($($arg)+))
        } else {
            ::core::result::Result::Ok(())
        }
    }};
}
