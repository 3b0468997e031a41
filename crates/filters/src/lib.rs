#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `filters` provides ordered tag-filter evaluation for the trace
//! workspace. A filter rule is installed from a spec string of
//! whitespace-separated `key=pattern` clauses; all clauses of one spec form
//! a single conjunction, and the installed rules combine by disjunction. A
//! trace call's [`TagSet`](tags::TagSet) is admitted when at least one rule
//! is satisfied, where a rule is satisfied when every one of its clauses
//! finds a tag with the clause's key whose value matches the clause's
//! pattern.
//!
//! Two install kinds exist, distinguished by which constructor is used, not
//! by spec syntax: [`FilterRule::exact`] compares values by string
//! equality, [`FilterRule::regex`] compiles each pattern as a regular
//! expression. The literal spec `all` is a reserved wildcard that
//! short-circuits its rule to always-true.
//!
//! # Design
//!
//! - [`FilterRule`] captures the user-supplied install kind and spec text.
//!   The rule itself is lightweight; heavy lifting happens when the rule is
//!   compiled into a [`FilterSet`].
//! - [`FilterSet`] owns the compiled representation of each rule. It is
//!   immutable and cheaply cloneable (the inner state is behind an `Arc`),
//!   so an evaluation always runs against one consistent snapshot.
//! - [`FilterEngine`] is the mutable facade: `add` compiles and appends,
//!   `reset` clears, and `evaluate` reads an atomically published
//!   [`FilterSet`] snapshot without taking any lock.
//!
//! # Invariants
//!
//! - An empty rule set admits nothing: with no filters installed every
//!   evaluation returns `false`, including for the empty tag set. Callers
//!   must install at least one rule (the `all` wildcard suffices) to see
//!   any output.
//! - Patterns compile at install time, never during evaluation.
//! - Regex clauses use unanchored search semantics: a pattern matches when
//!   it matches anywhere in the tag value. Authors anchor explicitly with
//!   `^` and `$`, or install the rule with [`FilterRule::anchored`] to
//!   force a full-value match.
//! - A clause whose key is absent from the tag set fails its rule; it does
//!   not raise an error.
//!
//! # Errors
//!
//! [`FilterEngine::add`] and [`FilterSet::from_rules`] report
//! [`FilterError`] when a spec is malformed: a clause token without `=`, an
//! empty key, an unterminated quoted value, an empty spec, or (for the
//! regex kind) a pattern that fails to compile.
//!
//! # Examples
//!
//! Admit messages about call leg 10, or any leg in an odd-numbered state:
//!
//! ```
//! use filters::{FilterEngine, FilterKind};
//! use tags::tags;
//!
//! let engine = FilterEngine::new();
//! engine.add_spec(FilterKind::Exact, "leg=10").unwrap();
//! engine.add_spec(FilterKind::Regex, "state=^(1|3|5|7|9)$").unwrap();
//!
//! assert!(engine.evaluate(&tags! { "leg" => "10", "state" => "4" }));
//! assert!(engine.evaluate(&tags! { "leg" => "2", "state" => "3" }));
//! assert!(!engine.evaluate(&tags! { "leg" => "2", "state" => "4" }));
//! ```
//!
//! # See also
//!
//! - The `trace` crate routes every write through one [`FilterEngine`].
//! - [`regex`] for the pattern matching primitives used internally.

mod compiled;
mod debug;
mod engine;
mod error;
mod kind;
mod rule;
mod set;

pub use engine::FilterEngine;
pub use error::FilterError;
pub use kind::FilterKind;
pub use rule::FilterRule;
pub use set::FilterSet;
