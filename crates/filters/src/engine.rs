use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::sync::Arc;

use tags::TagSet;

use crate::{FilterError, FilterKind, FilterRule, FilterSet, debug};

/// Mutable facade over an atomically published [`FilterSet`] snapshot.
///
/// Readers ([`evaluate`](Self::evaluate)) load the current snapshot without
/// taking any lock, so high-frequency trace writes are never blocked by
/// configuration changes. Writers ([`add`](Self::add),
/// [`reset`](Self::reset)) serialize on an internal mutex, compile the
/// replacement set, and publish it in one atomic store; an evaluation that
/// raced the change sees either the old snapshot or the new one, never a
/// half-installed rule.
///
/// With no rules installed the engine admits nothing. Install the reserved
/// `all` wildcard to admit every tag set.
///
/// # Examples
///
/// ```
/// use filters::{FilterEngine, FilterKind};
/// use tags::tags;
///
/// let engine = FilterEngine::new();
/// assert!(!engine.evaluate(&tags! { "i" => "10" }));
///
/// engine.add_spec(FilterKind::Exact, "i=10").unwrap();
/// assert!(engine.evaluate(&tags! { "i" => "10" }));
///
/// engine.reset();
/// assert!(!engine.evaluate(&tags! { "i" => "10" }));
/// ```
#[derive(Debug, Default)]
pub struct FilterEngine {
    current: ArcSwap<FilterSet>,
    writer: Mutex<()>,
}

impl FilterEngine {
    /// Creates an engine with no rules installed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles `rule` and appends it to the rule set.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError`] when the rule's spec is malformed or a
    /// pattern fails to compile. Nothing is installed on failure;
    /// previously installed rules are unaffected.
    pub fn add(&self, rule: FilterRule) -> Result<(), FilterError> {
        let guard = self.writer.lock();
        let next = self.current.load().with_rule(rule.clone())?;
        self.current.store(Arc::new(next));
        drop(guard);

        debug::rule_added(rule.kind(), rule.spec());
        Ok(())
    }

    /// Convenience for [`add`](Self::add) with a freshly built rule.
    pub fn add_spec(&self, kind: FilterKind, spec: &str) -> Result<(), FilterError> {
        self.add(FilterRule::new(kind, spec))
    }

    /// Clears the rule set, returning the engine to deny-all.
    pub fn reset(&self) {
        let guard = self.writer.lock();
        let dropped = self.current.load().len();
        self.current.store(Arc::new(FilterSet::empty()));
        drop(guard);

        debug::rules_reset(dropped);
    }

    /// Evaluates `tags` against the current snapshot. Lock-free.
    ///
    /// Returns `false` when no rules are installed; see
    /// [`FilterSet::evaluate`] for the full semantics.
    #[must_use]
    pub fn evaluate(&self, tags: &TagSet) -> bool {
        self.current.load().evaluate(tags)
    }

    /// Returns the current snapshot. The snapshot stays valid and
    /// consistent regardless of later `add`/`reset` calls.
    #[must_use]
    pub fn snapshot(&self) -> FilterSet {
        FilterSet::clone(&self.current.load())
    }

    /// Returns the number of installed rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.current.load().len()
    }

    /// Returns `true` when no rules are installed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.load().is_empty()
    }
}
