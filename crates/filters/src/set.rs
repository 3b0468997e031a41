use std::sync::Arc;

use tags::TagSet;

use crate::{FilterError, FilterRule, compiled::CompiledRule};

/// Compiled, immutable collection of filter rules for fast path evaluation.
///
/// A `FilterSet` is built from a sequence of [`FilterRule`]s via
/// [`from_rules`](Self::from_rules). During construction each rule's spec is
/// parsed into clauses and regex patterns are compiled, so evaluation never
/// parses or compiles anything.
///
/// Rules combine by disjunction: [`evaluate`](Self::evaluate) admits a tag
/// set when at least one rule is satisfied. The empty set admits nothing.
///
/// `FilterSet` is cheaply cloneable (the inner state is behind an [`Arc`]).
///
/// # Examples
///
/// ```
/// use filters::{FilterRule, FilterSet};
/// use tags::tags;
///
/// let set = FilterSet::from_rules([
///     FilterRule::exact("i=10"),
///     FilterRule::exact("j=5"),
/// ]).unwrap();
///
/// assert!(set.evaluate(&tags! { "i" => "10", "j" => "7" }));
/// assert!(!set.evaluate(&tags! { "i" => "3", "j" => "3" }));
/// ```
#[derive(Clone, Debug, Default)]
pub struct FilterSet {
    rules: Arc<Vec<CompiledRule>>,
}

impl FilterSet {
    /// Returns a set with no rules, which denies every tag set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a `FilterSet` by compiling the supplied rules in order.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError`] when any spec is malformed or any regex
    /// pattern fails to compile. No partial set is produced.
    pub fn from_rules<I>(rules: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = FilterRule>,
    {
        let compiled = rules
            .into_iter()
            .map(CompiledRule::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            rules: Arc::new(compiled),
        })
    }

    /// Returns `true` when the set contains no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the number of rules in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Iterates the rules the set was built from, in install order.
    pub fn rules(&self) -> impl Iterator<Item = &FilterRule> {
        self.rules.iter().map(CompiledRule::rule)
    }

    /// Evaluates `tags` against the rule set.
    ///
    /// Returns `false` for the empty set: no filters means no traces are
    /// admitted. Otherwise returns `true` iff at least one rule is
    /// satisfied, where a rule is satisfied iff every one of its clauses
    /// finds a tag with the clause's key and a matching value.
    #[must_use]
    pub fn evaluate(&self, tags: &TagSet) -> bool {
        self.rules.iter().any(|rule| rule.matches(tags))
    }

    pub(crate) fn with_rule(&self, rule: FilterRule) -> Result<Self, FilterError> {
        let mut compiled = (*self.rules).clone();
        compiled.push(CompiledRule::new(rule)?);
        Ok(Self {
            rules: Arc::new(compiled),
        })
    }
}
