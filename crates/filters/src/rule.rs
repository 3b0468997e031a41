use crate::FilterKind;

/// User-visible filter rule consisting of an install kind and spec text.
///
/// A rule is lightweight: it records what the caller asked for and is only
/// compiled (parsed, regexes built) when handed to a
/// [`FilterSet`](crate::FilterSet) or a [`FilterEngine`](crate::FilterEngine).
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterRule {
    pub(crate) kind: FilterKind,
    pub(crate) spec: String,
    pub(crate) anchored: bool,
}

impl FilterRule {
    /// Creates a rule of the given kind for `spec`.
    #[must_use]
    pub fn new(kind: FilterKind, spec: impl Into<String>) -> Self {
        Self {
            kind,
            spec: spec.into(),
            anchored: false,
        }
    }

    /// Creates an exact-match rule for `spec`.
    ///
    /// # Examples
    /// ```
    /// use filters::{FilterKind, FilterRule};
    /// let rule = FilterRule::exact("caller=1234567");
    /// assert_eq!(rule.kind(), FilterKind::Exact);
    /// ```
    #[must_use]
    pub fn exact(spec: impl Into<String>) -> Self {
        Self::new(FilterKind::Exact, spec)
    }

    /// Creates a regex-match rule for `spec`.
    ///
    /// # Examples
    /// ```
    /// use filters::{FilterKind, FilterRule};
    /// let rule = FilterRule::regex("state=^(1|3|5|7|9)$");
    /// assert_eq!(rule.kind(), FilterKind::Regex);
    /// ```
    #[must_use]
    pub fn regex(spec: impl Into<String>) -> Self {
        Self::new(FilterKind::Regex, spec)
    }

    /// Forces every pattern of a regex rule to match the whole tag value.
    ///
    /// Each pattern is wrapped as `^(?:pattern)$` at compile time, so a rule
    /// author who wants full-match semantics does not have to anchor every
    /// alternative by hand. Has no effect on exact rules, which always
    /// compare whole values.
    #[must_use]
    pub const fn anchored(mut self) -> Self {
        self.anchored = true;
        self
    }

    /// Returns the rule's install kind.
    #[must_use]
    pub const fn kind(&self) -> FilterKind {
        self.kind
    }

    /// Returns the spec text the rule was created from.
    #[must_use]
    pub fn spec(&self) -> &str {
        &self.spec
    }

    /// Returns whether regex patterns are wrapped to match whole values.
    #[must_use]
    pub const fn is_anchored(&self) -> bool {
        self.anchored
    }
}
