use std::fmt;

/// How a rule's clause patterns are matched against tag values.
///
/// The kind is selected by which install call is used; the spec grammar is
/// identical for both.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FilterKind {
    /// Clause patterns compare by string equality.
    Exact,
    /// Clause patterns compile as regular expressions and match by
    /// unanchored search.
    Regex,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => f.write_str("exact"),
            Self::Regex => f.write_str("regex"),
        }
    }
}
