use thiserror::Error;

/// Error produced when a filter spec cannot be parsed or compiled.
///
/// All variants are synchronous, caller-correctable configuration errors:
/// the offending rule is never installed, previously installed rules are
/// unaffected.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A clause token did not contain the `key=pattern` separator.
    #[error("malformed filter clause '{token}': missing '=' separator")]
    MissingSeparator {
        /// The offending clause token.
        token: String,
    },

    /// A clause token started with `=`, leaving the key empty.
    #[error("malformed filter clause '{token}': empty key")]
    EmptyKey {
        /// The offending clause token.
        token: String,
    },

    /// A quoted clause value was not closed before the spec ended.
    #[error("malformed filter spec '{spec}': unterminated quote")]
    UnterminatedQuote {
        /// The full spec text.
        spec: String,
    },

    /// The spec contained no clauses at all.
    #[error("empty filter spec")]
    EmptySpec,

    /// A regex-kind pattern failed to compile.
    #[error("failed to compile filter pattern '{pattern}': {source}")]
    InvalidRegex {
        /// The offending pattern.
        pattern: String,
        /// The underlying regex error.
        source: regex::Error,
    },
}

impl FilterError {
    /// Returns the clause token or pattern the error refers to, when one
    /// exists.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        match self {
            Self::MissingSeparator { token } | Self::EmptyKey { token } => Some(token),
            Self::UnterminatedQuote { spec } => Some(spec),
            Self::InvalidRegex { pattern, .. } => Some(pattern),
            Self::EmptySpec => None,
        }
    }
}
