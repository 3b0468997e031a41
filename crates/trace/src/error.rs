use thiserror::Error;

use filters::FilterError;
use flags::RegistryError;

/// Error produced by trace context configuration and writes.
///
/// Every variant is a synchronous, caller-correctable configuration error.
/// Filtered-out writes are not errors, and sink failures never surface
/// here; the sink's contract is fire-and-forget.
#[derive(Debug, Error)]
pub enum TraceError {
    /// Component registration or flag lookup failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A filter spec could not be parsed or compiled.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// A configure directive did not contain the `component=flags`
    /// separator.
    #[error("malformed configure directive '{directive}': missing '=' separator")]
    MissingDirectiveSeparator {
        /// The offending directive text.
        directive: String,
    },

    /// A configure directive contained an empty flag token.
    #[error("malformed configure directive '{directive}': empty flag token")]
    EmptyFlagToken {
        /// The offending directive text.
        directive: String,
    },

    /// A configure directive named a component this context has not
    /// registered.
    #[error("unknown component '{component}'")]
    UnknownComponent {
        /// The unresolved component name.
        component: String,
    },

    /// A configure directive named a flag its component did not declare.
    #[error("component '{component}' has no flag '{flag}'")]
    UnknownFlagName {
        /// The component the directive addressed.
        component: String,
        /// The unresolved flag name.
        flag: String,
    },
}
