use thiserror::Error;

use crate::FlagId;

/// Error produced by flag registration and state changes.
///
/// All variants are synchronous, caller-correctable configuration errors.
/// A failed registration commits nothing.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum RegistryError {
    /// The component name is already registered in this registry.
    #[error("component '{component}' is already registered")]
    DuplicateComponent {
        /// The offending component name.
        component: String,
    },

    /// Two flags in one registration call share a name.
    #[error("component '{component}' declares flag '{flag}' twice")]
    DuplicateFlag {
        /// The component being registered.
        component: String,
        /// The repeated flag name.
        flag: String,
    },

    /// The identifier was not issued by this registry.
    #[error("unknown flag identifier {id:?}: not issued by this registry")]
    UnknownFlag {
        /// The rejected identifier.
        id: FlagId,
    },
}
