#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `flags` provides the component and flag registry for the trace
//! workspace. A component declares its flags once, in order, and receives an
//! opaque [`FlagId`] per flag; call sites hold onto the ids and the hot path
//! tests flag state by table index instead of resolving names. Names are
//! resolved exactly once, at registration.
//!
//! # Design
//!
//! - [`FlagRegistry::register`] commits a component and its flags
//!   all-or-nothing: a duplicate component or a duplicate flag name within
//!   the call allocates no ids at all.
//! - Ids are monotonically assigned in declaration order (component order,
//!   then flag order within a component) and are never reused.
//! - Each [`FlagId`] carries the issuing registry's serial, so an id
//!   presented to a foreign registry is rejected with
//!   [`RegistryError::UnknownFlag`] instead of silently addressing the
//!   wrong flag.
//! - The flag table is published through an atomic snapshot:
//!   [`FlagRegistry::is_enabled`] loads the current table and one atomic
//!   bool, with no locks, while registration serializes on a writer mutex
//!   and publishes a replacement table.
//!
//! # Examples
//!
//! ```
//! use flags::FlagRegistry;
//!
//! let registry = FlagRegistry::new();
//! let map = registry
//!     .register("engine", &[
//!         ("setup", "call setup and teardown"),
//!         ("media", "media negotiation"),
//!     ])
//!     .unwrap();
//!
//! let setup = map.get("setup").unwrap();
//! assert!(!registry.is_enabled(setup).unwrap());
//!
//! let was_on = registry.set(setup, true).unwrap();
//! assert!(!was_on);
//! assert!(registry.is_enabled(setup).unwrap());
//! ```
//!
//! # See also
//!
//! - The `trace` crate pairs a `FlagRegistry` with a filter engine and a
//!   global enable switch to form the full emission gate.

mod error;
mod id;
mod map;
mod registry;

pub use error::RegistryError;
pub use id::FlagId;
pub use map::FlagMap;
pub use registry::{Flag, FlagRegistry};
