#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `tags` provides the structured key/value context attached to a single
//! trace call. A [`TagSet`] is built fresh at every call site, handed to the
//! trace core by reference, and consulted only by the filter engine; the core
//! never stores or mutates it. Keys and values are plain strings so callers
//! can tag messages with whatever identifies the unit of work being traced
//! (a call id, a subscriber number, a transaction state).
//!
//! # Design
//!
//! - [`TagSet`] keeps its entries in insertion order and permits duplicate
//!   keys. Filter clauses test every entry carrying the clause's key, so a
//!   duplicate key gives a message several chances to satisfy a clause,
//!   matching the ordered-list semantics of the tag arrays this design
//!   descends from.
//! - [`TagSet::get`] returns the first value for a key; iteration exposes
//!   all entries.
//! - The [`tags!`] macro builds a set from `key => value` pairs without the
//!   call-site boilerplate of repeated [`TagSet::insert`] calls.
//!
//! # Examples
//!
//! ```
//! use tags::{TagSet, tags};
//!
//! let set = tags! {
//!     "caller" => "1234567",
//!     "callee" => "7654321",
//! };
//!
//! assert_eq!(set.get("caller"), Some("1234567"));
//! assert_eq!(set.len(), 2);
//! assert_eq!(set.to_string(), "{caller=1234567,callee=7654321}");
//!
//! let mut extended = set.clone();
//! extended.insert("state", "ringing");
//! assert_eq!(extended.len(), 3);
//! ```
//!
//! # See also
//!
//! - The `filters` crate evaluates [`TagSet`] values against installed
//!   filter rules.
//! - The `trace` crate threads a [`TagSet`] reference through every write
//!   call.

mod set;

pub use set::TagSet;

/// Builds a [`TagSet`] from `key => value` pairs.
///
/// Entries are inserted in the order written. An empty invocation produces
/// an empty set.
///
/// # Examples
///
/// ```
/// use tags::tags;
///
/// let set = tags! { "i" => "10", "j" => "7" };
/// assert_eq!(set.get("i"), Some("10"));
///
/// let empty = tags! {};
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! tags {
    () => { $crate::TagSet::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut set = $crate::TagSet::new();
        $(set.insert($key, $value);)+
        set
    }};
}
