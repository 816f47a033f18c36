//! # entity-registry - Handle-routed keyed registry
//!
//! A container that associates caller-chosen string identifiers with values
//! while routing every lookup through an opaque, unforgeable per-entry
//! [`Handle`]. Identifiers are unique at any point in time: re-adding an
//! identifier mints a new handle and evicts the old one, so the container
//! never accumulates unreachable entries.
//!
//! ## Core Concepts
//!
//! - **Identifier**: A caller-chosen name for an entity
//! - **Handle**: A uniquely minted token, the only key into the value table
//! - **Canonical order**: The handle table's insertion order, shared by every
//!   enumeration, combinator and iteration view
//!
//! ## Usage
//!
//! ```rust
//! use entity_registry::Registry;
//!
//! let mut registry = Registry::from_entries([("a", 10), ("b", 20)]);
//!
//! assert_eq!(registry.filter(|v, _, _| *v > 15), vec![&20]);
//! assert_eq!(registry.map(|v, _, _| v * 2), vec![20, 40]);
//! assert_eq!(registry.find(|v, _, _| *v > 0), Some(&20));
//!
//! assert!(registry.remove("a"));
//! assert_eq!(registry.get_all_identifiers(), vec!["b"]);
//! ```
//!
//! The registry is a single-owner, in-process structure and holds no lock.
//! Wrap it in a mutex to share it across threads.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod combinators;
pub mod config;
pub mod error;
pub mod handle;
pub mod iter;
pub mod registry;

mod serde_impl;

// Re-export primary types at crate root for convenience
pub use combinators::HandleTableView;
pub use config::RegistryConfig;
pub use error::{RegistryError, RegistryResult};
pub use handle::Handle;
pub use iter::{Entry, Iter};
pub use registry::Registry;
