//! Path-addressed document storage for LowDoc.
//!
//! A [`DocumentStore`] maps validated [`DocPath`]s onto a folder of a
//! hierarchical backend and offers add / read / exists / list / enumerate /
//! delete operations on it, bounded by a configurable nesting depth.
//!
//! # Storage Backends
//!
//! All backends implement the [`Backend`] trait:
//!
//! - [`FsBackend`] -- the local filesystem (default)
//! - [`InMemoryBackend`] -- `BTreeMap`-based tree for tests and embedding
//!
//! # Design Rules
//!
//! 1. Every path argument is a [`DocPath`]; every path the store produces is
//!    validated again before it is returned.
//! 2. Hidden entries (names starting with `.`) are invisible to listings.
//! 3. The store root can never be deleted.
//! 4. Nothing is cached: each call reflects the backend at call time.
//! 5. No locking. Callers sharing a root across threads or processes must
//!    serialize access themselves.
//! 6. I/O errors are propagated, except where an operation documents that it
//!    skips unreadable entries.

pub mod config;
pub mod error;
pub mod fs;
pub mod iter;
pub mod memory;
pub mod store;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use config::{MissingFolder, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use fs::FsBackend;
pub use iter::DocumentIter;
pub use lowdoc_path::{DocPath, PathError};
pub use memory::InMemoryBackend;
pub use store::DocumentStore;
pub use traits::{Backend, BackendEntry, EntryKind, Walk};
