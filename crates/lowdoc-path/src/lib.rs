//! Validated document paths for the LowDoc document store.
//!
//! Every path a store touches is a [`DocPath`]: a trimmed, relative path that
//! can never climb out of the store root or name a hidden entry. Paths derived
//! by joining are validated again, so the rule holds for composed paths too.
//!
//! # Modules
//!
//! - [`error`] — [`PathError`] and the crate `Result` alias
//! - [`doc_path`] — the [`DocPath`] type and its validation rules

pub mod doc_path;
pub mod error;

pub use doc_path::{DocPath, SEPARATOR};
pub use error::{PathError, Result};
