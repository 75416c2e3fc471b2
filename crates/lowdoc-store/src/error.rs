use std::path::PathBuf;

use lowdoc_path::{DocPath, PathError};

/// Errors from document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A path failed validation.
    #[error(transparent)]
    Path(#[from] PathError),

    /// Writing the document would nest it deeper than the store allows.
    #[error("max depth exceeded: depth {depth} > max {max}")]
    MaxDepthExceeded { depth: usize, max: u32 },

    /// The operation needs a folder but the path names a document.
    #[error("path must be a directory: {path}")]
    PathMustBeADirectory { path: DocPath },

    /// The operation needs a document but the path names a folder.
    #[error("path must be a document: {path}")]
    PathMustBeADocument { path: DocPath },

    /// The store root can never be deleted.
    #[error("cannot delete the store root")]
    CantDeleteRoot,

    /// The folder does not exist (only under `MissingFolder::Error`).
    #[error("folder does not exist: {path}")]
    FolderDoesNotExist { path: DocPath },

    /// The root location cannot host a store.
    #[error("invalid store root {}: {reason}", .root.display())]
    InvalidRoot { root: PathBuf, reason: String },

    /// Configuration could not be parsed.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
