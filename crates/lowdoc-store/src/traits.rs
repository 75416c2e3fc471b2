use std::path::{Path, PathBuf};

use crate::error::StoreResult;

/// What a backend location holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A document (regular file).
    File,
    /// A folder.
    Directory,
}

impl EntryKind {
    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory)
    }
}

/// A single entry produced by [`Backend::list`] or [`Backend::walk`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendEntry {
    /// Absolute backend location of the entry.
    pub location: PathBuf,
    /// File or folder.
    pub kind: EntryKind,
}

impl BackendEntry {
    pub fn new(location: impl Into<PathBuf>, kind: EntryKind) -> Self {
        Self {
            location: location.into(),
            kind,
        }
    }

    /// Last component of the location, if it is valid UTF-8.
    pub fn name(&self) -> Option<&str> {
        self.location.file_name().and_then(|n| n.to_str())
    }
}

/// Lazy, pre-order stream of entries under a folder.
pub type Walk<'a> = Box<dyn Iterator<Item = StoreResult<BackendEntry>> + 'a>;

/// Returns `true` for names the store never surfaces.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Hierarchical storage backend.
///
/// Locations are absolute backend paths. All implementations must satisfy:
/// - `list` and `walk` skip hidden entries (names starting with `.`), and
///   `walk` does not descend into hidden folders.
/// - `walk` is a pre-order traversal: a folder is yielded before anything
///   beneath it, and the starting folder itself is not yielded.
/// - `write` creates or overwrites a single document; it never creates
///   missing parents.
/// - I/O errors are propagated, never silently ignored.
pub trait Backend: Send + Sync {
    /// Stat a location. Returns `Ok(None)` if nothing exists there; any
    /// other failure to stat is an error.
    fn kind(&self, location: &Path) -> StoreResult<Option<EntryKind>>;

    /// Create a folder and any missing parents.
    fn create_dir_all(&self, location: &Path) -> StoreResult<()>;

    /// Create or overwrite the document at `location`.
    fn write(&self, location: &Path, data: &[u8]) -> StoreResult<()>;

    /// Read the whole document at `location`.
    fn read(&self, location: &Path) -> StoreResult<Vec<u8>>;

    /// Immediate, non-hidden children of a folder.
    fn list(&self, location: &Path) -> StoreResult<Vec<BackendEntry>>;

    /// Recursive pre-order traversal below a folder.
    fn walk<'a>(&'a self, location: &Path) -> StoreResult<Walk<'a>>;

    /// Remove a single document.
    fn remove_file(&self, location: &Path) -> StoreResult<()>;

    /// Remove a folder and everything beneath it.
    fn remove_dir_all(&self, location: &Path) -> StoreResult<()>;

    /// `true` if anything exists at `location`. Stat failures read as `false`.
    fn exists(&self, location: &Path) -> bool {
        matches!(self.kind(location), Ok(Some(_)))
    }

    /// `true` if `location` is a folder. Stat failures read as `false`.
    fn is_dir(&self, location: &Path) -> bool {
        matches!(self.kind(location), Ok(Some(EntryKind::Directory)))
    }
}
