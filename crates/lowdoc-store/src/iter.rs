use std::iter::FusedIterator;
use std::path::{Component, Path, PathBuf};

use lowdoc_path::{DocPath, SEPARATOR};
use tracing::{debug, warn};

use crate::traits::Walk;

/// Lazy, recursive, forward-only traversal of the paths below a folder.
///
/// Produced by `DocumentStore::enumerator`. Each pull advances the backend
/// walk by one entry, or by a run of entries when folders are being skipped.
/// Yielded paths are relative to the store root. Once exhausted it stays
/// exhausted; call `enumerator` again to start over.
pub struct DocumentIter<'a> {
    root: PathBuf,
    walk: Option<Walk<'a>>,
    include_folders: bool,
}

impl<'a> DocumentIter<'a> {
    pub(crate) fn new(root: PathBuf, walk: Walk<'a>, include_folders: bool) -> Self {
        Self {
            root,
            walk: Some(walk),
            include_folders,
        }
    }

    /// An iterator that yields nothing (missing folder).
    pub(crate) fn empty(root: PathBuf, include_folders: bool) -> Self {
        Self {
            root,
            walk: None,
            include_folders,
        }
    }

    /// Whether folders are yielded alongside documents.
    pub fn includes_folders(&self) -> bool {
        self.include_folders
    }
}

impl Iterator for DocumentIter<'_> {
    type Item = DocPath;

    fn next(&mut self) -> Option<DocPath> {
        let walk = self.walk.as_mut()?;
        loop {
            let entry = match walk.next() {
                Some(Ok(entry)) => entry,
                Some(Err(err)) => {
                    warn!(error = %err, "skipping entry that could not be read");
                    continue;
                }
                None => {
                    self.walk = None;
                    return None;
                }
            };
            // Folders come before their contents in a pre-order walk, so
            // skipping them still reaches every nested document.
            if !self.include_folders && entry.kind.is_dir() {
                continue;
            }
            if let Some(path) = relative_doc_path(&self.root, &entry.location) {
                return Some(path);
            }
        }
    }
}

impl FusedIterator for DocumentIter<'_> {}

impl std::fmt::Debug for DocumentIter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentIter")
            .field("root", &self.root)
            .field("include_folders", &self.include_folders)
            .field("exhausted", &self.walk.is_none())
            .finish()
    }
}

/// `false` for names with surrounding whitespace. Path validation trims, so
/// such a name would come back as a path to a different location.
pub(crate) fn is_trimmed(name: &str) -> bool {
    name.trim() == name
}

/// Convert a backend location under `root` back into a store path.
///
/// Returns `None` for locations outside the root, non-UTF-8 names, and names
/// that fail validation.
pub(crate) fn relative_doc_path(root: &Path, location: &Path) -> Option<DocPath> {
    let relative = location.strip_prefix(root).ok()?;
    let mut joined = String::new();
    for component in relative.components() {
        let Component::Normal(name) = component else {
            return None;
        };
        let name = name.to_str()?;
        if !is_trimmed(name) {
            debug!(location = %location.display(), "dropping entry whose name does not survive trimming");
            return None;
        }
        if !joined.is_empty() {
            joined.push(SEPARATOR);
        }
        joined.push_str(name);
    }
    match DocPath::new(&joined) {
        Ok(path) => Some(path),
        Err(err) => {
            debug!(location = %location.display(), error = %err, "dropping entry with invalid path");
            None
        }
    }
}
