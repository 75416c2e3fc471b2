//! Filesystem backend.
//!
//! Maps backend locations one-to-one onto paths of the local filesystem.
//! Recursive traversal is delegated to `walkdir`.

use std::fs;
use std::io;
use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::error::StoreResult;
use crate::traits::{is_hidden, Backend, BackendEntry, EntryKind, Walk};

/// Backend over the local filesystem.
///
/// Symbolic links are reported with the kind of their target, by `kind`,
/// `list` and `walk` alike. Walks never descend into a linked folder.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsBackend;

impl FsBackend {
    pub fn new() -> Self {
        Self
    }
}

fn kind_of(file_type: fs::FileType) -> EntryKind {
    if file_type.is_dir() {
        EntryKind::Directory
    } else {
        EntryKind::File
    }
}

/// Kind of a walked entry, looking through symlinks the way `list` does.
fn walked_kind(entry: &DirEntry) -> EntryKind {
    if entry.path_is_symlink() {
        if let Ok(meta) = fs::metadata(entry.path()) {
            return kind_of(meta.file_type());
        }
    }
    kind_of(entry.file_type())
}

impl Backend for FsBackend {
    fn kind(&self, location: &Path) -> StoreResult<Option<EntryKind>> {
        match fs::metadata(location) {
            Ok(meta) => Ok(Some(kind_of(meta.file_type()))),
            // A document standing where a folder is expected means nothing
            // can exist below it.
            Err(err) if matches!(err.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn create_dir_all(&self, location: &Path) -> StoreResult<()> {
        fs::create_dir_all(location)?;
        Ok(())
    }

    fn write(&self, location: &Path, data: &[u8]) -> StoreResult<()> {
        fs::write(location, data)?;
        Ok(())
    }

    fn read(&self, location: &Path) -> StoreResult<Vec<u8>> {
        Ok(fs::read(location)?)
    }

    fn list(&self, location: &Path) -> StoreResult<Vec<BackendEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(location)? {
            let entry = entry?;
            let name = entry.file_name();
            if name.to_str().map_or(true, is_hidden) {
                continue;
            }
            let path = entry.path();
            // Stat through symlinks so a linked folder lists as a folder.
            let kind = match fs::metadata(&path) {
                Ok(meta) => kind_of(meta.file_type()),
                Err(_) => kind_of(entry.file_type()?),
            };
            entries.push(BackendEntry::new(path, kind));
        }
        Ok(entries)
    }

    fn walk<'a>(&'a self, location: &Path) -> StoreResult<Walk<'a>> {
        // Surface a missing or non-folder start eagerly, like `read_dir` does.
        let meta = fs::metadata(location)?;
        if !meta.is_dir() {
            return Err(io::Error::other(format!(
                "{} is not a directory",
                location.display()
            ))
            .into());
        }
        let walker = WalkDir::new(location)
            .min_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                // The starting folder is checked by the predicate too; only
                // its descendants are subject to the hidden rule.
                entry.depth() == 0 || entry.file_name().to_str().is_some_and(|n| !is_hidden(n))
            })
            .map(|entry| match entry {
                Ok(entry) => Ok(BackendEntry::new(entry.path(), walked_kind(&entry))),
                Err(err) => Err(io::Error::from(err).into()),
            });
        Ok(Box::new(walker))
    }

    fn remove_file(&self, location: &Path) -> StoreResult<()> {
        fs::remove_file(location)?;
        Ok(())
    }

    fn remove_dir_all(&self, location: &Path) -> StoreResult<()> {
        fs::remove_dir_all(location)?;
        Ok(())
    }
}
