//! The document store.
//!
//! [`DocumentStore`] resolves every [`DocPath`] against a fixed root folder
//! and performs exactly one backend operation (or one scan) per call. It
//! caches nothing, so every query reflects the backend at call time.

use std::path::{Path, PathBuf};

use lowdoc_path::DocPath;
use tracing::debug;

use crate::config::{MissingFolder, StoreConfig};
use crate::error::{StoreError, StoreResult};
use crate::fs::FsBackend;
use crate::iter::{is_trimmed, DocumentIter};
use crate::traits::{Backend, EntryKind};

/// Path-addressed document store over a hierarchical backend.
pub struct DocumentStore<B = FsBackend> {
    root: PathBuf,
    config: StoreConfig,
    backend: B,
}

impl DocumentStore<FsBackend> {
    /// Open (or create) a store rooted at a local folder.
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open_with(root, StoreConfig::default())
    }

    /// Open (or create) a store rooted at a local folder with `config`.
    pub fn open_with(root: impl AsRef<Path>, config: StoreConfig) -> StoreResult<Self> {
        let root = std::path::absolute(root.as_ref()).map_err(|e| StoreError::InvalidRoot {
            root: root.as_ref().to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::with_backend(FsBackend::new(), root, config)
    }
}

impl<B: Backend> DocumentStore<B> {
    /// Create a store over an arbitrary backend.
    ///
    /// The root folder is created if missing. Fails with
    /// [`StoreError::InvalidRoot`] if the root is a document or cannot be
    /// created.
    pub fn with_backend(backend: B, root: impl Into<PathBuf>, config: StoreConfig) -> StoreResult<Self> {
        let root = root.into();
        let kind = backend.kind(&root).map_err(|e| StoreError::InvalidRoot {
            root: root.clone(),
            reason: e.to_string(),
        })?;
        match kind {
            Some(EntryKind::Directory) => {}
            Some(EntryKind::File) => {
                return Err(StoreError::InvalidRoot {
                    root,
                    reason: "exists and is not a directory".into(),
                });
            }
            None => {
                if let Err(e) = backend.create_dir_all(&root) {
                    return Err(StoreError::InvalidRoot {
                        root,
                        reason: e.to_string(),
                    });
                }
            }
        }
        debug!(root = %root.display(), max_depth = config.max_depth, "opened document store");
        Ok(Self {
            root,
            config,
            backend,
        })
    }

    /// Absolute backend location of the store root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn resolve(&self, path: &DocPath) -> PathBuf {
        let mut location = self.root.clone();
        for component in path.components() {
            location.push(component);
        }
        location
    }

    // -----------------------------------------------------------------------
    // Documents
    // -----------------------------------------------------------------------

    /// Write `data` at `path`, creating missing folders and overwriting any
    /// existing document.
    ///
    /// Fails with [`StoreError::MaxDepthExceeded`] when the document would
    /// sit under more than `max_depth` folders. Writing over a folder is
    /// left to the backend; check [`document_is_folder`](Self::document_is_folder)
    /// first.
    pub fn add_document(&self, path: &DocPath, data: &[u8]) -> StoreResult<()> {
        let depth = path.depth();
        if depth > self.config.max_depth as usize {
            return Err(StoreError::MaxDepthExceeded {
                depth,
                max: self.config.max_depth,
            });
        }
        if path.is_root() {
            return Err(StoreError::PathMustBeADocument { path: path.clone() });
        }
        let location = self.resolve(path);
        if let Some(parent) = location.parent() {
            self.backend.create_dir_all(parent)?;
        }
        self.backend.write(&location, data)?;
        debug!(%path, bytes = data.len(), "document written");
        Ok(())
    }

    /// Contents of the document at `path`.
    ///
    /// `None` when nothing is there, when it is a folder, or when it cannot
    /// be read.
    pub fn document(&self, path: &DocPath) -> Option<Vec<u8>> {
        let location = self.resolve(path);
        if !matches!(self.backend.kind(&location), Ok(Some(EntryKind::File))) {
            return None;
        }
        match self.backend.read(&location) {
            Ok(data) => Some(data),
            Err(err) => {
                debug!(%path, error = %err, "document unreadable");
                None
            }
        }
    }

    /// `true` if a document or folder exists at `path`.
    pub fn document_exists(&self, path: &DocPath) -> bool {
        self.backend.exists(&self.resolve(path))
    }

    /// `true` if `path` exists and is a folder.
    pub fn document_is_folder(&self, path: &DocPath) -> bool {
        self.backend.is_dir(&self.resolve(path))
    }

    // -----------------------------------------------------------------------
    // Listing
    // -----------------------------------------------------------------------

    /// Resolve a folder argument. `Ok(None)` means "missing, list nothing".
    fn folder_location(&self, folder: &DocPath) -> StoreResult<Option<PathBuf>> {
        let location = self.resolve(folder);
        match self.backend.kind(&location)? {
            Some(EntryKind::Directory) => Ok(Some(location)),
            Some(EntryKind::File) => Err(StoreError::PathMustBeADirectory {
                path: folder.clone(),
            }),
            None => match self.config.missing_folder {
                MissingFolder::Empty => Ok(None),
                MissingFolder::Error => Err(StoreError::FolderDoesNotExist {
                    path: folder.clone(),
                }),
            },
        }
    }

    /// Paths of the immediate children of `folder`, sorted.
    ///
    /// Hidden entries are never listed. Folders are included only when
    /// `include_folders` is set.
    pub fn document_paths(&self, folder: &DocPath, include_folders: bool) -> StoreResult<Vec<DocPath>> {
        let Some(location) = self.folder_location(folder)? else {
            return Ok(Vec::new());
        };
        let mut paths = Vec::new();
        for entry in self.backend.list(&location)? {
            if !include_folders && entry.kind.is_dir() {
                continue;
            }
            let Some(name) = entry.name().filter(|name| is_trimmed(name)) else {
                debug!(location = %entry.location.display(), "skipping name with no store path");
                continue;
            };
            match folder.join(name) {
                Ok(path) => paths.push(path),
                Err(err) => debug!(error = %err, "skipping entry with invalid path"),
            }
        }
        paths.sort();
        Ok(paths)
    }

    /// Contents of every document directly inside `folder`, in name order.
    ///
    /// Documents that cannot be read are skipped.
    pub fn documents(&self, folder: &DocPath) -> StoreResult<Vec<Vec<u8>>> {
        let Some(location) = self.folder_location(folder)? else {
            return Ok(Vec::new());
        };
        let mut entries = self.backend.list(&location)?;
        entries.sort_by(|a, b| a.location.cmp(&b.location));

        let mut contents = Vec::with_capacity(entries.len());
        for entry in entries.iter().filter(|e| !e.kind.is_dir()) {
            match self.backend.read(&entry.location) {
                Ok(data) => contents.push(data),
                Err(err) => {
                    debug!(location = %entry.location.display(), error = %err, "skipping unreadable document")
                }
            }
        }
        Ok(contents)
    }

    /// Lazy recursive traversal of everything below `folder`.
    ///
    /// With `include_folders` unset only documents are yielded, however
    /// deeply they are nested.
    pub fn enumerator(&self, folder: &DocPath, include_folders: bool) -> StoreResult<DocumentIter<'_>> {
        let Some(location) = self.folder_location(folder)? else {
            return Ok(DocumentIter::empty(self.root.clone(), include_folders));
        };
        let walk = self.backend.walk(&location)?;
        Ok(DocumentIter::new(self.root.clone(), walk, include_folders))
    }

    // -----------------------------------------------------------------------
    // Deletion
    // -----------------------------------------------------------------------

    /// Delete a single document. Deleting something that is not there is a
    /// no-op.
    pub fn delete_document(&self, path: &DocPath) -> StoreResult<()> {
        if path.is_root() {
            return Err(StoreError::CantDeleteRoot);
        }
        let location = self.resolve(path);
        match self.backend.kind(&location)? {
            Some(EntryKind::Directory) => Err(StoreError::PathMustBeADocument { path: path.clone() }),
            Some(EntryKind::File) => {
                self.backend.remove_file(&location)?;
                debug!(%path, "document deleted");
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Delete a document, or a folder together with everything inside it.
    pub fn delete_item(&self, path: &DocPath) -> StoreResult<()> {
        if path.is_root() {
            return Err(StoreError::CantDeleteRoot);
        }
        let location = self.resolve(path);
        match self.backend.kind(&location)? {
            Some(EntryKind::Directory) => self.backend.remove_dir_all(&location)?,
            Some(EntryKind::File) => self.backend.remove_file(&location)?,
            None => return Ok(()),
        }
        debug!(%path, "item deleted");
        Ok(())
    }
}

impl<B> std::fmt::Debug for DocumentStore<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("root", &self.root)
            .field("config", &self.config)
            .finish()
    }
}
