use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::traits::{is_hidden, Backend, BackendEntry, EntryKind, Walk};

#[derive(Clone, Debug)]
enum Node {
    Directory,
    File(Vec<u8>),
}

impl Node {
    fn kind(&self) -> EntryKind {
        match self {
            Self::Directory => EntryKind::Directory,
            Self::File(_) => EntryKind::File,
        }
    }
}

/// In-memory, BTreeMap-based hierarchical backend.
///
/// Intended for tests and embedding. Every folder and document is a key in a
/// map ordered by path components, which makes a range scan a pre-order walk.
pub struct InMemoryBackend {
    nodes: RwLock<BTreeMap<PathBuf, Node>>,
}

impl InMemoryBackend {
    /// Create a new empty backend.
    pub fn new() -> Self {
        Self {
            nodes: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of folders and documents held.
    pub fn len(&self) -> usize {
        self.nodes.read().expect("lock poisoned").len()
    }

    /// Returns `true` if nothing has been created yet.
    pub fn is_empty(&self) -> bool {
        self.nodes.read().expect("lock poisoned").is_empty()
    }

    /// Total bytes across all stored documents.
    pub fn total_bytes(&self) -> u64 {
        self.nodes
            .read()
            .expect("lock poisoned")
            .values()
            .map(|node| match node {
                Node::File(data) => data.len() as u64,
                Node::Directory => 0,
            })
            .sum()
    }

    /// Remove everything.
    pub fn clear(&self) {
        self.nodes.write().expect("lock poisoned").clear();
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(location: &Path) -> StoreError {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such entry: {}", location.display()),
    )
    .into()
}

fn wrong_kind(location: &Path, expected: &str) -> StoreError {
    io::Error::other(format!("{} is not a {expected}", location.display())).into()
}

fn visible_below(location: &Path, base: &Path) -> bool {
    match location.strip_prefix(base) {
        Ok(rel) => !rel
            .components()
            .any(|c| c.as_os_str().to_str().is_some_and(is_hidden)),
        Err(_) => false,
    }
}

impl Backend for InMemoryBackend {
    fn kind(&self, location: &Path) -> StoreResult<Option<EntryKind>> {
        let map = self.nodes.read().expect("lock poisoned");
        Ok(map.get(location).map(Node::kind))
    }

    fn create_dir_all(&self, location: &Path) -> StoreResult<()> {
        let mut map = self.nodes.write().expect("lock poisoned");
        for ancestor in location.ancestors() {
            if let Some(Node::File(_)) = map.get(ancestor) {
                return Err(wrong_kind(ancestor, "directory"));
            }
        }
        for ancestor in location.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            map.entry(ancestor.to_path_buf()).or_insert(Node::Directory);
        }
        Ok(())
    }

    fn write(&self, location: &Path, data: &[u8]) -> StoreResult<()> {
        let mut map = self.nodes.write().expect("lock poisoned");
        let parent = location.parent().ok_or_else(|| not_found(location))?;
        match map.get(parent) {
            Some(Node::Directory) => {}
            Some(Node::File(_)) => return Err(wrong_kind(parent, "directory")),
            None => return Err(not_found(parent)),
        }
        if let Some(Node::Directory) = map.get(location) {
            return Err(wrong_kind(location, "file"));
        }
        map.insert(location.to_path_buf(), Node::File(data.to_vec()));
        Ok(())
    }

    fn read(&self, location: &Path) -> StoreResult<Vec<u8>> {
        let map = self.nodes.read().expect("lock poisoned");
        match map.get(location) {
            Some(Node::File(data)) => Ok(data.clone()),
            Some(Node::Directory) => Err(wrong_kind(location, "file")),
            None => Err(not_found(location)),
        }
    }

    fn list(&self, location: &Path) -> StoreResult<Vec<BackendEntry>> {
        let map = self.nodes.read().expect("lock poisoned");
        match map.get(location) {
            Some(Node::Directory) => {}
            Some(Node::File(_)) => return Err(wrong_kind(location, "directory")),
            None => return Err(not_found(location)),
        }
        Ok(map
            .iter()
            .filter(|(path, _)| path.parent() == Some(location))
            .filter(|(path, _)| visible_below(path, location))
            .map(|(path, node)| BackendEntry::new(path.clone(), node.kind()))
            .collect())
    }

    fn walk<'a>(&'a self, location: &Path) -> StoreResult<Walk<'a>> {
        let map = self.nodes.read().expect("lock poisoned");
        match map.get(location) {
            Some(Node::Directory) => {}
            Some(Node::File(_)) => return Err(wrong_kind(location, "directory")),
            None => return Err(not_found(location)),
        }
        // Snapshot so the walk does not hold the lock between pulls.
        let entries: Vec<BackendEntry> = map
            .iter()
            .filter(|(path, _)| path.as_path() != location && path.starts_with(location))
            .filter(|(path, _)| visible_below(path, location))
            .map(|(path, node)| BackendEntry::new(path.clone(), node.kind()))
            .collect();
        Ok(Box::new(entries.into_iter().map(Ok)))
    }

    fn remove_file(&self, location: &Path) -> StoreResult<()> {
        let mut map = self.nodes.write().expect("lock poisoned");
        match map.get(location) {
            Some(Node::File(_)) => {
                map.remove(location);
                Ok(())
            }
            Some(Node::Directory) => Err(wrong_kind(location, "file")),
            None => Err(not_found(location)),
        }
    }

    fn remove_dir_all(&self, location: &Path) -> StoreResult<()> {
        let mut map = self.nodes.write().expect("lock poisoned");
        match map.get(location) {
            Some(Node::Directory) => {
                map.retain(|path, _| !path.starts_with(location));
                Ok(())
            }
            Some(Node::File(_)) => Err(wrong_kind(location, "directory")),
            None => Err(not_found(location)),
        }
    }
}

impl std::fmt::Debug for InMemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("InMemoryBackend")
            .field("entry_count", &count)
            .finish()
    }
}
