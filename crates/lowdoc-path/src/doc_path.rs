//! Relative document paths.
//!
//! A [`DocPath`] is the only way to address something inside a LowDoc store.
//! Validation rules:
//! - Surrounding whitespace and newlines are trimmed
//! - Must not start or end with `..`
//! - No component may start with `.` (hidden entries, `.` and `..`)
//!
//! The empty string is the store root. Paths keep the caller's spelling
//! after trimming; only [`DocPath::join`] rewrites separators.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PathError, Result};

/// Component separator used in every document path.
pub const SEPARATOR: char = '/';

/// A validated path to a document or folder, relative to the store root.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocPath {
    path: String,
}

impl DocPath {
    /// Validate `raw` and wrap it.
    ///
    /// # Examples
    ///
    /// ```
    /// use lowdoc_path::DocPath;
    ///
    /// assert!(DocPath::new("notes/today.txt").is_ok());
    /// assert!(DocPath::new("  notes/today.txt\n").is_ok());
    /// assert!(DocPath::new("../etc/passwd").is_err());
    /// assert!(DocPath::new("notes/.secret").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self> {
        let trimmed = raw.as_ref().trim();
        validate(trimmed)?;
        Ok(Self {
            path: trimmed.to_string(),
        })
    }

    /// The store root. Joining onto it is the same as validating the suffix.
    pub const fn root() -> Self {
        Self {
            path: String::new(),
        }
    }

    /// The path as given (after trimming or joining).
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// `true` if the path has no components, i.e. it names the store root.
    pub fn is_root(&self) -> bool {
        self.components().next().is_none()
    }

    /// Non-empty components between separators.
    pub fn components(&self) -> impl Iterator<Item = &str> + '_ {
        self.path.split(SEPARATOR).filter(|c| !c.is_empty())
    }

    /// The last component, or `None` for the root.
    pub fn file_name(&self) -> Option<&str> {
        self.components().last()
    }

    /// Number of intermediate folders between the root and the leaf.
    pub fn depth(&self) -> usize {
        self.components().count().saturating_sub(1)
    }

    /// The containing folder, or `None` for the root.
    pub fn parent(&self) -> Option<DocPath> {
        let count = self.components().count();
        if count == 0 {
            return None;
        }
        if count == 1 {
            return Some(Self::root());
        }
        // Every component already passed validation, so any prefix does too.
        let path = self.collect_components(self.components().take(count - 1));
        Some(Self { path })
    }

    /// Append a raw path and re-validate the result.
    ///
    /// The suffix is validated on its own first, so a hidden name is rejected
    /// even when it would land in the middle of the joined path.
    pub fn join(&self, suffix: impl AsRef<str>) -> Result<DocPath> {
        let suffix = DocPath::new(suffix)?;
        self.join_path(&suffix)
    }

    /// Append another document path and re-validate the result.
    ///
    /// Redundant and trailing separators are collapsed; a leading separator on
    /// `self` is kept.
    pub fn join_path(&self, suffix: &DocPath) -> Result<DocPath> {
        if self.path.is_empty() {
            return DocPath::new(&suffix.path);
        }
        let joined = self.collect_components(self.components().chain(suffix.components()));
        DocPath::new(joined)
    }

    fn collect_components<'a>(&self, components: impl Iterator<Item = &'a str>) -> String {
        let mut out = String::with_capacity(self.path.len());
        if self.path.starts_with(SEPARATOR) {
            out.push(SEPARATOR);
        }
        for (i, component) in components.enumerate() {
            if i > 0 {
                out.push(SEPARATOR);
            }
            out.push_str(component);
        }
        out
    }
}

fn validate(path: &str) -> Result<()> {
    if path.starts_with("..") {
        return Err(PathError::invalid(path, "must not start with '..'"));
    }
    if path.ends_with("..") {
        return Err(PathError::invalid(path, "must not end with '..'"));
    }
    for component in path.split(SEPARATOR) {
        if component.starts_with('.') {
            return Err(PathError::invalid(
                path,
                format!("component must not start with '.': {component:?}"),
            ));
        }
    }
    Ok(())
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl AsRef<str> for DocPath {
    fn as_ref(&self) -> &str {
        &self.path
    }
}

impl FromStr for DocPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self> {
        DocPath::new(s)
    }
}

impl TryFrom<String> for DocPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self> {
        DocPath::new(value)
    }
}

impl TryFrom<&str> for DocPath {
    type Error = PathError;

    fn try_from(value: &str) -> Result<Self> {
        DocPath::new(value)
    }
}

impl From<DocPath> for String {
    fn from(value: DocPath) -> Self {
        value.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    #[test]
    fn valid_simple_paths() {
        assert!(DocPath::new("doc.txt").is_ok());
        assert!(DocPath::new("folder/doc.txt").is_ok());
        assert!(DocPath::new("/myFolder1/other0").is_ok());
        assert!(DocPath::new("a/b/c/file.txt").is_ok());
        assert!(DocPath::new("v1.0/notes").is_ok());
    }

    #[test]
    fn trims_whitespace_and_newlines() {
        let path = DocPath::new("  folder/doc.txt \n\t").unwrap();
        assert_eq!(path.as_str(), "folder/doc.txt");
    }

    #[test]
    fn keeps_spelling_otherwise() {
        let path = DocPath::new("/Folder//Doc.TXT").unwrap();
        assert_eq!(path.as_str(), "/Folder//Doc.TXT");
    }

    #[test]
    fn reject_leading_double_dot() {
        assert!(DocPath::new("..").is_err());
        assert!(DocPath::new("../etc").is_err());
        assert!(DocPath::new("  ../etc").is_err());
        assert!(DocPath::new("..hidden").is_err());
    }

    #[test]
    fn reject_trailing_double_dot() {
        assert!(DocPath::new("a/..").is_err());
        assert!(DocPath::new("name..").is_err());
    }

    #[test]
    fn reject_hidden_last_component() {
        assert!(DocPath::new(".hidden").is_err());
        assert!(DocPath::new("folder/.hidden").is_err());
        assert!(DocPath::new(".").is_err());
        assert!(DocPath::new("folder/.").is_err());
    }

    #[test]
    fn reject_hidden_interior_component() {
        assert!(DocPath::new("a/../../etc/passwd").is_err());
        assert!(DocPath::new("a/.git/config").is_err());
        assert!(DocPath::new("./a").is_err());
    }

    #[test]
    fn error_carries_trimmed_path() {
        let err = DocPath::new("  ../x ").unwrap_err();
        assert_eq!(err.path(), "../x");
        assert!(err.to_string().contains("../x"));
    }

    // -----------------------------------------------------------------------
    // Root
    // -----------------------------------------------------------------------

    #[test]
    fn root_is_empty_string() {
        assert_eq!(DocPath::root().as_str(), "");
        assert!(DocPath::root().is_root());
        assert_eq!(DocPath::root(), DocPath::default());
    }

    #[test]
    fn empty_and_separator_denote_root() {
        assert_eq!(DocPath::new("").unwrap(), DocPath::root());
        assert!(DocPath::new("   ").unwrap().is_root());
        assert!(DocPath::new("/").unwrap().is_root());
        assert!(!DocPath::new("a").unwrap().is_root());
    }

    #[test]
    fn root_is_identity_for_join() {
        for raw in ["a", "a/b.txt", "/lead/x", "  spaced/y "] {
            assert_eq!(DocPath::root().join(raw), DocPath::new(raw));
        }
        assert!(DocPath::root().join(".hidden").is_err());
    }

    // -----------------------------------------------------------------------
    // Composition
    // -----------------------------------------------------------------------

    #[test]
    fn join_appends_component() {
        let base = DocPath::new("folder").unwrap();
        assert_eq!(base.join("doc.txt").unwrap().as_str(), "folder/doc.txt");
    }

    #[test]
    fn join_collapses_separators() {
        let base = DocPath::new("folder/").unwrap();
        assert_eq!(base.join("/sub//doc.txt/").unwrap().as_str(), "folder/sub/doc.txt");
    }

    #[test]
    fn join_keeps_leading_separator() {
        let base = DocPath::new("/someNewFolder").unwrap();
        assert_eq!(base.join("otherFile").unwrap().as_str(), "/someNewFolder/otherFile");
    }

    #[test]
    fn join_rejects_hidden_suffix() {
        let base = DocPath::new("folder").unwrap();
        assert!(base.join(".DS_Store").is_err());
        assert!(base.join("..").is_err());
        assert!(base.join("x/.y/z").is_err());
    }

    #[test]
    fn join_path_with_doc_path() {
        let base = DocPath::new("a").unwrap();
        let rest = DocPath::new("b/c").unwrap();
        assert_eq!(base.join_path(&rest).unwrap().as_str(), "a/b/c");
        assert_eq!(base.join_path(&DocPath::root()).unwrap(), base);
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[test]
    fn depth_counts_intermediate_folders() {
        assert_eq!(DocPath::root().depth(), 0);
        assert_eq!(DocPath::new("file.txt").unwrap().depth(), 0);
        assert_eq!(DocPath::new("a/file.txt").unwrap().depth(), 1);
        assert_eq!(DocPath::new("/a/b/c/file.txt").unwrap().depth(), 3);
    }

    #[test]
    fn file_name_and_parent() {
        let path = DocPath::new("/a/b/file.txt").unwrap();
        assert_eq!(path.file_name(), Some("file.txt"));
        assert_eq!(path.parent().unwrap().as_str(), "/a/b");
        assert_eq!(DocPath::new("file.txt").unwrap().parent(), Some(DocPath::root()));
        assert_eq!(DocPath::root().parent(), None);
        assert_eq!(DocPath::root().file_name(), None);
    }

    #[test]
    fn conversions() {
        let parsed: DocPath = "a/b".parse().unwrap();
        assert_eq!(parsed.to_string(), "a/b");
        assert!(DocPath::try_from("..").is_err());
        assert_eq!(String::from(parsed.clone()), "a/b");
        assert_eq!(DocPath::try_from(String::from("a/b")).unwrap(), parsed);
    }

    #[test]
    fn serde_revalidates() {
        let path = DocPath::new("a/b.txt").unwrap();
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"a/b.txt\"");
        let back: DocPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
        assert!(serde_json::from_str::<DocPath>("\"../escape\"").is_err());
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    proptest! {
        #[test]
        fn leading_double_dot_is_rejected(s in "\\PC*") {
            let p = format!("..{s}");
            prop_assert!(DocPath::new(p).is_err());
        }

        #[test]
        fn trailing_double_dot_is_rejected(s in "\\PC*") {
            let p = format!("{s}..");
            prop_assert!(DocPath::new(p).is_err());
        }

        #[test]
        fn hidden_last_component_is_rejected(base in "[a-z]{0,8}(/[a-z]{1,8}){0,3}", name in "[a-zA-Z0-9_-]{0,8}") {
            let p = format!("{base}/.{name}");
            prop_assert!(DocPath::new(p).is_err());
        }

        #[test]
        fn join_valid_component_succeeds(base in "/?[a-z]{1,8}(/[a-z0-9]{1,8}){0,4}", name in "[a-zA-Z0-9_-][a-zA-Z0-9_.-]{0,11}[a-zA-Z0-9_-]") {
            let base = DocPath::new(&base).unwrap();
            let joined = base.join(&name).unwrap();
            prop_assert!(joined.as_str().ends_with(name.as_str()));
            prop_assert_eq!(joined.depth(), base.components().count());
        }
    }
}
