//! On-disk staging of uploaded documents.
//!
//! Files live under `<web root>/uploads`. The file name is the only identity:
//! uploading the same name again overwrites the earlier file, and nothing
//! is ever deleted here.

use crate::error::{Error, Result};
use crate::options::StagingLayout;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Name of the staging directory below the web root.
pub const UPLOADS_DIR: &str = "uploads";

/// Final component of a client-supplied file name.
///
/// Browsers may send a full client path; only the last segment is kept.
/// Returns `None` for empty names and for `.`/`..`.
pub fn file_name_of(name: &str) -> Option<&str> {
    let last = name.rsplit(['/', '\\']).next()?.trim();
    match last {
        "" | "." | ".." => None,
        other => Some(other),
    }
}

/// Parse a client-supplied relative path, refusing anything that could leave
/// the directory it is joined to.
fn sanitize_relative(path: &str) -> Result<PathBuf> {
    let normalized = path.trim().replace('\\', "/");
    let mut clean = PathBuf::new();

    for component in Path::new(&normalized).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(Error::InvalidPath(path.to_string()));
            }
        }
    }

    if clean.as_os_str().is_empty() {
        return Err(Error::InvalidPath(path.to_string()));
    }
    Ok(clean)
}

/// The staging area under a web root.
#[derive(Debug, Clone)]
pub struct UploadStore {
    web_root: PathBuf,
    layout: StagingLayout,
}

impl UploadStore {
    /// Create a store rooted at `web_root`.
    pub fn new(web_root: impl Into<PathBuf>, layout: StagingLayout) -> Self {
        Self {
            web_root: web_root.into(),
            layout,
        }
    }

    pub fn web_root(&self) -> &Path {
        &self.web_root
    }

    pub fn layout(&self) -> StagingLayout {
        self.layout
    }

    /// `<web root>/uploads`
    pub fn uploads_root(&self) -> PathBuf {
        self.web_root.join(UPLOADS_DIR)
    }

    /// Where a file with this name is staged under the configured layout.
    pub fn staged_path(&self, file_name: &str) -> Result<PathBuf> {
        let name = file_name_of(file_name)
            .ok_or_else(|| Error::InvalidPath(file_name.to_string()))?;
        let root = self.uploads_root();
        Ok(match self.layout {
            StagingLayout::Flat => root.join(name),
            StagingLayout::Nested => root.join(name).join(name),
        })
    }

    /// Copy `bytes` to the staged location, creating directories as needed.
    ///
    /// An existing file is overwritten. Under the nested layout the
    /// intermediate directory is named after the file, so staging fails if a
    /// flat-staged file of the same name is already present (and vice versa).
    pub fn stage(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.staged_path(file_name)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, bytes)?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "staged upload");
        Ok(path)
    }

    /// Resolve a path relative to the web root, as sent by the editor.
    pub fn resolve_relative(&self, relative: &str) -> Result<PathBuf> {
        Ok(self.web_root.join(sanitize_relative(relative)?))
    }

    /// Resolve a stored file name relative to the uploads root.
    pub fn resolve_download(&self, file_name: &str) -> Result<PathBuf> {
        Ok(self.uploads_root().join(sanitize_relative(file_name)?))
    }

    /// Path of a staged file relative to the web root, with `/` separators.
    pub fn relative_to_web_root(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.web_root).unwrap_or(path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_of() {
        assert_eq!(file_name_of("report.docx"), Some("report.docx"));
        assert_eq!(file_name_of(r"C:\Users\me\report.docx"), Some("report.docx"));
        assert_eq!(file_name_of("a/b/deck.pptx"), Some("deck.pptx"));
        assert_eq!(file_name_of(""), None);
        assert_eq!(file_name_of("dir/"), None);
        assert_eq!(file_name_of(".."), None);
    }

    #[test]
    fn test_staged_path_layouts() {
        let flat = UploadStore::new("/srv/www", StagingLayout::Flat);
        assert_eq!(
            flat.staged_path("a.docx").unwrap(),
            PathBuf::from("/srv/www/uploads/a.docx")
        );

        let nested = UploadStore::new("/srv/www", StagingLayout::Nested);
        assert_eq!(
            nested.staged_path("a.docx").unwrap(),
            PathBuf::from("/srv/www/uploads/a.docx/a.docx")
        );
    }

    #[test]
    fn test_resolve_rejects_escapes() {
        let store = UploadStore::new("/srv/www", StagingLayout::Flat);
        assert!(matches!(
            store.resolve_relative("../etc/passwd"),
            Err(Error::InvalidPath(_))
        ));
        assert!(matches!(
            store.resolve_relative("/etc/passwd"),
            Err(Error::InvalidPath(_))
        ));
        assert!(matches!(
            store.resolve_download(r"..\secret.docx"),
            Err(Error::InvalidPath(_))
        ));
        assert!(matches!(store.resolve_download(""), Err(Error::InvalidPath(_))));
    }

    #[test]
    fn test_resolve_accepts_nested_names() {
        let store = UploadStore::new("/srv/www", StagingLayout::Nested);
        assert_eq!(
            store.resolve_relative("uploads/a.docx/a.docx").unwrap(),
            PathBuf::from("/srv/www/uploads/a.docx/a.docx")
        );
        assert_eq!(
            store.resolve_download("./a.docx/a.docx").unwrap(),
            PathBuf::from("/srv/www/uploads/a.docx/a.docx")
        );
    }

    #[test]
    fn test_relative_to_web_root() {
        let store = UploadStore::new("/srv/www", StagingLayout::Nested);
        let path = store.staged_path("a.docx").unwrap();
        assert_eq!(store.relative_to_web_root(&path), "uploads/a.docx/a.docx");
    }
}
