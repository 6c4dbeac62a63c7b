use crate::ports::outbound::AttachmentContentStore;
use crate::shared::security::{
    validate_file_size, validate_path_segment, validate_regular_file, MAX_FILE_SIZE,
};
use crate::shared::{LicenseInfoError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// FileSystemContentStore adapter serving attachment content from a directory
///
/// Each attachment is stored as `<root>/<attachmentContentId>`. Content ids
/// are validated before use so a request can never leave the root directory.
pub struct FileSystemContentStore {
    root: PathBuf,
}

impl FileSystemContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AttachmentContentStore for FileSystemContentStore {
    fn get_content(&self, attachment_content_id: &str) -> Result<Vec<u8>> {
        validate_path_segment(attachment_content_id, "Attachment content id")?;

        let path = self.root.join(attachment_content_id);
        if fs::symlink_metadata(&path).is_err() {
            return Err(LicenseInfoError::not_found("Attachment content", attachment_content_id).into());
        }

        let file_size = validate_regular_file(&path, "attachment content")?;
        validate_file_size(file_size, &path, MAX_FILE_SIZE)?;

        debug!(attachment = attachment_content_id, bytes = file_size, "Reading attachment content");
        fs::read(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read attachment content {}: {}", path.display(), e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reads_existing_content() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("att-1"), b"SPDXVersion: SPDX-2.2").unwrap();

        let store = FileSystemContentStore::new(dir.path());
        assert_eq!(store.get_content("att-1").unwrap(), b"SPDXVersion: SPDX-2.2");
    }

    #[test]
    fn test_missing_content_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = FileSystemContentStore::new(dir.path());

        let error = store.get_content("absent").unwrap_err();
        assert!(matches!(
            error.downcast_ref::<LicenseInfoError>(),
            Some(LicenseInfoError::NotFound { .. })
        ));
    }

    #[test]
    fn test_rejects_path_traversal() {
        let dir = TempDir::new().unwrap();
        let store = FileSystemContentStore::new(dir.path().join("store"));

        assert!(store.get_content("../secret").is_err());
        assert!(store.get_content("nested/att").is_err());
        assert!(store.get_content("").is_err());
    }

    #[test]
    fn test_rejects_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("att-dir")).unwrap();

        let store = FileSystemContentStore::new(dir.path());
        let error = store.get_content("att-dir").unwrap_err();
        assert!(error.to_string().contains("not a regular file"));
    }

    #[cfg(unix)]
    #[test]
    fn test_rejects_symlinks() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("real"), b"content").unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link")).unwrap();

        let store = FileSystemContentStore::new(dir.path());
        let error = store.get_content("link").unwrap_err();
        assert!(error.to_string().contains("symbolic link"));
    }
}
