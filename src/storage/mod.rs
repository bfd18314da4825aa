//! Directory-backed attachment storage
//!
//! Submissions may carry one uploaded file. Objects land under a root
//! directory keyed by campaign, with uuid file names so uploads never
//! collide, and callers get back a public URL (or the absolute path when
//! no base URL is configured).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use uuid::Uuid;

/// Attachment store rooted at a local directory
pub struct ObjectStore {
    root: PathBuf,
    public_base: Option<String>,
}

impl ObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base: Option<String>) -> Self {
        Self {
            root: root.into(),
            public_base,
        }
    }

    /// Store raw bytes under a relative path and return the public URL.
    pub fn upload(&self, rel_path: &str, bytes: &[u8]) -> Result<String> {
        let target = self.root.join(rel_path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create object dir: {}", parent.display()))?;
        }
        std::fs::write(&target, bytes)
            .with_context(|| format!("Failed to write object: {}", target.display()))?;

        Ok(self.public_url(rel_path, &target))
    }

    /// Store a submission attachment, keeping the original extension.
    pub fn store_attachment(
        &self,
        campaign_id: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<String> {
        let name = match Path::new(file_name).extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
            None => Uuid::new_v4().to_string(),
        };
        self.upload(&format!("{campaign_id}/{name}"), bytes)
    }

    fn public_url(&self, rel_path: &str, target: &Path) -> String {
        match &self.public_base {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), rel_path),
            None => target.display().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_upload_and_url() {
        let dir = tempdir().unwrap();
        let store = ObjectStore::new(dir.path(), Some("https://cdn.example.com/".to_string()));

        let url = store.upload("c1/photo.png", b"bytes").unwrap();
        assert_eq!(url, "https://cdn.example.com/c1/photo.png");
        assert_eq!(std::fs::read(dir.path().join("c1/photo.png")).unwrap(), b"bytes");
    }

    #[test]
    fn test_attachment_keeps_extension() {
        let dir = tempdir().unwrap();
        let store = ObjectStore::new(dir.path(), None);

        let url = store.store_attachment("c1", "entry.mp4", b"video").unwrap();
        assert!(url.ends_with(".mp4"));
        assert!(Path::new(&url).exists());
    }
}
