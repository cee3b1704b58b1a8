//! Uploaded file storage on the local filesystem.

use crate::error::AppError;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Largest accepted file (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5_242_880;

/// URL prefix under which stored files are served.
pub const UPLOADS_PREFIX: &str = "/uploads";

/// Longest file extension carried over from the client's file name.
const MAX_EXTENSION_LEN: usize = 16;

pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        UploadStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Random file name keeping the original extension when it is plain alphanumeric.
    pub fn stored_file_name(original: Option<&str>) -> String {
        let ext = original
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty() && ext.len() <= MAX_EXTENSION_LEN && ext.chars().all(|c| c.is_ascii_alphanumeric()));
        match ext {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        }
    }

    /// Write `bytes` under the uploads directory, creating it when missing.
    pub async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, AppError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(file_name);
        tokio::fs::write(&path, bytes).await?;
        tracing::info!(path = %path.display(), size = bytes.len(), "stored upload");
        Ok(path)
    }

    /// Public URL of a stored file under `base` (scheme and authority, no trailing slash).
    pub fn file_url(base: &str, file_name: &str) -> String {
        format!("{}{}/{}", base, UPLOADS_PREFIX, file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_simple_extension() {
        let name = UploadStore::stored_file_name(Some("holiday photo.JPG"));
        assert!(name.ends_with(".JPG"), "{name}");
        let stem = name.trim_end_matches(".JPG");
        assert!(Uuid::parse_str(stem).is_ok());
    }

    #[test]
    fn drops_missing_or_odd_extensions() {
        for original in [None, Some("README"), Some("evil.p/h"), Some("x.tar gz")] {
            let name = UploadStore::stored_file_name(original);
            assert!(Uuid::parse_str(&name).is_ok(), "{original:?} -> {name}");
        }
    }

    #[test]
    fn builds_public_url() {
        assert_eq!(
            UploadStore::file_url("http://localhost:3333", "a.png"),
            "http://localhost:3333/uploads/a.png"
        );
    }

    #[tokio::test]
    async fn save_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path().join("nested"));
        let path = store.save("f.txt", b"hello").await.unwrap();
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"hello");
    }
}
