//! Filesystem store for uploaded logo and signature images.
//!
//! Each saved file gets a distinct millisecond-timestamped key, so concurrent
//! generation calls never collide. Files are kept after the request completes
//! and the directory is served statically.

use crate::error::AppError;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;

pub struct UploadStore {
    base_path: PathBuf,
}

impl UploadStore {
    pub async fn new(base_path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let base_path = base_path.into();
        if !base_path.exists() {
            fs::create_dir_all(&base_path).await?;
        }
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Write `data` under a timestamped key derived from the original file
    /// name and return the key.
    pub async fn save(&self, original_name: &str, data: &[u8]) -> Result<String, AppError> {
        let key = format!(
            "{}-{}",
            Utc::now().timestamp_millis(),
            sanitize_file_name(original_name)
        );
        fs::write(self.base_path.join(&key), data).await?;
        Ok(key)
    }
}

fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect();

    if cleaned.trim_matches('-').is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saves_under_timestamped_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path()).await.unwrap();

        let key = store.save("logo.png", b"png-bytes").await.unwrap();

        assert!(key.ends_with("-logo.png"));
        let stored = tokio::fs::read(dir.path().join(&key)).await.unwrap();
        assert_eq!(stored, b"png-bytes");
    }

    #[tokio::test]
    async fn strips_path_separators_from_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path()).await.unwrap();

        let key = store.save("../../etc/passwd", b"x").await.unwrap();

        assert!(!key.contains('/'));
        assert!(dir.path().join(&key).exists());
    }

    #[tokio::test]
    async fn creates_missing_base_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("uploads");

        let store = UploadStore::new(&nested).await.unwrap();

        assert!(nested.exists());
        assert_eq!(store.base_path(), nested);
    }
}
