//! Media upload sink
//!
//! Uploaded files are validated against the [`MediaPolicy`] by the services,
//! then handed to a [`MediaSink`] which persists the bytes and returns the
//! public URL the file is served under.

use std::path::PathBuf;

use async_trait::async_trait;
use social_common::MediaConfig;
use social_core::{DomainError, MediaKind, MediaPolicy};
use tracing::{debug, instrument};
use uuid::Uuid;

/// A file received in a multipart request
#[derive(Clone)]
pub struct UploadedFile {
    /// Client-side file name, used only in error reports
    pub file_name: String,
    /// Declared MIME type
    pub content_type: String,
    pub data: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Validate against the policy and classify
    pub fn check(&self, policy: &MediaPolicy) -> Result<MediaKind, DomainError> {
        policy.check_file(&self.content_type, self.size())
    }
}

impl std::fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.data.len())
            .finish()
    }
}

/// Validate a whole batch before anything is written
pub fn check_batch(
    policy: &MediaPolicy,
    files: &[UploadedFile],
) -> Result<Vec<MediaKind>, DomainError> {
    policy.check_count(files.len())?;
    files.iter().map(|file| file.check(policy)).collect()
}

/// Destination for uploaded bytes
#[async_trait]
pub trait MediaSink: Send + Sync {
    /// Persist a file and return its public URL
    async fn store(&self, file: &UploadedFile) -> Result<String, DomainError>;
}

/// Writes files into a local directory served as static files
#[derive(Debug, Clone)]
pub struct LocalMediaSink {
    upload_dir: PathBuf,
    public_path: String,
}

impl LocalMediaSink {
    pub fn new(upload_dir: impl Into<PathBuf>, public_path: impl Into<String>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            public_path: public_path.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &MediaConfig) -> Self {
        Self::new(&config.upload_dir, &config.public_path)
    }

    fn stored_name(file: &UploadedFile) -> String {
        format!(
            "{}.{}",
            Uuid::new_v4().simple(),
            MediaKind::extension_for(&file.content_type)
        )
    }
}

#[async_trait]
impl MediaSink for LocalMediaSink {
    #[instrument(skip(self, file), fields(file = %file.file_name, size = file.size()))]
    async fn store(&self, file: &UploadedFile) -> Result<String, DomainError> {
        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| DomainError::StorageError(e.to_string()))?;

        let name = Self::stored_name(file);
        tokio::fs::write(self.upload_dir.join(&name), &file.data)
            .await
            .map_err(|e| DomainError::StorageError(e.to_string()))?;

        debug!(name = %name, "Stored upload");

        Ok(format!("{}/{}", self.public_path, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(size: usize) -> UploadedFile {
        UploadedFile::new("a.png", "image/png", vec![0u8; size])
    }

    #[test]
    fn test_check_batch() {
        let policy = MediaPolicy::new(16, 2);
        let kinds = check_batch(&policy, &[png(4), UploadedFile::new("v.mp4", "video/mp4", vec![1])]).unwrap();
        assert_eq!(kinds, vec![MediaKind::Image, MediaKind::Video]);

        let err = check_batch(&policy, &[png(1), png(1), png(1)]).unwrap_err();
        assert!(matches!(err, DomainError::TooManyFiles { max: 2 }));

        let err = check_batch(&policy, &[png(17)]).unwrap_err();
        assert!(matches!(err, DomainError::MediaTooLarge { .. }));

        let err = check_batch(&policy, &[UploadedFile::new("x.html", "text/html", vec![])]).unwrap_err();
        assert!(matches!(err, DomainError::UnsupportedMediaType(_)));
    }

    #[test]
    fn test_debug_hides_bytes() {
        let debug = format!("{:?}", png(3));
        assert!(debug.contains("size: 3"));
        assert!(!debug.contains("data"));
    }

    #[tokio::test]
    async fn test_local_sink_writes_file() {
        let dir = std::env::temp_dir().join(format!("social-media-{}", Uuid::new_v4().simple()));
        let sink = LocalMediaSink::new(&dir, "/uploads/");

        let url = sink.store(&png(8)).await.unwrap();
        assert!(url.starts_with("/uploads/"));
        assert!(url.ends_with(".png"));

        let name = url.trim_start_matches("/uploads/");
        let written = tokio::fs::read(dir.join(name)).await.unwrap();
        assert_eq!(written.len(), 8);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
