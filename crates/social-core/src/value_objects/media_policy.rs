//! Media upload policy
//!
//! One policy applies to every upload endpoint: a fixed MIME allow-list, a
//! per-file size limit and a per-request file count.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Accepted MIME types for uploaded media
pub const ALLOWED_MEDIA_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "video/mp4"];

/// Stored media type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify an allow-listed MIME type
    pub fn from_mime(content_type: &str) -> Option<Self> {
        match mime_essence(content_type).as_str() {
            "image/jpeg" | "image/png" | "image/gif" => Some(Self::Image),
            "video/mp4" => Some(Self::Video),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    /// Parse the stored column value
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "image" => Some(Self::Image),
            "video" => Some(Self::Video),
            _ => None,
        }
    }

    /// File extension used when writing to disk
    pub fn extension_for(content_type: &str) -> &'static str {
        match mime_essence(content_type).as_str() {
            "image/png" => "png",
            "image/gif" => "gif",
            "video/mp4" => "mp4",
            _ => "jpg",
        }
    }
}

/// `type/subtype` lowercased, without parameters such as `charset`
fn mime_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Entity that owns a media row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaOwner {
    Post,
    Comment,
}

/// Limits applied to uploaded files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaPolicy {
    pub max_file_bytes: u64,
    pub max_files: usize,
}

impl MediaPolicy {
    /// 200 MiB per file
    pub const DEFAULT_MAX_FILE_BYTES: u64 = 200 * 1024 * 1024;
    pub const DEFAULT_MAX_FILES: usize = 10;

    pub const fn new(max_file_bytes: u64, max_files: usize) -> Self {
        Self {
            max_file_bytes,
            max_files,
        }
    }

    /// Upper bound for a whole multipart request body
    pub fn max_request_bytes(&self) -> u64 {
        self.max_file_bytes
            .saturating_mul(self.max_files as u64)
            .saturating_add(1024 * 1024)
    }

    /// Check the number of files in one request
    pub fn check_count(&self, count: usize) -> Result<(), DomainError> {
        if count > self.max_files {
            return Err(DomainError::TooManyFiles {
                max: self.max_files,
            });
        }
        Ok(())
    }

    /// Validate a single file and classify it
    pub fn check_file(&self, content_type: &str, size: u64) -> Result<MediaKind, DomainError> {
        let kind = MediaKind::from_mime(content_type)
            .ok_or_else(|| DomainError::UnsupportedMediaType(content_type.to_string()))?;

        if size > self.max_file_bytes {
            return Err(DomainError::MediaTooLarge {
                max_bytes: self.max_file_bytes,
            });
        }

        Ok(kind)
    }
}

impl Default for MediaPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_FILE_BYTES, Self::DEFAULT_MAX_FILES)
    }
}
