//! Upload service
//!
//! Stores standalone files (not attached to a post or comment) and returns
//! their public URLs.

use tracing::{info, instrument};

use crate::dto::UploadResponse;
use crate::media::{check_batch, UploadedFile};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Upload service
pub struct UploadService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UploadService<'a> {
    /// Create a new UploadService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Validate and store a batch of files
    ///
    /// Every file is checked before any is written.
    #[instrument(skip(self, files), fields(files = files.len()))]
    pub async fn upload_files(&self, files: Vec<UploadedFile>) -> ServiceResult<Vec<UploadResponse>> {
        if files.is_empty() {
            return Err(ServiceError::validation("No files uploaded"));
        }

        let kinds = check_batch(self.ctx.media_policy(), &files)?;

        let mut uploaded = Vec::with_capacity(files.len());
        for (file, kind) in files.iter().zip(kinds) {
            let url = self.ctx.media_sink().store(file).await?;
            uploaded.push(UploadResponse {
                url,
                media_type: kind.as_str().to_string(),
            });
        }

        info!(count = uploaded.len(), "Files uploaded");

        Ok(uploaded)
    }
}
