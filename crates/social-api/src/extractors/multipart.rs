//! Multipart form extractor
//!
//! Collects text fields and `media` file parts from a multipart body.
//! File count and per-file size are checked while streaming, so an oversized
//! part is rejected as soon as it crosses `max_file_bytes`.

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{
        multipart::{Field, MultipartError},
        FromRef, FromRequest, Multipart, Request,
    },
};
use social_core::{DomainError, MediaPolicy, Snowflake};
use social_service::UploadedFile;

use crate::response::ApiError;
use crate::state::AppState;

/// Name of the file field
pub const MEDIA_FIELD: &str = "media";

/// Parsed multipart form
#[derive(Debug, Default)]
pub struct MediaForm {
    fields: HashMap<String, String>,
    pub files: Vec<UploadedFile>,
}

impl MediaForm {
    /// Text field value, if present
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Text field value, owned
    pub fn take_text(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    /// Optional Snowflake field; blank values count as absent
    pub fn snowflake(&self, name: &str) -> Result<Option<Snowflake>, ApiError> {
        match self.text(name).map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<Snowflake>()
                .map(Some)
                .map_err(|_| ApiError::bad_request(format!("Invalid {name}"))),
        }
    }

    /// Exactly one file, for single-file endpoints
    pub fn single_file(mut self) -> Result<UploadedFile, ApiError> {
        if self.files.len() != 1 {
            return Err(ApiError::invalid_media(format!(
                "Expected exactly one '{MEDIA_FIELD}' file"
            )));
        }
        self.files
            .pop()
            .ok_or_else(|| ApiError::invalid_media("Missing file"))
    }
}

fn multipart_error(err: MultipartError) -> ApiError {
    ApiError::invalid_media(err.body_text())
}

/// Read one file part chunk by chunk, stopping at the size limit
async fn read_file(field: &mut Field<'_>, max_bytes: u64) -> Result<Vec<u8>, ApiError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if (data.len() + chunk.len()) as u64 > max_bytes {
            return Err(DomainError::MediaTooLarge { max_bytes }.into());
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

async fn read_form(mut multipart: Multipart, policy: MediaPolicy) -> Result<MediaForm, ApiError> {
    let mut form = MediaForm::default();

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == MEDIA_FIELD {
            policy.check_count(form.files.len() + 1)?;

            let file_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = read_file(&mut field, policy.max_file_bytes).await?;

            form.files
                .push(UploadedFile::new(file_name, content_type, data));
        } else if !name.is_empty() {
            let value = field.text().await.map_err(multipart_error)?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

#[async_trait]
impl<S> FromRequest<S> for MediaForm
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let policy = *AppState::from_ref(state).media_policy();
        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_media(e.body_text()))?;

        read_form(multipart, policy).await
    }
}
