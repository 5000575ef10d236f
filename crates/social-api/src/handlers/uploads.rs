//! Upload handlers

use axum::{extract::State, Json};
use social_service::{UploadResponse, UploadService};

use crate::extractors::{AuthUser, MediaForm};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Store standalone media files and return their URLs
///
/// POST /uploads
pub async fn upload_media(
    State(state): State<AppState>,
    _auth: AuthUser,
    form: MediaForm,
) -> ApiResult<Created<Json<Vec<UploadResponse>>>> {
    let service = UploadService::new(state.service_context());
    let uploaded = service.upload_files(form.files).await?;
    Ok(Created(Json(uploaded)))
}
