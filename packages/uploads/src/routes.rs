use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::UploadError;
use crate::spaces::UploadTarget;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct GenerateUrlQuery {
    filename: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrls {
    success: bool,
    upload_url: String,
    file_url: String,
}

pub async fn health_handler() -> &'static str {
    "Server is running"
}

pub async fn generate_url_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GenerateUrlQuery>,
) -> Result<Json<UploadUrls>, UploadError> {
    let filename = query
        .filename
        .filter(|name| !name.is_empty())
        .ok_or(UploadError::MissingFilename)?;

    let target = UploadTarget::new(&filename, Utc::now());
    let upload_url = state
        .signer
        .presign_put(&target.file_name, target.expires_in)?;
    let file_url = state.signer.public_url(&target.file_name);

    info!(key = %target.file_name, "Issued upload URL");
    Ok(Json(UploadUrls {
        success: true,
        upload_url,
        file_url,
    }))
}
