//! Axum route handlers for the Upload API.

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::analysis::{AnalysisOutcome, ResumeAnalyzer};
use crate::errors::AppError;
use crate::models::upload::UploadRecord;
use crate::state::AppState;
use crate::uploads::extraction::resume_text_or_placeholder;
use crate::uploads::repository::{attach_analysis, find_upload, insert_upload, NewUpload};

/// Multipart field carrying the résumé file.
pub const FILE_FIELD: &str = "resume";

const DEFAULT_FILE_NAME: &str = "resume";
const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub ok: bool,
    pub doc: UploadRecord,
}

/// A file received from the multipart body.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

/// POST /resume
///
/// Receives a résumé, stores its metadata, analyzes it and returns the stored
/// record. Only a missing file or an unreadable body fails the request;
/// extraction and evaluator problems end in fallback content.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let file = read_file_field(multipart)
        .await?
        .ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
    info!("File received: {}", file.original_name);

    let id = Uuid::new_v4();
    let storage_key = match &state.archive {
        Some(archive) => {
            archive
                .store(id, &file.mime_type, file.bytes.clone())
                .await
        }
        None => None,
    };

    let row = insert_upload(
        &state.db,
        NewUpload {
            id,
            original_name: &file.original_name,
            size: file.bytes.len() as i64,
            mime_type: &file.mime_type,
            storage_key: storage_key.as_deref(),
        },
    )
    .await?;

    let outcome = analyze_file(&state.analyzer, file).await;
    let row = attach_analysis(&state.db, row.id, &outcome).await?;

    Ok(Json(UploadResponse {
        ok: true,
        doc: row.into(),
    }))
}

/// GET /resume/:id
pub async fn handle_get_upload(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UploadResponse>, AppError> {
    let row = find_upload(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Upload {id} not found")))?;

    debug!(
        "Upload {} fetched (analysis source: {:?})",
        row.id,
        row.analysis_source()
    );

    Ok(Json(UploadResponse {
        ok: true,
        doc: row.into(),
    }))
}

/// Extraction followed by evaluation. Never fails.
pub async fn analyze_file(analyzer: &ResumeAnalyzer, file: UploadedFile) -> AnalysisOutcome {
    let text =
        resume_text_or_placeholder(file.bytes, &file.mime_type, &file.original_name).await;
    analyzer.evaluate(&text).await
}

/// Returns the first field named `resume`, ignoring any other fields.
async fn read_file_field(mut multipart: Multipart) -> Result<Option<UploadedFile>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "Invalid multipart body"))?
    {
        if field.name() != Some(FILE_FIELD) {
            debug!("Ignoring multipart field {:?}", field.name());
            continue;
        }

        let original_name = field
            .file_name()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(DEFAULT_FILE_NAME)
            .to_string();
        let mime_type = field
            .content_type()
            .unwrap_or(DEFAULT_MIME_TYPE)
            .to_string();
        let bytes = field.bytes().await.map_err(|e| {
            warn!("Failed to read upload body: {e}");
            multipart_error(e, "Could not read uploaded file")
        })?;

        return Ok(Some(UploadedFile {
            original_name,
            mime_type,
            bytes,
        }));
    }

    Ok(None)
}

/// Body-limit overruns surface as 413; every other multipart failure is a 400.
fn multipart_error(e: MultipartError, context: &str) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("{context}: {}", e.body_text()))
    } else {
        AppError::Validation(format!("{context}: {e}"))
    }
}
