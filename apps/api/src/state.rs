use sqlx::PgPool;

use crate::analysis::ResumeAnalyzer;
use crate::uploads::storage::UploadArchive;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Built once at startup around the injected evaluator backend.
    pub analyzer: ResumeAnalyzer,
    /// Present only when `S3_BUCKET` is configured.
    pub archive: Option<UploadArchive>,
}
