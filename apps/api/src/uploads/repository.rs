use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::analysis::AnalysisOutcome;
use crate::models::upload::UploadRow;

/// Metadata captured when a file is received, before any analysis.
pub struct NewUpload<'a> {
    pub id: Uuid,
    pub original_name: &'a str,
    pub size: i64,
    pub mime_type: &'a str,
    pub storage_key: Option<&'a str>,
}

/// Inserts the metadata-only record for a freshly received upload.
pub async fn insert_upload(pool: &PgPool, upload: NewUpload<'_>) -> Result<UploadRow, sqlx::Error> {
    let row = sqlx::query_as::<_, UploadRow>(
        r#"
        INSERT INTO resume_uploads (id, original_name, size, mime_type, storage_key)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(upload.id)
    .bind(upload.original_name)
    .bind(upload.size)
    .bind(upload.mime_type)
    .bind(upload.storage_key)
    .fetch_one(pool)
    .await?;

    info!("Upload {} metadata saved ({} bytes)", row.id, row.size);
    Ok(row)
}

/// Attaches the analysis to an upload. Called once per upload.
pub async fn attach_analysis(
    pool: &PgPool,
    id: Uuid,
    outcome: &AnalysisOutcome,
) -> Result<UploadRow, sqlx::Error> {
    let result = &outcome.result;
    let row = sqlx::query_as::<_, UploadRow>(
        r#"
        UPDATE resume_uploads
        SET score = $2,
            skills = $3,
            suggestions = $4,
            job_suggestions = $5,
            analysis_source = $6,
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(result.score)
    .bind(&result.skills)
    .bind(&result.suggestions)
    .bind(&result.job_suggestions)
    .bind(outcome.source.as_str())
    .fetch_one(pool)
    .await?;

    info!(
        "Analysis saved for upload {} (source: {})",
        id,
        outcome.source.as_str()
    );
    Ok(row)
}

pub async fn find_upload(pool: &PgPool, id: Uuid) -> Result<Option<UploadRow>, sqlx::Error> {
    sqlx::query_as::<_, UploadRow>("SELECT * FROM resume_uploads WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}
