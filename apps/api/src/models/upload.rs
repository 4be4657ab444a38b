use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::analysis::{AnalysisResult, AnalysisSource};

/// Row of `resume_uploads`. Analysis columns are all NULL until the analysis
/// is attached, then all set (enforced by a CHECK constraint).
#[derive(Debug, Clone, FromRow)]
pub struct UploadRow {
    pub id: Uuid,
    pub original_name: String,
    pub size: i64,
    pub mime_type: String,
    pub storage_key: Option<String>,
    pub score: Option<f64>,
    pub skills: Option<Vec<String>>,
    pub suggestions: Option<Vec<String>>,
    pub job_suggestions: Option<Vec<String>>,
    pub analysis_source: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UploadRow {
    pub fn analysis(&self) -> Option<AnalysisResult> {
        match (
            self.score,
            &self.skills,
            &self.suggestions,
            &self.job_suggestions,
        ) {
            (Some(score), Some(skills), Some(suggestions), Some(job_suggestions)) => {
                Some(AnalysisResult {
                    score,
                    skills: skills.clone(),
                    suggestions: suggestions.clone(),
                    job_suggestions: job_suggestions.clone(),
                })
            }
            _ => None,
        }
    }

    pub fn analysis_source(&self) -> Option<AnalysisSource> {
        self.analysis_source
            .as_deref()
            .and_then(AnalysisSource::parse)
    }
}

/// One analyzed document as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRecord {
    pub id: Uuid,
    pub original_name: String,
    pub size: i64,
    pub mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_key: Option<String>,
    pub analysis: Option<AnalysisResult>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UploadRow> for UploadRecord {
    fn from(row: UploadRow) -> Self {
        let analysis = row.analysis();
        UploadRecord {
            id: row.id,
            original_name: row.original_name,
            size: row.size,
            mime_type: row.mime_type,
            storage_key: row.storage_key,
            analysis,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
