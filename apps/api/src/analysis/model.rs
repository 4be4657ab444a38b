use serde::{Deserialize, Serialize};

/// Validated evaluation output attached to an upload.
///
/// Every value of this type satisfies: `0 <= score <= 100` and all three
/// lists are non-empty. Construction goes through the validators in
/// `analysis::validation` or the fixed fallback below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub score: f64,
    pub skills: Vec<String>,
    pub suggestions: Vec<String>,
    pub job_suggestions: Vec<String>,
}

pub const NEUTRAL_SCORE: f64 = 50.0;

impl AnalysisResult {
    /// Result used when the evaluator call fails or its reply cannot be parsed.
    pub fn hard_fallback() -> Self {
        Self {
            score: NEUTRAL_SCORE,
            skills: vec!["Basic resume analysis".to_string()],
            suggestions: vec![
                "Could not analyze properly, please upload a valid PDF resume".to_string(),
                "Check if OpenAI API key is configured".to_string(),
            ],
            job_suggestions: vec!["General positions".to_string()],
        }
    }

    pub fn is_well_formed(&self) -> bool {
        (0.0..=100.0).contains(&self.score)
            && !self.skills.is_empty()
            && !self.suggestions.is_empty()
            && !self.job_suggestions.is_empty()
    }
}

/// Where an `AnalysisResult` came from. Persisted next to the analysis so
/// evaluator outages are visible without changing the response contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisSource {
    /// Every field came from the evaluator.
    Model,
    /// The evaluator replied but at least one field was substituted.
    Repaired,
    /// The call or parse failed; the fixed fallback was used.
    Fallback,
}

impl AnalysisSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisSource::Model => "model",
            AnalysisSource::Repaired => "repaired",
            AnalysisSource::Fallback => "fallback",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "model" => Some(AnalysisSource::Model),
            "repaired" => Some(AnalysisSource::Repaired),
            "fallback" => Some(AnalysisSource::Fallback),
            _ => None,
        }
    }
}

/// An analysis together with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    pub source: AnalysisSource,
}
