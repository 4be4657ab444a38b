//! Per-field validation of an evaluator reply.
//!
//! The reply shape is not guaranteed, so every field is read as an untyped
//! `serde_json::Value` and checked on its own. A field that fails its check is
//! replaced by a named default; the other fields are kept as-is.

use serde_json::Value;

use crate::analysis::model::{AnalysisResult, NEUTRAL_SCORE};

pub const DEFAULT_SKILL: &str = "Basic resume skills";
pub const DEFAULT_SUGGESTION: &str = "Please provide more details in your resume";
pub const DEFAULT_JOB_SUGGESTION: &str = "General professional positions";

/// A field value and whether it had to be defaulted.
#[derive(Debug, Clone, PartialEq)]
pub enum Checked<T> {
    Valid(T),
    Defaulted(T),
}

impl<T> Checked<T> {
    pub fn into_inner(self) -> T {
        match self {
            Checked::Valid(v) | Checked::Defaulted(v) => v,
        }
    }

    pub fn was_defaulted(&self) -> bool {
        matches!(self, Checked::Defaulted(_))
    }
}

/// Reads `name` from `reply`, keeps it if `check` accepts it, otherwise
/// substitutes `default()`. Non-object replies have no fields.
pub fn field_or<T>(
    reply: &Value,
    name: &str,
    check: impl Fn(&Value) -> Option<T>,
    default: impl FnOnce() -> T,
) -> Checked<T> {
    match reply.get(name).and_then(check) {
        Some(v) => Checked::Valid(v),
        None => Checked::Defaulted(default()),
    }
}

/// A JSON number in the closed range [0, 100].
pub fn score_in_range(value: &Value) -> Option<f64> {
    value.as_f64().filter(|s| (0.0..=100.0).contains(s))
}

/// A non-empty JSON array whose elements are all strings.
pub fn non_empty_strings(value: &Value) -> Option<Vec<String>> {
    let items = value.as_array().filter(|a| !a.is_empty())?;
    items
        .iter()
        .map(|item| item.as_str().map(String::from))
        .collect()
}

/// The normalized result plus the names of the fields that were defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedReply {
    pub result: AnalysisResult,
    pub defaulted_fields: Vec<&'static str>,
}

/// Applies field-level fallback to every field of a parsed reply.
pub fn normalize_reply(reply: &Value) -> NormalizedReply {
    let score = field_or(reply, "score", score_in_range, || NEUTRAL_SCORE);
    let skills = field_or(reply, "skills", non_empty_strings, || {
        vec![DEFAULT_SKILL.to_string()]
    });
    let suggestions = field_or(reply, "suggestions", non_empty_strings, || {
        vec![DEFAULT_SUGGESTION.to_string()]
    });
    let job_suggestions = field_or(reply, "jobSuggestions", non_empty_strings, || {
        vec![DEFAULT_JOB_SUGGESTION.to_string()]
    });

    let defaulted_fields = [
        ("score", score.was_defaulted()),
        ("skills", skills.was_defaulted()),
        ("suggestions", suggestions.was_defaulted()),
        ("jobSuggestions", job_suggestions.was_defaulted()),
    ]
    .into_iter()
    .filter_map(|(name, defaulted)| defaulted.then_some(name))
    .collect();

    NormalizedReply {
        result: AnalysisResult {
            score: score.into_inner(),
            skills: skills.into_inner(),
            suggestions: suggestions.into_inner(),
            job_suggestions: job_suggestions.into_inner(),
        },
        defaulted_fields,
    }
}
