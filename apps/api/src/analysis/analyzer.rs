//! Résumé analyzer: turns extracted résumé text into a guaranteed-valid
//! `AnalysisResult`.
//!
//! Pipeline:
//! 1. Truncate to `MAX_INPUT_CHARS`
//! 2. Ask the evaluator for a JSON object (JSON mode, temperature 0.2)
//! 3. Strip code fences and parse
//! 4. Call or parse failure → hard fallback; otherwise field-level fallback.
//!    An empty reply reads as `{}`, so every field takes its default.
//!
//! `evaluate` never returns an error. Failures are logged and tagged through
//! `AnalysisSource`.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

use crate::analysis::{AnalysisOutcome, AnalysisResult, AnalysisSource, Evaluator};
use crate::analysis::prompts::{ANALYSIS_TEMPERATURE, MAX_INPUT_CHARS, RESUME_ANALYSIS_SYSTEM};
use crate::analysis::validation::normalize_reply;
use crate::llm_client::{strip_json_fences, CompletionRequest, LlmError};

#[derive(Clone)]
pub struct ResumeAnalyzer {
    evaluator: Arc<dyn Evaluator>,
}

impl ResumeAnalyzer {
    pub fn new(evaluator: Arc<dyn Evaluator>) -> Self {
        Self { evaluator }
    }

    /// Evaluates résumé text. Always returns a well-formed result.
    pub async fn evaluate(&self, text: &str) -> AnalysisOutcome {
        let truncated = truncate_chars(text, MAX_INPUT_CHARS);
        debug!(
            "Evaluating resume text: {} chars (sent {})",
            text.chars().count(),
            truncated.chars().count()
        );

        let outcome = match self.request_reply(truncated).await {
            Ok(reply) => {
                let normalized = normalize_reply(&reply);
                if normalized.defaulted_fields.is_empty() {
                    info!("Evaluator reply accepted (score {})", normalized.result.score);
                    AnalysisOutcome {
                        result: normalized.result,
                        source: AnalysisSource::Model,
                    }
                } else {
                    warn!(
                        "Evaluator reply incomplete, defaulted fields: {}",
                        normalized.defaulted_fields.join(", ")
                    );
                    AnalysisOutcome {
                        result: normalized.result,
                        source: AnalysisSource::Repaired,
                    }
                }
            }
            Err(e) => {
                error!("Resume evaluation failed, using fallback analysis: {e}");
                AnalysisOutcome {
                    result: AnalysisResult::hard_fallback(),
                    source: AnalysisSource::Fallback,
                }
            }
        };

        debug_assert!(outcome.result.is_well_formed());
        outcome
    }

    async fn request_reply(&self, text: &str) -> Result<Value, LlmError> {
        let reply = self
            .evaluator
            .complete(CompletionRequest {
                instruction: RESUME_ANALYSIS_SYSTEM,
                input: text,
                json_mode: true,
                temperature: ANALYSIS_TEMPERATURE,
            })
            .await;

        let raw = match reply {
            Ok(raw) => raw,
            Err(LlmError::EmptyContent) => String::new(),
            Err(e) => return Err(e),
        };

        let body = strip_json_fences(&raw);
        if body.is_empty() {
            warn!("Evaluator returned empty content, treating it as an empty object");
            return Ok(Value::Object(Map::new()));
        }
        Ok(serde_json::from_str(body)?)
    }
}

/// Prefix of `text` holding at most `max_chars` characters.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::validation::{DEFAULT_JOB_SUGGESTION, DEFAULT_SKILL, DEFAULT_SUGGESTION};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Returns a fixed reply and records every input it was sent.
    struct StubEvaluator {
        reply: Result<String, u16>,
        inputs: Mutex<Vec<String>>,
    }

    impl StubEvaluator {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                inputs: Mutex::new(Vec::new()),
            })
        }

        fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(status),
                inputs: Mutex::new(Vec::new()),
            })
        }

        fn last_input(&self) -> String {
            self.inputs.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Evaluator for StubEvaluator {
        async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError> {
            assert!(request.json_mode);
            assert_eq!(request.instruction, RESUME_ANALYSIS_SYSTEM);
            assert_eq!(request.temperature, ANALYSIS_TEMPERATURE);
            self.inputs.lock().unwrap().push(request.input.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "upstream unavailable".to_string(),
                }),
            }
        }
    }

    struct MissingKeyEvaluator;

    #[async_trait]
    impl Evaluator for MissingKeyEvaluator {
        async fn complete(&self, _request: CompletionRequest<'_>) -> Result<String, LlmError> {
            Err(LlmError::MissingApiKey)
        }
    }

    struct EmptyContentEvaluator;

    #[async_trait]
    impl Evaluator for EmptyContentEvaluator {
        async fn complete(&self, _request: CompletionRequest<'_>) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    const FULL_REPLY: &str = r#"{
        "score": 78,
        "skills": ["Rust", "PostgreSQL", "Team Leadership"],
        "suggestions": ["Quantify achievements", "Add a summary section"],
        "jobSuggestions": ["Backend Engineer", "Platform Engineer"]
    }"#;

    fn analyzer_with(evaluator: Arc<dyn Evaluator>) -> ResumeAnalyzer {
        ResumeAnalyzer::new(evaluator)
    }

    #[tokio::test]
    async fn test_full_reply_is_model_sourced() {
        let analyzer = analyzer_with(StubEvaluator::replying(FULL_REPLY));
        let outcome = analyzer.evaluate("Senior engineer, 8 years of Rust").await;

        assert_eq!(outcome.source, AnalysisSource::Model);
        assert_eq!(outcome.result.score, 78.0);
        assert_eq!(outcome.result.skills, vec!["Rust", "PostgreSQL", "Team Leadership"]);
        assert_eq!(outcome.result.suggestions.len(), 2);
        assert_eq!(
            outcome.result.job_suggestions,
            vec!["Backend Engineer", "Platform Engineer"]
        );
    }

    #[tokio::test]
    async fn test_evaluator_failure_yields_hard_fallback() {
        let analyzer = analyzer_with(StubEvaluator::failing(503));
        let outcome = analyzer.evaluate("anything").await;

        assert_eq!(outcome.source, AnalysisSource::Fallback);
        assert_eq!(outcome.result, AnalysisResult::hard_fallback());
        assert_eq!(outcome.result.score, 50.0);
        assert_eq!(outcome.result.skills.len(), 1);
        assert_eq!(outcome.result.suggestions.len(), 2);
        assert_eq!(outcome.result.job_suggestions.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_credentials_yield_hard_fallback() {
        let analyzer = analyzer_with(Arc::new(MissingKeyEvaluator));
        let outcome = analyzer.evaluate("anything").await;
        assert_eq!(outcome.source, AnalysisSource::Fallback);
        assert_eq!(outcome.result, AnalysisResult::hard_fallback());
    }

    #[tokio::test]
    async fn test_non_json_reply_yields_hard_fallback() {
        let analyzer = analyzer_with(StubEvaluator::replying(
            "Sure! Here is my analysis of the resume.",
        ));
        let outcome = analyzer.evaluate("anything").await;
        assert_eq!(outcome.source, AnalysisSource::Fallback);
        assert_eq!(outcome.result, AnalysisResult::hard_fallback());
    }

    #[tokio::test]
    async fn test_empty_content_uses_field_defaults() {
        let analyzer = analyzer_with(Arc::new(EmptyContentEvaluator));
        let outcome = analyzer.evaluate("text").await;

        assert_eq!(outcome.source, AnalysisSource::Repaired);
        assert_eq!(outcome.result.score, 50.0);
        assert_eq!(outcome.result.skills, vec![DEFAULT_SKILL]);
        assert_eq!(outcome.result.suggestions, vec![DEFAULT_SUGGESTION]);
        assert_eq!(outcome.result.job_suggestions, vec![DEFAULT_JOB_SUGGESTION]);
        assert_ne!(outcome.result, AnalysisResult::hard_fallback());
    }

    #[tokio::test]
    async fn test_blank_reply_uses_field_defaults() {
        for reply in ["", "   \n", "```json\n```"] {
            let analyzer = analyzer_with(StubEvaluator::replying(reply));
            let outcome = analyzer.evaluate("text").await;

            assert_eq!(outcome.source, AnalysisSource::Repaired, "reply {reply:?}");
            assert_eq!(outcome.result.skills, vec![DEFAULT_SKILL]);
            assert_eq!(outcome.result.job_suggestions, vec![DEFAULT_JOB_SUGGESTION]);
        }
    }

    #[tokio::test]
    async fn test_missing_score_defaults_and_keeps_other_fields() {
        let analyzer = analyzer_with(StubEvaluator::replying(
            r#"{"skills": ["Go"], "suggestions": ["Add metrics"], "jobSuggestions": ["SRE"]}"#,
        ));
        let outcome = analyzer.evaluate("text").await;

        assert_eq!(outcome.source, AnalysisSource::Repaired);
        assert_eq!(outcome.result.score, 50.0);
        assert_eq!(outcome.result.skills, vec!["Go"]);
        assert_eq!(outcome.result.suggestions, vec!["Add metrics"]);
        assert_eq!(outcome.result.job_suggestions, vec!["SRE"]);
    }

    #[tokio::test]
    async fn test_out_of_range_score_is_replaced() {
        let analyzer = analyzer_with(StubEvaluator::replying(
            r#"{"score": 150, "skills": ["Go"], "suggestions": ["Add metrics"], "jobSuggestions": ["SRE"]}"#,
        ));
        let outcome = analyzer.evaluate("text").await;

        assert_eq!(outcome.result.score, 50.0);
        assert_eq!(outcome.result.skills, vec!["Go"]);
        assert_eq!(outcome.result.suggestions, vec!["Add metrics"]);
        assert_eq!(outcome.result.job_suggestions, vec!["SRE"]);
    }

    #[tokio::test]
    async fn test_zero_score_is_kept() {
        let analyzer = analyzer_with(StubEvaluator::replying(
            r#"{"score": 0, "skills": ["Go"], "suggestions": ["Add metrics"], "jobSuggestions": ["SRE"]}"#,
        ));
        let outcome = analyzer.evaluate("text").await;
        assert_eq!(outcome.source, AnalysisSource::Model);
        assert_eq!(outcome.result.score, 0.0);
    }

    #[tokio::test]
    async fn test_uppercase_fence_tag_is_parsed() {
        let fenced = format!("```JSON\n{FULL_REPLY}\n```");
        let outcome = analyzer_with(StubEvaluator::replying(&fenced))
            .evaluate("text")
            .await;
        assert_eq!(outcome.source, AnalysisSource::Model);
        assert_eq!(outcome.result.score, 78.0);
    }

    #[tokio::test]
    async fn test_fenced_reply_is_parsed() {
        let fenced = format!("```json\n{FULL_REPLY}\n```");
        let analyzer = analyzer_with(StubEvaluator::replying(&fenced));
        let outcome = analyzer.evaluate("text").await;

        let plain = analyzer_with(StubEvaluator::replying(FULL_REPLY))
            .evaluate("text")
            .await;
        assert_eq!(outcome, plain);
        assert_eq!(outcome.source, AnalysisSource::Model);
    }

    #[tokio::test]
    async fn test_wrong_typed_lists_use_field_defaults() {
        let analyzer = analyzer_with(StubEvaluator::replying(
            r#"{"score": 64, "skills": "Rust, Go", "suggestions": [], "jobSuggestions": [1, 2]}"#,
        ));
        let outcome = analyzer.evaluate("text").await;

        assert_eq!(outcome.result.score, 64.0);
        assert_eq!(outcome.result.skills, vec![DEFAULT_SKILL]);
        assert_eq!(outcome.result.suggestions, vec![DEFAULT_SUGGESTION]);
        assert_eq!(outcome.result.job_suggestions, vec![DEFAULT_JOB_SUGGESTION]);
    }

    #[tokio::test]
    async fn test_empty_and_oversized_input_are_well_formed() {
        let stub = StubEvaluator::replying(FULL_REPLY);
        let analyzer = analyzer_with(stub.clone());

        let empty = analyzer.evaluate("").await;
        assert!(empty.result.is_well_formed());
        assert_eq!(stub.last_input(), "");

        let huge = "é".repeat(MAX_INPUT_CHARS * 3);
        let outcome = analyzer.evaluate(&huge).await;
        assert!(outcome.result.is_well_formed());
        assert_eq!(stub.last_input().chars().count(), MAX_INPUT_CHARS);
    }

    #[tokio::test]
    async fn test_evaluate_is_deterministic_for_deterministic_stub() {
        let analyzer = analyzer_with(StubEvaluator::replying(
            r#"{"score": 91, "skills": ["Rust"], "suggestions": [], "jobSuggestions": ["SRE"]}"#,
        ));
        let first = analyzer.evaluate("same input").await;
        let second = analyzer.evaluate("same input").await;
        assert_eq!(first, second);
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("", 5), "");
        assert_eq!(truncate_chars("abc", 0), "");
    }
}
