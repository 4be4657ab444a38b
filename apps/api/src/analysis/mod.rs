// Résumé analysis: evaluator call, reply normalization, fallback policy.
// All model calls go through llm_client via the Evaluator trait.

pub mod analyzer;
pub mod evaluator;
pub mod model;
pub mod prompts;
pub mod validation;

pub use analyzer::ResumeAnalyzer;
pub use evaluator::Evaluator;
pub use model::{AnalysisOutcome, AnalysisResult, AnalysisSource};
