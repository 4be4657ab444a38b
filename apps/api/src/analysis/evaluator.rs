//! Evaluator: the seam between the analyzer and the language model.
//!
//! `LlmClient` is the production backend. Tests substitute a stub. The
//! analyzer holds an `Arc<dyn Evaluator>` injected at startup.

use async_trait::async_trait;

use crate::llm_client::{CompletionRequest, LlmClient, LlmError};

/// Sends an instruction plus input text to a model and returns its raw reply.
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError>;
}

#[async_trait]
impl Evaluator for LlmClient {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError> {
        self.call_text(request).await
    }
}
