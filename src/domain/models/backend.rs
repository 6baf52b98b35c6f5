use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use super::RunRequest;

#[async_trait]
pub trait InferenceBackend {
    fn name(&self) -> &'static str;

    /// Lists the models the credential may call `generateContent` on. Used to
    /// help the user when a model name is rejected.
    async fn list_models(&self, credential: &str) -> Result<Vec<String>>;

    /// Performs exactly one round trip and returns the response text
    /// verbatim. No retries.
    async fn generate(&self, request: &RunRequest) -> Result<String>;
}

pub type BackendBox = Arc<dyn InferenceBackend + Send + Sync>;
