use async_trait::async_trait;

use crate::error::AppResult;

#[async_trait]
pub trait LanguageModelService: Send + Sync {
    /// Sends `prompt` and returns the model's raw text answer.
    async fn complete(&self, api_key: Option<&str>, prompt: &str) -> AppResult<String>;
}
