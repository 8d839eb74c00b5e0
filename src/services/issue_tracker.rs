use async_trait::async_trait;
use serde_json::Value;

use crate::domain::release::TrackerCredentials;
use crate::error::AppResult;

#[async_trait]
pub trait IssueTrackerService: Send + Sync {
    /// Raw issue payload for `key`.
    async fn fetch_issue(&self, credentials: &TrackerCredentials, key: &str) -> AppResult<Value>;
}
