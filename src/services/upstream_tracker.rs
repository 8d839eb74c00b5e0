use async_trait::async_trait;

use crate::domain::upstream::UpstreamBug;
use crate::error::AppResult;

#[async_trait]
pub trait UpstreamTrackerService: Send + Sync {
    async fn fetch_bug(&self, url: &str) -> AppResult<UpstreamBug>;
}
