use async_trait::async_trait;

use crate::domain::release::{Release, ReleaseDraft, Settings};
use crate::error::AppResult;

/// Persistence for the settings singleton and the release collection.
#[async_trait]
pub trait ReleaseStore: Send + Sync {
    /// Stored settings, or defaults when nothing was saved yet.
    async fn settings(&self) -> AppResult<Settings>;
    async fn save_settings(&self, update: Settings) -> AppResult<Settings>;

    /// All releases, newest first.
    async fn list_releases(&self) -> AppResult<Vec<Release>>;
    async fn create_release(&self, draft: ReleaseDraft) -> AppResult<Release>;
    async fn release(&self, id: &str) -> AppResult<Option<Release>>;
    /// `None` when no release has this id.
    async fn update_release(&self, id: &str, draft: ReleaseDraft) -> AppResult<Option<Release>>;
    /// `false` when no release has this id.
    async fn delete_release(&self, id: &str) -> AppResult<bool>;
}
