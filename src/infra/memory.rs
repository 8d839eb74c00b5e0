use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::domain::release::{Release, ReleaseDraft, Settings};
use crate::error::AppResult;
use crate::services::ReleaseStore;

/// The full contents of a store: the settings singleton plus every release.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreData {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub releases: Vec<Release>,
}

impl StoreData {
    pub fn save_settings(&mut self, update: Settings) -> Settings {
        self.settings.merge(update);
        self.settings.clone()
    }

    pub fn list_releases(&self) -> Vec<Release> {
        let mut releases = self.releases.clone();
        releases.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        releases
    }

    pub fn create_release(&mut self, draft: ReleaseDraft) -> Release {
        let release = Release::new(draft, Utc::now());
        self.releases.push(release.clone());
        release
    }

    pub fn release(&self, id: &str) -> Option<Release> {
        self.releases.iter().find(|r| r.id == id).cloned()
    }

    pub fn update_release(&mut self, id: &str, draft: ReleaseDraft) -> Option<Release> {
        let release = self.releases.iter_mut().find(|r| r.id == id)?;
        release.apply(draft);
        Some(release.clone())
    }

    pub fn delete_release(&mut self, id: &str) -> bool {
        let before = self.releases.len();
        self.releases.retain(|r| r.id != id);
        self.releases.len() != before
    }
}

/// Process-local store; contents are lost on exit.
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<StoreData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReleaseStore for MemoryStore {
    async fn settings(&self) -> AppResult<Settings> {
        Ok(self.data.read().await.settings.clone())
    }

    async fn save_settings(&self, update: Settings) -> AppResult<Settings> {
        Ok(self.data.write().await.save_settings(update))
    }

    async fn list_releases(&self) -> AppResult<Vec<Release>> {
        Ok(self.data.read().await.list_releases())
    }

    async fn create_release(&self, draft: ReleaseDraft) -> AppResult<Release> {
        Ok(self.data.write().await.create_release(draft))
    }

    async fn release(&self, id: &str) -> AppResult<Option<Release>> {
        Ok(self.data.read().await.release(id))
    }

    async fn update_release(&self, id: &str, draft: ReleaseDraft) -> AppResult<Option<Release>> {
        Ok(self.data.write().await.update_release(id, draft))
    }

    async fn delete_release(&self, id: &str) -> AppResult<bool> {
        Ok(self.data.write().await.delete_release(id))
    }
}
