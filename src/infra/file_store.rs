use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::release::{Release, ReleaseDraft, Settings};
use crate::error::{AppError, AppResult};
use crate::infra::memory::StoreData;
use crate::services::ReleaseStore;

pub const STORE_FILE_NAME: &str = "relnotes.json";

/// Store persisted as a single JSON document, rewritten after every change.
pub struct JsonFileStore {
    file_path: PathBuf,
    data: Mutex<StoreData>,
}

impl JsonFileStore {
    pub fn open(file_path: &Path) -> AppResult<Self> {
        let data = match fs::read_to_string(file_path) {
            Ok(contents) => serde_json::from_str::<StoreData>(&contents).map_err(|err| {
                AppError::Storage(format!(
                    "invalid store file {}: {err}",
                    file_path.display()
                ))
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => StoreData::default(),
            Err(err) => return Err(AppError::Io(err)),
        };

        Ok(Self {
            file_path: file_path.to_path_buf(),
            data: Mutex::new(data),
        })
    }

    async fn persist(&self, data: &StoreData) -> AppResult<()> {
        if let Some(parent) = self.file_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let contents = serde_json::to_string_pretty(data)
            .map_err(|err| AppError::Storage(format!("failed to encode store: {err}")))?;
        tokio::fs::write(&self.file_path, contents).await?;
        debug!(path = %self.file_path.display(), "store written");
        Ok(())
    }

    /// Applies `change` to a copy of `data`. When `changed` holds, the copy is
    /// written out and only then replaces `data`.
    async fn commit<T>(
        &self,
        data: &mut StoreData,
        change: impl FnOnce(&mut StoreData) -> T,
        changed: fn(&T) -> bool,
    ) -> AppResult<T> {
        let mut next = data.clone();
        let outcome = change(&mut next);
        if changed(&outcome) {
            self.persist(&next).await?;
            *data = next;
        }
        Ok(outcome)
    }
}

#[async_trait]
impl ReleaseStore for JsonFileStore {
    async fn settings(&self) -> AppResult<Settings> {
        Ok(self.data.lock().await.settings.clone())
    }

    async fn save_settings(&self, update: Settings) -> AppResult<Settings> {
        let mut data = self.data.lock().await;
        self.commit(&mut data, |next| next.save_settings(update), |_| true)
            .await
    }

    async fn list_releases(&self) -> AppResult<Vec<Release>> {
        Ok(self.data.lock().await.list_releases())
    }

    async fn create_release(&self, draft: ReleaseDraft) -> AppResult<Release> {
        let mut data = self.data.lock().await;
        self.commit(&mut data, |next| next.create_release(draft), |_| true)
            .await
    }

    async fn release(&self, id: &str) -> AppResult<Option<Release>> {
        Ok(self.data.lock().await.release(id))
    }

    async fn update_release(&self, id: &str, draft: ReleaseDraft) -> AppResult<Option<Release>> {
        let mut data = self.data.lock().await;
        self.commit(
            &mut data,
            |next| next.update_release(id, draft),
            |updated| updated.is_some(),
        )
        .await
    }

    async fn delete_release(&self, id: &str) -> AppResult<bool> {
        let mut data = self.data.lock().await;
        self.commit(&mut data, |next| next.delete_release(id), |removed| *removed)
            .await
    }
}
