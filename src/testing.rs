//! Test doubles for the outbound services.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::config::{AppConfig, StoreBackend};
use crate::context::AppContext;
use crate::domain::release::{ReleaseDraft, Settings, TrackerCredentials};
use crate::domain::upstream::UpstreamBug;
use crate::error::{AppError, AppResult};
use crate::infra::memory::MemoryStore;
use crate::services::{
    IssueTrackerService, LanguageModelService, ReleaseStore, UpstreamTrackerService,
};

#[derive(Default)]
pub struct StubIssueTracker {
    issues: HashMap<String, Value>,
    requested: Mutex<Vec<String>>,
}

impl StubIssueTracker {
    pub fn with_issue(mut self, key: &str, issue: Value) -> Self {
        self.issues.insert(key.to_string(), issue);
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl IssueTrackerService for StubIssueTracker {
    async fn fetch_issue(&self, _credentials: &TrackerCredentials, key: &str) -> AppResult<Value> {
        self.requested.lock().unwrap().push(key.to_string());
        self.issues
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::IssueTracker(format!("Jira responded with 404 Not Found for {key}")))
    }
}

#[derive(Default)]
pub struct StubUpstreamTracker {
    bugs: HashMap<String, UpstreamBug>,
}

impl StubUpstreamTracker {
    pub fn with_bug(mut self, url: &str, title: &str, description: &str) -> Self {
        self.bugs.insert(
            url.to_string(),
            UpstreamBug {
                title: title.to_string(),
                description: description.to_string(),
            },
        );
        self
    }
}

#[async_trait]
impl UpstreamTrackerService for StubUpstreamTracker {
    async fn fetch_bug(&self, url: &str) -> AppResult<UpstreamBug> {
        self.bugs.get(url).cloned().ok_or_else(|| {
            AppError::UpstreamTracker(format!("could not find title or description elements on {url}"))
        })
    }
}

pub struct StubLanguageModel {
    answer: Option<String>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl StubLanguageModel {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModelService for StubLanguageModel {
    async fn complete(&self, _api_key: Option<&str>, prompt: &str) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        self.answer
            .clone()
            .ok_or_else(|| AppError::LanguageModel("Gemini responded with 503".to_string()))
    }
}

pub fn config() -> AppConfig {
    let mut config = AppConfig::from_lookup(|_| None).unwrap();
    config.store = StoreBackend::Memory;
    config
}

pub fn context(
    issue_tracker: Arc<StubIssueTracker>,
    upstream_tracker: Arc<StubUpstreamTracker>,
    language_model: Arc<StubLanguageModel>,
) -> AppContext {
    AppContext::new(
        config(),
        Arc::new(MemoryStore::new()),
        issue_tracker,
        upstream_tracker,
        language_model,
    )
}

pub async fn save_tracker_settings(store: &dyn ReleaseStore) {
    let settings: Settings = serde_json::from_value(json!({
        "jiraUrl": "jira.example.com",
        "jiraEmail": "docs@example.com",
        "jiraToken": "secret",
        "geminiToken": "gem-key"
    }))
    .unwrap();
    store.save_settings(settings).await.unwrap();
}

pub async fn create_release(store: &dyn ReleaseStore, fields: Value) -> String {
    let draft: ReleaseDraft = serde_json::from_value(fields).unwrap();
    store.create_release(draft).await.unwrap().id
}
