use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{
    IssueTrackerService, LanguageModelService, ReleaseStore, UpstreamTrackerService,
};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub store: Arc<dyn ReleaseStore>,
    pub issue_tracker: Arc<dyn IssueTrackerService>,
    pub upstream_tracker: Arc<dyn UpstreamTrackerService>,
    pub language_model: Arc<dyn LanguageModelService>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        store: Arc<dyn ReleaseStore>,
        issue_tracker: Arc<dyn IssueTrackerService>,
        upstream_tracker: Arc<dyn UpstreamTrackerService>,
        language_model: Arc<dyn LanguageModelService>,
    ) -> Self {
        Self {
            config,
            store,
            issue_tracker,
            upstream_tracker,
            language_model,
        }
    }
}
