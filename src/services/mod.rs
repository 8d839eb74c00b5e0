pub mod issue_tracker;
pub mod language_model;
pub mod store;
pub mod upstream_tracker;

pub use issue_tracker::IssueTrackerService;
pub use language_model::LanguageModelService;
pub use store::ReleaseStore;
pub use upstream_tracker::UpstreamTrackerService;
