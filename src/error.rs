use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidRequest(String),
    #[error("Could not fetch data for any JIRA tickets.")]
    NoTicketData,
    #[error("issue tracker error: {0}")]
    IssueTracker(String),
    #[error("upstream tracker error: {0}")]
    UpstreamTracker(String),
    #[error("language model error: {0}")]
    LanguageModel(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
