use serde_json::Value;

use crate::domain::category::Category;
use crate::domain::document::extract_text;

const DEFAULT_TITLE: &str = "No title";
const DEFAULT_ISSUE_TYPE: &str = "Task";

/// A JIRA issue reduced to what the release notes need.
#[derive(Debug, Clone)]
pub struct Ticket {
    pub key: String,
    pub title: String,
    pub description: String,
    pub issue_type: String,
}

impl Ticket {
    /// Builds a ticket from the raw `/rest/api/3/issue/{key}` payload.
    /// `requested_key` is used when the payload carries no `key`.
    pub fn from_issue(requested_key: &str, issue: &Value) -> Self {
        let fields = issue.get("fields");

        let key = issue
            .get("key")
            .and_then(Value::as_str)
            .unwrap_or(requested_key)
            .to_string();
        let title = fields
            .and_then(|f| f.get("summary"))
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_TITLE)
            .to_string();
        let description = fields
            .and_then(|f| f.get("description"))
            .map(extract_text)
            .unwrap_or_default();
        let issue_type = fields
            .and_then(|f| f.get("issuetype"))
            .and_then(|t| t.get("name"))
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_ISSUE_TYPE)
            .to_string();

        Self {
            key,
            title,
            description,
            issue_type,
        }
    }

    pub fn category(&self) -> Category {
        Category::from_issue_type(&self.issue_type)
    }
}

/// A ticket paired with the sentence that goes into the notes.
#[derive(Debug, Clone)]
pub struct SummarizedTicket {
    pub ticket: Ticket,
    pub summary: String,
}
