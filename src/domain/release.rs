use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

const RESERVED_KEYS: [&str; 2] = ["_id", "created_at"];

pub const JIRA_URL: &str = "jiraUrl";
pub const JIRA_EMAIL: &str = "jiraEmail";
pub const JIRA_TOKEN: &str = "jiraToken";
pub const GEMINI_TOKEN: &str = "geminiToken";

/// Global settings as stored: a flat JSON object. Values are kept verbatim,
/// explicit `null`s and non-string values included, and the known keys are
/// read through typed accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    values: Map<String, Value>,
}

impl Settings {
    /// Upsert semantics: every key present in `update` overwrites the stored
    /// one, `null` included.
    pub fn merge(&mut self, update: Settings) {
        self.values.extend(update.values);
    }

    pub fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// String value of `key`. Missing, `null`, and non-string values read as absent.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// The Gemini key, if one is configured.
    pub fn gemini_api_key(&self) -> Option<&str> {
        non_blank(self.text(GEMINI_TOKEN))
    }
}

/// Issue tracker access, validated once at the start of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerCredentials {
    pub domain: String,
    pub email: String,
    pub token: String,
}

impl TrackerCredentials {
    pub fn from_settings(settings: &Settings) -> AppResult<Self> {
        match (
            non_blank(settings.text(JIRA_URL)),
            non_blank(settings.text(JIRA_EMAIL)),
            non_blank(settings.text(JIRA_TOKEN)),
        ) {
            (Some(domain), Some(email), Some(token)) => Ok(Self {
                domain: domain.to_string(),
                email: email.to_string(),
                token: token.to_string(),
            }),
            _ => Err(AppError::Configuration(
                "JIRA settings are incomplete. Please configure them on the Settings page."
                    .to_string(),
            )),
        }
    }

    /// Base URL of the tracker. Bare domains are assumed to be served over https.
    pub fn base_url(&self) -> String {
        let domain = self.domain.trim().trim_end_matches('/');
        if domain.starts_with("http://") || domain.starts_with("https://") {
            domain.to_string()
        } else {
            format!("https://{domain}")
        }
    }

    pub fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{}", self.base_url(), key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub codename: String,
    #[serde(default, rename = "releaseHighlights")]
    pub release_highlights: String,
    #[serde(default, rename = "jiraTickets")]
    pub jira_tickets: String,
    #[serde(default, rename = "upstreamBugUrls")]
    pub upstream_bug_urls: String,
    #[serde(default, rename = "upstreamUrls")]
    pub upstream_urls: String,
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        rename = "generatedMarkdown",
        skip_serializing_if = "Option::is_none"
    )]
    pub generated_markdown: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Release {
    pub fn new(draft: ReleaseDraft, created_at: DateTime<Utc>) -> Self {
        let mut release = Self {
            id: Uuid::new_v4().simple().to_string(),
            version: String::new(),
            codename: String::new(),
            release_highlights: String::new(),
            jira_tickets: String::new(),
            upstream_bug_urls: String::new(),
            upstream_urls: String::new(),
            created_at,
            generated_markdown: None,
            extra: Map::new(),
        };
        release.apply(draft);
        release
    }

    /// Overwrites every field present in `draft`, leaving the rest untouched.
    pub fn apply(&mut self, draft: ReleaseDraft) {
        let ReleaseDraft {
            version,
            codename,
            release_highlights,
            jira_tickets,
            upstream_bug_urls,
            upstream_urls,
            generated_markdown,
            mut extra,
        } = draft;

        assign(&mut self.version, version);
        assign(&mut self.codename, codename);
        assign(&mut self.release_highlights, release_highlights);
        assign(&mut self.jira_tickets, jira_tickets);
        assign(&mut self.upstream_bug_urls, upstream_bug_urls);
        assign(&mut self.upstream_urls, upstream_urls);
        if generated_markdown.is_some() {
            self.generated_markdown = generated_markdown;
        }

        for key in RESERVED_KEYS {
            extra.remove(key);
        }
        self.extra.extend(extra);
    }
}

/// Client-submitted release fields for create and update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseDraft {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub codename: Option<String>,
    #[serde(default, rename = "releaseHighlights")]
    pub release_highlights: Option<String>,
    #[serde(default, rename = "jiraTickets")]
    pub jira_tickets: Option<String>,
    #[serde(default, rename = "upstreamBugUrls")]
    pub upstream_bug_urls: Option<String>,
    #[serde(default, rename = "upstreamUrls")]
    pub upstream_urls: Option<String>,
    #[serde(default, rename = "generatedMarkdown")]
    pub generated_markdown: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn assign(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *target = value;
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
