//! Markdown assembly for a release.
//!
//! Sections are emitted in a fixed order and omitted entirely when they have
//! nothing to show.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::domain::category::Category;
use crate::domain::ticket::SummarizedTicket;
use crate::domain::upstream::SummarizedBug;

const SEPARATOR: &str = "\n---";
const VERSION_PLACEHOLDER: &str = "version";
const DISPLAY_VERSION_PLACEHOLDER: &str = "X.Y.Z";

static ENTRY_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,\s]+").expect("valid delimiter pattern"));
static VERSION_TRIPLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.\d+\.\d+)").expect("valid version pattern"));

/// Splits a free-text list on commas and whitespace, dropping blanks.
pub fn split_entries(raw: &str) -> Vec<&str> {
    ENTRY_DELIMITER
        .split(raw)
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Distinct entries in lexicographic order.
pub fn unique_entries(raw: &str) -> Vec<String> {
    split_entries(raw)
        .into_iter()
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Upper-cased, deduplicated, sorted ticket keys.
pub fn ticket_keys(raw: &str) -> Vec<String> {
    split_entries(raw)
        .into_iter()
        .map(str::to_uppercase)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// First dotted `major.minor.patch` triplet in `url`.
pub fn extract_version(url: &str) -> Option<&str> {
    VERSION_TRIPLET.find(url).map(|m| m.as_str())
}

/// Opening paragraph naming the MongoDB Community releases this build
/// incorporates. `None` when no URL carries a version.
pub fn intro_paragraph(upstream_urls: &str, version: &str, date: NaiveDate) -> Option<String> {
    let mut links = Vec::new();
    let mut versions = Vec::new();
    for url in unique_entries(upstream_urls) {
        if let Some(mongo_version) = extract_version(&url) {
            links.push(format!("[MongoDB {mongo_version} Community Edition]({url})"));
            versions.push(mongo_version.to_string());
        }
    }
    if links.is_empty() {
        return None;
    }
    links.sort();
    versions.sort();

    let trimmed = version.trim().trim_start_matches('v');
    let display_version = if trimmed.is_empty() {
        DISPLAY_VERSION_PLACEHOLDER
    } else {
        trimmed
    };
    let date = date.format("%b %d, %Y");

    Some(format!(
        "Percona Server for MongoDB {display_version} ({date})\n\
         [Install](../install/index.md){{.md-button}}\n\
         [Upgrade from MongoDB Community](../install/upgrade-from-mongodb.md){{.md-button}}\n\
         Percona Server for MongoDB {display_version} is an enhanced, source-available, and highly-scalable database that is a\n\
         fully-compatible, drop-in replacement for MongoDB Community Edition.\n\
         Percona Server for MongoDB {display_version} includes the improvements and bug fixes of {links}.\n\
         It supports protocols and drivers of MongoDB Community {versions}.",
        links = links.join(", "),
        versions = versions.join(" through "),
    ))
}

/// "Upstream Improvements" block. `None` when no bug produced a summary.
pub fn upstream_section(bugs: &[SummarizedBug], release_urls: &str) -> Option<String> {
    if bugs.is_empty() {
        return None;
    }

    let mut lines = vec![
        "### Upstream Improvements".to_string(),
        "The bug fixes, provided by MongoDB Community Edition and included in Percona Server for MongoDB, are the following:".to_string(),
    ];
    lines.extend(bugs.iter().map(SummarizedBug::markdown_line));

    let release_urls = unique_entries(release_urls);
    if !release_urls.is_empty() {
        lines.push(
            "\nFind the full list of changes in the following MongoDB Community Edition release notes:"
                .to_string(),
        );
        for url in &release_urls {
            let version = extract_version(url).unwrap_or(VERSION_PLACEHOLDER);
            lines.push(format!("* [MongoDB {version} Community Edition]({url})"));
        }
    }

    Some(lines.join("\n"))
}

/// Everything needed to render the final document.
pub struct ReleaseNotes<'a> {
    pub intro: Option<String>,
    pub highlights: &'a str,
    pub upstream: Option<String>,
    pub version: &'a str,
    pub codename: &'a str,
    pub released_on: NaiveDate,
    pub tickets: &'a [SummarizedTicket],
    /// Maps a ticket key to its page on the issue tracker.
    pub browse_url: &'a dyn Fn(&str) -> String,
}

impl ReleaseNotes<'_> {
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = Vec::new();

        if let Some(intro) = &self.intro {
            lines.push(intro.clone());
            lines.push(SEPARATOR.to_string());
        }

        if !self.highlights.trim().is_empty() {
            lines.push("## Release Highlights".to_string());
            lines.push("\nThis release provides the following features and improvements:\n".to_string());
            lines.push(self.highlights.to_string());
            lines.push(SEPARATOR.to_string());
        }

        if let Some(upstream) = &self.upstream {
            lines.push(upstream.clone());
            lines.push(SEPARATOR.to_string());
        }

        lines.push(self.title_line());
        lines.push(format!("*Released on: {}*", self.released_on.format("%Y-%m-%d")));
        lines.push("---".to_string());

        for category in Category::ORDERED {
            let mut entries = self
                .tickets
                .iter()
                .filter(|t| t.ticket.category() == category)
                .peekable();
            if entries.peek().is_none() {
                continue;
            }
            lines.push(category.heading().to_string());
            for entry in entries {
                let key = &entry.ticket.key;
                lines.push(format!("- [{key}]({}): {}", (self.browse_url)(key), entry.summary));
            }
            lines.push(String::new());
        }

        lines.join("\n")
    }

    fn title_line(&self) -> String {
        let version = self.version.trim();
        let mut title = if version.is_empty() {
            "# Release Notes".to_string()
        } else {
            format!("# Release {version}")
        };
        let codename = self.codename.trim();
        if !codename.is_empty() {
            title.push_str(&format!(" - \"{codename}\""));
        }
        title
    }
}
