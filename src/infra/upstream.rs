use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::info;

use crate::domain::upstream::UpstreamBug;
use crate::error::{AppError, AppResult};
use crate::services::UpstreamTrackerService;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const TITLE_SELECTOR: &str = "div#summary-val";
const DESCRIPTION_SELECTOR: &str = "div#descriptionmodule";

/// Scrapes bug pages of the upstream JIRA (jira.mongodb.org).
pub struct UpstreamScraper {
    http: Client,
}

impl UpstreamScraper {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }
}

impl Default for UpstreamScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpstreamTrackerService for UpstreamScraper {
    async fn fetch_bug(&self, url: &str) -> AppResult<UpstreamBug> {
        let response = self
            .http
            .get(url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|err| {
                AppError::UpstreamTracker(format!("could not scrape {url}: {}", err.without_url()))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamTracker(format!(
                "{url} responded with {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|err| {
                AppError::UpstreamTracker(format!("could not read {url}: {}", err.without_url()))
            })?;

        let bug = parse_bug_page(&body).ok_or_else(|| {
            AppError::UpstreamTracker(format!(
                "could not find title or description elements on {url}"
            ))
        })?;

        info!(url, "scraped upstream bug");
        Ok(bug)
    }
}

/// Pulls the summary and description regions out of a bug page.
fn parse_bug_page(html: &str) -> Option<UpstreamBug> {
    let document = Html::parse_document(html);
    let title = first_match(&document, TITLE_SELECTOR)?;
    let description = first_match(&document, DESCRIPTION_SELECTOR)?;

    Some(UpstreamBug {
        title: stripped_text(title, ""),
        description: stripped_text(description, "\n"),
    })
}

fn first_match<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    document.select(&selector).next()
}

/// Text nodes trimmed, blanks dropped, joined with `separator`.
fn stripped_text(element: ElementRef<'_>, separator: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}
