/// Title and description scraped from an upstream bug page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamBug {
    pub title: String,
    pub description: String,
}

/// An upstream bug ready to be listed under "Upstream Improvements".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizedBug {
    pub ticket_id: String,
    pub url: String,
    pub summary: String,
}

impl SummarizedBug {
    pub fn markdown_line(&self) -> String {
        format!("* [{}]({}) - {}", self.ticket_id, self.url, self.summary)
    }
}

/// Short identifier of an upstream bug: the last non-empty path segment.
pub fn ticket_id_from_url(url: &str) -> &str {
    url.trim_end_matches('/').rsplit('/').next().unwrap_or(url)
}
