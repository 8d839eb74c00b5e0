use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::context::AppContext;
use crate::domain::notes::{ReleaseNotes, intro_paragraph, ticket_keys, unique_entries, upstream_section};
use crate::domain::prompt::SummaryMode;
use crate::domain::release::{ReleaseDraft, TrackerCredentials};
use crate::domain::ticket::{SummarizedTicket, Ticket};
use crate::domain::upstream::{SummarizedBug, ticket_id_from_url};
use crate::error::{AppError, AppResult};
use crate::workflow::summary::summarize;

/// Builds the release notes for `release_id`, stores them on the release and
/// returns the markdown.
pub async fn generate_release_notes(ctx: &AppContext, release_id: &str) -> AppResult<String> {
    generate_release_notes_on(ctx, release_id, Local::now().date_naive()).await
}

pub async fn generate_release_notes_on(
    ctx: &AppContext,
    release_id: &str,
    today: NaiveDate,
) -> AppResult<String> {
    info!(release_id, "starting release notes generation");

    let release = ctx
        .store
        .release(release_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Release not found".to_string()))?;
    let settings = ctx.store.settings().await?;
    let credentials = TrackerCredentials::from_settings(&settings)?;
    let api_key = settings.gemini_api_key();

    let intro = intro_paragraph(&release.upstream_urls, &release.version, today);
    let bugs = summarize_upstream_bugs(ctx, &release.upstream_bug_urls, api_key).await;
    let upstream = upstream_section(&bugs, &release.upstream_urls);

    let keys = ticket_keys(&release.jira_tickets);
    let tickets = summarize_tickets(ctx, &credentials, &keys, api_key).await;
    if tickets.is_empty() && !keys.is_empty() {
        warn!(release_id, "could not fetch data for any of the supplied tickets");
        return Err(AppError::NoTicketData);
    }

    let browse_url = |key: &str| credentials.browse_url(key);
    let markdown = ReleaseNotes {
        intro,
        highlights: &release.release_highlights,
        upstream,
        version: &release.version,
        codename: &release.codename,
        released_on: today,
        tickets: &tickets,
        browse_url: &browse_url,
    }
    .render();

    let update = ReleaseDraft {
        generated_markdown: Some(markdown.clone()),
        ..ReleaseDraft::default()
    };
    ctx.store
        .update_release(release_id, update)
        .await?
        .ok_or_else(|| AppError::NotFound("Release not found".to_string()))?;

    info!(release_id, "generated and saved release notes");
    Ok(markdown)
}

async fn summarize_tickets(
    ctx: &AppContext,
    credentials: &TrackerCredentials,
    keys: &[String],
    api_key: Option<&str>,
) -> Vec<SummarizedTicket> {
    info!(count = keys.len(), "processing Jira tickets");

    let mut summarized = Vec::with_capacity(keys.len());
    for key in keys {
        let issue = match ctx.issue_tracker.fetch_issue(credentials, key).await {
            Ok(issue) => issue,
            Err(err) => {
                warn!(key = %key, error = %err, "skipping ticket");
                continue;
            }
        };

        let ticket = Ticket::from_issue(key, &issue);
        let summary = summarize(
            ctx.language_model.as_ref(),
            api_key,
            SummaryMode::Ticket,
            &ticket.title,
            &ticket.description,
        )
        .await;
        info!(key = %ticket.key, category = ticket.category().as_str(), "ticket summarized");
        summarized.push(SummarizedTicket { ticket, summary });
    }
    summarized
}

async fn summarize_upstream_bugs(
    ctx: &AppContext,
    bug_urls: &str,
    api_key: Option<&str>,
) -> Vec<SummarizedBug> {
    let urls = unique_entries(bug_urls);
    if urls.is_empty() {
        return Vec::new();
    }
    info!(count = urls.len(), "processing upstream bug URLs");

    let mut summarized = Vec::with_capacity(urls.len());
    for url in urls {
        let bug = match ctx.upstream_tracker.fetch_bug(&url).await {
            Ok(bug) => bug,
            Err(err) => {
                warn!(url = %url, error = %err, "skipping upstream bug");
                continue;
            }
        };

        let summary = summarize(
            ctx.language_model.as_ref(),
            api_key,
            SummaryMode::UpstreamBug,
            &bug.title,
            &bug.description,
        )
        .await;
        summarized.push(SummarizedBug {
            ticket_id: ticket_id_from_url(&url).to_string(),
            url,
            summary,
        });
    }
    summarized
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::testing::{
        StubIssueTracker, StubLanguageModel, StubUpstreamTracker, context, create_release,
        save_tracker_settings,
    };

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    #[tokio::test]
    async fn renders_and_stores_notes_for_a_bug_ticket() {
        let tracker = Arc::new(StubIssueTracker::default().with_issue(
            "ABC-1",
            json!({ "fields": { "summary": "Fix crash", "issuetype": { "name": "Bug" } } }),
        ));
        let model = Arc::new(StubLanguageModel::answering("unused"));
        let ctx = context(tracker.clone(), Arc::new(StubUpstreamTracker::default()), model.clone());
        save_tracker_settings(ctx.store.as_ref()).await;
        let id = create_release(ctx.store.as_ref(), json!({ "version": "1.2.3", "jiraTickets": "ABC-1" })).await;

        let markdown = generate_release_notes_on(&ctx, &id, today()).await.unwrap();

        assert!(markdown.contains("# Release 1.2.3"));
        assert!(markdown.contains("*Released on: 2025-06-02*"));
        assert!(markdown.contains("## 🐛 Bug Fixes"));
        assert!(markdown.contains("- [ABC-1](https://jira.example.com/browse/ABC-1): Fix crash"));
        assert_eq!(model.calls(), 0);

        let stored = ctx.store.release(&id).await.unwrap().unwrap();
        assert_eq!(stored.generated_markdown.as_deref(), Some(markdown.as_str()));
    }

    #[tokio::test]
    async fn fetches_normalized_keys_and_skips_failures() {
        let tracker = Arc::new(
            StubIssueTracker::default()
                .with_issue(
                    "ABC-2",
                    json!({
                        "key": "ABC-2",
                        "fields": {
                            "summary": "Audit filters",
                            "issuetype": { "name": "Story" },
                            "description": { "content": [{ "type": "text", "text": "Filter audit events" }] }
                        }
                    }),
                ),
        );
        let model = Arc::new(StubLanguageModel::answering("Added audit log filtering."));
        let ctx = context(tracker.clone(), Arc::new(StubUpstreamTracker::default()), model.clone());
        save_tracker_settings(ctx.store.as_ref()).await;
        let id = create_release(ctx.store.as_ref(), json!({ "jiraTickets": "abc-2, ABC-1,,abc-2" })).await;

        let markdown = generate_release_notes_on(&ctx, &id, today()).await.unwrap();

        assert_eq!(tracker.requested(), vec!["ABC-1", "ABC-2"]);
        assert!(markdown.starts_with("# Release Notes\n"));
        assert!(markdown.contains("## ✨ New Features & Enhancements\n- [ABC-2](https://jira.example.com/browse/ABC-2): Added audit log filtering."));
        assert!(!markdown.contains("ABC-1"));
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn all_fetches_failing_is_an_error() {
        let ctx = context(
            Arc::new(StubIssueTracker::default()),
            Arc::new(StubUpstreamTracker::default()),
            Arc::new(StubLanguageModel::answering("x")),
        );
        save_tracker_settings(ctx.store.as_ref()).await;
        let id = create_release(ctx.store.as_ref(), json!({ "jiraTickets": "ABC-9" })).await;

        let err = generate_release_notes_on(&ctx, &id, today()).await.unwrap_err();
        assert!(matches!(err, AppError::NoTicketData));
        let stored = ctx.store.release(&id).await.unwrap().unwrap();
        assert!(stored.generated_markdown.is_none());
    }

    #[tokio::test]
    async fn release_without_tickets_still_renders() {
        let ctx = context(
            Arc::new(StubIssueTracker::default()),
            Arc::new(StubUpstreamTracker::default()),
            Arc::new(StubLanguageModel::answering("x")),
        );
        save_tracker_settings(ctx.store.as_ref()).await;
        let id = create_release(
            ctx.store.as_ref(),
            json!({ "version": "7.0.14-8", "codename": "Kestrel", "releaseHighlights": "Faster backups." }),
        )
        .await;

        let markdown = generate_release_notes_on(&ctx, &id, today()).await.unwrap();
        assert!(markdown.starts_with("## Release Highlights\n"));
        assert!(markdown.contains("# Release 7.0.14-8 - \"Kestrel\""));
    }

    #[tokio::test]
    async fn incomplete_settings_are_rejected() {
        let tracker = Arc::new(StubIssueTracker::default());
        let ctx = context(
            tracker.clone(),
            Arc::new(StubUpstreamTracker::default()),
            Arc::new(StubLanguageModel::answering("x")),
        );
        let id = create_release(ctx.store.as_ref(), json!({ "jiraTickets": "ABC-1" })).await;

        let err = generate_release_notes_on(&ctx, &id, today()).await.unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert!(tracker.requested().is_empty());
    }

    #[tokio::test]
    async fn unknown_release_is_not_found() {
        let ctx = context(
            Arc::new(StubIssueTracker::default()),
            Arc::new(StubUpstreamTracker::default()),
            Arc::new(StubLanguageModel::answering("x")),
        );
        let err = generate_release_notes_on(&ctx, "nope", today()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn includes_intro_and_upstream_improvements() {
        let bug_url = "https://jira.mongodb.org/browse/SERVER-90001";
        let upstream = Arc::new(
            StubUpstreamTracker::default().with_bug(bug_url, "Secondary crash", "Initial sync aborts."),
        );
        let model = Arc::new(StubLanguageModel::answering("Fixed a secondary crash during initial sync."));
        let ctx = context(Arc::new(StubIssueTracker::default()), upstream, model.clone());
        save_tracker_settings(ctx.store.as_ref()).await;
        let id = create_release(
            ctx.store.as_ref(),
            json!({
                "version": "v7.0.14-8",
                "upstreamUrls": "https://www.mongodb.com/docs/manual/release-notes/7.0/#7.0.14---sep-2024",
                "upstreamBugUrls": format!("{bug_url}\nhttps://jira.mongodb.org/browse/SERVER-404")
            }),
        )
        .await;

        let markdown = generate_release_notes_on(&ctx, &id, today()).await.unwrap();

        assert!(markdown.starts_with("Percona Server for MongoDB 7.0.14-8 (Jun 02, 2025)\n"));
        assert!(markdown.contains(
            "* [SERVER-90001](https://jira.mongodb.org/browse/SERVER-90001) - Fixed a secondary crash during initial sync."
        ));
        assert!(!markdown.contains("SERVER-404"));
        assert!(markdown.contains("* [MongoDB 7.0.14 Community Edition]("));
        assert!(model.last_prompt().unwrap().starts_with("Generate a concise, user-friendly summary for an upstream bug fix."));

        let intro_at = markdown.find("Percona Server").unwrap();
        let upstream_at = markdown.find("### Upstream Improvements").unwrap();
        let title_at = markdown.find("# Release v7.0.14-8").unwrap();
        assert!(intro_at < upstream_at && upstream_at < title_at);
    }
}
