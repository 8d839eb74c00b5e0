use tracing::{error, info};

use crate::domain::prompt::{SummaryMode, summary_prompt};
use crate::services::LanguageModelService;

/// One-sentence release-note summary for a ticket or upstream bug.
///
/// Never fails: a blank description skips the model entirely, and any model
/// error or empty answer falls back to `title`.
pub async fn summarize(
    language_model: &dyn LanguageModelService,
    api_key: Option<&str>,
    mode: SummaryMode,
    title: &str,
    description: &str,
) -> String {
    if description.trim().is_empty() {
        return title.to_string();
    }

    let prompt = summary_prompt(mode, title, description);
    match language_model.complete(api_key, &prompt).await {
        Ok(answer) => {
            let answer = answer.trim();
            info!(title = %preview(title), "generated summary");
            if answer.is_empty() {
                title.to_string()
            } else {
                answer.to_string()
            }
        }
        Err(err) => {
            error!(title = %preview(title), error = %err, "summary generation failed");
            title.to_string()
        }
    }
}

fn preview(title: &str) -> String {
    title.chars().take(30).collect()
}
