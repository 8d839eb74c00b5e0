#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryMode {
    Ticket,
    UpstreamBug,
}

impl SummaryMode {
    fn intro(&self) -> &'static str {
        match self {
            SummaryMode::Ticket => {
                "Generate a concise, user-friendly summary for a software release note based on the following JIRA ticket details. The summary should be a single, clear sentence explaining the change from an end-user's perspective."
            }
            SummaryMode::UpstreamBug => {
                "Generate a concise, user-friendly summary for an upstream bug fix. The summary should be a single, clear sentence explaining the fix from an end-user's perspective."
            }
        }
    }
}

/// Builds the single-sentence summary prompt sent to the language model.
pub fn summary_prompt(mode: SummaryMode, title: &str, description: &str) -> String {
    format!(
        "{intro} Do not start with phrases like \"This ticket\" or \"The user can now\". Just state the change directly.\n\
         Original JIRA Title: \"{title}\"\n\
         JIRA Description: \"{description}\"\n\
         Release Note Summary:",
        intro = mode.intro(),
    )
}
