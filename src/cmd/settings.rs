use std::io::{self, Write};

use clap::{Args, Subcommand};
use serde_json::Value;

use crate::domain::release::{GEMINI_TOKEN, JIRA_EMAIL, JIRA_TOKEN, JIRA_URL, Settings};
use crate::error::AppResult;
use crate::services::ReleaseStore;

#[derive(Args, Debug, Clone)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SettingsCommand {
    /// Prompt for the JIRA and Gemini settings and store them.
    Init,
    /// Show the stored settings (secrets masked).
    Show,
}

pub async fn run(store: &dyn ReleaseStore, command: SettingsCommand) -> AppResult<()> {
    match command {
        SettingsCommand::Init => run_init(store).await,
        SettingsCommand::Show => run_show(store).await,
    }
}

/// A settings key the CLI knows how to prompt for.
struct Field {
    key: &'static str,
    label: &'static str,
    secret: bool,
}

const FIELDS: [Field; 4] = [
    Field {
        key: JIRA_URL,
        label: "JIRA domain",
        secret: false,
    },
    Field {
        key: JIRA_EMAIL,
        label: "JIRA email",
        secret: false,
    },
    Field {
        key: JIRA_TOKEN,
        label: "JIRA API token",
        secret: true,
    },
    Field {
        key: GEMINI_TOKEN,
        label: "Gemini API key",
        secret: true,
    },
];

async fn run_init(store: &dyn ReleaseStore) -> AppResult<()> {
    let stored = store.settings().await?;
    let mut update = Settings::default();

    println!("Release notes settings. Enter keeps a value, '-' clears it.");
    for field in &FIELDS {
        match ask(field, stored.text(field.key))? {
            PromptAction::Keep => {}
            PromptAction::Clear => update.set(field.key, Value::Null),
            PromptAction::Set(value) => update.set(field.key, Value::String(value)),
        }
    }

    store.save_settings(update).await?;
    println!("Settings saved.");
    Ok(())
}

async fn run_show(store: &dyn ReleaseStore) -> AppResult<()> {
    let settings = store.settings().await?;

    for field in &FIELDS {
        println!("{}: {}", field.label, describe(settings.get(field.key), field.secret));
    }
    let known = |key: &str| FIELDS.iter().any(|field| field.key == key);
    for (key, value) in settings.iter().filter(|(key, _)| !known(key.as_str())) {
        println!("{key}: {}", describe(Some(value), false));
    }

    Ok(())
}

fn ask(field: &Field, current: Option<&str>) -> AppResult<PromptAction> {
    let current = match current.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) if field.secret => format!(" [{}]", mask_secret(value)),
        Some(value) => format!(" [{value}]"),
        None => String::new(),
    };
    print!("{}{current}: ", field.label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(PromptAction::parse(&input))
}

/// How a stored value reads in `settings show`.
fn describe(value: Option<&Value>, secret: bool) -> String {
    match value {
        None => "<not set>".to_string(),
        Some(Value::Null) => "<cleared>".to_string(),
        Some(Value::String(text)) if text.trim().is_empty() => "<not set>".to_string(),
        Some(Value::String(text)) if secret => mask_secret(text),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn mask_secret(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() > 6 {
        let head: String = chars[..3].iter().collect();
        let tail: String = chars[chars.len() - 3..].iter().collect();
        format!("{head}***{tail}")
    } else {
        "***".to_string()
    }
}

#[derive(Debug, PartialEq, Eq)]
enum PromptAction {
    Keep,
    Clear,
    Set(String),
}

impl PromptAction {
    fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            PromptAction::Keep
        } else if trimmed == "-" {
            PromptAction::Clear
        } else {
            PromptAction::Set(trimmed.to_string())
        }
    }
}
