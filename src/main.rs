mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod server;
mod services;
#[cfg(test)]
mod testing;
mod workflow;

use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cmd::generate::{self as generate_cmd, GenerateArgs};
use crate::cmd::settings::{self as settings_cmd, SettingsArgs};
use crate::config::{AppConfig, StoreBackend};
use crate::context::AppContext;
use crate::domain::release::TrackerCredentials;
use crate::error::AppResult;
use crate::infra::file_store::JsonFileStore;
use crate::infra::jira::JiraClient;
use crate::infra::llm::GeminiClient;
use crate::infra::memory::MemoryStore;
use crate::infra::upstream::UpstreamScraper;
use crate::services::ReleaseStore;

#[derive(Parser)]
#[command(
    name = "relnotes",
    author,
    version,
    about = "Release notes generator for Percona Server for MongoDB"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server and web front end.
    Serve(ServeArgs),
    /// Manage the stored JIRA and Gemini settings.
    Settings(SettingsArgs),
    /// Generate release notes for a stored release and print them.
    Generate(GenerateArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Address to listen on; overrides RELNOTES_BIND and PORT.
    #[arg(short, long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    let store = open_store(&config.store)?;

    match cli.command {
        Commands::Settings(args) => settings_cmd::run(store.as_ref(), args.command).await,
        Commands::Generate(args) => {
            let context = build_context(config, store);
            let markdown = generate_cmd::run(&context, args).await?;
            println!("{markdown}");
            Ok(())
        }
        Commands::Serve(args) => {
            let context = build_context(config, store);
            let addr = args.bind.unwrap_or(context.config.bind);

            let settings = context.store.settings().await?;
            if TrackerCredentials::from_settings(&settings).is_err() {
                warn!("JIRA settings are incomplete; generation will fail until they are saved.");
            }
            if settings.gemini_api_key().is_none() {
                warn!("Gemini API key not configured; summaries will fall back to ticket titles.");
            }

            server::serve(context, addr).await
        }
    }
}

fn open_store(backend: &StoreBackend) -> AppResult<Arc<dyn ReleaseStore>> {
    match backend {
        StoreBackend::File(path) => {
            info!(path = %path.display(), "using file store");
            Ok(Arc::new(JsonFileStore::open(path)?))
        }
        StoreBackend::Memory => {
            info!("using in-memory store; data is lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

fn build_context(config: AppConfig, store: Arc<dyn ReleaseStore>) -> AppContext {
    let language_model = Arc::new(GeminiClient::new(
        config.gemini_endpoint.clone(),
        config.gemini_model.clone(),
    ));
    AppContext::new(
        config,
        store,
        Arc::new(JiraClient::new()),
        Arc::new(UpstreamScraper::new()),
        language_model,
    )
}
