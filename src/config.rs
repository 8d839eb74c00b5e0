use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};
use crate::infra::file_store::STORE_FILE_NAME;
use crate::infra::llm::{DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: SocketAddr,
    pub store: StoreBackend,
    pub gemini_endpoint: String,
    pub gemini_model: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    File(PathBuf),
    Memory,
}

impl AppConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind = match var("RELNOTES_BIND") {
            Some(addr) => addr.parse().map_err(|err| {
                AppError::Configuration(format!("invalid RELNOTES_BIND '{addr}': {err}"))
            })?,
            None => {
                let port = match var("PORT") {
                    Some(port) => port.parse::<u16>().map_err(|err| {
                        AppError::Configuration(format!("invalid PORT '{port}': {err}"))
                    })?,
                    None => DEFAULT_PORT,
                };
                SocketAddr::new(
                    DEFAULT_HOST
                        .parse()
                        .map_err(|err| AppError::Configuration(format!("invalid host: {err}")))?,
                    port,
                )
            }
        };

        let data_dir = var("RELNOTES_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let store = match var("RELNOTES_STORE").map(|v| v.to_lowercase()).as_deref() {
            None | Some("file") => StoreBackend::File(data_dir.join(STORE_FILE_NAME)),
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(AppError::Configuration(format!(
                    "unknown RELNOTES_STORE '{other}', expected 'file' or 'memory'"
                )));
            }
        };

        Ok(Self {
            bind,
            store,
            gemini_endpoint: var("RELNOTES_GEMINI_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string()),
            gemini_model: var("RELNOTES_GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
        })
    }
}
