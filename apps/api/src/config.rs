use anyhow::{bail, Context, Result};

use crate::backend::DEFAULT_BACKEND_URL;
use crate::llm_client::DEFAULT_MODEL;

const DEFAULT_DRAFT_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub anthropic_api_key: String,
    pub llm_model: String,
    /// Unset → drafts are kept in process memory.
    pub redis_url: Option<String>,
    pub draft_ttl_secs: u64,
    /// Unset → resume upload is disabled.
    pub storage: Option<StorageConfig>,
    pub port: u16,
    pub rust_log: String,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub endpoint: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub public_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            backend_url: optional_env("BACKEND_URL")
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            llm_model: optional_env("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            redis_url: optional_env("REDIS_URL"),
            draft_ttl_secs: optional_env("DRAFT_TTL_SECS")
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("DRAFT_TTL_SECS must be a whole number of seconds")?
                .unwrap_or(DEFAULT_DRAFT_TTL_SECS),
            storage: StorageConfig::from_env()?,
            port: optional_env("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

impl StorageConfig {
    /// All four S3 variables or none of them.
    fn from_env() -> Result<Option<Self>> {
        let vars = [
            "S3_BUCKET",
            "S3_ENDPOINT",
            "AWS_ACCESS_KEY_ID",
            "AWS_SECRET_ACCESS_KEY",
        ];
        let values: Vec<Option<String>> = vars.iter().map(|k| optional_env(k)).collect();

        match values.iter().filter(|v| v.is_some()).count() {
            0 => return Ok(None),
            n if n < vars.len() => {
                let missing: Vec<_> = vars
                    .iter()
                    .zip(&values)
                    .filter(|(_, v)| v.is_none())
                    .map(|(k, _)| *k)
                    .collect();
                bail!("Resume storage is partially configured; missing {}", missing.join(", "));
            }
            _ => {}
        }

        let bucket = require_env("S3_BUCKET")?;
        let endpoint = require_env("S3_ENDPOINT")?;
        let public_base_url = optional_env("S3_PUBLIC_BASE_URL").unwrap_or_else(|| {
            format!("{}/{}", endpoint.trim_end_matches('/'), bucket)
        });

        Ok(Some(StorageConfig {
            bucket,
            endpoint,
            access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            public_base_url,
        }))
    }
}

fn require_env(key: &str) -> Result<String> {
    optional_env(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Treats empty values like unset ones.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
