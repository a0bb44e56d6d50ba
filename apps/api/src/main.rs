mod auth;
mod backend;
mod config;
mod errors;
mod llm_client;
mod models;
mod routes;
mod state;
mod storage;
mod suggestions;
mod table;
mod workspace;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::backend::BackendClient;
use crate::config::{Config, StorageConfig};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{ResumeStore, S3ResumeStore};
use crate::suggestions::LlmSkillSuggester;
use crate::workspace::pending::PendingSaves;
use crate::workspace::store::{DraftStore, InMemoryDraftStore, RedisDraftStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResumeRank v{}", env!("CARGO_PKG_VERSION"));

    // Scoring backend (auth + job descriptions)
    let backend = Arc::new(BackendClient::new(&config.backend_url)?);
    info!("Backend client initialized ({})", config.backend_url);

    // Draft store
    let drafts: Arc<dyn DraftStore> = match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str())?;
            info!("Draft store: Redis (TTL {}s)", config.draft_ttl_secs);
            Arc::new(RedisDraftStore::new(client, config.draft_ttl_secs))
        }
        None => {
            info!("Draft store: in-memory (REDIS_URL not set)");
            Arc::new(InMemoryDraftStore::new())
        }
    };

    // Resume storage
    let resumes: Option<Arc<dyn ResumeStore>> = match &config.storage {
        Some(storage) => {
            let s3 = build_s3_client(storage).await;
            info!("Resume storage: s3://{}", storage.bucket);
            Some(Arc::new(S3ResumeStore::new(
                s3,
                storage.bucket.clone(),
                storage.public_base_url.clone(),
            )))
        }
        None => {
            info!("Resume storage disabled (S3_* not set)");
            None
        }
    };

    // LLM-backed skill suggestions
    let llm = LlmClient::new(config.anthropic_api_key.clone(), config.llm_model.clone())?;
    info!("LLM client initialized (model: {})", llm.model());

    let state = AppState {
        auth: backend.clone(),
        jd: backend,
        suggester: Arc::new(LlmSkillSuggester::new(llm)),
        drafts,
        resumes,
        pending_saves: PendingSaves::new(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the UI has a fixed domain

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client for MinIO (local) or any S3-compatible endpoint.
async fn build_s3_client(storage: &StorageConfig) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &storage.access_key_id,
        &storage.secret_access_key,
        None,
        None,
        "resumerank-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&storage.endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
