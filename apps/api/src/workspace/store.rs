//! Persistence for in-progress workspaces.
//!
//! Drafts are stored as a versioned JSON envelope. A stored draft with any
//! other schema version is refused rather than migrated.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::workspace::{Workspace, WorkspaceSummary};

pub const SCHEMA_VERSION: u32 = 2;

const DRAFT_KEY_PREFIX: &str = "resumerank:draft:";
const DRAFT_INDEX_PREFIX: &str = "resumerank:drafts:";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("draft schema version {found} is not supported (expected {expected})")]
    SchemaMismatch { found: u32, expected: u32 },

    #[error("draft encoding error: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    schema_version: u32,
    workspace: &'a Workspace,
}

#[derive(Deserialize)]
struct Header {
    schema_version: u32,
}

#[derive(Deserialize)]
struct Envelope {
    workspace: Workspace,
}

pub fn encode(workspace: &Workspace) -> Result<String, StoreError> {
    Ok(serde_json::to_string(&EnvelopeRef {
        schema_version: SCHEMA_VERSION,
        workspace,
    })?)
}

/// Checks the schema version before touching the payload so an old or newer
/// draft reports a version mismatch instead of a field error.
pub fn decode(raw: &str) -> Result<Workspace, StoreError> {
    let header: Header = serde_json::from_str(raw)?;
    if header.schema_version != SCHEMA_VERSION {
        return Err(StoreError::SchemaMismatch {
            found: header.schema_version,
            expected: SCHEMA_VERSION,
        });
    }
    let envelope: Envelope = serde_json::from_str(raw)?;
    Ok(envelope.workspace)
}

/// Key-value store for workspaces. Carried in `AppState` as `Arc<dyn DraftStore>`.
#[async_trait]
pub trait DraftStore: Send + Sync {
    async fn load(&self, id: Uuid) -> Result<Option<Workspace>, StoreError>;
    async fn save(&self, workspace: &Workspace) -> Result<(), StoreError>;
    /// Returns whether a draft was removed.
    async fn delete(&self, owner: &str, id: Uuid) -> Result<bool, StoreError>;
    /// Drafts created by `owner`, most recently modified first.
    async fn list(&self, owner: &str) -> Result<Vec<WorkspaceSummary>, StoreError>;
}

/// Process-local store. Holds encoded envelopes, so it exercises the same
/// encode/decode path as Redis.
#[derive(Default)]
pub struct InMemoryDraftStore {
    drafts: RwLock<HashMap<Uuid, String>>,
}

impl InMemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DraftStore for InMemoryDraftStore {
    async fn load(&self, id: Uuid) -> Result<Option<Workspace>, StoreError> {
        self.drafts
            .read()
            .await
            .get(&id)
            .map(|raw| decode(raw))
            .transpose()
    }

    async fn save(&self, workspace: &Workspace) -> Result<(), StoreError> {
        let raw = encode(workspace)?;
        self.drafts.write().await.insert(workspace.id, raw);
        Ok(())
    }

    async fn delete(&self, owner: &str, id: Uuid) -> Result<bool, StoreError> {
        let mut drafts = self.drafts.write().await;
        match drafts.get(&id).map(|raw| decode(raw)).transpose()? {
            Some(ws) if ws.is_owned_by(owner) => Ok(drafts.remove(&id).is_some()),
            _ => Ok(false),
        }
    }

    async fn list(&self, owner: &str) -> Result<Vec<WorkspaceSummary>, StoreError> {
        let drafts = self.drafts.read().await;
        let mut summaries = Vec::new();
        for raw in drafts.values() {
            let ws = decode(raw)?;
            if ws.is_owned_by(owner) {
                summaries.push(ws.summary());
            }
        }
        summaries.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
        Ok(summaries)
    }
}

/// Redis-backed store. Each draft lives under its own key with a TTL; one set
/// per owner indexes the ids for listing.
pub struct RedisDraftStore {
    client: redis::Client,
    ttl_secs: u64,
}

impl RedisDraftStore {
    pub fn new(client: redis::Client, ttl_secs: u64) -> Self {
        Self { client, ttl_secs }
    }

    fn key(id: impl fmt::Display) -> String {
        format!("{DRAFT_KEY_PREFIX}{id}")
    }

    fn index_key(owner: &str) -> String {
        format!("{DRAFT_INDEX_PREFIX}{owner}")
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, StoreError> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }
}

#[async_trait]
impl DraftStore for RedisDraftStore {
    async fn load(&self, id: Uuid) -> Result<Option<Workspace>, StoreError> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = redis::cmd("GET")
            .arg(Self::key(id))
            .query_async(&mut conn)
            .await?;
        raw.as_deref().map(decode).transpose()
    }

    async fn save(&self, workspace: &Workspace) -> Result<(), StoreError> {
        let raw = encode(workspace)?;
        let mut conn = self.connection().await?;
        redis::pipe()
            .atomic()
            .cmd("SET")
            .arg(Self::key(workspace.id))
            .arg(raw)
            .arg("EX")
            .arg(self.ttl_secs)
            .ignore()
            .cmd("SADD")
            .arg(Self::index_key(&workspace.owner))
            .arg(workspace.id.to_string())
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await?;
        debug!("Saved draft {} ({}s TTL)", workspace.id, self.ttl_secs);
        Ok(())
    }

    async fn delete(&self, owner: &str, id: Uuid) -> Result<bool, StoreError> {
        let mut conn = self.connection().await?;
        let member: bool = redis::cmd("SISMEMBER")
            .arg(Self::index_key(owner))
            .arg(id.to_string())
            .query_async(&mut conn)
            .await?;
        if !member {
            return Ok(false);
        }
        let (removed, _): (i64, i64) = redis::pipe()
            .atomic()
            .cmd("DEL")
            .arg(Self::key(id))
            .cmd("SREM")
            .arg(Self::index_key(owner))
            .arg(id.to_string())
            .query_async(&mut conn)
            .await?;
        Ok(removed > 0)
    }

    async fn list(&self, owner: &str) -> Result<Vec<WorkspaceSummary>, StoreError> {
        let index = Self::index_key(owner);
        let mut conn = self.connection().await?;
        let ids: Vec<String> = redis::cmd("SMEMBERS")
            .arg(&index)
            .query_async(&mut conn)
            .await?;

        let mut summaries = Vec::with_capacity(ids.len());
        for id in ids {
            let raw: Option<String> = redis::cmd("GET")
                .arg(Self::key(&id))
                .query_async(&mut conn)
                .await?;
            match raw {
                Some(raw) => match decode(&raw) {
                    Ok(ws) => summaries.push(ws.summary()),
                    Err(e) => warn!("Skipping unreadable draft {id}: {e}"),
                },
                None => {
                    // TTL expired; drop the dangling index entry.
                    redis::cmd("SREM")
                        .arg(&index)
                        .arg(&id)
                        .query_async::<_, ()>(&mut conn)
                        .await?;
                    info!("Pruned expired draft {id} from index");
                }
            }
        }
        summaries.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
        Ok(summaries)
    }
}
