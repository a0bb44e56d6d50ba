//! Client for the scoring backend: authentication and job-description
//! persistence. Handlers depend on the `AuthApi` / `JdApi` traits so the
//! HTTP client can be swapped out in tests.
//!
//! Calls are never retried. A failed request surfaces the backend's own
//! `detail`/`message` text when it sent one.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod types;
pub mod wire;

use crate::models::Shortlist;
use types::{
    JdPayload, LoginRequest, MessageResponse, Profile, Session, SignupInitRequest,
    SubmitResponse, VerifySignupRequest,
};
use wire::DecodeError;

pub const DEFAULT_BACKEND_URL: &str = "https://backend-f2yv.onrender.com";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Unauthorized(String),

    #[error("Unexpected response from backend: {0}")]
    Decode(#[from] DecodeError),
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn signup_init(&self, request: &SignupInitRequest) -> Result<MessageResponse, BackendError>;
    async fn verify_signup(&self, request: &VerifySignupRequest) -> Result<MessageResponse, BackendError>;
    async fn login(&self, request: &LoginRequest) -> Result<Session, BackendError>;
    async fn profile(&self, token: &str) -> Result<Profile, BackendError>;
}

#[async_trait]
pub trait JdApi: Send + Sync {
    async fn submit(&self, token: &str, payload: &JdPayload) -> Result<SubmitResponse, BackendError>;
    async fn update(
        &self,
        token: &str,
        jd_id: &str,
        payload: &JdPayload,
    ) -> Result<MessageResponse, BackendError>;
    async fn get(&self, token: &str, jd_id: &str) -> Result<Shortlist, BackendError>;
    async fn history(&self, token: &str, skip: u32, limit: u32) -> Result<Vec<Shortlist>, BackendError>;
    async fn delete(&self, token: &str, jd_id: &str) -> Result<MessageResponse, BackendError>;
}

#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a request and returns the successful body as text.
    async fn send_text(&self, request: RequestBuilder) -> Result<String, BackendError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            let message = error_message(status, &body);
            warn!("Backend returned {status}: {message}");
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    BackendError::Unauthorized(message)
                }
                _ => BackendError::Api {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        debug!("Backend call succeeded ({status}, {} bytes)", body.len());
        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, BackendError> {
        let body = self.send_text(request).await?;
        serde_json::from_str(&body).map_err(|e| BackendError::Decode(DecodeError::Json(e)))
    }
}

#[async_trait]
impl AuthApi for BackendClient {
    async fn signup_init(&self, request: &SignupInitRequest) -> Result<MessageResponse, BackendError> {
        self.send_json(self.client.post(self.url("/auth/signup/init")).json(request))
            .await
    }

    async fn verify_signup(&self, request: &VerifySignupRequest) -> Result<MessageResponse, BackendError> {
        self.send_json(self.client.post(self.url("/auth/signup/verify")).json(request))
            .await
    }

    async fn login(&self, request: &LoginRequest) -> Result<Session, BackendError> {
        self.send_json(self.client.post(self.url("/auth/login")).json(request))
            .await
    }

    async fn profile(&self, token: &str) -> Result<Profile, BackendError> {
        self.send_json(self.client.get(self.url("/auth/me")).bearer_auth(token))
            .await
    }
}

#[async_trait]
impl JdApi for BackendClient {
    async fn submit(&self, token: &str, payload: &JdPayload) -> Result<SubmitResponse, BackendError> {
        self.send_json(
            self.client
                .post(self.url("/jd/submit"))
                .bearer_auth(token)
                .json(payload),
        )
        .await
    }

    async fn update(
        &self,
        token: &str,
        jd_id: &str,
        payload: &JdPayload,
    ) -> Result<MessageResponse, BackendError> {
        self.send_json(
            self.client
                .put(self.url(&format!("/jd/update/{jd_id}")))
                .bearer_auth(token)
                .json(payload),
        )
        .await
    }

    async fn get(&self, token: &str, jd_id: &str) -> Result<Shortlist, BackendError> {
        let body = self
            .send_text(self.client.get(self.url(&format!("/jd/{jd_id}"))).bearer_auth(token))
            .await?;
        Ok(wire::decode_record(&body)?)
    }

    async fn history(&self, token: &str, skip: u32, limit: u32) -> Result<Vec<Shortlist>, BackendError> {
        let body = self
            .send_text(
                self.client
                    .get(self.url("/jd/history"))
                    .query(&[("skip", skip), ("limit", limit)])
                    .bearer_auth(token),
            )
            .await?;
        Ok(wire::decode_history(&body)?)
    }

    async fn delete(&self, token: &str, jd_id: &str) -> Result<MessageResponse, BackendError> {
        self.send_json(
            self.client
                .delete(self.url(&format!("/jd/delete/{jd_id}")))
                .bearer_auth(token),
        )
        .await
    }
}

/// Human-readable message for a failed call: `detail`, then `message`, then
/// the JSON body itself, then the HTTP reason phrase.
fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(json) => ["detail", "message"]
            .iter()
            .find_map(|key| match json.get(*key) {
                Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
                Some(Value::String(_)) | Some(Value::Null) | None => None,
                Some(other) => Some(other.to_string()),
            })
            .unwrap_or_else(|| json.to_string()),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Unknown error occurred")
            .to_string(),
    }
}
