pub mod health;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::auth::handlers as auth;
use crate::state::AppState;
use crate::storage::handlers as storage;
use crate::suggestions::handlers as suggestions;
use crate::workspace::handlers as workspace;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth proxy
        .route("/api/v1/auth/signup/init", post(auth::handle_signup_init))
        .route("/api/v1/auth/signup/verify", post(auth::handle_verify_signup))
        .route("/api/v1/auth/login", post(auth::handle_login))
        .route("/api/v1/auth/me", get(auth::handle_profile))
        // Saved shortlists
        .route("/api/v1/shortlists", get(workspace::handle_dashboard))
        .route(
            "/api/v1/shortlists/:jd_id",
            delete(workspace::handle_delete_shortlist),
        )
        // Workspaces
        .route("/api/v1/workspaces", post(workspace::handle_create))
        .route(
            "/api/v1/workspaces/:id",
            get(workspace::handle_get).delete(workspace::handle_discard),
        )
        .route(
            "/api/v1/workspaces/:id/details",
            patch(workspace::handle_update_details),
        )
        .route(
            "/api/v1/workspaces/:id/parameters",
            post(workspace::handle_stage_add),
        )
        .route(
            "/api/v1/workspaces/:id/parameters/:param_id",
            delete(workspace::handle_stage_remove),
        )
        .route(
            "/api/v1/workspaces/:id/confirm",
            post(workspace::handle_confirm),
        )
        .route(
            "/api/v1/workspaces/:id/refresh",
            post(workspace::handle_refresh),
        )
        .route(
            "/api/v1/workspaces/:id/filters",
            put(workspace::handle_update_filters),
        )
        .route("/api/v1/workspaces/:id/sort", post(workspace::handle_sort))
        .route(
            "/api/v1/workspaces/:id/candidates",
            get(workspace::handle_candidates),
        )
        .route(
            "/api/v1/workspaces/:id/export",
            get(workspace::handle_export),
        )
        // AI assistance
        .route("/api/v1/suggestions", post(suggestions::handle_suggest))
        // Resume upload
        .route("/api/v1/resumes", post(storage::handle_upload))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use chrono::Utc;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::backend::types::{
        JdPayload, LoginRequest, MessageResponse, Profile, Session, SignupInitRequest,
        SubmitResponse, VerifySignupRequest,
    };
    use crate::backend::{AuthApi, BackendError, JdApi};
    use crate::llm_client::LlmError;
    use crate::models::{Candidate, Shortlist};
    use crate::suggestions::SkillSuggester;
    use crate::workspace::pending::PendingSaves;
    use crate::workspace::store::{DraftStore, InMemoryDraftStore};
    use crate::workspace::Workspace;

    const ADA: &str = "tok-ada";
    const BOB: &str = "tok-bob";

    struct FakeBackend {
        drafts: Arc<InMemoryDraftStore>,
        submitted: Mutex<Vec<JdPayload>>,
        updated: Mutex<Vec<(String, JdPayload)>>,
        fail_submit: bool,
        /// Stages a skill on Ada's draft while a submit is in flight.
        edit_during_submit: bool,
    }

    impl FakeBackend {
        fn new() -> Self {
            Self {
                drafts: Arc::new(InMemoryDraftStore::new()),
                submitted: Mutex::new(Vec::new()),
                updated: Mutex::new(Vec::new()),
                fail_submit: false,
                edit_during_submit: false,
            }
        }
    }

    fn candidate(id: &str, name: &str, overall: f64, skills: &[(&str, u8)]) -> Candidate {
        Candidate {
            id: id.to_string(),
            name: name.to_string(),
            phone: "555".to_string(),
            email: format!("{}@x.com", name.to_lowercase()),
            resume_url: format!("https://r/{id}.pdf"),
            skills: skills
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<BTreeMap<_, _>>(),
            overall_score: overall,
            breakdown: None,
        }
    }

    #[async_trait]
    impl AuthApi for FakeBackend {
        async fn signup_init(&self, _: &SignupInitRequest) -> Result<MessageResponse, BackendError> {
            Ok(MessageResponse {
                message: "OTP sent".to_string(),
            })
        }

        async fn verify_signup(&self, _: &VerifySignupRequest) -> Result<MessageResponse, BackendError> {
            Ok(MessageResponse {
                message: "Verified".to_string(),
            })
        }

        async fn login(&self, request: &LoginRequest) -> Result<Session, BackendError> {
            if request.password != "secret" {
                return Err(BackendError::Unauthorized("Invalid credentials".to_string()));
            }
            Ok(Session {
                token: ADA.to_string(),
                user_id: "u-ada".to_string(),
                name: "Ada".to_string(),
            })
        }

        async fn profile(&self, token: &str) -> Result<Profile, BackendError> {
            let (user_id, name) = match token {
                ADA => ("u-ada", "Ada"),
                BOB => ("u-bob", "Bob"),
                _ => return Err(BackendError::Unauthorized("Invalid token".to_string())),
            };
            Ok(Profile {
                user_id: user_id.to_string(),
                name: name.to_string(),
                email: format!("{}@x.com", name.to_lowercase()),
            })
        }
    }

    #[async_trait]
    impl JdApi for FakeBackend {
        async fn submit(&self, _: &str, payload: &JdPayload) -> Result<SubmitResponse, BackendError> {
            if self.fail_submit {
                return Err(BackendError::Api {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            if self.edit_during_submit {
                let drafts = self.drafts.list("u-ada").await.unwrap();
                let mut ws = self.drafts.load(drafts[0].workspace_id).await.unwrap().unwrap();
                ws.stage_add("Go", 4).unwrap();
                self.drafts.save(&ws).await.unwrap();
            }
            self.submitted.lock().unwrap().push(payload.clone());
            Ok(SubmitResponse {
                message: "Saved".to_string(),
                jd_id: Some("jd-1".to_string()),
            })
        }

        async fn update(&self, _: &str, jd_id: &str, payload: &JdPayload) -> Result<MessageResponse, BackendError> {
            self.updated
                .lock()
                .unwrap()
                .push((jd_id.to_string(), payload.clone()));
            Ok(MessageResponse {
                message: "Updated".to_string(),
            })
        }

        async fn get(&self, _: &str, jd_id: &str) -> Result<Shortlist, BackendError> {
            Ok(Shortlist {
                id: Some(jd_id.to_string()),
                title: "Backend".to_string(),
                job_title: "Engineer".to_string(),
                job_description: "Rust".to_string(),
                parameters: Vec::new(),
                candidates: vec![
                    candidate("c1", "Ann", 80.0, &[("SQL", 7)]),
                    candidate("c2", "Bob", 60.0, &[("SQL", 3)]),
                ],
                last_modified: Utc::now(),
                is_draft: false,
            })
        }

        async fn history(&self, _: &str, _: u32, _: u32) -> Result<Vec<Shortlist>, BackendError> {
            Ok(Vec::new())
        }

        async fn delete(&self, _: &str, _: &str) -> Result<MessageResponse, BackendError> {
            Ok(MessageResponse {
                message: "Deleted".to_string(),
            })
        }
    }

    struct FakeSuggester;

    #[async_trait]
    impl SkillSuggester for FakeSuggester {
        async fn suggest(&self, _: &str) -> Result<Vec<String>, LlmError> {
            Ok(vec!["Rust".to_string(), "SQL".to_string()])
        }
    }

    fn state_with(backend: FakeBackend) -> (AppState, Arc<FakeBackend>) {
        let backend = Arc::new(backend);
        let state = AppState {
            auth: backend.clone(),
            jd: backend.clone(),
            suggester: Arc::new(FakeSuggester),
            drafts: backend.drafts.clone(),
            resumes: None,
            pending_saves: PendingSaves::new(),
        };
        (state, backend)
    }

    fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(state: &AppState, req: Request<Body>) -> axum::response::Response {
        build_router(state.clone()).oneshot(req).await.unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn titled_workspace(state: &AppState) -> Workspace {
        let mut workspace = Workspace::new("u-ada");
        workspace.shortlist.title = "Backend hire".to_string();
        workspace.shortlist.job_title = "Engineer".to_string();
        workspace.stage_add("SQL", 6).unwrap();
        state.drafts.save(&workspace).await.unwrap();
        workspace
    }

    fn confirm_uri(workspace: &Workspace) -> String {
        format!("/api/v1/workspaces/{}/confirm", workspace.id)
    }

    #[tokio::test]
    async fn test_health() {
        let (state, _) = state_with(FakeBackend::new());
        let response = send(&state, request("GET", "/health", None, None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["service"], "resumerank");
    }

    #[tokio::test]
    async fn test_login_failure_is_401() {
        let (state, _) = state_with(FakeBackend::new());
        let response = send(
            &state,
            request(
                "POST",
                "/api/v1/auth/login",
                None,
                Some(json!({"email": "ada@x.com", "password": "wrong"})),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"]["message"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_profile_requires_token() {
        let (state, _) = state_with(FakeBackend::new());
        let response = send(&state, request("GET", "/api/v1/auth/me", None, None)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_workspace_routes_require_token() {
        let (state, _) = state_with(FakeBackend::new());
        let workspace = titled_workspace(&state).await;
        let id = workspace.id;

        for (method, uri) in [
            ("GET", format!("/api/v1/workspaces/{id}")),
            ("GET", format!("/api/v1/workspaces/{id}/candidates")),
            ("GET", format!("/api/v1/workspaces/{id}/export")),
            ("DELETE", format!("/api/v1/workspaces/{id}")),
            ("POST", format!("/api/v1/workspaces/{id}/confirm")),
        ] {
            let response = send(&state, request(method, &uri, None, None)).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
        }

        let response = send(
            &state,
            request("POST", "/api/v1/workspaces", None, Some(json!({}))),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(state.drafts.load(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_other_users_workspace_is_hidden() {
        let (state, _) = state_with(FakeBackend::new());
        let workspace = titled_workspace(&state).await;
        let id = workspace.id;

        for (method, uri, body) in [
            ("GET", format!("/api/v1/workspaces/{id}"), None),
            ("GET", format!("/api/v1/workspaces/{id}/export"), None),
            (
                "POST",
                format!("/api/v1/workspaces/{id}/parameters"),
                Some(json!({"name": "Go"})),
            ),
            ("DELETE", format!("/api/v1/workspaces/{id}"), None),
        ] {
            let response = send(&state, request(method, &uri, Some(BOB), body)).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method} {uri}");
        }
        assert_eq!(state.drafts.load(id).await.unwrap().unwrap(), workspace);

        let response = send(&state, request("GET", "/api/v1/shortlists", Some(BOB), None)).await;
        assert_eq!(body_json(response).await["drafts"], json!([]));

        let response = send(&state, request("GET", "/api/v1/shortlists", Some(ADA), None)).await;
        let drafts = body_json(response).await["drafts"].clone();
        assert_eq!(drafts.as_array().unwrap().len(), 1);
        assert_eq!(drafts[0]["workspace_id"], id.to_string());
    }

    #[tokio::test]
    async fn test_create_records_caller_as_owner() {
        let (state, _) = state_with(FakeBackend::new());
        let response = send(
            &state,
            request("POST", "/api/v1/workspaces", Some(BOB), Some(json!({}))),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await["owner"], "u-bob");
    }

    #[tokio::test]
    async fn test_stage_add_and_remove() {
        let (state, _) = state_with(FakeBackend::new());
        let workspace = titled_workspace(&state).await;
        let uri = format!("/api/v1/workspaces/{}/parameters", workspace.id);

        let response = send(
            &state,
            request("POST", &uri, Some(ADA), Some(json!({"name": " Go ", "weight": 3}))),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        let staged = body["shortlist"]["parameters"].as_array().unwrap().clone();
        assert_eq!(staged.len(), 2);
        assert_eq!(staged[1]["name"], "Go");
        assert_eq!(staged[1]["weight"], 3);
        assert_eq!(body["confirmed"], json!([]));

        let response = send(
            &state,
            request("POST", &uri, Some(ADA), Some(json!({"name": "sql"}))),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let go_id = staged[1]["id"].as_str().unwrap();
        let response = send(
            &state,
            request("DELETE", &format!("{uri}/{go_id}"), Some(ADA), None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["shortlist"]["parameters"].as_array().unwrap().len(), 1);
        assert_eq!(body["shortlist"]["parameters"][0]["name"], "SQL");
    }

    #[tokio::test]
    async fn test_out_of_range_weight_is_a_validation_error() {
        let (state, _) = state_with(FakeBackend::new());
        let workspace = titled_workspace(&state).await;

        let response = send(
            &state,
            request(
                "POST",
                &format!("/api/v1/workspaces/{}/parameters", workspace.id),
                Some(ADA),
                Some(json!({"name": "Go", "weight": 300})),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].as_str().unwrap().contains("300"));
    }

    #[tokio::test]
    async fn test_confirm_saves_and_records_jd_id() {
        let (state, backend) = state_with(FakeBackend::new());
        let workspace = titled_workspace(&state).await;

        let response = send(&state, request("POST", &confirm_uri(&workspace), Some(ADA), None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Saved");
        assert_eq!(body["workspace"]["shortlist"]["id"], "jd-1");
        assert_eq!(body["workspace"]["confirmed"][0]["name"], "SQL");

        let submitted = backend.submitted.lock().unwrap();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].skills[0].weight, 6);
        assert!(backend.updated.lock().unwrap().is_empty());

        let stored = state.drafts.load(workspace.id).await.unwrap().unwrap();
        assert!(!stored.shortlist.is_draft);
        assert!(!state.pending_saves.is_pending(workspace.id));
    }

    #[tokio::test]
    async fn test_confirm_of_saved_shortlist_updates_it() {
        let (state, backend) = state_with(FakeBackend::new());
        let mut workspace = titled_workspace(&state).await;
        workspace.shortlist.id = Some("jd-7".to_string());
        state.drafts.save(&workspace).await.unwrap();

        let response = send(&state, request("POST", &confirm_uri(&workspace), Some(ADA), None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Updated");
        assert_eq!(body["workspace"]["shortlist"]["id"], "jd-7");

        let updated = backend.updated.lock().unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].0, "jd-7");
        assert_eq!(updated[0].1.skills[0].name, "SQL");
        assert!(backend.submitted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_edit_made_during_save_is_kept() {
        let (state, _) = state_with(FakeBackend {
            edit_during_submit: true,
            ..FakeBackend::new()
        });
        let workspace = titled_workspace(&state).await;

        let response = send(&state, request("POST", &confirm_uri(&workspace), Some(ADA), None)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let stored = state.drafts.load(workspace.id).await.unwrap().unwrap();
        let staged: Vec<_> = stored.staged().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(staged, vec!["SQL", "Go"]);
        assert_eq!(stored.confirmed.len(), 1);
        assert_eq!(stored.shortlist.id.as_deref(), Some("jd-1"));
        assert!(!stored.shortlist.is_draft);
    }

    #[tokio::test]
    async fn test_second_confirm_while_saving_is_409() {
        let (state, backend) = state_with(FakeBackend::new());
        let workspace = titled_workspace(&state).await;
        let _in_flight = state.pending_saves.begin(workspace.id).unwrap();

        let response = send(&state, request("POST", &confirm_uri(&workspace), Some(ADA), None)).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert!(backend.submitted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_save_keeps_confirmed_table_as_draft() {
        let (state, _) = state_with(FakeBackend {
            fail_submit: true,
            ..FakeBackend::new()
        });
        let workspace = titled_workspace(&state).await;

        let response = send(&state, request("POST", &confirm_uri(&workspace), Some(ADA), None)).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let stored = state.drafts.load(workspace.id).await.unwrap().unwrap();
        assert_eq!(stored.confirmed.len(), 1);
        assert!(stored.shortlist.is_draft);
        assert!(stored.shortlist.id.is_none());
    }

    #[tokio::test]
    async fn test_refresh_needs_a_saved_shortlist() {
        let (state, _) = state_with(FakeBackend::new());
        let mut workspace = titled_workspace(&state).await;
        let uri = format!("/api/v1/workspaces/{}/refresh", workspace.id);

        let response = send(&state, request("POST", &uri, Some(ADA), None)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        workspace.shortlist.id = Some("jd-3".to_string());
        state.drafts.save(&workspace).await.unwrap();
        let response = send(&state, request("POST", &uri, Some(ADA), None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let table = body_json(response).await;
        assert_eq!(table["total"], 2);
        assert_eq!(table["candidates"][0]["name"], "Ann");

        let stored = state.drafts.load(workspace.id).await.unwrap().unwrap();
        assert_eq!(stored.shortlist.candidate_count(), 2);
        assert_eq!(stored.staged().len(), 1);
    }

    #[tokio::test]
    async fn test_open_sort_and_export() {
        let (state, _) = state_with(FakeBackend::new());

        let response = send(
            &state,
            request("POST", "/api/v1/workspaces", Some(ADA), Some(json!({"jd_id": "jd-9"}))),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let id = body_json(response).await["id"].as_str().unwrap().to_string();

        let response = send(
            &state,
            request(
                "POST",
                &format!("/api/v1/workspaces/{id}/sort"),
                Some(ADA),
                Some(json!({"key": "overallScore"})),
            ),
        )
        .await;
        let table = body_json(response).await;
        assert_eq!(table["sort"]["direction"], "ascending");
        assert_eq!(table["candidates"][0]["name"], "Bob");

        let response = send(
            &state,
            request(
                "GET",
                &format!("/api/v1/workspaces/{id}/export?filename=hires.csv"),
                Some(ADA),
                None,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv;charset=utf-8"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"hires.csv\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let csv = String::from_utf8(bytes.to_vec()).unwrap();
        let mut lines = csv.split("\r\n");
        assert_eq!(
            lines.next(),
            Some("Candidate Name,Phone Number,Email,Overall Score (%)")
        );
        assert!(lines.next().unwrap().starts_with("\"Bob\""));
    }

    #[tokio::test]
    async fn test_export_of_empty_view_is_422() {
        let (state, _) = state_with(FakeBackend::new());
        let workspace = Workspace::new("u-ada");
        state.drafts.save(&workspace).await.unwrap();

        let response = send(
            &state,
            request(
                "GET",
                &format!("/api/v1/workspaces/{}/export", workspace.id),
                Some(ADA),
                None,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["error"]["message"], "No data to export");
    }

    #[tokio::test]
    async fn test_filter_on_unconfirmed_skill_is_400() {
        let (state, _) = state_with(FakeBackend::new());
        let workspace = titled_workspace(&state).await;

        let response = send(
            &state,
            request(
                "PUT",
                &format!("/api/v1/workspaces/{}/filters", workspace.id),
                Some(ADA),
                Some(json!({"skill_filters": [{"skill_name": "SQL", "min_score": 5}]})),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_workspace_is_404() {
        let (state, _) = state_with(FakeBackend::new());
        let response = send(
            &state,
            request(
                "GET",
                &format!("/api/v1/workspaces/{}", uuid::Uuid::new_v4()),
                Some(ADA),
                None,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_suggestions() {
        let (state, _) = state_with(FakeBackend::new());

        let response = send(
            &state,
            request(
                "POST",
                "/api/v1/suggestions",
                None,
                Some(json!({"job_description": "Build APIs in Rust"})),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["skills"], json!(["Rust", "SQL"]));

        let response = send(
            &state,
            request(
                "POST",
                "/api/v1/suggestions",
                None,
                Some(json!({"job_description": "   "})),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_without_storage_is_503() {
        let (state, _) = state_with(FakeBackend::new());
        let boundary = "XBOUNDARY";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"a.pdf\"\r\nContent-Type: application/pdf\r\n\r\n%PDF\r\n--{boundary}--\r\n"
        );
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/resumes")
            .header(header::AUTHORIZATION, format!("Bearer {ADA}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = send(&state, req).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
