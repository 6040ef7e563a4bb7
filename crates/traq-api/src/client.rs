//! HTTP client for the task backend.
//!
//! Paths and bodies mirror the backend exactly:
//!
//! - `POST /auth/register` — `{name, email, password}`, no auth header
//! - `GET /task` — all tasks
//! - `GET /task/search?title=<q>` — title search
//! - `POST /task`, `PUT /task/{id}`, `DELETE /task/{id}` — CRUD
//! - `POST /task/{id}/clock-in`, `POST /task/{id}/clock-out` — time tracking
//!
//! Create/update response bodies are ignored; callers refetch the list
//! instead of merging.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use traq_core::{Task, TaskDraft};

use crate::errors::ApiError;

/// Registration payload for `POST /auth/register`.
#[derive(Clone, Debug, Serialize)]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// Email address (the login identifier).
    pub email: String,
    /// Plaintext password; the backend hashes it.
    pub password: String,
}

/// User object returned by `POST /auth/register`.
///
/// Lenient on purpose: the backend owns this shape and the client only
/// displays it.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    /// Server-assigned user id.
    #[serde(default)]
    pub id: Option<i64>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
}

/// Response of `POST /task/{id}/clock-out`.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockOutResponse {
    /// Server-computed total time spent on the task, in seconds.
    pub time_spent: u64,
}

/// REST client for the task backend.
///
/// Holds the base URL, the request timeout, and (once signed in) the bearer
/// access token attached to every task call.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    access_token: Option<String>,
}

impl ApiClient {
    /// Create a client for the given base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            timeout: Duration::from_millis(timeout_ms),
            access_token: None,
        }
    }

    /// Attach the session's bearer access token to subsequent task calls.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Whether a bearer token is attached.
    pub fn is_signed_in(&self) -> bool {
        self.access_token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Add the `Authorization: Bearer` header, or refuse without a session.
    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let token = self.access_token.as_deref().ok_or(ApiError::NotSignedIn)?;
        Ok(builder.header(AUTHORIZATION, format!("Bearer {token}")))
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.timeout(self.timeout).send().await?;
        ensure_success(response)
    }

    // ── Auth ────────────────────────────────────────────────────────────────

    /// Register a new user. Unauthenticated.
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisteredUser, ApiError> {
        let response = self
            .send(self.http.post(self.url("/auth/register")).json(request))
            .await?;
        Ok(response.json().await?)
    }

    // ── Tasks ───────────────────────────────────────────────────────────────

    /// Fetch all tasks.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        debug!("fetching task list");
        let builder = self.authorized(self.http.get(self.url("/task")))?;
        let response = self.send(builder).await?;
        Ok(response.json().await?)
    }

    /// Fetch tasks whose title matches the query.
    ///
    /// An empty query is passed through verbatim; its semantics are the
    /// backend's call.
    pub async fn search_tasks(&self, title: &str) -> Result<Vec<Task>, ApiError> {
        debug!(title, "searching tasks");
        let builder = self.authorized(
            self.http
                .get(self.url("/task/search"))
                .query(&[("title", title)]),
        )?;
        let response = self.send(builder).await?;
        Ok(response.json().await?)
    }

    /// Create a task from the draft. The response body is ignored.
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<(), ApiError> {
        let builder = self.authorized(self.http.post(self.url("/task")).json(draft))?;
        let _ = self.send(builder).await?;
        Ok(())
    }

    /// Update a task from the draft. The response body is ignored.
    pub async fn update_task(&self, id: i64, draft: &TaskDraft) -> Result<(), ApiError> {
        let builder =
            self.authorized(self.http.put(self.url(&format!("/task/{id}"))).json(draft))?;
        let _ = self.send(builder).await?;
        Ok(())
    }

    /// Delete a task by id.
    pub async fn delete_task(&self, id: i64) -> Result<(), ApiError> {
        let builder = self.authorized(self.http.delete(self.url(&format!("/task/{id}"))))?;
        let _ = self.send(builder).await?;
        Ok(())
    }

    // ── Time tracking ───────────────────────────────────────────────────────

    /// Begin time tracking on a task. No body either way.
    pub async fn clock_in(&self, id: i64) -> Result<(), ApiError> {
        let builder = self.authorized(self.http.post(self.url(&format!("/task/{id}/clock-in"))))?;
        let _ = self.send(builder).await?;
        Ok(())
    }

    /// End time tracking on a task; returns the server-computed total.
    pub async fn clock_out(&self, id: i64) -> Result<ClockOutResponse, ApiError> {
        let builder =
            self.authorized(self.http.post(self.url(&format!("/task/{id}/clock-out"))))?;
        let response = self.send(builder).await?;
        Ok(response.json().await?)
    }
}

/// Map a non-success status to [`ApiError::Status`] with the status text.
fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_string(),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
