//! HTTP client for the persistence service.
//!
//! [`ApiClient`] wraps a pre-configured `reqwest::Client`. Every call is a
//! single attempt: failures are returned to the caller and never retried.

use std::time::Duration;

use focusflow_core::project::{NewProject, Project};
use focusflow_core::session::{NewSession, Session};
use focusflow_core::types::RecordId;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Upper bound on a single request, so a report task cannot linger forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// A failed call to the persistence service.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a usable response (connect, DNS,
    /// timeout, undecodable body).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("Service returned HTTP {status}: {message}")]
    Api { status: u16, message: String },
}

/// Error body shape produced by the service.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// Typed access to the `/sessions` and `/projects` endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for the service at `base_url`, e.g.
    /// `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// POST /sessions
    pub async fn create_session(&self, session: &NewSession) -> Result<Session, ClientError> {
        let response = self
            .client
            .post(self.url("/sessions"))
            .json(session)
            .send()
            .await?;
        decode(response).await
    }

    /// GET /sessions
    pub async fn list_sessions(&self) -> Result<Vec<Session>, ClientError> {
        let response = self.client.get(self.url("/sessions")).send().await?;
        decode(response).await
    }

    /// GET /sessions/{id}
    pub async fn get_session(&self, id: RecordId) -> Result<Session, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/sessions/{id}")))
            .send()
            .await?;
        decode(response).await
    }

    /// POST /projects
    pub async fn create_project(&self, project: &NewProject) -> Result<Project, ClientError> {
        let response = self
            .client
            .post(self.url("/projects"))
            .json(project)
            .send()
            .await?;
        decode(response).await
    }

    /// GET /projects
    pub async fn list_projects(&self) -> Result<Vec<Project>, ClientError> {
        let response = self.client.get(self.url("/projects")).send().await?;
        decode(response).await
    }
}

/// Turn a response into `T`, or into [`ClientError::Api`] for non-2xx
/// statuses. Falls back to the raw body when it is not the service's error
/// shape.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
