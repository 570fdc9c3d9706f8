/*
[INPUT]:  HTTP configuration (base URL, timeouts) and the shared session
[OUTPUT]: Configured reqwest client that attaches the bearer token per request
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::auth::SessionStore;
use crate::http::{Result, TasktrackError};
use crate::types::ApiErrorBody;

/// Default API root, including the `/api` prefix the server mounts under
pub const DEFAULT_BASE_URL: &str = "http://localhost:5001/api";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Main HTTP client for the task API
#[derive(Debug, Clone)]
pub struct TasktrackClient {
    http_client: Client,
    base_url: Url,
    session: SessionStore,
}

impl TasktrackClient {
    /// Create a new client with default configuration
    pub fn new(session: SessionStore) -> Result<Self> {
        Self::with_config(ClientConfig::default(), session)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig, session: SessionStore) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| TasktrackError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: normalize_base_url(&config.base_url)?,
            session,
        })
    }

    /// Session whose token is attached to outgoing requests
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build full URL for an endpoint below the API root
    fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
    }

    /// Build a request, attaching `Authorization: Bearer <token>` when the
    /// session currently holds one.
    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.endpoint_url(endpoint)?;
        let builder = self.http_client.request(method, url);
        Ok(match self.session.current_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    /// Send a request and fail on connection errors or non-2xx statuses
    pub(crate) async fn execute(&self, builder: RequestBuilder) -> Result<Response> {
        let request = builder
            .build()
            .map_err(|e| TasktrackError::Config(format!("failed to build request: {e}")))?;
        let method = request.method().clone();
        let url = request.url().clone();

        let response = match self.http_client.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(%method, %url, error = %err, "request did not complete");
                return Err(TasktrackError::connection(&err));
            }
        };

        let status = response.status();
        debug!(%method, %url, status = status.as_u16(), "response received");

        if status.is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response).await)
        }
    }

    /// Send a request and decode the JSON response body
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.execute(builder).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| TasktrackError::connection(&e))?;
        serde_json::from_slice(&body)
            .map_err(|e| TasktrackError::InvalidResponse(format!("unexpected response body: {e}")))
    }

    /// Send a request whose response body is not needed
    pub(crate) async fn send_empty(&self, builder: RequestBuilder) -> Result<()> {
        self.execute(builder).await.map(|_| ())
    }
}

/// Turn a non-2xx response into a transport error carrying the server message
async fn error_from_response(response: Response) -> TasktrackError {
    let status = response.status();
    let message = match response.text().await {
        Ok(text) => serde_json::from_str::<ApiErrorBody>(&text)
            .ok()
            .and_then(|body| body.message_text()),
        Err(_) => None,
    };
    TasktrackError::api_error(status, message)
}

fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() {
        return Err(TasktrackError::Config(format!(
            "base URL cannot carry endpoint paths: {raw}"
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_keeps_api_prefix() {
        let client = TasktrackClient::with_config(
            ClientConfig::default().with_base_url("http://example.com/api"),
            SessionStore::in_memory(),
        )
        .unwrap();
        assert_eq!(
            client.endpoint_url("/tasks/5").unwrap().as_str(),
            "http://example.com/api/tasks/5"
        );
        assert_eq!(
            client.endpoint_url("auth/signin").unwrap().as_str(),
            "http://example.com/api/auth/signin"
        );
    }

    #[test]
    fn test_endpoint_at_host_root() {
        let client = TasktrackClient::with_config(
            ClientConfig::default().with_base_url("http://127.0.0.1:8080"),
            SessionStore::in_memory(),
        )
        .unwrap();
        assert_eq!(
            client.endpoint_url("/tasks").unwrap().as_str(),
            "http://127.0.0.1:8080/tasks"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = TasktrackClient::with_config(
            ClientConfig::default().with_base_url("not a url"),
            SessionStore::in_memory(),
        )
        .unwrap_err();
        assert!(matches!(err, TasktrackError::UrlParse(_)));
    }

    #[test]
    fn test_request_without_token_has_no_authorization() {
        let client = TasktrackClient::new(SessionStore::in_memory()).unwrap();
        let request = client
            .request(Method::GET, "/tasks")
            .unwrap()
            .build()
            .unwrap();
        assert!(request.headers().get("authorization").is_none());
    }

    #[test]
    fn test_request_reads_token_per_request() {
        let session = SessionStore::in_memory();
        let client = TasktrackClient::new(session.clone()).unwrap();

        session.set_token("abc123").unwrap();
        let request = client
            .request(Method::GET, "/tasks")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get("authorization").unwrap(),
            "Bearer abc123"
        );

        session.clear().unwrap();
        let request = client
            .request(Method::GET, "/tasks")
            .unwrap()
            .build()
            .unwrap();
        assert!(request.headers().get("authorization").is_none());
    }
}
