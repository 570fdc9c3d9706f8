/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for tasktrack-adapter tests

use tasktrack_adapter::{ClientConfig, SessionStore, TasktrackClient};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server, sharing `session`
pub fn client_for(server: &MockServer, session: SessionStore) -> TasktrackClient {
    TasktrackClient::with_config(ClientConfig::default().with_base_url(server.uri()), session)
        .expect("client should build")
}

/// JSON for a task record as the server returns it
#[allow(dead_code)]
pub fn task_json(id: i64, title: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "description": format!("{title} details"),
        "status": status,
    })
}
