/*
[INPUT]:  User credentials and the shared HTTP client
[OUTPUT]: Authenticated session (bearer token) or an authentication error
[POS]:    Auth layer - sign-in and logout flow
[UPDATE]: When auth endpoints or flow steps change
*/

use reqwest::Method;
use tracing::{info, warn};

use super::session::{Session, SessionStore};
use crate::http::{Result, TasktrackClient, TasktrackError};
use crate::types::{SigninRequest, SigninResponse};

/// Drives sign-in against the server and owns logout
#[derive(Debug, Clone)]
pub struct AuthManager {
    client: TasktrackClient,
}

impl AuthManager {
    /// Create an auth manager that stores tokens in the client's session
    pub fn new(client: TasktrackClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &TasktrackClient {
        &self.client
    }

    pub fn session(&self) -> &SessionStore {
        self.client.session()
    }

    /// Sign in and store the returned token
    ///
    /// POST /auth/signin
    ///
    /// Rejected credentials and 2xx responses without `accessToken` are
    /// authentication errors; in both cases the session is left untouched.
    pub async fn authenticate(&self, identifier: &str, secret: &str) -> Result<Session> {
        let request = validate_credentials(identifier, secret)?;

        let builder = self
            .client
            .request(Method::POST, "/auth/signin")?
            .json(&request);

        let response: SigninResponse = match self.client.send_json(builder).await {
            Ok(response) => response,
            Err(TasktrackError::Transport {
                status: Some(status),
                message,
            }) => {
                warn!(username = %request.username, status, "sign-in rejected");
                return Err(TasktrackError::Authentication {
                    status: Some(status),
                    message,
                });
            }
            Err(TasktrackError::InvalidResponse(detail)) => {
                return Err(TasktrackError::Authentication {
                    status: None,
                    message: format!("unreadable sign-in response: {detail}"),
                });
            }
            Err(err) => return Err(err),
        };

        let token = response
            .access_token
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| TasktrackError::Authentication {
                status: None,
                message: "response did not include an access token".to_string(),
            })?;

        let session = self.session().set_token(token)?;
        info!(username = %request.username, "signed in");
        Ok(session)
    }

    /// Discard the session locally; the server is not contacted
    pub fn logout(&self) -> Result<()> {
        self.session().clear()?;
        info!("signed out");
        Ok(())
    }
}

fn validate_credentials(identifier: &str, secret: &str) -> Result<SigninRequest> {
    if identifier.trim().is_empty() {
        return Err(TasktrackError::validation("username", "username is required"));
    }
    if secret.trim().is_empty() {
        return Err(TasktrackError::validation("password", "password is required"));
    }
    Ok(SigninRequest {
        username: identifier.to_string(),
        password: secret.to_string(),
    })
}
