/*
[INPUT]:  Username/password typed on the login screen
[OUTPUT]: Validated sign-in attempts and the resulting session
[POS]:    Screen layer - login form state
[UPDATE]: When login validation or sign-in flow changes
*/

use std::fmt;

use tasktrack_adapter::{AuthManager, Result, Session, TasktrackError};

use crate::in_flight::InFlight;

#[derive(Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Report the first blank field, username before password
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(TasktrackError::validation("username", "username is required"));
        }
        if self.password.trim().is_empty() {
            return Err(TasktrackError::validation("password", "password is required"));
        }
        Ok(())
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Login screen: validates the form and signs in, one attempt at a time
#[derive(Debug)]
pub struct LoginScreen {
    auth: AuthManager,
    in_flight: InFlight,
}

impl LoginScreen {
    pub fn new(auth: AuthManager) -> Self {
        Self {
            auth,
            in_flight: InFlight::new(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_busy()
    }

    pub async fn submit(&self, form: &LoginForm) -> Result<Session> {
        form.validate()?;
        let _guard = self.in_flight.try_begin()?;
        self.auth.authenticate(&form.username, &form.password).await
    }
}
