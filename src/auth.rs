use reqwest::Method;
use serde_json::{json, Value};
use tracing::info;
use crate::client::ApiClient;
use crate::core::errors::ClientError;
use crate::core::helpers::non_empty;
use crate::models::models::{LoginPayload, Session};

impl ApiClient {
    /// Exchanges credentials for a session and starts using it.
    /// The caller decides whether to persist it.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Session, ClientError> {
        let email = non_empty(Some(email))
            .ok_or_else(|| ClientError::Validation("Email is required".to_string()))?;
        if password.is_empty() {
            return Err(ClientError::Validation("Password is required".to_string()));
        }

        let request = self
            .request(Method::POST, &self.auth_endpoint("/login"), None)
            .json(&json!({ "email": email, "password": password }));

        let payload: LoginPayload = self
            .send_enveloped(request, "Login failed")
            .await
            .map_err(ClientError::into_auth)?;

        let session = payload
            .into_session()
            .ok_or_else(|| ClientError::Auth("Login response did not include a token".to_string()))?;

        info!(user = session.user_name().unwrap_or("unknown"), "Logged in");
        self.set_session(session.clone());
        Ok(session)
    }

    /// Returns the server's confirmation payload without the envelope.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<Value, ClientError> {
        let (name, email) = match (non_empty(Some(name)), non_empty(Some(email))) {
            (Some(n), Some(e)) => (n, e),
            _ => return Err(ClientError::Validation("Name and email are required".to_string())),
        };
        if password.is_empty() {
            return Err(ClientError::Validation("Password is required".to_string()));
        }

        let request = self
            .request(Method::POST, &self.auth_endpoint("/register"), None)
            .json(&json!({ "name": name, "email": email, "password": password }));

        self.send_enveloped(request, "Registration failed")
            .await
            .map_err(ClientError::into_auth)
    }

    /// Drops the in-memory session; nothing is sent to the server.
    pub fn logout(&mut self) -> Option<Session> {
        let ended = self.end_session();
        if let Some(session) = &ended {
            info!(user = session.user_name().unwrap_or("unknown"), "Logged out");
        }
        ended
    }
}
