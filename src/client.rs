use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use crate::config::{ClientConfig, API_KEY_HEADER, NO_TOKEN_MESSAGE};
use crate::core::errors::{ClientError, ErrorBody};
use crate::core::helpers::bearer;
use crate::models::models::{Envelope, Session, User};

/// HTTP client for the social API. Holds the session it authenticates with.
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    session: Option<Session>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, config, session: None })
    }

    pub fn with_session(mut self, session: Option<Session>) -> Self {
        self.session = session;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn viewer(&self) -> Option<&User> {
        self.session.as_ref().and_then(|s| s.user.as_ref())
    }

    pub fn set_session(&mut self, session: Session) {
        self.session = Some(session);
    }

    pub fn end_session(&mut self) -> Option<Session> {
        self.session.take()
    }

    pub(crate) fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    /// Fails before any request is built when there is no session.
    pub(crate) fn require_token(&self) -> Result<&str, ClientError> {
        self.token()
            .ok_or_else(|| ClientError::Auth(NO_TOKEN_MESSAGE.to_string()))
    }

    pub(crate) fn auth_endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.auth_url.trim_end_matches('/'), path)
    }

    pub(crate) fn social_endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.social_url.trim_end_matches('/'), path)
    }

    pub(crate) fn request(&self, method: Method, url: &str, token: Option<&str>) -> RequestBuilder {
        debug!(%method, url, authenticated = token.is_some(), "Building request");
        let builder = self
            .http
            .request(method, url)
            .header(API_KEY_HEADER, self.config.api_key.as_str());

        match token {
            Some(token) => builder.header(AUTHORIZATION, bearer(token)),
            None => builder,
        }
    }

    /// Sends the request and returns its JSON body, `Null` when the body is empty.
    /// Non-2xx responses become `ClientError::Network` carrying the server's first
    /// error message, or `fallback` when it sent none.
    pub(crate) async fn send(&self, builder: RequestBuilder, fallback: &str) -> Result<Value, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        let raw = response.text().await?;
        debug!(status = status.as_u16(), bytes = raw.len(), "Received response");

        if !status.is_success() {
            let body = ErrorBody::parse(&raw);
            warn!(status = status.as_u16(), "Request failed: {:?}", body);
            return Err(ClientError::network(Some(status.as_u16()), body.message_or(fallback)));
        }

        if raw.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&raw)?)
    }

    pub(crate) async fn send_enveloped<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        fallback: &str,
    ) -> Result<T, ClientError> {
        let value = self.send(builder, fallback).await?;
        Ok(Envelope::from_value(value)?.into_inner())
    }

    /// Like `send_enveloped`, but a payload that is not an array reads as an empty list.
    pub(crate) async fn send_list<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        fallback: &str,
    ) -> Result<Vec<T>, ClientError> {
        let value = self.send(builder, fallback).await?;
        match Envelope::<Value>::from_value(value)?.into_inner() {
            items @ Value::Array(_) => Ok(serde_json::from_value(items)?),
            other => {
                debug!("Expected a list payload, got {}", other);
                Ok(Vec::new())
            }
        }
    }
}
