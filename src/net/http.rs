//! reqwest implementation of [`AuthApi`].
//!
//! Bearer tokens are read from the session store at call time, so a login
//! performed through the auth context is visible to the next request.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;

use super::api::{ApiError, AuthApi};
use super::types::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, User, detail_from_body};
use crate::config::{ClientConfig, normalize_base_url};
use crate::state::store::{ACCESS_TOKEN_KEY, SessionStore};

const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/auth/register";
const LOGOUT_PATH: &str = "/auth/logout";
const CURRENT_USER_PATH: &str = "/users/me";
const HEALTH_PATH: &str = "/health";

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpAuthApi {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
}

impl HttpAuthApi {
    /// Build a client for `config.api_url` that authenticates with tokens
    /// found in `store`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the reqwest client cannot be
    /// constructed.
    pub fn new(config: &ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: normalize_base_url(&config.api_url), store })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn bearer(&self) -> Result<String, ApiError> {
        match self.store.get(ACCESS_TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => Ok(format!("Bearer {token}")),
            Ok(_) => Err(ApiError::MissingToken),
            Err(e) => {
                tracing::warn!(error = %e, "session store read failed");
                Err(ApiError::MissingToken)
            }
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::Rejected { status: status.as_u16(), detail: detail_from_body(&text) });
        }

        parse_body(&text)
    }
}

fn parse_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait::async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.send(self.http.post(self.url(LOGIN_PATH)).json(request)).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse, ApiError> {
        self.send(self.http.post(self.url(REGISTER_PATH)).json(request)).await
    }

    async fn logout(&self) -> Result<MessageResponse, ApiError> {
        let bearer = self.bearer()?;
        self.send(self.http.post(self.url(LOGOUT_PATH)).header(AUTHORIZATION, bearer)).await
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        let bearer = self.bearer()?;
        self.send(self.http.get(self.url(CURRENT_USER_PATH)).header(AUTHORIZATION, bearer)).await
    }

    async fn health(&self) -> Result<(), ApiError> {
        let _: serde_json::Value = self.send(self.http.get(self.url(HEALTH_PATH))).await?;
        Ok(())
    }
}
