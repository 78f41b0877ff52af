//! Auth API client boundary.
//!
//! ERROR HANDLING
//! ==============
//! Server rejections carry the extracted `detail` message as an explicit
//! `Option<String>` so callers never probe a dynamically shaped payload.

use super::types::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, User};

/// Errors produced by auth API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success HTTP status.
    #[error("API rejected request: status {status}")]
    Rejected { status: u16, detail: Option<String> },

    /// The request never produced a response (connect, timeout, TLS, ...).
    #[error("API request failed: {0}")]
    Transport(String),

    /// A success response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    Decode(String),

    /// The call needs a bearer token and the session store has none.
    #[error("no access token in session store")]
    MissingToken,

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// Human-readable failure detail supplied by the server, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// Object-safe async client for the auth REST API. Enables mocking in tests.
#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a token pair and the user record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] for bad credentials or inactive users,
    /// or a transport/decode error.
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;

    /// Create a new account. Does not log in.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] on validation failures (password
    /// mismatch, weak password, duplicate email), or a transport/decode error.
    async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse, ApiError>;

    /// Invalidate the current session server-side.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is stored, or the call fails.
    async fn logout(&self) -> Result<MessageResponse, ApiError>;

    /// Fetch the user behind the stored access token.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is stored, the token is rejected, or the
    /// call fails.
    async fn current_user(&self) -> Result<User, ApiError>;

    /// Check that the API is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the health endpoint is unreachable or unhealthy.
    async fn health(&self) -> Result<(), ApiError>;
}
