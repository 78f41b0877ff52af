//! Wire DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! These types mirror the auth API's JSON payloads so the same `User` shape
//! is used on the wire and in the persisted session record.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Identity record returned by the server. Replaced wholesale on each login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub is_active: bool,
    /// Creation timestamp as sent by the server; displayed verbatim.
    pub created_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration payload. The server checks `password == confirm_password`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl RegisterRequest {
    /// Credentials used for the automatic login after registration.
    #[must_use]
    pub fn credentials(&self) -> LoginRequest {
        LoginRequest { email: self.email.clone(), password: self.password.clone() }
    }
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body shape used by the API: `{"detail": ...}`.
///
/// `detail` is either a plain string or a list of validation entries
/// carrying a `msg` field.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    detail: serde_json::Value,
}

impl ErrorBody {
    /// Best-effort human-readable message from the `detail` field.
    pub(crate) fn into_message(self) -> Option<String> {
        match self.detail {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
            serde_json::Value::Array(items) => {
                let msgs: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
                    .collect();
                if msgs.is_empty() { None } else { Some(msgs.join("; ")) }
            }
            _ => None,
        }
    }
}

/// Extract the `detail` message from a raw error response body.
pub(crate) fn detail_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
}
