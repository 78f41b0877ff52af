//! Dashboard page showing the logged-in user's profile fields.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing screen. Callers are expected to send
//! anonymous users to the login flow; rendered without a user, every field
//! shows its fallback text.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use std::fmt;

use crate::net::types::User;
use crate::state::auth::AuthState;

pub const TITLE: &str = "Welcome to your Dashboard!";
pub const NOT_PROVIDED: &str = "Not provided";
pub const UNKNOWN: &str = "Unknown";

const FEATURES: &[(&str, &str)] = &[
    ("Secure Session", "JWT token-based authentication"),
    ("Protected Routes", "Access controlled pages"),
    ("User Profile", "Manage your account"),
];

const TECHNICAL_DETAILS: &[(&str, &str)] = &[
    ("Frontend", "Rust terminal client"),
    ("Backend", "FastAPI + SQLite"),
    ("Authentication", "JWT Tokens + bcrypt"),
    ("Security", "CORS + Input Validation"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DashboardPage<'a> {
    user: Option<&'a User>,
}

impl<'a> DashboardPage<'a> {
    #[must_use]
    pub fn new(user: Option<&'a User>) -> Self {
        Self { user }
    }

    #[must_use]
    pub fn from_state(state: &'a AuthState) -> Self {
        Self::new(state.user.as_ref())
    }

    /// Labelled profile fields in display order.
    #[must_use]
    pub fn profile_fields(&self) -> Vec<(&'static str, String)> {
        let user = self.user;
        let full_name = user
            .and_then(|u| u.full_name.as_deref())
            .filter(|name| !name.is_empty())
            .unwrap_or(NOT_PROVIDED);
        let status = if user.is_some_and(|u| u.is_active) { "Active" } else { "Inactive" };
        let member_since = user
            .map(|u| u.created_at.as_str())
            .filter(|created| !created.is_empty())
            .unwrap_or(UNKNOWN);

        vec![
            ("Full Name", full_name.to_owned()),
            ("Email Address", user.map(|u| u.email.clone()).unwrap_or_default()),
            ("User ID", user.map(|u| u.id.to_string()).unwrap_or_default()),
            ("Account Status", status.to_owned()),
            ("Member Since", member_since.to_owned()),
        ]
    }
}

fn write_pairs(f: &mut fmt::Formatter<'_>, pairs: &[(&str, &str)]) -> fmt::Result {
    let width = pairs.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in pairs {
        writeln!(f, "  {label:<width$}  {value}")?;
    }
    Ok(())
}

impl fmt::Display for DashboardPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::write_heading(f, TITLE, '=')?;
        writeln!(f)?;
        writeln!(f, "Authentication Successful!")?;
        writeln!(f, "Your session is secured with JWT tokens.")?;
        writeln!(f)?;

        super::write_heading(f, "User Information", '-')?;
        let fields = self.profile_fields();
        let pairs: Vec<(&str, &str)> = fields.iter().map(|(label, value)| (*label, value.as_str())).collect();
        write_pairs(f, &pairs)?;
        writeln!(f)?;

        super::write_heading(f, "Available Features", '-')?;
        for (name, blurb) in FEATURES {
            writeln!(f, "  * {name}: {blurb}")?;
        }
        writeln!(f)?;

        super::write_heading(f, "Technical Details", '-')?;
        write_pairs(f, TECHNICAL_DETAILS)
    }
}
