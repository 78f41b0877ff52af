//! Page modules for the two screens.
//!
//! ARCHITECTURE
//! ============
//! Pages are pure projections of [`crate::state::auth::AuthState`]: they
//! never call the auth context and render to plain text via `Display`.

pub mod dashboard;
pub mod home;

use std::fmt;

/// Underlined section heading.
fn write_heading(f: &mut fmt::Formatter<'_>, title: &str, rule: char) -> fmt::Result {
    writeln!(f, "{title}")?;
    writeln!(f, "{}", rule.to_string().repeat(title.chars().count()))
}
