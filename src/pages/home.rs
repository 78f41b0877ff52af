//! Landing page. Shows sign-up/sign-in links or a dashboard link depending on
//! whether a session exists.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use std::fmt;

use crate::state::auth::AuthState;

pub const TITLE: &str = "Welcome to AuthApp";
pub const TAGLINE: &str = "A modern, secure authentication application. \
Register and sign in with JWT token-based authentication.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

const AUTHENTICATED_LINKS: &[NavLink] = &[NavLink { label: "Go to Dashboard", href: "/dashboard" }];

const ANONYMOUS_LINKS: &[NavLink] = &[
    NavLink { label: "Get Started", href: "/register" },
    NavLink { label: "Sign In", href: "/login" },
];

const FEATURES: &[(&str, &str)] = &[
    (
        "Secure Authentication",
        "Industry-standard JWT token authentication with bcrypt password hashing.",
    ),
    ("Fast & Responsive", "Built with modern technologies for fast performance everywhere."),
    ("Easy to Use", "Straightforward registration and login experience."),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HomePage {
    is_authenticated: bool,
}

impl HomePage {
    #[must_use]
    pub fn new(is_authenticated: bool) -> Self {
        Self { is_authenticated }
    }

    #[must_use]
    pub fn from_state(state: &AuthState) -> Self {
        Self::new(state.is_authenticated())
    }

    /// Navigation links offered to the current visitor.
    #[must_use]
    pub fn links(&self) -> &'static [NavLink] {
        if self.is_authenticated { AUTHENTICATED_LINKS } else { ANONYMOUS_LINKS }
    }
}

impl fmt::Display for HomePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::write_heading(f, TITLE, '=')?;
        writeln!(f)?;
        writeln!(f, "{TAGLINE}")?;
        writeln!(f)?;
        for link in self.links() {
            writeln!(f, "  [{}] {}", link.label, link.href)?;
        }
        for (name, blurb) in FEATURES {
            writeln!(f)?;
            writeln!(f, "* {name}")?;
            writeln!(f, "  {blurb}")?;
        }
        Ok(())
    }
}
