use super::*;
use crate::net::types::User;

#[test]
fn anonymous_visitor_gets_register_and_login_links() {
    let page = HomePage::new(false);
    let hrefs: Vec<_> = page.links().iter().map(|l| l.href).collect();
    assert_eq!(hrefs, vec!["/register", "/login"]);
}

#[test]
fn authenticated_visitor_gets_dashboard_link_only() {
    let page = HomePage::new(true);
    assert_eq!(page.links(), &[NavLink { label: "Go to Dashboard", href: "/dashboard" }]);
}

#[test]
fn from_state_follows_user_presence() {
    let mut state = AuthState::default();
    assert_eq!(HomePage::from_state(&state), HomePage::new(false));

    state.user = Some(User {
        id: 1,
        email: "a@b.com".into(),
        full_name: None,
        is_active: true,
        created_at: "2024-01-01".into(),
    });
    assert_eq!(HomePage::from_state(&state), HomePage::new(true));
}

#[test]
fn render_includes_title_links_and_features() {
    let text = HomePage::new(false).to_string();
    assert!(text.starts_with("Welcome to AuthApp\n"));
    assert!(text.contains("[Get Started] /register"));
    assert!(text.contains("[Sign In] /login"));
    assert!(!text.contains("/dashboard"));
    assert!(text.contains("* Secure Authentication"));
    assert!(text.contains("* Easy to Use"));
}

#[test]
fn render_authenticated_hides_sign_in() {
    let text = HomePage::new(true).to_string();
    assert!(text.contains("[Go to Dashboard] /dashboard"));
    assert!(!text.contains("Sign In"));
}
