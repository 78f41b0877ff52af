use super::*;

/// # Safety
/// Env-mutating tests are combined into one test to avoid races.
unsafe fn clear_client_env() {
    unsafe {
        std::env::remove_var("AUTHDEMO_API_URL");
        std::env::remove_var("AUTHDEMO_SESSION_FILE");
        std::env::remove_var("AUTHDEMO_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("AUTHDEMO_CONNECT_TIMEOUT_SECS");
    }
}

#[test]
fn from_env_defaults_then_overrides() {
    unsafe { clear_client_env() };

    let cfg = ClientConfig::from_env();
    assert_eq!(cfg, ClientConfig::default());
    assert_eq!(cfg.api_url, DEFAULT_API_URL);
    assert_eq!(cfg.session_file, PathBuf::from(DEFAULT_SESSION_FILE));

    unsafe {
        std::env::set_var("AUTHDEMO_API_URL", "https://auth.example.test/api/");
        std::env::set_var("AUTHDEMO_SESSION_FILE", "/tmp/s.json");
        std::env::set_var("AUTHDEMO_REQUEST_TIMEOUT_SECS", "42");
        std::env::set_var("AUTHDEMO_CONNECT_TIMEOUT_SECS", "not-a-number");
    }

    let cfg = ClientConfig::from_env();
    assert_eq!(cfg.api_url, "https://auth.example.test/api");
    assert_eq!(cfg.session_file, PathBuf::from("/tmp/s.json"));
    assert_eq!(cfg.timeouts, HttpTimeouts { request_secs: 42, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS });

    unsafe { clear_client_env() };
}

#[test]
fn with_api_url_trims_trailing_slashes() {
    let cfg = ClientConfig::default().with_api_url(" http://127.0.0.1:9000// ");
    assert_eq!(cfg.api_url, "http://127.0.0.1:9000");
}

#[test]
fn with_session_file_replaces_path() {
    let cfg = ClientConfig::default().with_session_file("other.json");
    assert_eq!(cfg.session_file, PathBuf::from("other.json"));
}
