use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use authdemo::config::ClientConfig;
use authdemo::net::api::{ApiError, AuthApi};
use authdemo::net::http::HttpAuthApi;
use authdemo::net::types::RegisterRequest;
use authdemo::pages::dashboard::DashboardPage;
use authdemo::pages::home::HomePage;
use authdemo::state::auth::{AuthContext, AuthError};
use authdemo::state::store::{FileStore, SessionStore};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("not signed in; run `authdemo login` first")]
    NotAuthenticated,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "authdemo", about = "Terminal client for the AuthApp authentication API")]
struct Cli {
    #[arg(long, env = "AUTHDEMO_API_URL")]
    api_url: Option<String>,

    #[arg(long, env = "AUTHDEMO_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the landing page.
    Home,
    /// Show the signed-in user's dashboard.
    Dashboard,
    /// Sign in and show the dashboard.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account, sign in, and show the dashboard.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        #[arg(long)]
        full_name: Option<String>,
    },
    /// Sign out and show the landing page.
    Logout,
    /// Fetch the signed-in user from the server.
    Me,
    /// Check that the API is reachable.
    Ping,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url.as_deref() {
        config = config.with_api_url(url);
    }
    if let Some(path) = cli.session_file.clone() {
        config = config.with_session_file(path);
    }

    match run(&config, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &ClientConfig, command: Command) -> Result<(), CliError> {
    let store: Arc<dyn SessionStore> = Arc::new(FileStore::new(&config.session_file));
    let api = Arc::new(HttpAuthApi::new(config, store.clone())?);
    let auth = AuthContext::new(api.clone(), store);
    auth.restore();
    tracing::debug!(api_url = %config.api_url, authenticated = auth.is_authenticated(), "session ready");

    match command {
        Command::Home => {
            print!("{}", HomePage::from_state(&auth.state()));
            Ok(())
        }
        Command::Dashboard => show_dashboard(&auth),
        Command::Login { email, password } => {
            auth.login(&email, &password).await?;
            show_dashboard(&auth)
        }
        Command::Register { email, password, confirm_password, full_name } => {
            let request = RegisterRequest { email, password, confirm_password, full_name };
            auth.register(&request).await?;
            show_dashboard(&auth)
        }
        Command::Logout => {
            auth.logout().await;
            print!("{}", HomePage::from_state(&auth.state()));
            Ok(())
        }
        Command::Me => {
            if !auth.is_authenticated() {
                return Err(CliError::NotAuthenticated);
            }
            let user = api.current_user().await?;
            println!("{}", serde_json::to_string_pretty(&user)?);
            Ok(())
        }
        Command::Ping => {
            api.health().await?;
            println!("ok");
            Ok(())
        }
    }
}

fn show_dashboard(auth: &AuthContext) -> Result<(), CliError> {
    let state = auth.state();
    if !state.is_authenticated() {
        return Err(CliError::NotAuthenticated);
    }
    print!("{}", DashboardPage::from_state(&state));
    Ok(())
}
