//! homelock CLI - talk to a household smart-lock server.
//!
//! Every subcommand runs one repository operation and prints the published
//! response as JSON on stdout. Logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use homelock_core::constants::{DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_SCHEME, DEFAULT_SERVER_PORT};
use homelock_core::{SessionStore, SessionToken};
use homelock_network::{ApiResponse, ClientConfig, HttpLockClient};
use homelock_repository::Repositories;
use serde::Serialize;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "homelock")]
#[command(version)]
#[command(about = "Administer a household smart lock over its REST API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Lock server address, as discovered on the local network
    #[arg(short, long, global = true, env = "HOMELOCK_SERVER")]
    server: Option<String>,

    /// Port used when the server address carries neither scheme nor port
    #[arg(long, global = true, env = "HOMELOCK_PORT", default_value_t = DEFAULT_SERVER_PORT)]
    port: u16,

    /// URL scheme used when the server address carries none
    #[arg(long, global = true, env = "HOMELOCK_SCHEME", default_value = DEFAULT_SCHEME)]
    scheme: String,

    /// Per-request timeout in milliseconds
    #[arg(
        long,
        global = true,
        env = "HOMELOCK_TIMEOUT_MS",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_MS
    )]
    timeout_ms: u64,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pair with a lock and create the administrator account
    Register {
        #[arg(short, long)]
        username: String,

        /// Serial number printed on the lock
        #[arg(long)]
        serial: String,
    },

    /// Log in and print the session token
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long, env = "HOMELOCK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// List household members
    Members {
        #[arg(long, env = "HOMELOCK_SESSION", hide_env_values = true)]
        session_id: String,
    },

    /// Add a household member
    CreateMember {
        #[arg(short, long)]
        name: String,

        #[arg(short, long, default_value = "member")]
        role: String,

        #[arg(long, env = "HOMELOCK_SESSION", hide_env_values = true)]
        session_id: String,
    },

    /// Start fingerprint enrollment on the lock for a member
    Enroll {
        #[arg(long)]
        user_id: i64,

        #[arg(long, env = "HOMELOCK_SESSION", hide_env_values = true)]
        session_id: String,
    },

    /// List stored image paths for a member
    Images {
        #[arg(short, long)]
        username: String,

        #[arg(long, env = "HOMELOCK_SESSION", hide_env_values = true)]
        session_id: String,
    },

    /// Reset the lock to factory state (destructive)
    Reset {
        #[arg(long, env = "HOMELOCK_SESSION", hide_env_values = true)]
        session_id: String,
    },

    /// Register, log in and start enrollment for a new administrator
    Onboard {
        #[arg(short, long)]
        username: String,

        #[arg(long)]
        serial: String,
    },
}

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn client_config(cli: &Cli) -> ClientConfig {
    ClientConfig::new()
        .scheme(cli.scheme.clone())
        .default_port(cli.port)
        .timeout(Duration::from_millis(cli.timeout_ms))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to encode output")?;
    println!("{text}");
    Ok(())
}

/// Print a published response; a server-reported error becomes a failing
/// exit code.
fn report<T: Serialize>(response: &ApiResponse<T>) -> Result<ExitCode> {
    print_json(response)?;
    if let Some(code) = &response.error_code {
        eprintln!("{}", code.description());
    }
    Ok(if response.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let server = cli
        .server
        .clone()
        .context("No lock server address; pass --server or set HOMELOCK_SERVER")?;
    debug!(server = %server, timeout_ms = cli.timeout_ms, "Using lock server");

    let session = Arc::new(SessionStore::with_server_address(server));
    let client = HttpLockClient::new(client_config(&cli), session.clone())
        .context("Invalid client configuration")?;
    let repos = Repositories::new(client, session);

    match cli.command {
        Commands::Register { username, serial } => {
            let response = repos
                .sessions
                .register(&username, &serial)
                .await
                .context("Registration failed")?;
            report(&response)
        }
        Commands::Login { username, password } => {
            let response = repos
                .sessions
                .get_session_id(&username, &password)
                .await
                .context("Login failed")?;
            report(&response)
        }
        Commands::Members { session_id } => {
            let response = repos
                .members
                .get_all_household_members(&session_id)
                .await
                .context("Fetching household members failed")?;
            report(&response)
        }
        Commands::CreateMember {
            name,
            role,
            session_id,
        } => {
            let response = repos
                .members
                .create_member(&name, &role, &session_id)
                .await
                .context("Creating household member failed")?;
            report(&response)
        }
        Commands::Enroll {
            user_id,
            session_id,
        } => {
            let response = repos
                .members
                .add_biometric_data(user_id, &session_id)
                .await
                .context("Starting biometric enrollment failed")?;
            report(&response)
        }
        Commands::Images {
            username,
            session_id,
        } => {
            let response = repos
                .members
                .get_image_paths(&username, &session_id)
                .await
                .context("Fetching image paths failed")?;
            report(&response)
        }
        Commands::Reset { session_id } => {
            repos.sessions.set_session_id(SessionToken::new(session_id));
            let response = repos
                .sessions
                .reset_all()
                .await
                .context("Reset failed")?;
            if !response.is_error() {
                repos.sessions.reset_local_session();
            }
            report(&response)
        }
        Commands::Onboard { username, serial } => {
            let onboarding = repos
                .onboard_administrator(&username, &serial)
                .await
                .context("Onboarding failed")?;
            print_json(&onboarding)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    run(cli).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_create_member() {
        let cli = Cli::try_parse_from([
            "homelock",
            "--server",
            "192.168.1.20",
            "create-member",
            "--name",
            "Bob",
            "--session-id",
            "tok",
        ])
        .unwrap();

        assert_eq!(cli.server.as_deref(), Some("192.168.1.20"));
        assert_eq!(cli.port, DEFAULT_SERVER_PORT);
        match cli.command {
            Commands::CreateMember {
                name,
                role,
                session_id,
            } => {
                assert_eq!(name, "Bob");
                assert_eq!(role, "member");
                assert_eq!(session_id, "tok");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_client_config_from_flags() {
        let cli = Cli::try_parse_from([
            "homelock",
            "--port",
            "9000",
            "--timeout-ms",
            "250",
            "enroll",
            "--user-id",
            "7",
            "--session-id",
            "tok",
        ])
        .unwrap();

        let config = client_config(&cli);
        assert_eq!(config.default_port, 9000);
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert!(config.validate().is_ok());
    }
}
