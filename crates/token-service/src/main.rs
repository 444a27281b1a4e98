use anyhow::Context;
use chrono::Duration;
use clap::{Parser, Subcommand};
use common::config::AccountConfig;
use token_service::clock::{Clock, SystemClock};
use token_service::{ServiceScope, TokenIssuer, TokenRequest};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "session-token")]
#[command(about = "Issue session tokens and service credentials for a platform account")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue a session token for an end client
    Session(SessionArgs),
    /// Issue a service credential for one platform operation
    Service(ServiceArgs),
}

#[derive(clap::Args)]
struct SessionArgs {
    /// Session to join
    #[arg(long)]
    session_id: String,
    /// subscriber, publisher, moderator, or an empty string for the platform default
    #[arg(long, default_value = "publisher")]
    role: String,
    /// Token lifetime in seconds (at most 30 days)
    #[arg(long)]
    expire_in_secs: Option<i64>,
    /// Connection data handed to other participants
    #[arg(long)]
    data: Option<String>,
}

#[derive(clap::Args)]
struct ServiceArgs {
    /// Operation scope, e.g. `archive.create`
    #[arg(long)]
    scope: ServiceScope,
}

fn init_tracing() {
    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "token_service=info".into()),
        )
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config = AccountConfig::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;
    info!(account_id = %config.credentials.account_id(), "Configuration loaded");

    let issuer = TokenIssuer::new(&config);

    let credential = match cli.command {
        Commands::Session(args) => {
            let mut request =
                TokenRequest::new(args.session_id).with_raw_role(Some(args.role.as_str()));
            if let Some(secs) = args.expire_in_secs {
                let expire_time = Duration::try_seconds(secs)
                    .and_then(|lifetime| SystemClock.now().checked_add_signed(lifetime))
                    .context("--expire-in-secs is out of range")?;
                request = request.with_expire_time(expire_time);
            }
            if let Some(data) = args.data {
                request = request.with_connection_data(data);
            }
            issuer
                .issue_session_token(&request)
                .context("Failed to issue session token")?
        }
        Commands::Service(args) => issuer
            .issue_service_credential(args.scope)
            .context("Failed to issue service credential")?,
    };

    println!("{credential}");
    Ok(())
}
