/// Chorus Server - Shared voice-channel playback bot
use chorus_core::{MemberId, PlayMode};
use chorus_presence::PresenceTracker;
use chorus_server::{
    api,
    backend::{ConsolePlayer, LogStatusSink, StaticDirectory},
    config::ServerConfig,
    providers,
    services::{EventPumps, Orchestrator},
    state::AppState,
};
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "chorus-server")]
#[command(about = "Chorus shared playback bot server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Validate the configuration and exit
    CheckConfig {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chorus_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config.as_deref()).await?;
        }
        Commands::CheckConfig { config } => {
            check_config(config.as_deref())?;
        }
    }

    Ok(())
}

async fn serve(config_path: Option<&str>) -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load(config_path)?;
    config.validate()?;

    tracing::info!("Starting Chorus Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Build the provider registry from configuration
    let registry = Arc::new(providers::build_registry(&config)?);
    tracing::info!("Providers configured: {}", registry.len());

    let mode = PlayMode::from_index(config.playback.mode)
        .ok_or_else(|| anyhow::anyhow!("invalid playback.mode {}", config.playback.mode))?;

    // Backend capabilities: logging player, fixed channel directory
    let (playback_tx, playback_rx) = tokio::sync::mpsc::unbounded_channel();
    let (_channel_tx, channel_rx) = tokio::sync::mpsc::unbounded_channel();
    let control = Arc::new(ConsolePlayer::new(playback_tx));
    let directory = Arc::new(StaticDirectory::new(MemberId(0)));

    // Orchestrator and presence tracking
    let orchestrator = Arc::new(
        Orchestrator::new(registry, control.clone(), mode)
            .with_status_sink(Arc::new(LogStatusSink))
            .with_mode_hook(Box::new(|mode| {
                tracing::info!(%mode, "persisting play mode");
            })),
    );
    let presence = Arc::new(PresenceTracker::new(
        control,
        directory,
        config.playback.auto_pause,
    ));

    // Event pumps own the backend subscriptions for their whole lifetime
    let pumps = EventPumps::spawn(
        Arc::clone(&orchestrator),
        presence,
        playback_rx,
        channel_rx,
    );

    // Build application state and router
    let app_state = AppState::new(orchestrator, config.server.secret.clone());
    let app = api::router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    pumps.shutdown();
    Ok(())
}

fn check_config(config_path: Option<&str>) -> anyhow::Result<()> {
    let config = ServerConfig::load(config_path)?;
    config.validate()?;

    println!("Configuration OK");
    println!("  server: {}:{}", config.server.host, config.server.port);
    println!(
        "  secret: {}",
        if config.server.secret.is_some() {
            "set"
        } else {
            "not set"
        }
    );
    println!(
        "  playback: mode={} auto_pause={} default_provider={}",
        config.playback.mode, config.playback.auto_pause, config.playback.default_provider
    );
    for provider in &config.providers {
        println!(
            "  provider: kind={} enabled={} aliases={:?}",
            provider.kind, provider.enabled, provider.aliases
        );
    }

    Ok(())
}
