//! # CANDLECAST Server
//!
//! Leaderboard endpoint with server-side score verification.
//!
//! ## Usage
//!
//! ```bash
//! candlecast_server --config config/server.toml --bind 127.0.0.1:3000
//! ```

use candlecast_server::config::DEFAULT_CONFIG_PATH;
use candlecast_server::{build_app, log_filter, AppState, ServerConfig, ServerResult};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         CANDLECAST SERVER                                        ║");
    println!("║         TRUST NO CLIENT SCORE                                    ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    // Simple parsing, no external deps
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<PathBuf> = None;
    let mut bind: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--bind" | "-b" => {
                if i + 1 < args.len() {
                    bind = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Usage: candlecast_server [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>    Config file (default: {DEFAULT_CONFIG_PATH})");
                println!("  -b, --bind <ADDR>      Listen address, overrides the config");
                println!("  -h, --help             Show this help");
                return ExitCode::SUCCESS;
            }
            _ => {}
        }
        i += 1;
    }

    match run(config_path, bind).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Server stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(config_path: Option<PathBuf>, bind: Option<String>) -> ServerResult<()> {
    let mut config = load_config(config_path.as_deref())?;
    if let Some(bind) = bind {
        config.bind_address = bind;
    }
    let addr = config.socket_addr()?;

    println!("┌─ CONFIGURATION ─────────────────────────────────────────────────┐");
    println!("│ Bind Address:       {addr}");
    match &config.leaderboard_path {
        Some(path) => println!("│ Leaderboard:        {}", path.display()),
        None => println!("│ Leaderboard:        in-memory"),
    }
    println!("│ Leaderboard Size:   {}", config.leaderboard_size);
    println!("│ Max Rounds:         {}", config.verifier.plausibility.max_rounds);
    println!("│ Score Tolerance:    {:.1}", config.verifier.score_tolerance);
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();

    let app = build_app(AppState::from_config(&config)?);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Leaderboard server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

/// An explicit path must exist. The default path falls back to defaults.
fn load_config(path: Option<&Path>) -> ServerResult<ServerConfig> {
    if let Some(path) = path {
        return Ok(ServerConfig::load(path)?);
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        Ok(ServerConfig::load(default_path)?)
    } else {
        info!(path = DEFAULT_CONFIG_PATH, "No config file, using defaults");
        Ok(ServerConfig::default())
    }
}
