use std::io::Read;

use anyhow::{Context, Result};
use boardroom_models::advisory::AdvisoryRequest;
use boardroom_models::config::BoardroomConfig;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "boardroom", about = "Multi-agent business advisory engine")]
struct Cli {
    /// Path to configuration file; built-in defaults apply when absent
    #[arg(short, long, default_value = "config/boardroom.toml")]
    config: String,

    /// Advisory agent to consult (e.g. finance, strategy, leadership)
    #[arg(short, long)]
    agent: String,

    /// Read the request JSON from a file instead of stdin
    #[arg(short, long)]
    input: Option<String>,

    /// Pretty-print the output JSON
    #[arg(long)]
    pretty: bool,
}

fn load_config(path: &str) -> Result<BoardroomConfig> {
    match std::fs::read_to_string(path) {
        Ok(raw) => toml::from_str(&raw).with_context(|| format!("Failed to parse config: {path}")),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path, "No config file, using defaults");
            Ok(BoardroomConfig::default())
        }
        Err(err) => Err(err).with_context(|| format!("Failed to read config: {path}")),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    // Read request
    let request_json = if let Some(input_path) = &cli.input {
        std::fs::read_to_string(input_path)
            .with_context(|| format!("Failed to read input: {input_path}"))?
    } else {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        buf
    };

    let request: AdvisoryRequest =
        serde_json::from_str(&request_json).context("Failed to parse AdvisoryRequest JSON")?;

    // Build orchestrator and dispatch
    let orchestrator = boardroom::build_orchestrator(&config);

    let response = boardroom::advise(&orchestrator, &cli.agent, request)
        .await
        .map_err(|e| anyhow::anyhow!("Advisory dispatch failed: {e}"))?;

    orchestrator.shutdown().await;

    // Output response as JSON to stdout
    let output = if cli.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{output}");

    Ok(())
}
