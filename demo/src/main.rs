//! Stellar Health Diagnostic Console: Demo CLI
//!
//! Drives the query and CSV-ingestion workflows against a configured
//! backend. When the backend is unreachable the workflows fall back to demo
//! mode, so every subcommand also works offline.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- query "symptoms of decompression sickness"
//!   cargo run -p demo -- upload crew_vitals.csv
//!   cargo run -p demo -- --backend-url http://10.0.0.5:5000 --no-demo-fallback run-all

mod console;
mod scenarios;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use stellar_client::{candidate_from_path, config, StellarClient};
use stellar_contracts::{config::StellarConfig, error::StellarResult};
use stellar_notify::{FanoutNotifier, InMemoryNotifier, TracingNotifier};

use crate::console::{ConsoleNotifier, Report};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Stellar Health: AI diagnostic console for crewed missions.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "Stellar Health diagnostic console demo",
    long_about = "Submits diagnostic queries and CSV knowledge-base uploads to the\n\
                  Stellar Health backend, falling back to demo mode when it is offline."
)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override `base_url` from the configuration.
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Report transport failures instead of simulating a response.
    #[arg(long, global = true)]
    no_demo_fallback: bool,

    /// Print outcomes and notifications as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit one diagnostic query.
    Query {
        /// The query text, as typed.
        text: String,
    },
    /// Upload one CSV file into the knowledge base.
    Upload {
        /// Path to the file.
        path: PathBuf,
    },
    /// Run the scripted query and upload scenarios in sequence.
    RunAll,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    if !cli.json {
        print_banner();
    }

    if let Err(e) = run(cli).await {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> StellarResult<()> {
    let config = load_config(&cli)?;
    let client = StellarClient::new(config)?;

    let history = Arc::new(InMemoryNotifier::new("console"));
    let mut fanout = FanoutNotifier::new()
        .with(history.clone())
        .with(Arc::new(TracingNotifier));
    if !cli.json {
        fanout = fanout.with(Arc::new(ConsoleNotifier));
    }
    let notifier = Arc::new(fanout);
    let mut report = Report::new(cli.json);

    match cli.command {
        Command::Query { text } => {
            let ctrl = client.query_controller(notifier);
            scenarios::submit_query(&ctrl, &text, &mut report).await;
        }
        Command::Upload { path } => {
            let candidate = candidate_from_path(&path)?;
            let ctrl = client.ingest_controller(notifier);
            scenarios::upload_file(&ctrl, candidate, &mut report).await;
        }
        Command::RunAll => {
            scenarios::run_all(&client, notifier, &mut report).await;
        }
    }

    report.finish(&history.export_log());
    Ok(())
}

/// Defaults, then the TOML file, then command-line overrides.
fn load_config(cli: &Cli) -> StellarResult<StellarConfig> {
    let mut cfg = match &cli.config {
        Some(path) => config::from_file(path)?,
        None => StellarConfig::default(),
    };
    if let Some(url) = &cli.backend_url {
        cfg.base_url = url.clone();
    }
    if cli.no_demo_fallback {
        cfg.demo_fallback = false;
    }
    config::check(&cfg)?;
    debug!(base_url = %cfg.base_url, demo_fallback = cfg.demo_fallback, "configuration resolved");
    Ok(cfg)
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("STELLAR HEALTH - AI Diagnostic Console");
    println!("Mission Medical Support Demo");
    println!("======================================");
    println!();
    println!("Each submission runs through the request lifecycle:");
    println!("  [1] Input validated locally (empty query / non-CSV file rejected)");
    println!("  [2] Submit disabled while the request is in flight");
    println!("  [3] Backend answer shown, or demo-mode simulation if unreachable");
    println!("  [4] Upload view clears itself a few seconds after completion");
    println!();
}

