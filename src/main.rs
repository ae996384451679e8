//! Sample application (v1)
//!
//! A small Axum service that emits logs, metrics, traces and CPU profiles
//! for a local observability stack.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ request id ─▶ request span ─▶ instrumentation ─▶ timeout ─▶ handler
//!                                        │                 │                        │
//!                                        ▼                 ▼                        ▼
//!                                   OTLP traces    Prometheus + OTLP       simulated work
//!                                                       metrics           (sleep, CPU, errors,
//!                                                                          upstream call)
//!
//!     stdout logs (pretty or JSON, trace-correlated)      Pyroscope CPU profiles (optional)
//! ```

use std::path::PathBuf;

use clap::Parser;

use sample_app::config::load_config;
use sample_app::lifecycle;

#[derive(Parser)]
#[command(name = "sample-app")]
#[command(about = "Demo service exercising logs, metrics, traces and profiles", long_about = None)]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    lifecycle::run(config).await?;
    Ok(())
}
