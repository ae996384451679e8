use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use rand::seq::SliceRandom;
use serde_json::Value;
use tokio::task::JoinSet;

/// Paths hit by `burst`, weighted towards the cheap endpoints.
const BURST_MIX: &[&str] = &[
    "/",
    "/",
    "/health",
    "/health",
    "/health",
    "/slow",
    "/error",
    "/error?type=success",
    "/error?type=500",
    "/error?type=404",
    "/external",
    "/generate-load",
];

#[derive(Parser)]
#[command(name = "traffic-cli")]
#[command(about = "Traffic generator for the sample application", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available endpoints
    Home,
    /// Check service health
    Health,
    /// Run the slow operation
    Slow,
    /// Trigger an error scenario
    Error {
        /// 500, 404, timeout, success or random
        #[arg(short, long, default_value = "random")]
        kind: String,
    },
    /// Call the external API through the service
    External,
    /// Generate synthetic load
    Load,
    /// Dump Prometheus metrics
    Metrics,
    /// Fire a concurrent burst of requests at a random endpoint mix
    Burst {
        #[arg(short, long, default_value_t = 100)]
        requests: usize,
        #[arg(short, long, default_value_t = 10)]
        concurrency: usize,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Home => print_response(client.get(format!("{base}/")).send().await?).await?,
        Commands::Health => {
            print_response(client.get(format!("{base}/health")).send().await?).await?
        }
        Commands::Slow => print_response(client.get(format!("{base}/slow")).send().await?).await?,
        Commands::Error { kind } => {
            let res = client
                .get(format!("{base}/error"))
                .query(&[("type", kind.as_str())])
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::External => {
            print_response(client.get(format!("{base}/external")).send().await?).await?
        }
        Commands::Load => {
            print_response(client.get(format!("{base}/generate-load")).send().await?).await?
        }
        Commands::Metrics => {
            let res = client.get(format!("{base}/metrics")).send().await?;
            println!("{}", res.text().await?);
        }
        Commands::Burst {
            requests,
            concurrency,
        } => burst(client, base, requests, concurrency.max(1)).await,
    }

    Ok(())
}

async fn burst(client: reqwest::Client, base: &str, requests: usize, concurrency: usize) {
    let start = Instant::now();
    let mut tasks = JoinSet::new();

    for worker in 0..concurrency {
        let share = requests / concurrency + usize::from(worker < requests % concurrency);
        let client = client.clone();
        let base = base.to_string();
        tasks.spawn(async move {
            let mut statuses: BTreeMap<String, usize> = BTreeMap::new();
            let mut latencies = Vec::with_capacity(share);
            for _ in 0..share {
                let path = BURST_MIX
                    .choose(&mut rand::thread_rng())
                    .copied()
                    .unwrap_or("/");
                let req_start = Instant::now();
                let outcome = match client.get(format!("{base}{path}")).send().await {
                    Ok(res) => res.status().as_u16().to_string(),
                    Err(_) => "transport_error".to_string(),
                };
                latencies.push(req_start.elapsed());
                *statuses.entry(outcome).or_default() += 1;
            }
            (statuses, latencies)
        });
    }

    let mut statuses: BTreeMap<String, usize> = BTreeMap::new();
    let mut latencies: Vec<Duration> = Vec::with_capacity(requests);
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((worker_statuses, worker_latencies)) => {
                for (status, n) in worker_statuses {
                    *statuses.entry(status).or_default() += n;
                }
                latencies.extend(worker_latencies);
            }
            Err(e) => eprintln!("Worker failed: {}", e),
        }
    }

    let elapsed = start.elapsed();
    latencies.sort();
    println!("Burst Results:");
    println!("  Requests:    {}", latencies.len());
    println!("  Concurrency: {}", concurrency);
    println!("  Duration:    {:?}", elapsed);
    println!(
        "  Throughput:  {:.2} req/s",
        latencies.len() as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );
    if !latencies.is_empty() {
        println!("  P50:         {:?}", latencies[latencies.len() / 2]);
        println!("  P99:         {:?}", latencies[latencies.len() * 99 / 100]);
    }
    println!("  Statuses:");
    for (status, n) in statuses {
        println!("    {status}: {n}");
    }
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
    }

    let text = res.text().await?;
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
