use anyhow::{Context, bail};
use serde::Serialize;
use signal_timing_ga::bootstrap::{Configuration, bootstrap_optimizer};
use signal_timing_ga::models::{Report, SignalTiming, proportional_timing};
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct Output {
    seed: u64,
    report: Report,
    baseline: SignalTiming,
}

// Usage: signal-timing <north> <south> <west> <east>
// Reads .env.local, then SIGNAL_TIMING_CONFIG, SIGNAL_TIMING_SEED,
// SIGNAL_TIMING_BUDGET_MS and SIGNAL_TIMING_TIMEOUT_MS from the environment.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::from_filename(".env.local").ok();
    tracing_subscriber::fmt()
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cars = std::env::args()
        .skip(1)
        .map(|arg| {
            arg.parse::<u32>()
                .with_context(|| format!("vehicle counts must be non-negative integers, got {arg}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    if cars.is_empty() {
        bail!("usage: signal-timing <north> <south> <west> <east>");
    }

    let config = Configuration::from_env()?;
    let service = bootstrap_optimizer(&config)?.build()?;
    let seed = config.seed.unwrap_or_else(rand::random);

    let baseline = proportional_timing(&cars);
    let report = service
        .optimize_with_timeout(cars, seed, config.timeout())
        .await?;

    let output = Output {
        seed,
        report,
        baseline,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
