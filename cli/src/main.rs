use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;
use mmn_core::{HistoryRecorder, MetricPoint, SimConfig, Simulation, Snapshot};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Run an M/M/n queue to its time bound and print a JSON report.
#[derive(Parser, Debug)]
#[command(name = "mmn", version)]
struct Args {
    /// JSON file with a `SimConfig`; missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    servers: Option<usize>,

    /// Mean gap between arrivals (not a rate).
    #[arg(long)]
    mean_interarrival_time: Option<f64>,

    #[arg(long)]
    mean_service_time: Option<f64>,

    #[arg(long)]
    max_run_time: Option<f64>,

    #[arg(long)]
    stats_reset_time: Option<f64>,

    #[arg(long)]
    seed: Option<u64>,

    /// Sample a history point every this many time units (0 disables).
    #[arg(long, default_value_t = 0.0)]
    history_interval: f64,

    #[arg(long, default_value_t = 500)]
    history_points: usize,

    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
struct Report {
    config: SimConfig,
    events: u64,
    snapshot: Snapshot,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    history: Vec<MetricPoint>,
}

fn load_config(args: &Args) -> anyhow::Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => SimConfig::default(),
    };

    if let Some(v) = args.servers {
        config.server_count = v;
    }
    if let Some(v) = args.mean_interarrival_time {
        config.mean_interarrival_time = v;
    }
    if let Some(v) = args.mean_service_time {
        config.mean_service_time = v;
    }
    if let Some(v) = args.max_run_time {
        config.max_run_time = v;
    }
    if let Some(v) = args.stats_reset_time {
        config.stats_reset_time = v;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let mut sim = Simulation::new(config.clone()).context("invalid configuration")?;

    let mut recorder = (args.history_interval > 0.0)
        .then(|| HistoryRecorder::new(args.history_points, args.history_interval));

    let events = match recorder.as_mut() {
        Some(recorder) => {
            let mut count = 0;
            recorder.update(&sim);
            while sim.step().is_some() {
                recorder.update(&sim);
                count += 1;
            }
            count
        }
        None => sim.run(),
    };
    info!("processed {} events", events);

    let report = Report {
        config,
        events,
        snapshot: sim.snapshot(),
        history: recorder.map(|r| r.history.into_iter().collect()).unwrap_or_default(),
    };
    let out = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", out);
    Ok(())
}
