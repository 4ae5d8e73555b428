use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quiet_hn::cli::{Cli, Commands, FetchArgs};
use quiet_hn::config::Config;
use quiet_hn::errors::HnResult;
use quiet_hn::render;
use quiet_hn::services::{CacheGate, Resolver, TopStoriesService};
use quiet_hn::sources::HackerNewsClient;

type HnGate = CacheGate<HackerNewsClient, HackerNewsClient>;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> HnResult<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    match cli.command {
        Commands::Top { fetch, json } => {
            let gate = build_gate(&fetch)?;
            cmd_top(&gate, json)
        }
        Commands::Watch {
            fetch,
            interval,
            rounds,
        } => {
            let gate = build_gate(&fetch)?;
            cmd_watch(&gate, Duration::from_secs(interval), rounds)
        }
    }
}

fn build_gate(args: &FetchArgs) -> HnResult<HnGate> {
    let config = Config::from_env()?.with_args(args)?;
    let client = HackerNewsClient::new(&config)?;

    let service = TopStoriesService::new(
        client.clone(),
        client,
        Resolver::new(config.concurrency),
        config.num_stories,
    );

    Ok(CacheGate::new(service, config.cache_ttl))
}

fn cmd_top(gate: &HnGate, json: bool) -> HnResult<()> {
    let start = Instant::now();
    let lookup = gate.get()?;
    let elapsed = start.elapsed();

    if json {
        println!("{}", render::format_json(&lookup, elapsed)?);
    } else {
        println!("{}", render::format_text(&lookup, elapsed, Instant::now()));
    }

    Ok(())
}

fn cmd_watch(gate: &HnGate, interval: Duration, rounds: Option<u64>) -> HnResult<()> {
    let mut round: u64 = 0;

    loop {
        round += 1;
        println!("Request {}:\n", round);

        let start = Instant::now();
        match gate.get() {
            Ok(lookup) => {
                let elapsed = start.elapsed();
                println!("{}\n", render::format_text(&lookup, elapsed, Instant::now()));
            }
            Err(e) => {
                // Nothing was cached, so the next request retries
                println!("FAILED: {}\n", e);
            }
        }

        if rounds.is_some_and(|limit| round >= limit) {
            break;
        }

        thread::sleep(interval);
    }

    Ok(())
}
