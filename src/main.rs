/* 3rd party libraries */
use clap::Parser;
use log::{error, info, LevelFilter};
use std::path::PathBuf;

/* Custom libraries */
use elevator_sim::config::load_config;
use elevator_sim::unwrap_or_exit;
use elevator_sim::{Clock, Dispatcher};

#[derive(Debug, Parser)]
#[clap(name = "elevator-sim", about = "Tick-driven elevator bank simulator")]
struct Args {
    /// Path to the TOML configuration file
    #[clap(long, short, default_value = "config.toml")]
    config: PathBuf,

    /// Number of ticks to run, overrides the configuration
    #[clap(long, short)]
    ticks: Option<u64>,

    /// Milliseconds between ticks, overrides the configuration
    #[clap(long)]
    interval_ms: Option<u64>,

    #[clap(long, default_value = "info")]
    log_level: LevelFilter,

    /// Print the final snapshot as JSON
    #[clap(long)]
    json: bool,
}

/* Main */
fn main() {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level)
        .parse_default_env()
        .init();

    // Load the configuration
    let mut config = unwrap_or_exit!(load_config(&args.config));
    if let Some(interval_ms) = args.interval_ms {
        config.simulation.tick_interval_ms = interval_ms;
    }
    if let Some(ticks) = args.ticks {
        config.simulation.tick_count = Some(ticks);
    }

    // Create the simulation state
    let dispatcher = unwrap_or_exit!(Dispatcher::new(&config));
    info!(
        "Building with {} floors and {} elevators",
        config.building.n_floors, config.elevator.count
    );

    // Start the clock
    let clock = Clock::new(&config.simulation);
    let (handle, status_rx) =
        unwrap_or_exit!(clock.start_simulation(dispatcher, config.simulation.tick_count));

    for request in config.requests.iter() {
        match request.weight {
            Some(weight) => handle.submit_request(request.origin, request.dest, weight),
            None => handle.submit_default(request.origin, request.dest),
        }
    }

    // Runs until the clock thread drops its sender
    for status in status_rx.iter() {
        info!("{}", status);
    }

    let dispatcher = handle.wait();
    let final_status = dispatcher.status();

    if args.json {
        match serde_json::to_string_pretty(&final_status) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Failed to serialize final status: {}", e),
        }
    } else {
        println!("{}", final_status);
    }
}
