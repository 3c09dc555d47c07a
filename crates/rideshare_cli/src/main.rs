use std::fs::File;
use std::io;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use eyre::WrapErr;
use rideshare_core::dispatcher::Dispatcher;
use rideshare_core::monitor::{Monitor, SimReport};
use rideshare_core::runner::{run_simulation, SimulationSummary};
use rideshare_core::scenario::{build_world, load_events, MatchingAlgorithmType, SimulationConfig};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "rideshare",
    about = "Discrete-event simulation of a ride-sharing dispatcher",
    long_about = "Reads rider and driver requests from an event file, runs the\n\
                  dispatch simulation and prints aggregate statistics."
)]
struct Cli {
    /// Event file with one DriverRequest or RiderRequest per line
    events: PathBuf,
    /// JSON configuration file; command-line flags take precedence
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Last simulated tick to execute
    #[arg(long, env = "RIDESHARE_MAX_TIME")]
    max_time: Option<u64>,
    /// Matching policy used by the dispatcher
    #[arg(long, value_enum)]
    matching: Option<MatchingArg>,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
    /// Write every monitor notification to this CSV file
    #[arg(long)]
    activity_csv: Option<PathBuf>,
    /// Verbosity: -v info, -vv debug, -vvv trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Also write log messages to this file
    #[arg(long)]
    log_output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum MatchingArg {
    /// Driver with the shortest travel time to the pickup
    Nearest,
    /// Driver that has waited longest
    FirstAvailable,
}

impl From<MatchingArg> for MatchingAlgorithmType {
    fn from(arg: MatchingArg) -> Self {
        match arg {
            MatchingArg::Nearest => MatchingAlgorithmType::Nearest,
            MatchingArg::FirstAvailable => MatchingAlgorithmType::FirstAvailable,
        }
    }
}

// ── Setup ──────────────────────────────────────────────────────────

/// Set up a logger based on the given user options.
fn set_up_logger(cli: &Cli) -> Result<(), fern::InitError> {
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message))
        })
        .level(log_level)
        .chain(io::stderr());
    let dispatch = match &cli.log_output {
        Some(path) => dispatch.chain(fern::log_file(path)?),
        None => dispatch,
    };
    dispatch.apply()?;
    Ok(())
}

fn resolve_config(cli: &Cli) -> eyre::Result<SimulationConfig> {
    let mut config = match &cli.config {
        Some(path) => SimulationConfig::load(path)
            .wrap_err_with(|| format!("unable to load config {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if let Some(max_time) = cli.max_time {
        config = config.with_max_time(max_time);
    }
    if let Some(matching) = cli.matching {
        config = config.with_matching(matching.into());
    }
    Ok(config)
}

// ── Output ─────────────────────────────────────────────────────────

fn print_report(summary: &SimulationSummary, dispatcher: &Dispatcher, report: &SimReport) {
    println!("--- Ride-sharing simulation ---");
    println!("Events executed: {}", summary.steps);
    println!("Final time: {}", summary.final_time);
    if summary.pending_events > 0 {
        println!("Events left past max time: {}", summary.pending_events);
    }
    println!("Dispatcher: {dispatcher}");
    println!(
        "Riders: {} requested, {} picked up, {} cancelled",
        report.riders_requested, report.riders_satisfied, report.riders_cancelled
    );
    println!("Drivers: {}", report.drivers_seen);
    println!("rider_wait_time: {:.2}", report.rider_wait_time);
    println!("driver_total_distance: {:.2}", report.driver_total_distance);
    println!("driver_ride_distance: {:.2}", report.driver_ride_distance);
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    set_up_logger(&cli)?;

    let config = resolve_config(&cli)?;
    let events = load_events(&cli.events)
        .wrap_err_with(|| format!("unable to load events {}", cli.events.display()))?;

    let mut world = build_world(&events, &config);
    let summary = run_simulation(&mut world);

    let monitor = world.resource::<Monitor>();
    if let Some(path) = &cli.activity_csv {
        let file = File::create(path)
            .wrap_err_with(|| format!("unable to create {}", path.display()))?;
        monitor
            .write_csv(file)
            .wrap_err("unable to write activity log")?;
        log::info!("activity log written to {}", path.display());
    }

    let report = monitor.report();
    if cli.json {
        serde_json::to_writer_pretty(io::stdout(), &report)?;
        println!();
    } else {
        print_report(&summary, world.resource::<Dispatcher>(), &report);
    }
    Ok(())
}
