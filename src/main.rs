mod catalog;
mod client;
mod predict;
mod tracker;
mod web;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::time::Duration;

use crate::client::{ApiClient, Position, TrackerApi, DEFAULT_API_BASE};
use crate::tracker::render::{render_catalog, render_header, render_position};
use crate::tracker::{filter_by_name, TrackingSession};
use crate::web::Config;

#[derive(Parser)]
#[command(name = "sat-tracker")]
#[command(about = "Near-real-time ISS tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the tracker API server
    Serve {
        /// YAML configuration file
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Follow the ISS position until interrupted
    Track {
        /// Base URL of the tracker API
        #[arg(long, default_value = DEFAULT_API_BASE)]
        api: String,
        /// Select this satellite instead of the first one
        #[arg(long)]
        norad: Option<u32>,
        /// Only list satellites whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// Time between position requests [default: 10s]
        #[arg(long, value_parser = humantime::parse_duration)]
        interval: Option<Duration>,
    },
    /// Print the satellite catalog
    Satellites {
        /// Base URL of the tracker API
        #[arg(long, default_value = DEFAULT_API_BASE)]
        api: String,
        /// Only list satellites whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(config.as_deref()).await,
        Commands::Track {
            api,
            norad,
            search,
            interval,
        } => track(&api, norad, search.as_deref(), interval).await,
        Commands::Satellites { api, search } => satellites(&api, search.as_deref()).await,
    }
}

async fn serve(path: Option<&str>) -> ExitCode {
    let config = match path {
        Some(path) => match Config::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error reading config: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    match web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn track(
    api: &str,
    norad: Option<u32>,
    search: Option<&str>,
    interval: Option<Duration>,
) -> ExitCode {
    let client = match ApiClient::new(api) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid API url: {}", e);
            return ExitCode::FAILURE;
        }
    };

    log::info!("Using tracker API at {}", client.base());
    let mut session = match interval {
        Some(interval) => TrackingSession::with_interval(client, interval),
        None => TrackingSession::new(client),
    };
    // failures are logged by the session; the catalog just stays empty
    let _ = session.load_catalog().await;

    if let Some(query) = search {
        session.set_search_query(query);
    }
    let view = session.snapshot();
    print!(
        "{}",
        render_catalog(&session.filtered_satellites(), view.selected.as_ref())
    );

    if let Some(norad_id) = norad {
        if !session.select_norad(norad_id).await {
            eprintln!("NORAD {} is not in the catalog", norad_id);
            return ExitCode::FAILURE;
        }
    }

    println!();
    print!("{}", render_header(&session.snapshot()));

    if let Err(e) = session.start_tracking() {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let mut updates = session.subscribe();
    let mut shown: Option<Position> = None;
    let interrupted = tokio::signal::ctrl_c();
    tokio::pin!(interrupted);
    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = session.snapshot();
                if view.position.is_some() && view.position != shown {
                    println!();
                    print!("{}", render_position(&view, session.poll_interval()));
                    shown = view.position;
                }
            }
            _ = &mut interrupted => break,
        }
    }

    session.stop_tracking().await;
    ExitCode::SUCCESS
}

async fn satellites(api: &str, search: Option<&str>) -> ExitCode {
    let client = match ApiClient::new(api) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid API url: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match client.satellites().await {
        Ok(list) => {
            let list = filter_by_name(&list, search.unwrap_or_default());
            print!("{}", render_catalog(&list, None));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to load satellites: {}", e);
            ExitCode::FAILURE
        }
    }
}
