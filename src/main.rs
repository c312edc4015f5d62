//! Mars Rover Images CLI - fetch and cache Mars rover photographs
//!
//! A command-line tool that queries the NASA Mars rover photos API for a
//! trailing ten-day window of images, caching image URLs on disk between
//! runs so already-resolved dates never hit the network again.

use std::process;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rover_images::app::App;
use rover_images::cli::{Cli, Command};
use rover_images::config::Settings;
use rover_images::data::PhotoClient;

/// Static banner printed when no subcommand is given
const BANNER: &str = "Mars Rover Images Query CLI";

/// Initializes the tracing subscriber
///
/// Log lines go to stderr so stdout stays reserved for the JSON response.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rover_images=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        None => println!("{BANNER}"),
        Some(Command::Get) => {
            if let Err(err) = run_get(&cli).await {
                eprintln!("error: {err}");
                process::exit(1);
            }
        }
    }
}

/// Runs the get pipeline, returning any fatal error to the caller so that
/// process termination stays at this boundary
async fn run_get(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load(
        cli.config.as_deref(),
        cli.rover.as_deref(),
        cli.camera.as_deref(),
    )?;

    let mut app = App::new(settings)?;
    let client = PhotoClient::new();
    let response = app.run_get(&client).await?;

    println!("{response}");
    Ok(())
}
