mod app;
mod cli;
mod config;
mod destination;
mod fetch;
mod providers;
mod state;
mod task;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;

/// Default log filter when RUST_LOG is unset
fn default_filter(cli: &Cli) -> &'static str {
    match (&cli.command, cli.output.verbose) {
        (None, _) => "travelx=debug,info",
        (Some(_), true) => "travelx=debug",
        (Some(_), false) => "travelx=warn",
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // API keys may come from a .env file next to the binary
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so CLI output stays machine-readable
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter(&cli).into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Some(command) => {
            if let Err(e) = cli::run(command, &cli.output).await {
                cli::print_error(&format!("{:#}", e));
                std::process::exit(1);
            }
            Ok(())
        }
        None => run_gui(),
    }
}

fn run_gui() -> Result<()> {
    tracing::info!("Starting TravelX");

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([960.0, 720.0])
        .with_min_inner_size([640.0, 480.0])
        .with_title("TravelX");

    let native_options = eframe::NativeOptions {
        viewport,
        persist_window: true, // Save/restore window size and position
        ..Default::default()
    };

    eframe::run_native(
        "TravelX",
        native_options,
        Box::new(|cc| Ok(Box::new(app::TravelApp::new(cc)?))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))?;

    Ok(())
}
