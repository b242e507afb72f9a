//! mpris-remote - entry point.
//!
//! Startup is the only fatal territory: an unreadable config and an
//! unopenable input device each exit with their own code so service managers
//! can tell them apart. Once the event loop runs, every failure is soft.

use std::{path::PathBuf, process};

use clap::Parser;
use tracing::{error, info, warn};

use mpris_remote::{
    config::{Config, ConfigPaths},
    dispatch::Controller,
    input,
    launch::ShellLauncher,
    logging,
    mpris::SessionBus,
    notify::DesktopNotifier,
};

/// Exit code for configuration failures.
const EXIT_CONFIG: i32 = 1;
/// Exit code for input-device failures.
const EXIT_DEVICE: i32 = 2;
/// Exit code when the session bus is unreachable.
const EXIT_BUS: i32 = 3;

#[derive(Parser)]
#[command(version, about = "Drive MPRIS media players from an IR remote")]
struct Cli {
    /// Path to the configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input device path, overriding the configured one
    #[arg(long)]
    device: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = logging::init() {
        eprintln!("failed to initialise logging: {e}");
    }

    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => match ConfigPaths::config_file() {
            Ok(path) => path,
            Err(e) => {
                error!(error = %e, "cannot locate configuration");
                process::exit(EXIT_CONFIG);
            }
        },
    };

    let mut config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!(config = %config_path.display(), error = %e, "cannot load configuration");
            process::exit(EXIT_CONFIG);
        }
    };

    if let Some(device) = cli.device {
        config.general.device = device;
    }

    let device = match input::open_device(&config.general.device) {
        Ok(device) => device,
        Err(e) => {
            error!(error = %e, "device not found");
            process::exit(EXIT_DEVICE);
        }
    };

    let bus = match SessionBus::connect().await {
        Ok(bus) => bus,
        Err(e) => {
            error!(error = %e, "cannot reach the D-Bus session bus");
            process::exit(EXIT_BUS);
        }
    };

    let registry = mpris_remote::mpris::PlayerRegistry::new(bus, DesktopNotifier);
    let mut controller = Controller::new(&config, registry, ShellLauncher);
    let mut events = input::spawn_reader(device);

    info!(device = %config.general.device.display(), "listening for remote key events");

    // One event at a time, dispatched to completion. A launch-wait blocks the
    // loop for its duration; with a single remote that is acceptable.
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("interrupt received, shutting down");
                break;
            }
            event = events.recv() => match event {
                Some(event) => controller.handle_key(&event.key).await,
                None => {
                    warn!("input device closed");
                    break;
                }
            }
        }
    }
}
