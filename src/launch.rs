//! Fire-and-forget launching of external commands.

use std::process::Stdio;

use tokio::process::Command;
use tracing::{info, warn};

/// Process-launch collaborator. Output is discarded and the exit status is
/// never observed.
pub trait Launcher: Send + Sync {
    /// Start `command` in the background.
    fn launch(&self, command: &str);
}

/// Launcher that hands the command line to `sh -c`.
pub struct ShellLauncher;

impl Launcher for ShellLauncher {
    fn launch(&self, command: &str) {
        let spawned = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => {
                info!(%command, "launched external command");
                // The child is detached; tokio reaps it when it exits.
                drop(child);
            }
            Err(e) => warn!(%command, error = %e, "failed to launch external command"),
        }
    }
}
