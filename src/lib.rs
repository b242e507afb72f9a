//! mpris-remote - IR remote control bridge for MPRIS media players.
//!
//! Reads key events from an IR receiver that presents itself as a keyboard
//! device (such as a FLIRC dongle) and translates them into MPRIS commands on
//! the D-Bus session bus. The main features include:
//!
//! - Active-player tracking that survives players appearing and disappearing
//! - Player cycling and identity-based switching
//! - On-demand launch of a configured player when it is not running
//! - Key-to-command and key-to-shell-command mappings from a TOML config
//!
//! The bus offers no liveness guarantees for players, so the current player is
//! held as an opaque bus name and re-resolved before every command.

/// Configuration schema, loading and path discovery.
pub mod config;

/// Key-to-action dispatch for incoming remote events.
pub mod dispatch;

/// Input device handling and the key-event source.
pub mod input;

/// Fire-and-forget launching of external commands.
pub mod launch;

/// Tracing subscriber initialization.
pub mod logging;

/// MPRIS bus adapter, player registry and switching state machine.
pub mod mpris;

/// Desktop notification sink.
pub mod notify;
