#![allow(missing_docs)]

use zbus::{Result, proxy};

/// MPRIS MediaPlayer2 interface proxy
///
/// Provides access to the base MPRIS interface; this tool only needs the
/// player's identity from it.
#[proxy(
    interface = "org.mpris.MediaPlayer2",
    default_service = "org.mpris.MediaPlayer2",
    default_path = "/org/mpris/MediaPlayer2"
)]
pub trait MediaPlayer2 {
    /// Human-readable name of the player
    #[zbus(property)]
    fn identity(&self) -> Result<String>;
}

/// MPRIS MediaPlayer2.Player interface proxy
///
/// Playback control interface for media players. Not every player implements
/// every member; absence surfaces as an fdo error on the call.
#[allow(missing_docs)]
#[proxy(
    interface = "org.mpris.MediaPlayer2.Player",
    default_service = "org.mpris.MediaPlayer2",
    default_path = "/org/mpris/MediaPlayer2"
)]
pub trait MediaPlayer2Player {
    /// Start playback
    fn play(&self) -> Result<()>;

    /// Pause playback
    fn pause(&self) -> Result<()>;

    /// Toggle play/pause state
    fn play_pause(&self) -> Result<()>;

    /// Stop playback
    fn stop(&self) -> Result<()>;

    /// Skip to next track
    fn next(&self) -> Result<()>;

    /// Skip to previous track
    fn previous(&self) -> Result<()>;

    /// Current loop status (None, Track, Playlist)
    #[zbus(property)]
    fn loop_status(&self) -> Result<String>;

    /// Set the loop status
    #[zbus(property)]
    fn set_loop_status(&self, status: &str) -> Result<()>;

    /// Whether shuffle mode is enabled
    #[zbus(property)]
    fn shuffle(&self) -> Result<bool>;

    /// Set shuffle mode
    #[zbus(property)]
    fn set_shuffle(&self, shuffle: bool) -> Result<()>;

    /// Current volume level (0.0 to 1.0)
    #[zbus(property)]
    fn volume(&self) -> Result<f64>;

    /// Set volume level
    #[zbus(property)]
    fn set_volume(&self, volume: f64) -> Result<()>;
}
