use std::fmt;

/// Bus name prefix every MPRIS player claims on the session bus.
pub const MPRIS_PREFIX: &str = "org.mpris.MediaPlayer2.";

/// Opaque reference to a media player endpoint on the bus.
///
/// Holds the player's well-known bus name. A `PlayerId` carries no liveness
/// guarantee; it must be re-resolved into live proxies before each use.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a `PlayerId` from a D-Bus bus name.
    pub fn from_bus_name(bus_name: &str) -> Self {
        Self(bus_name.to_string())
    }

    /// Get the D-Bus bus name.
    pub fn bus_name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transport commands that map one-to-one onto MPRIS player methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCommand {
    /// Skip to next track
    Next,

    /// Go to previous track
    Previous,

    /// Toggle play/pause state
    PlayPause,

    /// Pause playback
    Pause,

    /// Start playback
    Play,

    /// Stop playback
    Stop,
}

impl TransportCommand {
    /// MPRIS method name for this command.
    pub fn method_name(self) -> &'static str {
        match self {
            Self::Next => "Next",
            Self::Previous => "Previous",
            Self::PlayPause => "PlayPause",
            Self::Pause => "Pause",
            Self::Play => "Play",
            Self::Stop => "Stop",
        }
    }
}

impl fmt::Display for TransportCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method_name())
    }
}

/// Loop mode for track or playlist repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    /// No looping
    None,

    /// Loop current track
    Track,

    /// Loop entire playlist
    Playlist,
}

impl LoopStatus {
    /// MPRIS string value for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Track => "Track",
            Self::Playlist => "Playlist",
        }
    }

    /// The status the loop-toggle key switches to from `self`.
    ///
    /// A deliberate 2-cycle: anything other than `None` toggles back to
    /// `None`, and `None` toggles to `Playlist`.
    pub fn toggled(self) -> Self {
        match self {
            Self::None => Self::Playlist,
            Self::Track | Self::Playlist => Self::None,
        }
    }
}

impl From<&str> for LoopStatus {
    fn from(status: &str) -> Self {
        match status {
            "Track" => Self::Track,
            "Playlist" => Self::Playlist,
            _ => Self::None,
        }
    }
}
