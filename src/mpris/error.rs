use thiserror::Error;
use zbus::fdo;

use super::PlayerId;

/// Errors that can occur while talking to media players.
///
/// The taxonomy matters more than the messages: `Unsupported` is an expected
/// condition (player capability sets vary) and is downgraded to a debug log at
/// the dispatch layer, while `PlayerGone` and `Bus` indicate the target or the
/// bus itself went away and are surfaced as warnings. Nothing here is ever
/// fatal to the process.
#[derive(Error, Debug)]
pub enum MprisError {
    /// No media player is present on the bus
    #[error("no media player found")]
    NoPlayer,

    /// The player's bus name is no longer owned
    #[error("player {0} is gone from the bus")]
    PlayerGone(PlayerId),

    /// Player doesn't support the requested capability
    #[error("player {player} does not support {what}")]
    Unsupported {
        /// Player that lacks the capability
        player: PlayerId,
        /// Name of the method or property involved
        what: String,
    },

    /// D-Bus communication error
    #[error("D-Bus operation failed: {0}")]
    Bus(#[from] zbus::Error),
}

impl MprisError {
    /// Classify a zbus error from a call against a specific player.
    ///
    /// Splits "this player cannot do that" from "this player is not there"
    /// from transport-level failures.
    pub fn classify(player: &PlayerId, what: &str, error: zbus::Error) -> Self {
        if let zbus::Error::FDO(fdo_error) = &error {
            match &**fdo_error {
                fdo::Error::UnknownMethod(_)
                | fdo::Error::UnknownProperty(_)
                | fdo::Error::UnknownInterface(_)
                | fdo::Error::PropertyReadOnly(_)
                | fdo::Error::NotSupported(_) => {
                    return Self::Unsupported {
                        player: player.clone(),
                        what: what.to_string(),
                    };
                }
                fdo::Error::ServiceUnknown(_) | fdo::Error::NameHasNoOwner(_) => {
                    return Self::PlayerGone(player.clone());
                }
                _ => {}
            }
        }

        Self::Bus(error)
    }
}
