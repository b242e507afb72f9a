use std::time::Duration;

use tracing::{debug, info};

use super::{MprisError, PlayerBus, PlayerId};
use crate::notify::Notifier;

/// How many times a freshly launched player is polled for before giving up.
pub const LAUNCH_POLL_ATTEMPTS: u32 = 10;

/// Delay between launch-confirmation polls.
pub const LAUNCH_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Registry of the single "current" media player.
///
/// The current player is held as an opaque [`PlayerId`]; the bus gives no
/// change notification when players come and go, so the reference is probed
/// and, if dead, replaced on every resolution. All mutation of the current
/// reference funnels through this type.
pub struct PlayerRegistry<B, N> {
    pub(super) bus: B,
    pub(super) notifier: N,
    pub(super) current: Option<PlayerId>,
    pub(super) poll_interval: Duration,
    pub(super) poll_attempts: u32,
}

impl<B: PlayerBus, N: Notifier> PlayerRegistry<B, N> {
    /// Create a registry with no current player.
    pub fn new(bus: B, notifier: N) -> Self {
        Self {
            bus,
            notifier,
            current: None,
            poll_interval: LAUNCH_POLL_INTERVAL,
            poll_attempts: LAUNCH_POLL_ATTEMPTS,
        }
    }

    /// Override the launch-confirmation poll interval.
    ///
    /// Production keeps the one-second default; tests shorten it.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// The bus this registry talks through.
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// The current player reference, if any. Not guaranteed live.
    pub fn current(&self) -> Option<&PlayerId> {
        self.current.as_ref()
    }

    /// Resolve the current player to a live, usable reference.
    ///
    /// With no current player, adopts the first entry of a fresh enumeration.
    /// With a current player that no longer answers, clears it and retries
    /// adoption once. Resolution is bounded; it never blocks beyond the bus
    /// calls involved.
    ///
    /// # Errors
    /// Returns [`MprisError::NoPlayer`] if nothing is adoptable, or the bus
    /// error if enumeration itself fails.
    pub async fn resolve_current(&mut self) -> Result<PlayerId, MprisError> {
        if let Some(current) = self.current.clone() {
            match self.bus.identity(&current).await {
                Ok(_) => return Ok(current),
                Err(e) => {
                    debug!(player = %current, error = %e, "current player no longer answers");
                    self.current = None;
                }
            }
        }

        let players = self.bus.list_players().await?;
        match players.into_iter().next() {
            Some(player) => {
                self.adopt(player.clone()).await;
                Ok(player)
            }
            None => Err(MprisError::NoPlayer),
        }
    }

    /// Make `player` the current player and tell the user about it.
    ///
    /// The identity is fetched for the notification; if even that fails the
    /// bus name stands in, the adoption itself still happens.
    pub(super) async fn adopt(&mut self, player: PlayerId) {
        let identity = self
            .bus
            .identity(&player)
            .await
            .unwrap_or_else(|_| player.bus_name().to_string());

        info!(player = %player, %identity, "media player switched");
        self.current = Some(player);
        self.notifier
            .notify(&format!("media player switched to {identity}"))
            .await;
    }
}
