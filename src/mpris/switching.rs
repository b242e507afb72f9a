use tracing::{debug, warn};

use super::{MprisError, PlayerBus, registry::PlayerRegistry};
use crate::{config::PlayerMapping, launch::Launcher, notify::Notifier};

impl<B: PlayerBus, N: Notifier> PlayerRegistry<B, N> {
    /// Switch to the player after the current one in bus order.
    ///
    /// "Next" is operational, not positional: the entry immediately following
    /// the current reference in the latest enumeration. There is no wraparound
    /// step; when the current player is last or no longer listed, the first
    /// entry of a fresh enumeration is adopted instead. Enumeration order is
    /// not stable between bus queries, so repeated cycling may occasionally
    /// repeat or skip a player while players churn. That is accepted.
    ///
    /// # Errors
    /// Returns the bus error if enumeration fails.
    pub async fn cycle_next(&mut self) -> Result<(), MprisError> {
        let players = self.bus.list_players().await?;

        if let Some(current) = &self.current {
            if let Some(position) = players.iter().position(|p| p == current) {
                if let Some(next) = players.get(position + 1) {
                    self.adopt(next.clone()).await;
                    return Ok(());
                }
            }
        }

        let players = self.bus.list_players().await?;
        match players.into_iter().next() {
            Some(first) => self.adopt(first).await,
            None => {
                self.current = None;
                warn!("no player found");
            }
        }

        Ok(())
    }

    /// Switch to the player whose `Identity` exactly matches `identity`.
    ///
    /// Players that fail the identity fetch during the scan are skipped; they
    /// are either gone already or in no state to receive commands.
    ///
    /// # Errors
    /// Returns the bus error if enumeration fails.
    pub async fn switch_to_identity(&mut self, identity: &str) -> Result<bool, MprisError> {
        for player in self.bus.list_players().await? {
            match self.bus.identity(&player).await {
                Ok(id) if id == identity => {
                    self.adopt(player).await;
                    return Ok(true);
                }
                Ok(_) => {}
                Err(e) => debug!(player = %player, error = %e, "skipping unreadable player"),
            }
        }

        Ok(false)
    }

    /// Make sure the player described by `mapping` is running and current.
    ///
    /// Short-circuits without touching the launcher when the current player
    /// already carries the target identity, or when some running player does.
    /// Otherwise the launch command is fired once and the bus is polled, at a
    /// fixed interval, up to [`super::registry::LAUNCH_POLL_ATTEMPTS`] times for the
    /// identity to appear. Exhausting the attempts leaves the current player
    /// unresolved and is only logged.
    ///
    /// # Errors
    /// Returns the bus error if enumeration fails.
    pub async fn ensure_player_running<L: Launcher>(
        &mut self,
        mapping: &PlayerMapping,
        launcher: &L,
    ) -> Result<(), MprisError> {
        if let Some(current) = self.current.clone() {
            if let Ok(identity) = self.bus.identity(&current).await {
                if identity == mapping.identity {
                    debug!(player = %current, "target player already current");
                    return Ok(());
                }
            }
        }

        if self.switch_to_identity(&mapping.identity).await? {
            return Ok(());
        }

        launcher.launch(&mapping.app);

        for _ in 0..self.poll_attempts {
            tokio::time::sleep(self.poll_interval).await;
            if self.switch_to_identity(&mapping.identity).await? {
                return Ok(());
            }
        }

        warn!(
            identity = %mapping.identity,
            app = %mapping.app,
            "launched player never appeared on the bus"
        );
        Ok(())
    }
}
