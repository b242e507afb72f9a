//! In-memory collaborators for exercising the registry and dispatcher.

#![allow(clippy::unwrap_used, missing_docs)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;

use super::{LoopStatus, MprisError, PlayerBus, PlayerId, TransportCommand};
use crate::{launch::Launcher, notify::Notifier};

/// Build a `(PlayerId, identity)` pair from a short bus-name suffix.
pub(crate) fn player(suffix: &str, identity: &str) -> (PlayerId, String) {
    (
        PlayerId::from_bus_name(&format!("org.mpris.MediaPlayer2.{suffix}")),
        identity.to_string(),
    )
}

/// A scriptable in-memory player bus.
///
/// Players can be present from the start or scheduled to appear once
/// `list_players` has been called a given number of times, which models an
/// application that takes a while to claim its bus name after launch.
#[derive(Default)]
pub(crate) struct MockBus {
    players: Mutex<Vec<(PlayerId, String)>>,
    pending: Mutex<Option<(usize, (PlayerId, String))>>,
    list_count: AtomicUsize,
    volumes: Mutex<HashMap<PlayerId, f64>>,
    volume_sets: Mutex<Vec<(PlayerId, f64)>>,
    shuffles: Mutex<HashMap<PlayerId, bool>>,
    loops: Mutex<HashMap<PlayerId, LoopStatus>>,
    transports: Mutex<Vec<(PlayerId, TransportCommand)>>,
}

impl MockBus {
    pub(crate) fn with_players(players: Vec<(PlayerId, String)>) -> Self {
        Self {
            players: Mutex::new(players),
            ..Self::default()
        }
    }

    /// Schedule `player` to join the bus once `list_players` has been called
    /// `at_call` times in total.
    pub(crate) fn appear_at(&self, at_call: usize, player: (PlayerId, String)) {
        *self.pending.lock().unwrap() = Some((at_call, player));
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_count.load(Ordering::SeqCst)
    }

    pub(crate) fn identity_of(&self, player: &PlayerId) -> String {
        self.players
            .lock()
            .unwrap()
            .iter()
            .find(|(id, _)| id == player)
            .map(|(_, identity)| identity.clone())
            .unwrap()
    }

    pub(crate) fn set_player_volume(&self, player: &PlayerId, volume: f64) {
        self.volumes.lock().unwrap().insert(player.clone(), volume);
    }

    pub(crate) fn player_volume(&self, player: &PlayerId) -> f64 {
        self.volumes.lock().unwrap().get(player).copied().unwrap_or(0.5)
    }

    pub(crate) fn volume_sets(&self) -> Vec<(PlayerId, f64)> {
        self.volume_sets.lock().unwrap().clone()
    }

    pub(crate) fn set_player_loop(&self, player: &PlayerId, status: LoopStatus) {
        self.loops.lock().unwrap().insert(player.clone(), status);
    }

    pub(crate) fn player_loop(&self, player: &PlayerId) -> LoopStatus {
        self.loops
            .lock()
            .unwrap()
            .get(player)
            .copied()
            .unwrap_or(LoopStatus::None)
    }

    pub(crate) fn player_shuffle(&self, player: &PlayerId) -> bool {
        self.shuffles.lock().unwrap().get(player).copied().unwrap_or(false)
    }

    pub(crate) fn transports(&self) -> Vec<(PlayerId, TransportCommand)> {
        self.transports.lock().unwrap().clone()
    }

    fn require(&self, player: &PlayerId) -> Result<(), MprisError> {
        let players = self.players.lock().unwrap();
        if players.iter().any(|(id, _)| id == player) {
            Ok(())
        } else {
            Err(MprisError::PlayerGone(player.clone()))
        }
    }
}

#[async_trait]
impl PlayerBus for Arc<MockBus> {
    async fn list_players(&self) -> Result<Vec<PlayerId>, MprisError> {
        let count = self.list_count.fetch_add(1, Ordering::SeqCst) + 1;

        let mut pending = self.pending.lock().unwrap();
        if let Some((at_call, _)) = pending.as_ref() {
            if count >= *at_call {
                if let Some((_, player)) = pending.take() {
                    self.players.lock().unwrap().push(player);
                }
            }
        }
        drop(pending);

        Ok(self
            .players
            .lock()
            .unwrap()
            .iter()
            .map(|(id, _)| id.clone())
            .collect())
    }

    async fn identity(&self, player: &PlayerId) -> Result<String, MprisError> {
        self.players
            .lock()
            .unwrap()
            .iter()
            .find(|(id, _)| id == player)
            .map(|(_, identity)| identity.clone())
            .ok_or_else(|| MprisError::PlayerGone(player.clone()))
    }

    async fn transport(
        &self,
        player: &PlayerId,
        command: TransportCommand,
    ) -> Result<(), MprisError> {
        self.require(player)?;
        self.transports.lock().unwrap().push((player.clone(), command));
        Ok(())
    }

    async fn volume(&self, player: &PlayerId) -> Result<f64, MprisError> {
        self.require(player)?;
        Ok(self.player_volume(player))
    }

    async fn set_volume(&self, player: &PlayerId, volume: f64) -> Result<(), MprisError> {
        self.require(player)?;
        self.volume_sets.lock().unwrap().push((player.clone(), volume));
        self.volumes.lock().unwrap().insert(player.clone(), volume);
        Ok(())
    }

    async fn shuffle(&self, player: &PlayerId) -> Result<bool, MprisError> {
        self.require(player)?;
        Ok(self.player_shuffle(player))
    }

    async fn set_shuffle(&self, player: &PlayerId, shuffle: bool) -> Result<(), MprisError> {
        self.require(player)?;
        self.shuffles.lock().unwrap().insert(player.clone(), shuffle);
        Ok(())
    }

    async fn loop_status(&self, player: &PlayerId) -> Result<LoopStatus, MprisError> {
        self.require(player)?;
        Ok(self.player_loop(player))
    }

    async fn set_loop_status(
        &self,
        player: &PlayerId,
        status: LoopStatus,
    ) -> Result<(), MprisError> {
        self.require(player)?;
        self.loops.lock().unwrap().insert(player.clone(), status);
        Ok(())
    }
}

/// Notifier that records every message instead of showing it.
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub(crate) fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for Arc<RecordingNotifier> {
    async fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Launcher that records commands instead of spawning processes.
#[derive(Default)]
pub(crate) struct RecordingLauncher {
    launches: Mutex<Vec<String>>,
}

impl RecordingLauncher {
    pub(crate) fn launches(&self) -> Vec<String> {
        self.launches.lock().unwrap().clone()
    }
}

impl Launcher for Arc<RecordingLauncher> {
    fn launch(&self, command: &str) {
        self.launches.lock().unwrap().push(command.to_string());
    }
}
