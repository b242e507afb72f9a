//! Key-to-action dispatch.
//!
//! Maps a key-down event to one of: a player-launch mapping, an external
//! command, a direct MPRIS method, or a composite action with local logic.
//! Lookup order follows the configuration's intent: configured mappings win
//! over the built-in tables, and a key present in no table is a strict no-op.

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::{
    config::{CommandMapping, Config, PlayerMapping},
    launch::Launcher,
    mpris::{MprisError, PlayerBus, PlayerId, PlayerRegistry, TransportCommand},
    notify::Notifier,
};

/// Action bound to a key in the built-in tables.
///
/// A closed enumeration; the key tables are built once at startup and no
/// dispatch happens by name at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Direct MPRIS method with no local logic.
    Transport(TransportCommand),

    /// Raise volume by the configured interval, clamped to 1.0.
    VolumeUp,

    /// Lower volume by the configured interval, clamped to 0.0.
    VolumeDown,

    /// Toggle the player's shuffle flag.
    ShuffleToggle,

    /// Toggle loop status between None and Playlist.
    LoopToggle,

    /// Switch to the next player on the bus.
    CyclePlayer,
}

impl KeyAction {
    /// The built-in key bindings.
    ///
    /// These match the layout of common IR remote profiles; the config file
    /// contributes player and command mappings on top.
    pub fn default_table() -> HashMap<String, KeyAction> {
        use TransportCommand::*;

        let bindings = [
            ("KEY_NEXTSONG", KeyAction::Transport(Next)),
            ("KEY_PREVIOUSSONG", KeyAction::Transport(Previous)),
            ("KEY_PLAYPAUSE", KeyAction::Transport(PlayPause)),
            ("KEY_PAUSE", KeyAction::Transport(Pause)),
            ("KEY_PLAY", KeyAction::Transport(Play)),
            ("KEY_STOP", KeyAction::Transport(Stop)),
            ("KEY_STOPCD", KeyAction::Transport(Stop)),
            ("KEY_VOLUMEUP", KeyAction::VolumeUp),
            ("KEY_VOLUMEDOWN", KeyAction::VolumeDown),
            ("KEY_RIGHT", KeyAction::CyclePlayer),
            ("KEY_F12", KeyAction::ShuffleToggle),
            ("KEY_F11", KeyAction::LoopToggle),
        ];

        bindings
            .into_iter()
            .map(|(key, action)| (key.to_string(), action))
            .collect()
    }
}

/// Dispatches key events against the registry, launcher and bus.
///
/// Owns the current-player registry; all handling is sequential, one event to
/// completion before the next.
pub struct Controller<B, N, L> {
    registry: PlayerRegistry<B, N>,
    launcher: L,
    actions: HashMap<String, KeyAction>,
    players: HashMap<String, PlayerMapping>,
    commands: HashMap<String, CommandMapping>,
    volume_interval: f64,
}

impl<B: PlayerBus, N: Notifier, L: Launcher> Controller<B, N, L> {
    /// Build a controller from the loaded configuration.
    pub fn new(config: &Config, registry: PlayerRegistry<B, N>, launcher: L) -> Self {
        let players = config
            .players
            .iter()
            .map(|mapping| (mapping.key.clone(), mapping.clone()))
            .collect();
        let commands = config
            .commands
            .iter()
            .map(|mapping| (mapping.key.clone(), mapping.clone()))
            .collect();

        Self {
            registry,
            launcher,
            actions: KeyAction::default_table(),
            players,
            commands,
            volume_interval: config.general.volume_interval,
        }
    }

    /// The registry backing this controller.
    pub fn registry(&self) -> &PlayerRegistry<B, N> {
        &self.registry
    }

    /// Handle one key-down event.
    ///
    /// Lookup order, first match wins: player mapping, command mapping, then
    /// the built-in action tables. Bus failures are downgraded here; nothing
    /// escapes to the event loop.
    pub async fn handle_key(&mut self, key: &str) {
        if let Some(mapping) = self.players.get(key).cloned() {
            if let Err(e) = self
                .registry
                .ensure_player_running(&mapping, &self.launcher)
                .await
            {
                self.report(e);
            }
            return;
        }

        if let Some(mapping) = self.commands.get(key) {
            self.launcher.launch(&mapping.app);
            return;
        }

        let Some(action) = self.actions.get(key).copied() else {
            trace!(%key, "unmapped key ignored");
            return;
        };

        let player = match self.registry.resolve_current().await {
            Ok(player) => player,
            Err(e) => {
                self.report(e);
                return;
            }
        };

        let result = match action {
            KeyAction::Transport(command) => self.registry.bus().transport(&player, command).await,
            KeyAction::VolumeUp => self.step_volume(&player, self.volume_interval).await,
            KeyAction::VolumeDown => self.step_volume(&player, -self.volume_interval).await,
            KeyAction::ShuffleToggle => self.toggle_shuffle(&player).await,
            KeyAction::LoopToggle => self.toggle_loop(&player).await,
            KeyAction::CyclePlayer => self.registry.cycle_next().await,
        };

        if let Err(e) = result {
            self.report(e);
        }
    }

    /// Step the volume by `delta`, clamped to \[0.0, 1.0\].
    ///
    /// At a bound the clamped value equals the current one and no write is
    /// issued, so repeated presses are no-ops there.
    async fn step_volume(&self, player: &PlayerId, delta: f64) -> Result<(), MprisError> {
        let bus = self.registry.bus();
        let volume = bus.volume(player).await?;
        let stepped = (volume + delta).clamp(0.0, 1.0);

        if (stepped - volume).abs() > f64::EPSILON {
            bus.set_volume(player, stepped).await?;
        }
        Ok(())
    }

    async fn toggle_shuffle(&self, player: &PlayerId) -> Result<(), MprisError> {
        let bus = self.registry.bus();
        let shuffle = bus.shuffle(player).await?;
        bus.set_shuffle(player, !shuffle).await
    }

    async fn toggle_loop(&self, player: &PlayerId) -> Result<(), MprisError> {
        let bus = self.registry.bus();
        let status = bus.loop_status(player).await?;
        bus.set_loop_status(player, status.toggled()).await
    }

    /// Downgrade a bus failure to a log line.
    ///
    /// Missing capabilities are expected across players and only worth a
    /// debug line; a vanished player or an unreachable bus is a warning.
    fn report(&self, error: MprisError) {
        match error {
            MprisError::Unsupported { .. } => debug!("{error}"),
            MprisError::NoPlayer => warn!("no media player found"),
            MprisError::PlayerGone(_) | MprisError::Bus(_) => warn!("{error}"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use super::*;
    use crate::{
        config::GeneralConfig,
        mpris::{
            LoopStatus,
            testing::{MockBus, RecordingLauncher, RecordingNotifier, player},
        },
    };

    fn controller(
        bus: &Arc<MockBus>,
        config: Config,
    ) -> (
        Controller<Arc<MockBus>, Arc<RecordingNotifier>, Arc<RecordingLauncher>>,
        Arc<RecordingNotifier>,
        Arc<RecordingLauncher>,
    ) {
        let notifier = Arc::new(RecordingNotifier::default());
        let launcher = Arc::new(RecordingLauncher::default());
        let registry = PlayerRegistry::new(Arc::clone(bus), Arc::clone(&notifier))
            .with_poll_interval(Duration::from_millis(1));
        let controller = Controller::new(&config, registry, Arc::clone(&launcher));
        (controller, notifier, launcher)
    }

    fn id(suffix: &str) -> PlayerId {
        PlayerId::from_bus_name(&format!("org.mpris.MediaPlayer2.{suffix}"))
    }

    #[tokio::test]
    async fn unmapped_key_is_a_strict_no_op() {
        let bus = Arc::new(MockBus::with_players(vec![player("a", "A")]));
        let (mut controller, _, launcher) = controller(&bus, Config::default());

        controller.handle_key("KEY_Z").await;

        assert_eq!(bus.list_calls(), 0);
        assert!(bus.transports().is_empty());
        assert!(launcher.launches().is_empty());
    }

    #[tokio::test]
    async fn transport_key_invokes_the_method_on_the_current_player() {
        let bus = Arc::new(MockBus::with_players(vec![player("a", "A")]));
        let (mut controller, _, _) = controller(&bus, Config::default());

        controller.handle_key("KEY_PLAYPAUSE").await;

        assert_eq!(
            bus.transports(),
            vec![(id("a"), TransportCommand::PlayPause)]
        );
    }

    #[tokio::test]
    async fn volume_up_steps_and_clamps() {
        let bus = Arc::new(MockBus::with_players(vec![player("a", "A")]));
        bus.set_player_volume(&id("a"), 0.55);
        let (mut controller, _, _) = controller(&bus, Config::default());

        controller.handle_key("KEY_VOLUMEUP").await;

        let volume = bus.player_volume(&id("a"));
        assert!((volume - 0.65).abs() < 1e-9);
    }

    #[tokio::test]
    async fn volume_up_at_full_volume_writes_nothing() {
        let bus = Arc::new(MockBus::with_players(vec![player("a", "A")]));
        bus.set_player_volume(&id("a"), 1.0);
        let (mut controller, _, _) = controller(&bus, Config::default());

        controller.handle_key("KEY_VOLUMEUP").await;

        assert!(bus.volume_sets().is_empty());
        assert!((bus.player_volume(&id("a")) - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn volume_down_at_zero_writes_nothing() {
        let bus = Arc::new(MockBus::with_players(vec![player("a", "A")]));
        bus.set_player_volume(&id("a"), 0.0);
        let (mut controller, _, _) = controller(&bus, Config::default());

        controller.handle_key("KEY_VOLUMEDOWN").await;

        assert!(bus.volume_sets().is_empty());
        assert!((bus.player_volume(&id("a"))).abs() < 1e-9);
    }

    #[tokio::test]
    async fn loop_key_cycles_none_playlist_none() {
        let bus = Arc::new(MockBus::with_players(vec![player("a", "A")]));
        let (mut controller, _, _) = controller(&bus, Config::default());

        controller.handle_key("KEY_F11").await;
        assert_eq!(bus.player_loop(&id("a")), LoopStatus::Playlist);

        controller.handle_key("KEY_F11").await;
        assert_eq!(bus.player_loop(&id("a")), LoopStatus::None);
    }

    #[tokio::test]
    async fn shuffle_key_toggles_the_flag() {
        let bus = Arc::new(MockBus::with_players(vec![player("a", "A")]));
        let (mut controller, _, _) = controller(&bus, Config::default());

        controller.handle_key("KEY_F12").await;
        assert!(bus.player_shuffle(&id("a")));

        controller.handle_key("KEY_F12").await;
        assert!(!bus.player_shuffle(&id("a")));
    }

    #[tokio::test]
    async fn cycle_key_moves_current_to_the_next_player_and_notifies() {
        let bus = Arc::new(MockBus::with_players(vec![
            player("a", "Player A"),
            player("b", "Player B"),
        ]));
        let (mut controller, notifier, _) = controller(&bus, Config::default());

        // First resolution adopts A.
        controller.handle_key("KEY_PLAYPAUSE").await;
        assert_eq!(controller.registry().current(), Some(&id("a")));

        controller.handle_key("KEY_RIGHT").await;

        assert_eq!(controller.registry().current(), Some(&id("b")));
        assert_eq!(
            notifier.messages().last().unwrap(),
            "media player switched to Player B"
        );
    }

    #[tokio::test]
    async fn command_key_launches_without_touching_the_bus() {
        let bus = Arc::new(MockBus::with_players(vec![player("a", "A")]));
        let config = Config {
            general: GeneralConfig::default(),
            players: vec![],
            commands: vec![CommandMapping {
                key: "KEY_POWER".to_string(),
                app: "systemctl suspend".to_string(),
            }],
        };
        let (mut controller, _, launcher) = controller(&bus, config);

        controller.handle_key("KEY_POWER").await;

        assert_eq!(launcher.launches(), vec!["systemctl suspend"]);
        assert_eq!(bus.list_calls(), 0);
        assert!(bus.transports().is_empty());
    }

    #[tokio::test]
    async fn player_key_wins_over_the_builtin_tables() {
        // KEY_PLAY is in the transport table, but a player mapping on the
        // same key must take precedence.
        let bus = Arc::new(MockBus::with_players(vec![player("foo", "Foo")]));
        let config = Config {
            general: GeneralConfig::default(),
            players: vec![PlayerMapping {
                key: "KEY_PLAY".to_string(),
                app: "foo-player".to_string(),
                identity: "Foo".to_string(),
            }],
            commands: vec![],
        };
        let (mut controller, _, launcher) = controller(&bus, config);

        controller.handle_key("KEY_PLAY").await;

        assert!(bus.transports().is_empty());
        assert!(launcher.launches().is_empty());
        assert_eq!(controller.registry().current(), Some(&id("foo")));
    }

    #[tokio::test]
    async fn no_player_on_the_bus_aborts_dispatch_quietly() {
        let bus = Arc::new(MockBus::with_players(vec![]));
        let (mut controller, notifier, _) = controller(&bus, Config::default());

        controller.handle_key("KEY_PLAYPAUSE").await;

        assert!(bus.transports().is_empty());
        assert!(notifier.messages().is_empty());
    }

    #[test]
    fn default_table_covers_the_remote_layout() {
        let table = KeyAction::default_table();
        assert_eq!(
            table.get("KEY_NEXTSONG"),
            Some(&KeyAction::Transport(TransportCommand::Next))
        );
        assert_eq!(
            table.get("KEY_STOPCD"),
            Some(&KeyAction::Transport(TransportCommand::Stop))
        );
        assert_eq!(table.get("KEY_RIGHT"), Some(&KeyAction::CyclePlayer));
        assert_eq!(table.get("KEY_F11"), Some(&KeyAction::LoopToggle));
        assert_eq!(table.len(), 12);
    }
}
