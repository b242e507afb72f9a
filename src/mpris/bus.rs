use async_trait::async_trait;
use zbus::{Connection, fdo};

use super::{
    LoopStatus, MPRIS_PREFIX, MediaPlayer2PlayerProxy, MediaPlayer2Proxy, MprisError, PlayerId,
    TransportCommand,
};

/// Capability seam over the media-control bus.
///
/// The registry and dispatcher only talk to players through this trait, which
/// keeps the wire protocol out of the core logic and lets tests substitute an
/// in-memory bus. Enumeration order is whatever the bus returns; it is not
/// guaranteed stable between calls.
#[async_trait]
pub trait PlayerBus: Send + Sync {
    /// Enumerate the players currently present on the bus, in bus order.
    async fn list_players(&self) -> Result<Vec<PlayerId>, MprisError>;

    /// Fetch a player's `Identity`. Doubles as the liveness probe for a
    /// stored reference.
    async fn identity(&self, player: &PlayerId) -> Result<String, MprisError>;

    /// Invoke a transport method on a player.
    async fn transport(
        &self,
        player: &PlayerId,
        command: TransportCommand,
    ) -> Result<(), MprisError>;

    /// Read the player's volume (0.0 to 1.0).
    async fn volume(&self, player: &PlayerId) -> Result<f64, MprisError>;

    /// Set the player's volume.
    async fn set_volume(&self, player: &PlayerId, volume: f64) -> Result<(), MprisError>;

    /// Read the player's shuffle flag.
    async fn shuffle(&self, player: &PlayerId) -> Result<bool, MprisError>;

    /// Set the player's shuffle flag.
    async fn set_shuffle(&self, player: &PlayerId, shuffle: bool) -> Result<(), MprisError>;

    /// Read the player's loop status.
    async fn loop_status(&self, player: &PlayerId) -> Result<LoopStatus, MprisError>;

    /// Set the player's loop status.
    async fn set_loop_status(
        &self,
        player: &PlayerId,
        status: LoopStatus,
    ) -> Result<(), MprisError>;
}

/// `PlayerBus` implementation over the D-Bus session bus.
///
/// Proxies are built per call and never cached; the bus offers no liveness
/// notification, so every command re-binds to the player's bus name.
pub struct SessionBus {
    connection: Connection,
}

impl SessionBus {
    /// Connect to the D-Bus session bus.
    ///
    /// # Errors
    /// Returns error if the session bus is unreachable.
    pub async fn connect() -> Result<Self, MprisError> {
        let connection = Connection::session().await.map_err(MprisError::Bus)?;
        Ok(Self { connection })
    }

    async fn base_proxy(&self, player: &PlayerId) -> Result<MediaPlayer2Proxy<'_>, MprisError> {
        MediaPlayer2Proxy::builder(&self.connection)
            .destination(player.bus_name().to_string())
            .map_err(MprisError::Bus)?
            .build()
            .await
            .map_err(|e| MprisError::classify(player, "MediaPlayer2", e))
    }

    async fn player_proxy(
        &self,
        player: &PlayerId,
    ) -> Result<MediaPlayer2PlayerProxy<'_>, MprisError> {
        MediaPlayer2PlayerProxy::builder(&self.connection)
            .destination(player.bus_name().to_string())
            .map_err(MprisError::Bus)?
            .build()
            .await
            .map_err(|e| MprisError::classify(player, "MediaPlayer2.Player", e))
    }
}

#[async_trait]
impl PlayerBus for SessionBus {
    async fn list_players(&self) -> Result<Vec<PlayerId>, MprisError> {
        let dbus_proxy = fdo::DBusProxy::new(&self.connection)
            .await
            .map_err(MprisError::Bus)?;

        let names = dbus_proxy
            .list_names()
            .await
            .map_err(|e| MprisError::Bus(e.into()))?;

        Ok(names
            .iter()
            .filter(|name| name.starts_with(MPRIS_PREFIX))
            .map(|name| PlayerId::from_bus_name(name.as_str()))
            .collect())
    }

    async fn identity(&self, player: &PlayerId) -> Result<String, MprisError> {
        let proxy = self.base_proxy(player).await?;
        proxy
            .identity()
            .await
            .map_err(|e| MprisError::classify(player, "Identity", e))
    }

    async fn transport(
        &self,
        player: &PlayerId,
        command: TransportCommand,
    ) -> Result<(), MprisError> {
        let proxy = self.player_proxy(player).await?;
        let result = match command {
            TransportCommand::Next => proxy.next().await,
            TransportCommand::Previous => proxy.previous().await,
            TransportCommand::PlayPause => proxy.play_pause().await,
            TransportCommand::Pause => proxy.pause().await,
            TransportCommand::Play => proxy.play().await,
            TransportCommand::Stop => proxy.stop().await,
        };
        result.map_err(|e| MprisError::classify(player, command.method_name(), e))
    }

    async fn volume(&self, player: &PlayerId) -> Result<f64, MprisError> {
        let proxy = self.player_proxy(player).await?;
        proxy
            .volume()
            .await
            .map_err(|e| MprisError::classify(player, "Volume", e))
    }

    async fn set_volume(&self, player: &PlayerId, volume: f64) -> Result<(), MprisError> {
        let proxy = self.player_proxy(player).await?;
        proxy
            .set_volume(volume)
            .await
            .map_err(|e| MprisError::classify(player, "Volume", e))
    }

    async fn shuffle(&self, player: &PlayerId) -> Result<bool, MprisError> {
        let proxy = self.player_proxy(player).await?;
        proxy
            .shuffle()
            .await
            .map_err(|e| MprisError::classify(player, "Shuffle", e))
    }

    async fn set_shuffle(&self, player: &PlayerId, shuffle: bool) -> Result<(), MprisError> {
        let proxy = self.player_proxy(player).await?;
        proxy
            .set_shuffle(shuffle)
            .await
            .map_err(|e| MprisError::classify(player, "Shuffle", e))
    }

    async fn loop_status(&self, player: &PlayerId) -> Result<LoopStatus, MprisError> {
        let proxy = self.player_proxy(player).await?;
        let status = proxy
            .loop_status()
            .await
            .map_err(|e| MprisError::classify(player, "LoopStatus", e))?;
        Ok(LoopStatus::from(status.as_str()))
    }

    async fn set_loop_status(
        &self,
        player: &PlayerId,
        status: LoopStatus,
    ) -> Result<(), MprisError> {
        let proxy = self.player_proxy(player).await?;
        proxy
            .set_loop_status(status.as_str())
            .await
            .map_err(|e| MprisError::classify(player, "LoopStatus", e))
    }
}
