//! MPRIS control-bus adapter and active-player state machine.

/// D-Bus backed bus adapter and the `PlayerBus` capability seam.
pub mod bus;
/// Media player error types.
pub mod error;
/// D-Bus proxy trait definitions.
pub mod proxy;
/// Current-player registry and resolver.
pub mod registry;
/// Player switching operations.
mod switching;
/// Player identifier and command types.
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use bus::*;
pub use error::*;
pub use proxy::*;
pub use registry::*;
pub use types::*;
