//! Key-event source for the remote's input device.
//!
//! The IR receiver presents itself as a keyboard under `/dev/input`. A
//! dedicated thread blocks on the device and forwards key-down transitions
//! into a channel; key-up and auto-repeat events never reach the dispatcher.
//!
//! Reading raw input devices usually requires membership in the `input`
//! group.

use std::{
    io,
    path::{Path, PathBuf},
    thread,
};

use evdev::{Device, InputEventKind};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error};

/// evdev value for a key-down transition (0 = up, 1 = down, 2 = repeat).
const KEY_DOWN: i32 = 1;

/// Errors from the input-device collaborator. Fatal to startup only.
#[derive(Error, Debug)]
pub enum InputError {
    /// Input device could not be opened
    #[error("cannot open input device '{path}': {source}")]
    DeviceOpen {
        /// Device path that failed to open
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
}

/// A single key-down event from the remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// evdev key name, e.g. `KEY_PLAYPAUSE`.
    pub key: String,
}

/// Open the remote's input device.
///
/// # Errors
/// Returns error if the device path cannot be opened.
pub fn open_device(path: &Path) -> Result<Device, InputError> {
    Device::open(path).map_err(|source| InputError::DeviceOpen {
        path: path.to_path_buf(),
        source,
    })
}

/// Spawn the blocking reader thread for `device`.
///
/// The returned channel yields key-down events until the device read fails or
/// the receiver is dropped; either way the thread exits and the device handle
/// is released.
pub fn spawn_reader(mut device: Device) -> mpsc::UnboundedReceiver<KeyEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    thread::spawn(move || {
        loop {
            let events = match device.fetch_events() {
                Ok(events) => events,
                Err(e) => {
                    error!(error = %e, "input device read failed");
                    return;
                }
            };

            for event in events {
                let InputEventKind::Key(key) = event.kind() else {
                    continue;
                };
                if event.value() != KEY_DOWN {
                    continue;
                }

                let key_event = KeyEvent {
                    key: format!("{key:?}"),
                };
                debug!(key = %key_event.key, "key down");

                if tx.send(key_event).is_err() {
                    return;
                }
            }
        }
    });

    rx
}
