//! Error types for the X52 Pro hardware library.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when interacting with the joystick.
#[derive(Error, Debug)]
pub enum Error {
    /// Discovery found no X52 Pro on the bus.
    #[error("No X52 Pro device found (VID:PID 06A3:0762)")]
    NoDeviceFound,

    /// The selected device index is not among the discovered devices.
    #[error("X52 Pro device #{index} not found ({count} device(s) connected)")]
    DeviceIndexOutOfRange { index: usize, count: usize },

    /// Rejected before any transfer was sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The USB stack rejected a control transfer.
    #[error("Control transfer failed (index 0x{index:02X}, value 0x{value:04X}): {source}")]
    Transfer {
        index: u16,
        value: u16,
        #[source]
        source: rusb::Error,
    },

    /// The device handle could not be acquired.
    #[error("Failed to open device: {0}")]
    Open(#[source] rusb::Error),

    /// Bus enumeration error.
    #[error("USB error: {0}")]
    Usb(#[from] rusb::Error),
}

impl Error {
    /// Returns true for errors raised before any transfer was attempted.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}
