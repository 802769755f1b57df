//! X52 Pro Hardware Library
//!
//! Drives the button LEDs and the three-line multi-function display of the
//! Saitek X52 Pro flight controller through vendor USB control transfers.

pub mod device;
pub mod error;
pub mod led;
pub mod mfd;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod protocol;
pub mod usb;

pub use device::{discover, X52Pro};
pub use error::{Error, Result};
pub use led::{Led, LedColor, LedGroup};
pub use mfd::MfdLine;
pub use usb::{DeviceIds, RusbBus, RusbTransport, Transport, UsbBus};

/// USB VID:PID of the X52 Pro
pub const X52PRO_VID: u16 = 0x06A3;
pub const X52PRO_PID: u16 = 0x0762;
