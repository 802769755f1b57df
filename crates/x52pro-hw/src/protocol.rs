//! Control transfer encoding.
//!
//! Every command is a vendor request 0x91 to the device with no data stage.
//! The `wIndex` field selects the operation and `wValue` carries its argument.

use crate::led::Led;
use crate::mfd::MfdLine;

/// Host-to-device, vendor request, device recipient.
pub const REQUEST_TYPE: u8 = 0x40;

/// The USB request number used for all commands.
pub const X52PRO_REQUEST: u8 = 0x91;

/// Request index for setting an LED state.
pub const REQUEST_SET_LED: u16 = 0xB8;

/// Request index for setting the MFD brightness.
pub const REQUEST_SET_MFD_BRIGHTNESS: u16 = 0xB1;

/// Request index for setting the LED brightness.
pub const REQUEST_SET_LED_BRIGHTNESS: u16 = 0xB2;

/// Request indices for clearing MFD lines 0-2.
pub const REQUEST_CLEAR_MFD_LINE: [u16; 3] = [0xD9, 0xDA, 0xDC];

/// Request indices for writing MFD lines 0-2.
pub const REQUEST_WRITE_MFD_LINE: [u16; 3] = [0xD1, 0xD2, 0xD4];

/// A single control transfer: request index and value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub index: u16,
    pub value: u16,
}

impl Transfer {
    pub const fn new(index: u16, value: u16) -> Self {
        Self { index, value }
    }
}

/// LED id in the high byte, state in bit 0.
pub fn set_led(led: Led, state: bool) -> Transfer {
    Transfer::new(REQUEST_SET_LED, (led.id() as u16) << 8 | state as u16)
}

fn clamp_brightness(level: i64) -> u16 {
    level.clamp(0, 255) as u16
}

pub fn set_led_brightness(level: i64) -> Transfer {
    Transfer::new(REQUEST_SET_LED_BRIGHTNESS, clamp_brightness(level))
}

pub fn set_mfd_brightness(level: i64) -> Transfer {
    Transfer::new(REQUEST_SET_MFD_BRIGHTNESS, clamp_brightness(level))
}

pub fn clear_mfd_line(line: MfdLine) -> Transfer {
    Transfer::new(REQUEST_CLEAR_MFD_LINE[line.index() as usize], 0)
}

/// Packs character codes two per transfer, first code in the low byte.
///
/// A trailing odd code is sent alone with a zero high byte.
pub fn write_mfd_line(line: MfdLine, codes: &[u8]) -> Vec<Transfer> {
    let index = REQUEST_WRITE_MFD_LINE[line.index() as usize];
    codes
        .chunks(2)
        .map(|pair| {
            let low = pair[0] as u16;
            let high = pair.get(1).map_or(0, |&c| c as u16);
            Transfer::new(index, high << 8 | low)
        })
        .collect()
}
