//! X52 Pro device session.

use crate::led::{Led, LedColor, LedGroup};
use crate::mfd::{encode_text, MfdLine};
use crate::protocol::{self, Transfer, X52PRO_REQUEST};
use crate::usb::{RusbBus, RusbTransport, Transport, UsbBus, DEFAULT_TIMEOUT};
use crate::{Error, Result, X52PRO_PID, X52PRO_VID};
use std::time::Duration;
use tracing::{debug, info};

/// Returns a session for every X52 Pro found on `bus`.
///
/// Sessions start closed. An empty result is not an error.
pub fn discover<B: UsbBus>(bus: &B) -> Result<Vec<X52Pro<B::Transport>>> {
    let devices: Vec<_> = bus
        .enumerate()?
        .into_iter()
        .filter(|(ids, _)| ids.vendor_id == X52PRO_VID && ids.product_id == X52PRO_PID)
        .map(|(ids, transport)| {
            debug!("Found X52 Pro ({})", ids);
            X52Pro::new(transport)
        })
        .collect();

    info!("Found {} X52 Pro device(s)", devices.len());
    Ok(devices)
}

/// Controls the LEDs and MFD of a single joystick.
///
/// Commands are sent one at a time, each waiting for the device to accept it.
/// Grouped operations (LED groups, MFD text) are not atomic: when a transfer
/// fails the error is returned and the hardware keeps whatever was already
/// applied.
///
/// The session is opened on demand but never closed implicitly; call
/// [`X52Pro::close`] when finished.
#[derive(Debug)]
pub struct X52Pro<T: Transport = RusbTransport> {
    transport: T,
    opened: bool,
}

impl X52Pro<RusbTransport> {
    /// Returns all connected X52 Pro devices.
    pub fn get_all() -> Result<Vec<Self>> {
        Self::get_all_with_timeout(DEFAULT_TIMEOUT)
    }

    /// Returns all connected X52 Pro devices using a custom transfer timeout.
    pub fn get_all_with_timeout(timeout: Duration) -> Result<Vec<Self>> {
        discover(&RusbBus::new(timeout)?)
    }
}

impl<T: Transport> X52Pro<T> {
    /// Wraps an unopened transport.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            opened: false,
        }
    }

    /// Opens the device when not already open.
    pub fn open(&mut self) -> Result<()> {
        if !self.opened {
            self.transport.open().map_err(Error::Open)?;
            self.opened = true;
            info!("X52 Pro opened");
        }
        Ok(())
    }

    /// Closes the device when open. Never done automatically.
    pub fn close(&mut self) {
        if self.opened {
            self.transport.close();
            self.opened = false;
            info!("X52 Pro closed");
        }
    }

    pub fn is_open(&self) -> bool {
        self.opened
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends one control transfer, opening the device first if needed.
    fn send(&mut self, transfer: Transfer) -> Result<()> {
        self.open()?;
        debug!(
            "Control transfer: index=0x{:02X} value=0x{:04X}",
            transfer.index, transfer.value
        );
        self.transport
            .control_out(X52PRO_REQUEST, transfer.value, transfer.index)
            .map_err(|source| Error::Transfer {
                index: transfer.index,
                value: transfer.value,
                source,
            })
    }

    /// Turns a single LED on or off.
    pub fn set_led(&mut self, led: Led, state: bool) -> Result<()> {
        self.send(protocol::set_led(led, state))?;
        debug!("LED {} set to {}", led, if state { "on" } else { "off" });
        Ok(())
    }

    /// Sets the color of an LED group: red half first, then green.
    pub fn set_led_group(&mut self, group: LedGroup, color: LedColor) -> Result<()> {
        self.set_led(group.red(), color.has_red())?;
        self.set_led(group.green(), color.has_green())?;
        debug!("LED group {} set to {}", group, color);
        Ok(())
    }

    /// Sets the brightness of all button LEDs. Clamped to 0-255.
    pub fn set_led_brightness(&mut self, brightness: i64) -> Result<()> {
        self.send(protocol::set_led_brightness(brightness))
    }

    /// Sets the MFD backlight brightness. Clamped to 0-255.
    pub fn set_mfd_brightness(&mut self, brightness: i64) -> Result<()> {
        self.send(protocol::set_mfd_brightness(brightness))
    }

    /// Replaces the text of an MFD line (0-2).
    ///
    /// Only the first 16 characters are shown. Characters without a glyph are
    /// displayed as `?`.
    pub fn set_mfd_text(&mut self, line: u8, text: &str) -> Result<()> {
        let line = MfdLine::try_from(line)?;
        let codes = encode_text(text);

        self.send(protocol::clear_mfd_line(line))?;
        for transfer in protocol::write_mfd_line(line, &codes) {
            self.send(transfer)?;
        }

        debug!("MFD line {} set to {:?}", line, text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockBus, MockTransport};
    use crate::usb::DeviceIds;

    fn session() -> X52Pro<MockTransport> {
        X52Pro::new(MockTransport::default())
    }

    fn sent(device: &X52Pro<MockTransport>) -> Vec<(u16, u16)> {
        device
            .transport()
            .transfers
            .iter()
            .map(|t| (t.index, t.value))
            .collect()
    }

    #[test]
    fn test_discover_filters_by_ids() {
        let bus = MockBus::new(vec![
            DeviceIds {
                vendor_id: 0x046D,
                product_id: 0xC52B,
            },
            DeviceIds {
                vendor_id: X52PRO_VID,
                product_id: X52PRO_PID,
            },
            DeviceIds {
                vendor_id: X52PRO_VID,
                product_id: 0x0255,
            },
        ]);

        let devices = discover(&bus).unwrap();
        assert_eq!(devices.len(), 1);
        assert!(!devices[0].is_open());
        assert_eq!(devices[0].transport().open_calls, 0);
    }

    #[test]
    fn test_discover_empty_bus() {
        assert!(discover(&MockBus::new(vec![])).unwrap().is_empty());
    }

    #[test]
    fn test_open_close_idempotent() {
        let mut device = session();
        device.close();
        assert!(!device.is_open());
        assert_eq!(device.transport().close_calls, 0);

        device.open().unwrap();
        device.open().unwrap();
        assert!(device.is_open());
        assert_eq!(device.transport().open_calls, 1);

        device.close();
        device.close();
        assert!(!device.is_open());
        assert_eq!(device.transport().close_calls, 1);
    }

    #[test]
    fn test_transfer_opens_implicitly() {
        let mut device = session();
        device.set_led(Led::Fire, true).unwrap();
        assert!(device.is_open());
        assert_eq!(device.transport().requests, vec![X52PRO_REQUEST]);
        assert_eq!(sent(&device), vec![(0xB8, 0x0101)]);
    }

    #[test]
    fn test_open_failure() {
        let mut device = X52Pro::new(MockTransport::failing_open(rusb::Error::Access));
        let err = device.set_mfd_brightness(10).unwrap_err();
        assert!(matches!(err, Error::Open(rusb::Error::Access)));
        assert!(!device.is_open());
        assert!(device.transport().transfers.is_empty());
    }

    #[test]
    fn test_set_led_group_order() {
        for group in LedGroup::ALL {
            for color in [LedColor::Off, LedColor::Red, LedColor::Green, LedColor::Amber] {
                let mut device = session();
                device.set_led_group(group, color).unwrap();
                let base = group as u16;
                assert_eq!(
                    sent(&device),
                    vec![
                        (0xB8, base << 8 | color.has_red() as u16),
                        (0xB8, (base + 1) << 8 | color.has_green() as u16),
                    ]
                );
            }
        }
    }

    #[test]
    fn test_led_group_partial_failure() {
        let mut device = X52Pro::new(MockTransport::failing_after(1, rusb::Error::Pipe));
        let err = device
            .set_led_group(LedGroup::Coolie, LedColor::Amber)
            .unwrap_err();
        match err {
            Error::Transfer { index, value, source } => {
                assert_eq!(index, 0xB8);
                assert_eq!(value, 0x1101);
                assert_eq!(source, rusb::Error::Pipe);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(sent(&device), vec![(0xB8, 0x1001)]);
    }

    #[test]
    fn test_brightness() {
        let mut device = session();
        device.set_led_brightness(-1).unwrap();
        device.set_led_brightness(300).unwrap();
        device.set_mfd_brightness(77).unwrap();
        assert_eq!(sent(&device), vec![(0xB2, 0), (0xB2, 255), (0xB1, 77)]);
    }

    #[test]
    fn test_mfd_text() {
        let mut device = session();
        device.set_mfd_text(1, "OK").unwrap();
        assert_eq!(sent(&device), vec![(0xDA, 0), (0xD2, 0x4B4F)]);
        assert_eq!(device.transport().display_text(0xD2), "OK");
    }

    #[test]
    fn test_mfd_empty_text_only_clears() {
        let mut device = session();
        device.set_mfd_text(1, "").unwrap();
        assert_eq!(sent(&device), vec![(0xDA, 0)]);
    }

    #[test]
    fn test_mfd_text_odd_length() {
        let mut device = session();
        device.set_mfd_text(2, "abc").unwrap();
        assert_eq!(sent(&device), vec![(0xDC, 0), (0xD4, 0x6261), (0xD4, 0x0063)]);
    }

    #[test]
    fn test_mfd_text_truncates() {
        let mut long = session();
        long.set_mfd_text(0, "Hello world, how are you?").unwrap();
        let mut short = session();
        short.set_mfd_text(0, "Hello world, how").unwrap();
        assert_eq!(sent(&long), sent(&short));
        assert_eq!(sent(&long).len(), 1 + 8);
        assert_eq!(long.transport().display_text(0xD1), "Hello world, how");
    }

    #[test]
    fn test_mfd_text_unknown_char() {
        let mut device = session();
        device.set_mfd_text(0, "a€b").unwrap();
        assert_eq!(sent(&device), vec![(0xD9, 0), (0xD1, 0x3F61), (0xD1, 0x0062)]);
    }

    #[test]
    fn test_mfd_invalid_line_sends_nothing() {
        let mut device = session();
        let err = device.set_mfd_text(3, "nope").unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(device.transport().transfers.is_empty());
        assert!(!device.is_open());
    }

    #[test]
    fn test_mfd_text_failure_mid_sequence() {
        let mut device = X52Pro::new(MockTransport::failing_after(2, rusb::Error::Timeout));
        let err = device.set_mfd_text(0, "ABCDEF").unwrap_err();
        assert!(matches!(
            err,
            Error::Transfer {
                index: 0xD1,
                value: 0x4443,
                source: rusb::Error::Timeout
            }
        ));
        assert_eq!(sent(&device), vec![(0xD9, 0), (0xD1, 0x4241)]);
    }
}
