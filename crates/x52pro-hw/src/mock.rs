//! In-memory transport and bus for exercising sessions without hardware.

use crate::mfd::decode_char;
use crate::protocol::Transfer;
use crate::usb::{DeviceIds, Transport, UsbBus};
use crate::Result;

/// Records every accepted control transfer.
#[derive(Debug, Default, Clone)]
pub struct MockTransport {
    /// Accepted transfers in the order they were sent.
    pub transfers: Vec<Transfer>,
    /// Request numbers of the accepted transfers.
    pub requests: Vec<u8>,
    pub open_calls: usize,
    pub close_calls: usize,
    open_error: Option<rusb::Error>,
    fail_after: Option<(usize, rusb::Error)>,
}

impl MockTransport {
    /// A transport whose handle can never be acquired.
    pub fn failing_open(error: rusb::Error) -> Self {
        Self {
            open_error: Some(error),
            ..Self::default()
        }
    }

    /// A transport that accepts `count` transfers and rejects the rest.
    pub fn failing_after(count: usize, error: rusb::Error) -> Self {
        Self {
            fail_after: Some((count, error)),
            ..Self::default()
        }
    }

    /// Decodes the characters written with the given write-line index.
    pub fn display_text(&self, index: u16) -> String {
        self.transfers
            .iter()
            .filter(|t| t.index == index)
            .flat_map(|t| [(t.value & 0xFF) as u8, (t.value >> 8) as u8])
            .filter(|&code| code != 0)
            .filter_map(decode_char)
            .collect()
    }
}

impl Transport for MockTransport {
    fn open(&mut self) -> std::result::Result<(), rusb::Error> {
        if let Some(error) = self.open_error {
            return Err(error);
        }
        self.open_calls += 1;
        Ok(())
    }

    fn close(&mut self) {
        self.close_calls += 1;
    }

    fn control_out(
        &mut self,
        request: u8,
        value: u16,
        index: u16,
    ) -> std::result::Result<(), rusb::Error> {
        if let Some((count, error)) = self.fail_after {
            if self.transfers.len() >= count {
                return Err(error);
            }
        }
        self.requests.push(request);
        self.transfers.push(Transfer::new(index, value));
        Ok(())
    }
}

/// A simulated bus holding devices with the given identifiers.
#[derive(Debug, Default, Clone)]
pub struct MockBus {
    devices: Vec<DeviceIds>,
}

impl MockBus {
    pub fn new(devices: Vec<DeviceIds>) -> Self {
        Self { devices }
    }
}

impl UsbBus for MockBus {
    type Transport = MockTransport;

    fn enumerate(&self) -> Result<Vec<(DeviceIds, MockTransport)>> {
        Ok(self
            .devices
            .iter()
            .map(|&ids| (ids, MockTransport::default()))
            .collect())
    }
}
