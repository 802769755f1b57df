//! USB access via libusb.
//!
//! The joystick only needs two primitives: enumerating the bus and sending
//! host-to-device vendor control transfers without a data stage.

use crate::protocol::REQUEST_TYPE;
use crate::{Error, Result};
use rusb::{Context, Device, DeviceHandle, UsbContext};
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Default USB transfer timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// Handle-level access to one physical device.
pub trait Transport {
    /// Acquires the OS-level handle.
    fn open(&mut self) -> std::result::Result<(), rusb::Error>;

    /// Releases the OS-level handle.
    fn close(&mut self);

    /// Sends a vendor, device-recipient, host-to-device control transfer with
    /// an empty data stage. Blocks until the USB stack reports completion.
    fn control_out(&mut self, request: u8, value: u16, index: u16)
        -> std::result::Result<(), rusb::Error>;
}

/// Vendor and product identifiers from a device descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceIds {
    pub vendor_id: u16,
    pub product_id: u16,
}

impl fmt::Display for DeviceIds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}:{:04X}", self.vendor_id, self.product_id)
    }
}

/// A source of attached USB devices.
pub trait UsbBus {
    type Transport: Transport;

    /// Lists every attached device with its identifiers.
    fn enumerate(&self) -> Result<Vec<(DeviceIds, Self::Transport)>>;
}

/// Transport backed by a libusb device.
pub struct RusbTransport {
    device: Device<Context>,
    handle: Option<DeviceHandle<Context>>,
    timeout: Duration,
}

impl RusbTransport {
    pub fn new(device: Device<Context>, timeout: Duration) -> Self {
        Self {
            device,
            handle: None,
            timeout,
        }
    }
}

impl fmt::Debug for RusbTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RusbTransport")
            .field("bus", &self.device.bus_number())
            .field("address", &self.device.address())
            .field("open", &self.handle.is_some())
            .finish()
    }
}

impl Transport for RusbTransport {
    fn open(&mut self) -> std::result::Result<(), rusb::Error> {
        if self.handle.is_none() {
            self.handle = Some(self.device.open()?);
            debug!(
                "Opened USB device at bus {:03} address {:03}",
                self.device.bus_number(),
                self.device.address()
            );
        }
        Ok(())
    }

    fn close(&mut self) {
        // Dropping the handle closes it.
        if self.handle.take().is_some() {
            debug!(
                "Closed USB device at bus {:03} address {:03}",
                self.device.bus_number(),
                self.device.address()
            );
        }
    }

    fn control_out(
        &mut self,
        request: u8,
        value: u16,
        index: u16,
    ) -> std::result::Result<(), rusb::Error> {
        let handle = self.handle.as_ref().ok_or(rusb::Error::NoDevice)?;
        handle.write_control(REQUEST_TYPE, request, value, index, &[], self.timeout)?;
        Ok(())
    }
}

/// The host's USB bus.
pub struct RusbBus {
    context: Context,
    timeout: Duration,
}

impl RusbBus {
    /// Creates a libusb context using the given transfer timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            context: Context::new()?,
            timeout,
        })
    }
}

impl UsbBus for RusbBus {
    type Transport = RusbTransport;

    fn enumerate(&self) -> Result<Vec<(DeviceIds, RusbTransport)>> {
        let devices = self.context.devices().map_err(Error::Usb)?;
        let mut found = Vec::with_capacity(devices.len());

        for device in devices.iter() {
            let desc = match device.device_descriptor() {
                Ok(desc) => desc,
                Err(e) => {
                    warn!(
                        "Skipping device at bus {:03} address {:03}: {}",
                        device.bus_number(),
                        device.address(),
                        e
                    );
                    continue;
                }
            };
            let ids = DeviceIds {
                vendor_id: desc.vendor_id(),
                product_id: desc.product_id(),
            };
            found.push((ids, RusbTransport::new(device, self.timeout)));
        }

        Ok(found)
    }
}
