//! Executes parsed commands against the discovered joysticks.

use crate::command::Command;
use tracing::debug;
use x52pro_hw::{Error, Result, Transport, X52Pro};

/// Owns every discovered session and closes them all when dropped.
pub struct Joysticks<T: Transport> {
    devices: Vec<X52Pro<T>>,
    current: usize,
}

impl<T: Transport> Joysticks<T> {
    /// Takes ownership of the sessions and selects the 1-based `device`.
    pub fn new(devices: Vec<X52Pro<T>>, device: usize) -> Result<Self> {
        if devices.is_empty() {
            return Err(Error::NoDeviceFound);
        }
        let mut joysticks = Self {
            devices,
            current: 0,
        };
        joysticks.select(device)?;
        Ok(joysticks)
    }

    /// Closes the current device and switches to the 1-based `device`.
    pub fn select(&mut self, device: usize) -> Result<()> {
        let count = self.devices.len();
        if device == 0 || device > count {
            return Err(Error::DeviceIndexOutOfRange {
                index: device,
                count,
            });
        }
        self.devices[self.current].close();
        self.current = device - 1;
        debug!("Selected device #{}", device);
        Ok(())
    }

    /// The currently selected session.
    pub fn current(&self) -> &X52Pro<T> {
        &self.devices[self.current]
    }

    /// Runs the commands in order, stopping at the first failure.
    pub fn run(&mut self, commands: &[Command]) -> Result<()> {
        for command in commands {
            match command {
                Command::Device(device) => self.select(*device)?,
                _ => command.apply(&mut self.devices[self.current])?,
            }
        }
        Ok(())
    }
}

impl<T: Transport> Drop for Joysticks<T> {
    fn drop(&mut self) {
        for device in &mut self.devices {
            device.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use x52pro_hw::mock::MockTransport;
    use x52pro_hw::{Led, LedColor, LedGroup, MfdLine};

    fn devices(count: usize) -> Vec<X52Pro<MockTransport>> {
        (0..count)
            .map(|_| X52Pro::new(MockTransport::default()))
            .collect()
    }

    fn values(device: &X52Pro<MockTransport>) -> Vec<(u16, u16)> {
        device
            .transport()
            .transfers
            .iter()
            .map(|t| (t.index, t.value))
            .collect()
    }

    #[test]
    fn test_no_devices() {
        assert!(matches!(
            Joysticks::new(devices(0), 1),
            Err(Error::NoDeviceFound)
        ));
    }

    #[test]
    fn test_initial_device_out_of_range() {
        assert!(matches!(
            Joysticks::new(devices(1), 2),
            Err(Error::DeviceIndexOutOfRange { index: 2, count: 1 })
        ));
    }

    #[test]
    fn test_runs_in_order() {
        let mut joysticks = Joysticks::new(devices(1), 1).unwrap();
        joysticks
            .run(&[
                Command::Led(Led::Fire, true),
                Command::LedGroup(LedGroup::A, LedColor::Green),
                Command::MfdBrightness(300),
                Command::MfdText(MfdLine::Middle, "Hi".to_string()),
            ])
            .unwrap();

        assert_eq!(
            values(joysticks.current()),
            vec![
                (0xB8, 0x0101),
                (0xB8, 0x0200),
                (0xB8, 0x0301),
                (0xB1, 255),
                (0xDA, 0),
                (0xD2, 0x6948),
            ]
        );
    }

    #[test]
    fn test_switching_devices_closes_previous() {
        let mut joysticks = Joysticks::new(devices(2), 1).unwrap();
        joysticks
            .run(&[
                Command::LedBrightness(10),
                Command::Device(2),
                Command::LedBrightness(20),
            ])
            .unwrap();

        assert_eq!(values(joysticks.current()), vec![(0xB2, 20)]);
        assert!(joysticks.current().is_open());
        assert!(!joysticks.devices[0].is_open());
        assert_eq!(joysticks.devices[0].transport().close_calls, 1);
        assert_eq!(values(&joysticks.devices[0]), vec![(0xB2, 10)]);
    }

    #[test]
    fn test_stops_at_bad_device_index() {
        let mut joysticks = Joysticks::new(devices(1), 1).unwrap();
        let err = joysticks
            .run(&[Command::Device(3), Command::LedBrightness(1)])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DeviceIndexOutOfRange { index: 3, count: 1 }
        ));
        assert!(values(joysticks.current()).is_empty());
    }
}
