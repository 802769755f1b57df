//! Command-line command parsing.
//!
//! Each command has the form `NAME=VALUE`. Names are case-insensitive and
//! `-`/`_` are interchangeable.

use std::str::FromStr;
use x52pro_hw::led::parse_state;
use x52pro_hw::{Error, Led, LedColor, LedGroup, MfdLine, Result, Transport, X52Pro};

/// Help text listing the available commands.
pub const COMMANDS_HELP: &str = "\
Commands:
  dev=<n>                Switches to the given device (1-based) when several
                         X52 Pro joysticks are connected. Defaults to dev=1.
  <led>=on|off           Enables/disables a single LED. Example: fire=on
                         LEDs: fire, a-red, a-green, b-red, b-green, d-red,
                         d-green, e-red, e-green, t12-red, t12-green, t34-red,
                         t34-green, t56-red, t56-green, coolie-red,
                         coolie-green, i-red, i-green, throttle
  <group>=<color>        Sets the color of an LED group. Example: coolie=amber
                         Colors: off, red, green, amber
                         Groups: a, b, d, e, t12, t34, t56, coolie, i
  led-brightness=<n>     Sets the LED brightness (0-255)
  mfd-brightness=<n>     Sets the MFD brightness (0-255)
  mfd-text-<line>=<text> Sets the text of MFD line 1-3 (up to 16 characters).
                         Example: mfd-text-2=\"Hello world!\"";

/// A single parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Select device by 1-based index.
    Device(usize),
    Led(Led, bool),
    LedGroup(LedGroup, LedColor),
    LedBrightness(i64),
    MfdBrightness(i64),
    MfdText(MfdLine, String),
}

fn parse_number<N: FromStr>(command: &str, value: &str) -> Result<N> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("Invalid number for {}: {}", command, value)))
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (name, value) = s
            .split_once('=')
            .ok_or_else(|| Error::InvalidArgument(format!("Missing value for command: {}", s)))?;
        let command = name.trim().to_ascii_lowercase().replace('_', "-");

        if let Some(line) = command.strip_prefix("mfd-text-") {
            let line = match line {
                "1" => MfdLine::Top,
                "2" => MfdLine::Middle,
                "3" => MfdLine::Bottom,
                _ => {
                    return Err(Error::InvalidArgument(format!(
                        "MFD line must be 1-3 but is {}",
                        line
                    )))
                }
            };
            return Ok(Command::MfdText(line, value.to_string()));
        }

        match command.as_str() {
            "dev" => Ok(Command::Device(parse_number(name, value)?)),
            "led-brightness" => Ok(Command::LedBrightness(parse_number(name, value)?)),
            "mfd-brightness" => Ok(Command::MfdBrightness(parse_number(name, value)?)),
            _ => {
                if let Ok(led) = command.parse::<Led>() {
                    Ok(Command::Led(led, parse_state(value)?))
                } else if let Ok(group) = command.parse::<LedGroup>() {
                    Ok(Command::LedGroup(group, value.parse()?))
                } else {
                    Err(Error::InvalidArgument(format!("Unknown command: {}", name)))
                }
            }
        }
    }
}

impl Command {
    /// Sends a device command. [`Command::Device`] selects a session and is
    /// rejected here.
    pub fn apply<T: Transport>(&self, device: &mut X52Pro<T>) -> Result<()> {
        match self {
            Command::Device(n) => Err(Error::InvalidArgument(format!(
                "dev={} does not apply to a single device",
                n
            ))),
            Command::Led(led, state) => device.set_led(*led, *state),
            Command::LedGroup(group, color) => device.set_led_group(*group, *color),
            Command::LedBrightness(level) => device.set_led_brightness(*level),
            Command::MfdBrightness(level) => device.set_mfd_brightness(*level),
            Command::MfdText(line, text) => device.set_mfd_text(line.index(), text),
        }
    }
}
