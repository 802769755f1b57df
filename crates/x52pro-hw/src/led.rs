//! Button LED identifiers, bicolor groups and colors.
//!
//! Most buttons carry a red and a green LED. Each half is addressed on its own
//! through [`Led`]; a [`LedGroup`] drives both halves of one button together.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Normalizes a user-facing name: case-insensitive, `-` and `_` interchangeable.
fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace('_', "-")
}

/// A single addressable LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Led {
    /// Fire button (single LED).
    Fire = 1,
    ARed = 2,
    AGreen = 3,
    BRed = 4,
    BGreen = 5,
    DRed = 6,
    DGreen = 7,
    ERed = 8,
    EGreen = 9,
    /// T1/T2 toggle switch.
    T12Red = 10,
    T12Green = 11,
    /// T3/T4 toggle switch.
    T34Red = 12,
    T34Green = 13,
    /// T5/T6 toggle switch.
    T56Red = 14,
    T56Green = 15,
    /// Coolie hat.
    CoolieRed = 16,
    CoolieGreen = 17,
    IRed = 18,
    IGreen = 19,
    /// Throttle (single LED).
    Throttle = 20,
}

impl Led {
    /// All LEDs in identifier order.
    pub const ALL: [Led; 20] = [
        Led::Fire,
        Led::ARed,
        Led::AGreen,
        Led::BRed,
        Led::BGreen,
        Led::DRed,
        Led::DGreen,
        Led::ERed,
        Led::EGreen,
        Led::T12Red,
        Led::T12Green,
        Led::T34Red,
        Led::T34Green,
        Led::T56Red,
        Led::T56Green,
        Led::CoolieRed,
        Led::CoolieGreen,
        Led::IRed,
        Led::IGreen,
        Led::Throttle,
    ];

    /// Returns the identifier sent to the device.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Returns the command-line name of the LED.
    pub fn name(self) -> &'static str {
        match self {
            Led::Fire => "fire",
            Led::ARed => "a-red",
            Led::AGreen => "a-green",
            Led::BRed => "b-red",
            Led::BGreen => "b-green",
            Led::DRed => "d-red",
            Led::DGreen => "d-green",
            Led::ERed => "e-red",
            Led::EGreen => "e-green",
            Led::T12Red => "t12-red",
            Led::T12Green => "t12-green",
            Led::T34Red => "t34-red",
            Led::T34Green => "t34-green",
            Led::T56Red => "t56-red",
            Led::T56Green => "t56-green",
            Led::CoolieRed => "coolie-red",
            Led::CoolieGreen => "coolie-green",
            Led::IRed => "i-red",
            Led::IGreen => "i-green",
            Led::Throttle => "throttle",
        }
    }
}

impl FromStr for Led {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = normalize(s);
        Self::ALL
            .iter()
            .copied()
            .find(|led| led.name() == name)
            .ok_or_else(|| Error::InvalidArgument(format!("Unknown LED: {}", s)))
    }
}

impl fmt::Display for Led {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A red/green LED pair forming one bicolor indicator.
///
/// The group value equals the red LED identifier; green is always value + 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LedGroup {
    A = 2,
    B = 4,
    D = 6,
    E = 8,
    T12 = 10,
    T34 = 12,
    T56 = 14,
    Coolie = 16,
    I = 18,
}

impl LedGroup {
    /// All groups in identifier order.
    pub const ALL: [LedGroup; 9] = [
        LedGroup::A,
        LedGroup::B,
        LedGroup::D,
        LedGroup::E,
        LedGroup::T12,
        LedGroup::T34,
        LedGroup::T56,
        LedGroup::Coolie,
        LedGroup::I,
    ];

    /// The red half of the pair.
    pub fn red(self) -> Led {
        Led::ALL[self as usize - 1]
    }

    /// The green half of the pair.
    pub fn green(self) -> Led {
        Led::ALL[self as usize]
    }

    /// Returns the command-line name of the group.
    pub fn name(self) -> &'static str {
        match self {
            LedGroup::A => "a",
            LedGroup::B => "b",
            LedGroup::D => "d",
            LedGroup::E => "e",
            LedGroup::T12 => "t12",
            LedGroup::T34 => "t34",
            LedGroup::T56 => "t56",
            LedGroup::Coolie => "coolie",
            LedGroup::I => "i",
        }
    }
}

impl FromStr for LedGroup {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = normalize(s);
        Self::ALL
            .iter()
            .copied()
            .find(|group| group.name() == name)
            .ok_or_else(|| Error::InvalidArgument(format!("Unknown LED group: {}", s)))
    }
}

impl fmt::Display for LedGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Color of an LED group. Bit 0 drives red, bit 1 drives green.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LedColor {
    Off = 0,
    Red = 1,
    Green = 2,
    /// Red and green together.
    Amber = 3,
}

impl LedColor {
    pub fn has_red(self) -> bool {
        self as u8 & 1 != 0
    }

    pub fn has_green(self) -> bool {
        self as u8 & 2 != 0
    }
}

impl FromStr for LedColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "off" => Ok(LedColor::Off),
            "red" => Ok(LedColor::Red),
            "green" => Ok(LedColor::Green),
            "amber" | "yellow" => Ok(LedColor::Amber),
            _ => Err(Error::InvalidArgument(format!(
                "Invalid LED group color (must be 'off', 'red', 'green' or 'amber'): {}",
                s
            ))),
        }
    }
}

impl fmt::Display for LedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedColor::Off => write!(f, "off"),
            LedColor::Red => write!(f, "red"),
            LedColor::Green => write!(f, "green"),
            LedColor::Amber => write!(f, "amber"),
        }
    }
}

/// Parses an LED state token (`on` or `off`).
pub fn parse_state(s: &str) -> Result<bool> {
    match normalize(s).as_str() {
        "on" => Ok(true),
        "off" => Ok(false),
        _ => Err(Error::InvalidArgument(format!(
            "Invalid LED state (must be 'on' or 'off'): {}",
            s
        ))),
    }
}
