//! Multi-function display module.
//!
//! Three lines of sixteen characters, written through the character table.

pub mod charset;

use crate::{Error, Result};
use std::fmt;

pub use charset::{decode_char, encode_char, encode_text, LINE_LENGTH, UNKNOWN_CHAR};

/// One of the three MFD lines, numbered from the top starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MfdLine {
    Top = 0,
    Middle = 1,
    Bottom = 2,
}

impl MfdLine {
    pub const ALL: [MfdLine; 3] = [MfdLine::Top, MfdLine::Middle, MfdLine::Bottom];

    /// Zero-based line number.
    pub fn index(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for MfdLine {
    type Error = Error;

    fn try_from(line: u8) -> Result<Self> {
        Self::ALL
            .get(line as usize)
            .copied()
            .ok_or_else(|| Error::InvalidArgument(format!("MFD line must be 0-2 but is {}", line)))
    }
}

impl fmt::Display for MfdLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_from_index() {
        assert_eq!(MfdLine::try_from(0).unwrap(), MfdLine::Top);
        assert_eq!(MfdLine::try_from(2).unwrap(), MfdLine::Bottom);
        assert!(MfdLine::try_from(3).unwrap_err().is_invalid_argument());
    }
}
