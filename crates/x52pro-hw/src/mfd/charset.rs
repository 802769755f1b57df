//! MFD character table.
//!
//! The display firmware takes one byte per glyph. The table below is indexed by
//! that byte; empty slots have no printable glyph.

/// Maximum number of characters per MFD line.
pub const LINE_LENGTH: usize = 16;

/// Code written for characters without a glyph (`?`).
pub const UNKNOWN_CHAR: u8 = 0x3F;

/// Device code to character. Printable ASCII and the Latin-1 supplement.
static CHAR_TABLE: [Option<char>; 256] = build_table();

const fn build_table() -> [Option<char>; 256] {
    let mut table = [None; 256];
    let mut code = 0x20;
    while code <= 0xFF {
        if code <= 0x7E || code >= 0xA1 {
            table[code] = char::from_u32(code as u32);
        }
        code += 1;
    }
    table
}

/// Converts a character to its device code, falling back to [`UNKNOWN_CHAR`].
pub fn encode_char(c: char) -> u8 {
    CHAR_TABLE
        .iter()
        .position(|&entry| entry == Some(c))
        .map_or(UNKNOWN_CHAR, |code| code as u8)
}

/// Encodes the first [`LINE_LENGTH`] characters of `text`.
pub fn encode_text(text: &str) -> Vec<u8> {
    text.chars().take(LINE_LENGTH).map(encode_char).collect()
}

/// Returns the character drawn for a device code, if any.
pub fn decode_char(code: u8) -> Option<char> {
    CHAR_TABLE[code as usize]
}
