//! Text string encoding for `Tj`/`TJ` operands.

use lopdf::{Object, StringFormat};

/// WinAnsi code for a code point, `?` when it has none.
fn win_ansi_byte(code: u32) -> u8 {
    match code {
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        0x80..=0x9F => b'?',
        0..=0xFF => code as u8,
        _ => b'?',
    }
}

pub fn to_win_ansi(codes: &[u32]) -> Vec<u8> {
    codes.iter().map(|&c| win_ansi_byte(c)).collect()
}

pub fn to_utf16_be(codes: &[u32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(codes.len() * 2);
    let mut units = [0u16; 2];
    for &code in codes {
        let c = char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER);
        for unit in c.encode_utf16(&mut units) {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
    }
    bytes
}

/// Encodes visual-order code points as a string operand: hexadecimal
/// UTF-16BE for two-byte fonts, a literal WinAnsi string otherwise.
pub fn encode_text(codes: &[u32], unicode: bool) -> Object {
    if unicode {
        Object::String(to_utf16_be(codes), StringFormat::Hexadecimal)
    } else {
        Object::String(to_win_ansi(codes), StringFormat::Literal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_ansi() {
        assert_eq!(to_win_ansi(&[0x41, 0xE9, 0x2022, 0x0628]), vec![0x41, 0xE9, 0x95, b'?']);
        assert_eq!(to_win_ansi(&[0x81]), vec![b'?']);
    }

    #[test]
    fn test_utf16_be() {
        assert_eq!(to_utf16_be(&[0xFEAD]), vec![0xFE, 0xAD]);
        assert_eq!(to_utf16_be(&[0x1F600]), vec![0xD8, 0x3D, 0xDE, 0x00]);
        assert_eq!(to_utf16_be(&[0xD800]), vec![0xFF, 0xFD]);
    }
}
