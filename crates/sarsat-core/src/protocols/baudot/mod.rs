//! Modified Baudot alphabet.
//!
//! Text fields (call signs, registration markings, operator designators) are
//! packed as 6-bit codes, or as 5-bit codes when only letters can occur. The
//! table in `layout` is the single source of truth; both lookup directions are
//! derived from it at compile time.

pub mod error;
pub mod layout;
pub mod reader;
pub mod writer;

pub use error::BaudotError;
pub use reader::read_text;
pub use writer::write_text;

/// Code width of a Baudot text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeWidth {
    /// Full alphabet.
    Six,
    /// Letters and space only; the high bit is implied.
    Five,
}

impl CodeWidth {
    pub const fn bits(self) -> u32 {
        match self {
            CodeWidth::Six => 6,
            CodeWidth::Five => 5,
        }
    }
}

/// Decode a single 6-bit code.
///
/// # Examples
/// ```
/// use sarsat_core::protocols::baudot::decode_symbol;
///
/// assert_eq!(decode_symbol(0b111000).unwrap(), 'A');
/// assert!(decode_symbol(0).is_err());
/// ```
pub fn decode_symbol(code: u8) -> Result<char, BaudotError> {
    layout::DECODE_TABLE
        .get(code as usize)
        .copied()
        .flatten()
        .ok_or(BaudotError::InvalidCode { code })
}

/// Encode a single character to its 6-bit code; lowercase letters are folded.
pub fn encode_symbol(character: char) -> Result<u8, BaudotError> {
    let upper = character.to_ascii_uppercase();
    layout::SYMBOLS
        .iter()
        .find(|(symbol, _)| *symbol == upper)
        .map(|(_, code)| *code)
        .ok_or(BaudotError::UnsupportedCharacter {
            character,
            width: CodeWidth::Six.bits(),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::layout::{CODE_SPACE, SYMBOLS};
    use super::{BaudotError, decode_symbol, encode_symbol};

    #[test]
    fn every_symbol_round_trips() {
        for (symbol, code) in SYMBOLS {
            assert_eq!(encode_symbol(symbol).unwrap(), code);
            assert_eq!(decode_symbol(code).unwrap(), symbol);
        }
    }

    #[test]
    fn table_has_no_collisions() {
        let codes: HashSet<u8> = SYMBOLS.iter().map(|(_, code)| *code).collect();
        let symbols: HashSet<char> = SYMBOLS.iter().map(|(symbol, _)| *symbol).collect();
        assert_eq!(codes.len(), SYMBOLS.len());
        assert_eq!(symbols.len(), SYMBOLS.len());
        assert!(codes.iter().all(|code| (*code as usize) < CODE_SPACE));
    }

    #[test]
    fn each_defined_code_decodes_to_one_symbol() {
        let decoded = (0..CODE_SPACE as u8)
            .filter_map(|code| decode_symbol(code).ok())
            .count();
        assert_eq!(decoded, SYMBOLS.len());
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert_eq!(
            decode_symbol(0b000000),
            Err(BaudotError::InvalidCode { code: 0 })
        );
        assert!(decode_symbol(0b111111).is_err());
    }

    #[test]
    fn lowercase_is_folded() {
        assert_eq!(encode_symbol('k').unwrap(), encode_symbol('K').unwrap());
        assert!(encode_symbol('.').is_err());
    }
}
