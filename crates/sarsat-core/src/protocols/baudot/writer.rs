use super::layout;
use super::{BaudotError, CodeWidth, encode_symbol};
use crate::protocols::bits::BitWriter;

/// Write `text` as exactly `count` Baudot characters, left-padded with spaces.
///
/// # Examples
/// ```
/// use sarsat_core::protocols::baudot::{CodeWidth, read_text, write_text};
/// use sarsat_core::protocols::bits::{BitReader, BitWriter};
///
/// let mut writer = BitWriter::new();
/// write_text(&mut writer, "K7", 4, CodeWidth::Six).unwrap();
/// let bytes = writer.into_bytes();
/// let mut reader = BitReader::new(&bytes);
/// assert_eq!(read_text(&mut reader, 4, CodeWidth::Six).unwrap(), "  K7");
/// ```
pub fn write_text(
    writer: &mut BitWriter,
    text: &str,
    count: usize,
    width: CodeWidth,
) -> Result<(), BaudotError> {
    let len = text.chars().count();
    if len > count {
        return Err(BaudotError::TextTooLong {
            text: text.to_string(),
            max: count,
        });
    }
    for character in std::iter::repeat_n(layout::PAD, count - len).chain(text.chars()) {
        write_symbol(writer, character, width)?;
    }
    Ok(())
}

pub fn write_symbol(
    writer: &mut BitWriter,
    character: char,
    width: CodeWidth,
) -> Result<(), BaudotError> {
    let code = encode_symbol(character)?;
    let code = match width {
        CodeWidth::Six => code,
        CodeWidth::Five => {
            if code & layout::SHORT_FORM_MARKER == 0 {
                return Err(BaudotError::UnsupportedCharacter {
                    character,
                    width: width.bits(),
                });
            }
            code & !layout::SHORT_FORM_MARKER
        }
    };
    writer.write_bits(width.bits(), u64::from(code))?;
    Ok(())
}
