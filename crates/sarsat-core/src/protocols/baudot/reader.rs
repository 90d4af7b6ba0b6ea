use super::layout;
use super::{BaudotError, CodeWidth, decode_symbol};
use crate::protocols::bits::BitReader;

/// Read `count` Baudot characters and concatenate them.
///
/// Padding is kept; callers trim where the field allows it. The first invalid
/// code aborts the read.
///
/// # Examples
/// ```
/// use sarsat_core::protocols::baudot::{CodeWidth, read_text};
/// use sarsat_core::protocols::bits::BitReader;
///
/// // "AB" as two 6-bit codes, then four padding bits.
/// let bytes = [0b1110_0011, 0b0011_0000];
/// let mut reader = BitReader::new(&bytes);
/// assert_eq!(read_text(&mut reader, 2, CodeWidth::Six).unwrap(), "AB");
/// ```
pub fn read_text(
    reader: &mut BitReader<'_>,
    count: usize,
    width: CodeWidth,
) -> Result<String, BaudotError> {
    let mut text = String::with_capacity(count);
    for _ in 0..count {
        text.push(read_symbol(reader, width)?);
    }
    Ok(text)
}

pub fn read_symbol(reader: &mut BitReader<'_>, width: CodeWidth) -> Result<char, BaudotError> {
    let code = reader.read_bits(width.bits())? as u8;
    let code = match width {
        CodeWidth::Six => code,
        CodeWidth::Five => code | layout::SHORT_FORM_MARKER,
    };
    decode_symbol(code)
}
