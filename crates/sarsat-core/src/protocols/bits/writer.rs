use super::MAX_WIDTH;
use super::error::BitError;

/// MSB-first bit writer backed by a growable byte buffer.
///
/// # Examples
/// ```
/// use sarsat_core::protocols::bits::BitWriter;
///
/// let mut writer = BitWriter::new();
/// writer.write_bit(1);
/// writer.write_bits(3, 0b010).unwrap();
/// writer.write_zeros(4);
/// assert_eq!(writer.as_bytes(), &[0b1010_0000]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    buf: Vec<u8>,
    offset: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bits written so far.
    pub fn bit_len(&self) -> usize {
        match self.offset {
            0 => self.buf.len() * 8,
            offset => (self.buf.len() - 1) * 8 + offset as usize,
        }
    }

    /// Append one bit; any non-zero value writes a 1.
    pub fn write_bit(&mut self, bit: u8) {
        if self.offset == 0 {
            self.buf.push(0);
        }
        if bit != 0 {
            if let Some(last) = self.buf.last_mut() {
                *last |= 1 << (7 - self.offset);
            }
        }
        self.offset = (self.offset + 1) % 8;
    }

    /// Append the low `bits` bits of `value`, most significant first.
    pub fn write_bits(&mut self, bits: u32, value: u64) -> Result<(), BitError> {
        if bits > MAX_WIDTH {
            return Err(BitError::TooWide { bits });
        }
        for shift in (0..bits).rev() {
            self.write_bit(((value >> shift) & 1) as u8);
        }
        Ok(())
    }

    pub fn write_zeros(&mut self, bits: usize) {
        for _ in 0..bits {
            self.write_bit(0);
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::BitWriter;
    use crate::protocols::bits::{BitError, BitReader};

    #[test]
    fn grows_one_byte_at_a_time() {
        let mut writer = BitWriter::new();
        assert!(writer.as_bytes().is_empty());
        writer.write_zeros(8);
        assert_eq!(writer.as_bytes().len(), 1);
        writer.write_bit(1);
        assert_eq!(writer.as_bytes(), &[0x00, 0x80]);
        assert_eq!(writer.bit_len(), 9);
    }

    #[test]
    fn write_bits_truncates_to_width() {
        let mut writer = BitWriter::new();
        writer.write_bits(4, 0xfa).unwrap();
        writer.write_bits(4, 0x3).unwrap();
        assert_eq!(writer.into_bytes(), vec![0xa3]);
    }

    #[test]
    fn writer_output_reads_back() {
        let mut writer = BitWriter::new();
        writer.write_bit(0);
        writer.write_bits(10, 257).unwrap();
        writer.write_bits(24, 0xabc).unwrap();
        writer.write_zeros(5);

        let bytes = writer.into_bytes();
        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_bit().unwrap(), 0);
        assert_eq!(reader.read_bits(10).unwrap(), 257);
        assert_eq!(reader.read_bits(24).unwrap(), 0xabc);
    }

    #[test]
    fn width_above_sixty_four_is_rejected() {
        let mut writer = BitWriter::new();
        assert_eq!(writer.write_bits(65, 0), Err(BitError::TooWide { bits: 65 }));
        assert_eq!(writer.bit_len(), 0);
    }
}
