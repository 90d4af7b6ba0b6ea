use super::MAX_WIDTH;
use super::error::BitError;

/// Sequential MSB-first reader over a byte slice.
///
/// # Examples
/// ```
/// use sarsat_core::protocols::bits::BitReader;
///
/// let bytes = [0b1010_0000];
/// let mut reader = BitReader::new(&bytes);
/// assert_eq!(reader.read_bit().unwrap(), 1);
/// assert_eq!(reader.read_bits(3).unwrap(), 0b010);
/// assert_eq!(reader.remaining(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    index: usize,
    offset: u8,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            index: 0,
            offset: 0,
        }
    }

    /// Number of bits consumed so far.
    pub fn position(&self) -> usize {
        self.index * 8 + self.offset as usize
    }

    /// Number of bits left before the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.data.len() * 8 - self.position()
    }

    pub fn require_bits(&self, needed: usize) -> Result<(), BitError> {
        let remaining = self.remaining();
        if remaining < needed {
            return Err(BitError::Exhausted { needed, remaining });
        }
        Ok(())
    }

    pub fn read_bit(&mut self) -> Result<u8, BitError> {
        let byte = self.data.get(self.index).copied().ok_or(BitError::Exhausted {
            needed: 1,
            remaining: 0,
        })?;
        let bit = (byte >> (7 - self.offset)) & 1;
        self.offset += 1;
        if self.offset == 8 {
            self.offset = 0;
            self.index += 1;
        }
        Ok(bit)
    }

    /// Read `bits` successive bits as a big-endian unsigned value.
    ///
    /// Nothing is consumed when the buffer holds fewer than `bits` bits.
    pub fn read_bits(&mut self, bits: u32) -> Result<u64, BitError> {
        if bits > MAX_WIDTH {
            return Err(BitError::TooWide { bits });
        }
        self.require_bits(bits as usize)?;
        let mut value = 0u64;
        for _ in 0..bits {
            value = (value << 1) | u64::from(self.read_bit()?);
        }
        Ok(value)
    }

    pub fn skip_bits(&mut self, bits: u32) -> Result<(), BitError> {
        self.require_bits(bits as usize)?;
        let target = self.position() + bits as usize;
        self.index = target / 8;
        self.offset = (target % 8) as u8;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::BitReader;
    use crate::protocols::bits::BitError;

    #[test]
    fn reads_msb_first_across_byte_boundary() {
        let bytes = [0b0000_0011, 0b1000_0000];
        let mut reader = BitReader::new(&bytes);
        reader.skip_bits(6).unwrap();
        assert_eq!(reader.read_bits(3).unwrap(), 0b111);
        assert_eq!(reader.position(), 9);
        assert_eq!(reader.remaining(), 7);
    }

    #[test]
    fn offset_rolls_over_at_eight() {
        let bytes = [0xff, 0x00];
        let mut reader = BitReader::new(&bytes);
        for _ in 0..8 {
            assert_eq!(reader.read_bit().unwrap(), 1);
        }
        assert_eq!(reader.position(), 8);
        assert_eq!(reader.read_bit().unwrap(), 0);
    }

    #[test]
    fn read_past_end_is_an_error() {
        let bytes = [0xab];
        let mut reader = BitReader::new(&bytes);
        reader.read_bits(5).unwrap();
        let err = reader.read_bits(4).unwrap_err();
        assert_eq!(
            err,
            BitError::Exhausted {
                needed: 4,
                remaining: 3
            }
        );
        // A failed read leaves the cursor where it was.
        assert_eq!(reader.read_bits(3).unwrap(), 0b011);
    }

    #[test]
    fn skip_past_end_is_an_error() {
        let bytes = [0u8; 2];
        let mut reader = BitReader::new(&bytes);
        assert!(matches!(
            reader.skip_bits(17),
            Err(BitError::Exhausted { needed: 17, .. })
        ));
    }

    #[test]
    fn width_above_sixty_four_is_rejected() {
        let bytes = [0u8; 16];
        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_bits(65), Err(BitError::TooWide { bits: 65 }));
    }

    #[test]
    fn buffer_can_be_read_twice() {
        let bytes = [0xa5];
        let first = BitReader::new(&bytes).read_bits(8).unwrap();
        let second = BitReader::new(&bytes).read_bits(8).unwrap();
        assert_eq!(first, 0xa5);
        assert_eq!(first, second);
    }
}
