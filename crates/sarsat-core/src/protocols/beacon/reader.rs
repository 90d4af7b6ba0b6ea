use super::error::BeaconError;
use super::layout;
use super::model::combine_mmsi;
use crate::protocols::baudot::{self, CodeWidth};
use crate::protocols::bits::BitReader;

/// Field-level reads over the beacon bitstream.
///
/// Keeps bit widths and text conventions out of the protocol decoders.
pub struct BeaconReader<'a> {
    bits: BitReader<'a>,
}

impl<'a> BeaconReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bits: BitReader::new(bytes),
        }
    }

    pub fn position(&self) -> usize {
        self.bits.position()
    }

    pub fn read_flag(&mut self) -> Result<bool, BeaconError> {
        Ok(self.bits.read_bit()? == 1)
    }

    pub fn read_u8(&mut self, bits: u32) -> Result<u8, BeaconError> {
        debug_assert!(bits <= u8::BITS);
        Ok(self.bits.read_bits(bits)? as u8)
    }

    pub fn read_u16(&mut self, bits: u32) -> Result<u16, BeaconError> {
        debug_assert!(bits <= u16::BITS);
        Ok(self.bits.read_bits(bits)? as u16)
    }

    pub fn read_u32(&mut self, bits: u32) -> Result<u32, BeaconError> {
        debug_assert!(bits <= u32::BITS);
        Ok(self.bits.read_bits(bits)? as u32)
    }

    pub fn read_u64(&mut self, bits: u32) -> Result<u64, BeaconError> {
        Ok(self.bits.read_bits(bits)?)
    }

    pub fn skip(&mut self, bits: u32) -> Result<(), BeaconError> {
        self.bits.skip_bits(bits)?;
        Ok(())
    }

    pub fn read_country_code(&mut self) -> Result<u16, BeaconError> {
        self.read_u16(layout::COUNTRY_CODE_BITS)
    }

    /// Raw text, padding included.
    pub fn read_text(&mut self, count: usize, width: CodeWidth) -> Result<String, BeaconError> {
        Ok(baudot::read_text(&mut self.bits, count, width)?)
    }

    pub fn read_trimmed_text(
        &mut self,
        count: usize,
        width: CodeWidth,
    ) -> Result<String, BeaconError> {
        Ok(self.read_text(count, width)?.trim().to_string())
    }

    pub fn read_symbol(&mut self) -> Result<char, BeaconError> {
        Ok(baudot::reader::read_symbol(&mut self.bits, CodeWidth::Six)?)
    }

    /// Read `count` 4-bit BCD digits; nibble `0xA` stands for a space.
    pub fn read_bcd_digits(&mut self, count: usize) -> Result<String, BeaconError> {
        let mut digits = String::with_capacity(count);
        for _ in 0..count {
            let nibble = self.read_u8(layout::BCD_DIGIT_BITS)?;
            let digit = match nibble {
                0..=9 => char::from(b'0' + nibble),
                layout::BCD_SPACE => ' ',
                _ => return Err(BeaconError::InvalidBcdDigit { nibble }),
            };
            digits.push(digit);
        }
        Ok(digits)
    }

    /// Read a 20-bit MMSI suffix and prefix it with the country code.
    pub fn read_mmsi(&mut self, country_code: u16) -> Result<u32, BeaconError> {
        let suffix = self.read_u32(layout::MMSI_SUFFIX_BITS)?;
        Ok(combine_mmsi(country_code, suffix))
    }

    pub fn read_aux_device(&mut self) -> Result<u8, BeaconError> {
        self.read_u8(layout::AUX_DEVICE_BITS)
    }
}

#[cfg(test)]
mod tests {
    use super::BeaconReader;
    use crate::protocols::baudot::CodeWidth;
    use crate::protocols::beacon::error::BeaconError;
    use crate::protocols::bits::BitWriter;

    #[test]
    fn bcd_maps_ten_to_space() {
        let mut writer = BitWriter::new();
        for nibble in [0x1, 0xA, 0x9] {
            writer.write_bits(4, nibble).unwrap();
        }
        let bytes = writer.into_bytes();
        let mut reader = BeaconReader::new(&bytes);
        assert_eq!(reader.read_bcd_digits(3).unwrap(), "1 9");
    }

    #[test]
    fn bcd_rejects_high_nibbles() {
        let bytes = [0xB0];
        let mut reader = BeaconReader::new(&bytes);
        assert_eq!(
            reader.read_bcd_digits(1),
            Err(BeaconError::InvalidBcdDigit { nibble: 0xB })
        );
    }

    #[test]
    fn mmsi_is_prefixed_with_country_code() {
        let mut writer = BitWriter::new();
        writer.write_bits(20, 123_456).unwrap();
        let bytes = writer.into_bytes();
        let mut reader = BeaconReader::new(&bytes);
        assert_eq!(reader.read_mmsi(257).unwrap(), 257_123_456);
        assert_eq!(reader.position(), 20);
    }

    #[test]
    fn trimmed_text_drops_padding() {
        let mut writer = BitWriter::new();
        crate::protocols::baudot::write_text(&mut writer, "HBX", 7, CodeWidth::Six).unwrap();
        let bytes = writer.into_bytes();
        let mut reader = BeaconReader::new(&bytes);
        assert_eq!(reader.read_trimmed_text(7, CodeWidth::Six).unwrap(), "HBX");
    }
}
