use super::error::BeaconError;
use super::layout;
use super::model::{
    AviationUser, Beacon, BeaconProtocol, MaritimeIdentity, MaritimeUser, ProtocolFamily,
    RadioCallSignUser, RlsIdentity, RlsLocation, SerialIdentity, SerialLocation,
    SerialLocationIdentity, SerialTail, SerialUser, split_mmsi,
};
use crate::protocols::baudot::{self, BaudotError, CodeWidth};
use crate::protocols::bits::BitWriter;

/// Field-level writes mirroring `BeaconReader`.
///
/// Every numeric field is range-checked against its width so an encoded
/// identifier never silently truncates a value.
#[derive(Default)]
pub struct BeaconWriter {
    bits: BitWriter,
}

impl BeaconWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bit_len(&self) -> usize {
        self.bits.bit_len()
    }

    pub fn write_flag(&mut self, flag: bool) {
        self.bits.write_bit(u8::from(flag));
    }

    pub fn write_field(
        &mut self,
        field: &'static str,
        bits: u32,
        value: u64,
    ) -> Result<(), BeaconError> {
        if bits < u64::BITS && value >> bits != 0 {
            return Err(BeaconError::FieldOverflow { field, value, bits });
        }
        self.bits.write_bits(bits, value)?;
        Ok(())
    }

    pub fn write_zeros(&mut self, bits: u32) {
        self.bits.write_zeros(bits as usize);
    }

    pub fn write_text(
        &mut self,
        text: &str,
        count: usize,
        width: CodeWidth,
    ) -> Result<(), BeaconError> {
        baudot::write_text(&mut self.bits, text, count, width)?;
        Ok(())
    }

    pub fn write_symbol(&mut self, character: char) -> Result<(), BeaconError> {
        baudot::writer::write_symbol(&mut self.bits, character, CodeWidth::Six)?;
        Ok(())
    }

    /// Write digits as 4-bit BCD; a space becomes nibble `0xA`.
    pub fn write_bcd_digits(&mut self, digits: &str) -> Result<(), BeaconError> {
        for character in digits.chars() {
            let nibble = match character {
                '0'..='9' => character as u8 - b'0',
                ' ' => layout::BCD_SPACE,
                _ => return Err(BeaconError::UnsupportedBcdCharacter { character }),
            };
            self.bits.write_bits(layout::BCD_DIGIT_BITS, u64::from(nibble))?;
        }
        Ok(())
    }

    /// Write the 20-bit suffix of an MMSI that must carry `country_code`.
    pub fn write_mmsi(&mut self, mmsi: u32, country_code: u16) -> Result<(), BeaconError> {
        let (prefix, suffix) = split_mmsi(mmsi);
        if prefix != country_code {
            return Err(BeaconError::MmsiCountryMismatch { mmsi, country_code });
        }
        self.write_field("mmsi suffix", layout::MMSI_SUFFIX_BITS, u64::from(suffix))
    }

    /// Zero-pad to the identifier width and render 15 uppercase hex digits.
    pub fn finish(mut self) -> String {
        let used = self.bits.bit_len();
        if used < layout::HEX_ID_BITS {
            self.bits.write_zeros(layout::HEX_ID_BITS - used);
        }
        let mut hex_id = hex::encode_upper(self.bits.as_bytes());
        hex_id.truncate(layout::HEX_ID_LEN);
        hex_id
    }
}

/// Encode a beacon back into its 15-hex-character identifier.
///
/// Spare and unused trailing bits are written as zero, so a decoded
/// identifier re-encodes to the same field values rather than necessarily the
/// same string.
///
/// # Examples
/// ```
/// use sarsat_core::{AviationLocation, Beacon, BeaconProtocol, decode_beacon_id, encode_beacon};
///
/// let beacon = Beacon {
///     hex_id: String::new(),
///     country_code: 257,
///     protocol: BeaconProtocol::AviationStandardLocation(AviationLocation {
///         aircraft_address: 0xABC,
///     }),
/// };
/// let hex_id = encode_beacon(&beacon).unwrap();
/// assert_eq!(hex_id, "202600157800000");
/// let decoded = decode_beacon_id(&hex_id).unwrap();
/// assert_eq!(decoded.protocol, beacon.protocol);
/// ```
///
/// # Errors
/// Fails when a field does not fit its width, when text falls outside the
/// Baudot alphabet, when an MMSI prefix disagrees with the country code, or
/// when a maritime call sign is all digits and would read back as an MMSI.
pub fn encode_beacon(beacon: &Beacon) -> Result<String, BeaconError> {
    let mut writer = BeaconWriter::new();
    let country_code = beacon.country_code;

    writer.write_flag(beacon.protocol.family() == ProtocolFamily::User);
    writer.write_field(
        "country code",
        layout::COUNTRY_CODE_BITS,
        u64::from(country_code),
    )?;

    match &beacon.protocol {
        BeaconProtocol::Orbitography(orbitography) => {
            write_user_code(&mut writer, layout::USER_CODE_ORBITOGRAPHY)?;
            writer.write_field("orbitography", layout::ORBITOGRAPHY_BITS, orbitography.data)?;
        }
        BeaconProtocol::AviationUser(user) => {
            write_user_code(&mut writer, layout::USER_CODE_AVIATION)?;
            encode_aviation_user(&mut writer, user)?;
        }
        BeaconProtocol::MaritimeUser(user) => {
            write_user_code(&mut writer, layout::USER_CODE_MARITIME)?;
            encode_maritime_user(&mut writer, user, country_code)?;
        }
        BeaconProtocol::SerialUser(user) => {
            write_user_code(&mut writer, layout::USER_CODE_SERIAL)?;
            encode_serial_user(&mut writer, user)?;
        }
        BeaconProtocol::NationalUser(national) => {
            write_user_code(&mut writer, layout::USER_CODE_NATIONAL)?;
            writer.write_field("national use", layout::NATIONAL_USE_BITS, national.national_use)?;
        }
        BeaconProtocol::RadioCallSignUser(user) => {
            write_user_code(&mut writer, layout::USER_CODE_RADIO_CALL_SIGN)?;
            encode_radio_call_sign_user(&mut writer, user)?;
        }
        BeaconProtocol::TestUser(national) => {
            write_user_code(&mut writer, layout::USER_CODE_TEST)?;
            writer.write_field("national use", layout::NATIONAL_USE_BITS, national.national_use)?;
        }
        BeaconProtocol::MaritimeStandardLocation(location) => {
            write_location_code(&mut writer, layout::LOCATION_CODE_MARITIME)?;
            writer.write_mmsi(location.mmsi, country_code)?;
            writer.write_field(
                "specific beacon number",
                layout::MARITIME_BEACON_NUMBER_BITS,
                u64::from(location.specific_beacon_number),
            )?;
        }
        BeaconProtocol::AviationStandardLocation(location) => {
            write_location_code(&mut writer, layout::LOCATION_CODE_AVIATION)?;
            writer.write_field(
                "aircraft address",
                layout::AIRCRAFT_ADDRESS_BITS,
                u64::from(location.aircraft_address),
            )?;
        }
        BeaconProtocol::SerialStandardLocation(location) => {
            encode_serial_location(&mut writer, location)?;
        }
        BeaconProtocol::NationalLocation(location) => {
            write_location_code(&mut writer, location.protocol_code())?;
            writer.write_field(
                "national serial number",
                layout::NATIONAL_SERIAL_BITS,
                u64::from(location.serial_number),
            )?;
        }
        BeaconProtocol::ShipSecurityLocation(location) => {
            write_location_code(&mut writer, layout::LOCATION_CODE_SHIP_SECURITY)?;
            writer.write_mmsi(location.mmsi, country_code)?;
            writer.write_zeros(layout::SHIP_SECURITY_SPARE_BITS);
        }
        BeaconProtocol::RlsLocation(location) => {
            write_location_code(&mut writer, layout::LOCATION_CODE_RLS)?;
            encode_rls_location(&mut writer, location, country_code)?;
        }
    }

    Ok(writer.finish())
}

fn write_user_code(writer: &mut BeaconWriter, code: u8) -> Result<(), BeaconError> {
    writer.write_field("user protocol code", layout::USER_CODE_BITS, u64::from(code))
}

fn write_location_code(writer: &mut BeaconWriter, code: u8) -> Result<(), BeaconError> {
    writer.write_field(
        "location protocol code",
        layout::LOCATION_CODE_BITS,
        u64::from(code),
    )
}

fn encode_aviation_user(writer: &mut BeaconWriter, user: &AviationUser) -> Result<(), BeaconError> {
    writer.write_text(
        &user.registration_marking,
        layout::AVIATION_REGISTRATION_CHARS,
        CodeWidth::Six,
    )?;
    writer.write_field(
        "specific ELT number",
        layout::AVIATION_ELT_NUMBER_BITS,
        u64::from(user.specific_elt_number),
    )?;
    write_aux_device(writer, user.auxiliary_device)
}

fn encode_maritime_user(
    writer: &mut BeaconWriter,
    user: &MaritimeUser,
    country_code: u16,
) -> Result<(), BeaconError> {
    match &user.identity {
        MaritimeIdentity::Mmsi(mmsi) => {
            let (prefix, suffix) = split_mmsi(*mmsi);
            if prefix != country_code {
                return Err(BeaconError::MmsiCountryMismatch {
                    mmsi: *mmsi,
                    country_code,
                });
            }
            let digits = format!("{suffix:0width$}", width = layout::MARITIME_ID_DIGITS);
            writer.write_text(&digits, layout::MARITIME_ID_CHARS, CodeWidth::Six)?;
        }
        MaritimeIdentity::CallSign(call_sign) => {
            // The decoder reads an all-digit field as an MMSI suffix.
            let padded = format!("{call_sign:>width$}", width = layout::MARITIME_ID_CHARS);
            if padded.parse::<u32>().is_ok() {
                return Err(BeaconError::AmbiguousCallSign {
                    call_sign: call_sign.clone(),
                });
            }
            writer.write_text(call_sign, layout::MARITIME_ID_CHARS, CodeWidth::Six)?;
        }
    }
    writer.write_symbol(user.specific_beacon_number)?;
    writer.write_zeros(layout::USER_SPARE_BITS);
    write_aux_device(writer, user.auxiliary_device)
}

fn encode_radio_call_sign_user(
    writer: &mut BeaconWriter,
    user: &RadioCallSignUser,
) -> Result<(), BeaconError> {
    let max = layout::RADIO_CALL_SIGN_CHARS + layout::RADIO_CALL_SIGN_DIGITS;
    if user.call_sign.chars().count() > max {
        return Err(BaudotError::TextTooLong {
            text: user.call_sign.clone(),
            max,
        }
        .into());
    }
    // Call signs are left-justified: letters first, the numeric tail in BCD.
    let padded = format!("{:<max$}", user.call_sign);
    let split = padded
        .char_indices()
        .nth(layout::RADIO_CALL_SIGN_CHARS)
        .map_or(padded.len(), |(index, _)| index);
    let (letters, digits) = padded.split_at(split);
    writer.write_text(letters, layout::RADIO_CALL_SIGN_CHARS, CodeWidth::Six)?;
    writer.write_bcd_digits(digits)?;
    writer.write_symbol(user.specific_beacon_number)?;
    writer.write_zeros(layout::USER_SPARE_BITS);
    write_aux_device(writer, user.auxiliary_device)
}

fn encode_serial_user(writer: &mut BeaconWriter, user: &SerialUser) -> Result<(), BeaconError> {
    writer.write_field(
        "serial beacon type",
        layout::SERIAL_BEACON_TYPE_BITS,
        u64::from(user.beacon_type()),
    )?;
    writer.write_flag(matches!(user.tail, SerialTail::CertificateNumber(_)));

    match &user.identity {
        SerialIdentity::AircraftAddress {
            aircraft_address,
            specific_elt_number,
        } => {
            writer.write_field(
                "aircraft address",
                layout::AIRCRAFT_ADDRESS_BITS,
                u64::from(*aircraft_address),
            )?;
            writer.write_field(
                "specific ELT number",
                layout::SERIAL_ELT_NUMBER_BITS,
                u64::from(*specific_elt_number),
            )?;
        }
        SerialIdentity::OperatorDesignator {
            operator_designator,
            serial_number,
        } => {
            writer.write_text(
                operator_designator,
                layout::OPERATOR_DESIGNATOR_CHARS,
                CodeWidth::Five,
            )?;
            writer.write_field(
                "serial number",
                layout::AOD_USER_SERIAL_BITS,
                u64::from(*serial_number),
            )?;
            writer.write_zeros(layout::AOD_USER_SPARE_BITS);
        }
        SerialIdentity::SerialNumber {
            serial_number,
            national_use,
            ..
        } => {
            writer.write_field(
                "serial number",
                layout::SERIAL_NUMBER_BITS,
                u64::from(*serial_number),
            )?;
            writer.write_field(
                "national use",
                layout::SERIAL_NATIONAL_USE_BITS,
                u64::from(*national_use),
            )?;
        }
    }

    let (field, value) = match user.tail {
        SerialTail::CertificateNumber(value) => ("certificate number", value),
        SerialTail::NationalUse(value) => ("national use", value),
    };
    writer.write_field(field, layout::SERIAL_TAIL_BITS, u64::from(value))?;
    write_aux_device(writer, user.auxiliary_device)
}

fn encode_serial_location(
    writer: &mut BeaconWriter,
    location: &SerialLocation,
) -> Result<(), BeaconError> {
    write_location_code(writer, location.protocol_code())?;
    match &location.identity {
        SerialLocationIdentity::Certificate {
            certificate_number,
            serial_number,
            ..
        } => {
            writer.write_field(
                "certificate number",
                layout::CERTIFICATE_BITS,
                u64::from(*certificate_number),
            )?;
            writer.write_field(
                "serial number",
                layout::LOCATION_SERIAL_BITS,
                u64::from(*serial_number),
            )
        }
        SerialLocationIdentity::OperatorDesignator {
            operator_designator,
            serial_number,
        } => {
            writer.write_text(
                operator_designator,
                layout::OPERATOR_DESIGNATOR_CHARS,
                CodeWidth::Five,
            )?;
            writer.write_field(
                "serial number",
                layout::AOD_LOCATION_SERIAL_BITS,
                u64::from(*serial_number),
            )
        }
    }
}

fn encode_rls_location(
    writer: &mut BeaconWriter,
    location: &RlsLocation,
    country_code: u16,
) -> Result<(), BeaconError> {
    writer.write_field(
        "RLS beacon type",
        layout::RLS_BEACON_TYPE_BITS,
        u64::from(location.beacon_type.code()),
    )?;
    let base = location.beacon_type.number_base();
    let number_bits = layout::RLS_MARKER_BITS + layout::RLS_NUMBER_TAIL_BITS;
    // Values whose top four bits equal the MMSI marker cannot be represented.
    let marker_floor = u16::from(layout::RLS_MMSI_MARKER) << layout::RLS_NUMBER_TAIL_BITS;

    let (field, number, min, max, serial_number) = match &location.identity {
        RlsIdentity::Mmsi { mmsi } => {
            writer.write_field(
                "RLS marker",
                layout::RLS_MARKER_BITS,
                u64::from(layout::RLS_MMSI_MARKER),
            )?;
            return writer.write_mmsi(*mmsi, country_code);
        }
        RlsIdentity::TacNumber {
            tac_number,
            serial_number,
        } => (
            "TAC number",
            *tac_number,
            base,
            base + layout::RLS_TAC_LIMIT - 1,
            *serial_number,
        ),
        RlsIdentity::NationalRlsNumber {
            national_rls_number,
            serial_number,
        } => (
            "national RLS number",
            *national_rls_number,
            base + layout::RLS_TAC_LIMIT,
            base + marker_floor - 1,
            *serial_number,
        ),
    };
    if number < min || number > max {
        return Err(BeaconError::FieldOutOfRange {
            field,
            value: u64::from(number),
            min: u64::from(min),
            max: u64::from(max),
        });
    }
    writer.write_field(field, number_bits, u64::from(number - base))?;
    writer.write_field(
        "serial number",
        layout::RLS_SERIAL_BITS,
        u64::from(serial_number),
    )
}

fn write_aux_device(writer: &mut BeaconWriter, value: u8) -> Result<(), BeaconError> {
    writer.write_field(
        "auxiliary radio-locating device",
        layout::AUX_DEVICE_BITS,
        u64::from(value),
    )
}

#[cfg(test)]
mod tests {
    use super::{BeaconWriter, encode_beacon};
    use crate::protocols::beacon::error::BeaconError;
    use crate::protocols::beacon::model::{
        Beacon, BeaconProtocol, MaritimeIdentity, MaritimeLocation, MaritimeUser, RlsBeaconType,
        RlsIdentity, RlsLocation,
    };

    fn beacon(country_code: u16, protocol: BeaconProtocol) -> Beacon {
        Beacon {
            hex_id: String::new(),
            country_code,
            protocol,
        }
    }

    #[test]
    fn finish_pads_to_fifteen_digits() {
        let mut writer = BeaconWriter::new();
        writer.write_flag(true);
        assert_eq!(writer.finish(), "800000000000000");
    }

    #[test]
    fn field_overflow_is_reported() {
        let mut writer = BeaconWriter::new();
        let err = writer.write_field("country code", 10, 1024).unwrap_err();
        assert_eq!(
            err,
            BeaconError::FieldOverflow {
                field: "country code",
                value: 1024,
                bits: 10
            }
        );
        assert_eq!(writer.bit_len(), 0);
    }

    #[test]
    fn mmsi_must_match_country_code() {
        let err = encode_beacon(&beacon(
            257,
            BeaconProtocol::MaritimeStandardLocation(MaritimeLocation {
                mmsi: 366_123_456,
                specific_beacon_number: 0,
            }),
        ))
        .unwrap_err();
        assert_eq!(
            err,
            BeaconError::MmsiCountryMismatch {
                mmsi: 366_123_456,
                country_code: 257
            }
        );
    }

    #[test]
    fn numeric_call_sign_is_rejected() {
        let call_sign = |text: &str| {
            beacon(
                257,
                BeaconProtocol::MaritimeUser(MaritimeUser {
                    identity: MaritimeIdentity::CallSign(text.to_string()),
                    specific_beacon_number: '0',
                    auxiliary_device: 0,
                }),
            )
        };
        assert_eq!(
            encode_beacon(&call_sign("123456")),
            Err(BeaconError::AmbiguousCallSign {
                call_sign: "123456".to_string()
            })
        );

        // Left padding keeps a short numeric call sign out of the MMSI form.
        let hex_id = encode_beacon(&call_sign("12345")).unwrap();
        let decoded = crate::decode_beacon_id(&hex_id).unwrap();
        assert_eq!(decoded.protocol, call_sign("12345").protocol);
    }

    #[test]
    fn reencodes_known_maritime_user_vector() {
        let decoded = crate::decode_beacon_id("A029C2900D97591").unwrap();
        assert_eq!(encode_beacon(&decoded).unwrap(), "A029C2900D97591");
    }

    #[test]
    fn tac_number_outside_plan_is_rejected() {
        let err = encode_beacon(&beacon(
            257,
            BeaconProtocol::RlsLocation(RlsLocation {
                beacon_type: RlsBeaconType::Epirb,
                identity: RlsIdentity::TacNumber {
                    tac_number: 1500,
                    serial_number: 1,
                },
            }),
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            BeaconError::FieldOutOfRange {
                field: "TAC number",
                min: 2000,
                max: 2919,
                ..
            }
        ));
    }
}
