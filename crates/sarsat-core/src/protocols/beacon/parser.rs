use tracing::debug;

use super::error::BeaconError;
use super::layout;
use super::model::{
    AviationLocation, AviationUser, Beacon, BeaconProtocol, BeaconType, MaritimeIdentity,
    MaritimeLocation, MaritimeUser, NationalLocation, NationalUse, Orbitography, ProtocolFamily,
    RadioCallSignUser, RlsBeaconType, RlsIdentity, RlsLocation, SerialIdentity, SerialLocation,
    SerialLocationIdentity, SerialTail, SerialUser, SerialUserKind, ShipSecurityLocation,
    combine_mmsi,
};
use super::reader::BeaconReader;
use crate::protocols::baudot::CodeWidth;

/// Decode a 15-hex-character beacon identifier.
///
/// Hex digits are case-insensitive. The identifier is padded with one zero
/// nibble to whole bytes before the 60 information bits are walked.
///
/// # Examples
/// ```
/// use sarsat_core::{BeaconProtocol, MaritimeIdentity, decode_beacon_id};
///
/// let beacon = decode_beacon_id("A029C2900D97591").unwrap();
/// assert_eq!(beacon.country_code, 257);
/// match beacon.protocol {
///     BeaconProtocol::MaritimeUser(user) => {
///         assert_eq!(user.identity, MaritimeIdentity::Mmsi(257_743_921));
///     }
///     other => panic!("unexpected protocol: {other:?}"),
/// }
/// ```
///
/// # Errors
/// Fails on a length other than 15, on non-hex characters, on unassigned
/// protocol codes and on corrupted text fields.
pub fn decode_beacon_id(hex_id: &str) -> Result<Beacon, BeaconError> {
    let bytes = hex_id_bytes(hex_id)?;
    let mut reader = BeaconReader::new(&bytes);

    let is_user = reader.read_flag()?;
    let country_code = reader.read_country_code()?;
    let protocol = if is_user {
        decode_user(&mut reader, country_code)?
    } else {
        decode_location(&mut reader, country_code)?
    };
    debug!(
        hex_id,
        country_code,
        protocol = protocol.name(),
        bits = reader.position(),
        "decoded beacon id"
    );

    Ok(Beacon {
        hex_id: hex_id.to_string(),
        country_code,
        protocol,
    })
}

fn hex_id_bytes(hex_id: &str) -> Result<Vec<u8>, BeaconError> {
    let length = hex_id.chars().count();
    if length != layout::HEX_ID_LEN {
        return Err(BeaconError::InvalidLength { length });
    }
    let padded = format!("{hex_id}{}", layout::HEX_ID_PAD);
    hex::decode(padded).map_err(|err| BeaconError::InvalidHex(err.to_string()))
}

fn decode_user(
    reader: &mut BeaconReader<'_>,
    country_code: u16,
) -> Result<BeaconProtocol, BeaconError> {
    let code = reader.read_u8(layout::USER_CODE_BITS)?;
    debug!(code, "user protocol");
    match code {
        layout::USER_CODE_ORBITOGRAPHY => Ok(BeaconProtocol::Orbitography(Orbitography {
            data: reader.read_u64(layout::ORBITOGRAPHY_BITS)?,
        })),
        layout::USER_CODE_AVIATION => decode_aviation_user(reader).map(BeaconProtocol::AviationUser),
        layout::USER_CODE_MARITIME => {
            decode_maritime_user(reader, country_code).map(BeaconProtocol::MaritimeUser)
        }
        layout::USER_CODE_SERIAL => decode_serial_user(reader).map(BeaconProtocol::SerialUser),
        layout::USER_CODE_NATIONAL => decode_national_use(reader).map(BeaconProtocol::NationalUser),
        layout::USER_CODE_RADIO_CALL_SIGN => {
            decode_radio_call_sign_user(reader).map(BeaconProtocol::RadioCallSignUser)
        }
        layout::USER_CODE_TEST => decode_national_use(reader).map(BeaconProtocol::TestUser),
        _ => Err(BeaconError::UnhandledProtocol {
            family: ProtocolFamily::User,
            code,
        }),
    }
}

fn decode_location(
    reader: &mut BeaconReader<'_>,
    country_code: u16,
) -> Result<BeaconProtocol, BeaconError> {
    let code = reader.read_u8(layout::LOCATION_CODE_BITS)?;
    debug!(code, "location protocol");
    match code {
        layout::LOCATION_CODE_MARITIME => decode_maritime_location(reader, country_code)
            .map(BeaconProtocol::MaritimeStandardLocation),
        layout::LOCATION_CODE_AVIATION => Ok(BeaconProtocol::AviationStandardLocation(
            AviationLocation {
                aircraft_address: reader.read_u32(layout::AIRCRAFT_ADDRESS_BITS)?,
            },
        )),
        layout::LOCATION_CODE_SERIAL_ELT
        | layout::LOCATION_CODE_SERIAL_ELT_AOD
        | layout::LOCATION_CODE_SERIAL_EPIRB
        | layout::LOCATION_CODE_SERIAL_PLB => {
            decode_serial_location(reader, code).map(BeaconProtocol::SerialStandardLocation)
        }
        layout::LOCATION_CODE_NATIONAL_ELT => {
            decode_national_location(reader, BeaconType::Elt).map(BeaconProtocol::NationalLocation)
        }
        layout::LOCATION_CODE_NATIONAL_EPIRB => decode_national_location(reader, BeaconType::Epirb)
            .map(BeaconProtocol::NationalLocation),
        layout::LOCATION_CODE_NATIONAL_PLB => {
            decode_national_location(reader, BeaconType::Plb).map(BeaconProtocol::NationalLocation)
        }
        layout::LOCATION_CODE_SHIP_SECURITY => Ok(BeaconProtocol::ShipSecurityLocation(
            ShipSecurityLocation {
                mmsi: reader.read_mmsi(country_code)?,
            },
        )),
        layout::LOCATION_CODE_RLS => {
            decode_rls_location(reader, country_code).map(BeaconProtocol::RlsLocation)
        }
        _ => Err(BeaconError::UnhandledProtocol {
            family: ProtocolFamily::Location,
            code,
        }),
    }
}

fn decode_aviation_user(reader: &mut BeaconReader<'_>) -> Result<AviationUser, BeaconError> {
    let registration_marking =
        reader.read_trimmed_text(layout::AVIATION_REGISTRATION_CHARS, CodeWidth::Six)?;
    let specific_elt_number = reader.read_u8(layout::AVIATION_ELT_NUMBER_BITS)?;
    let auxiliary_device = reader.read_aux_device()?;
    Ok(AviationUser {
        registration_marking,
        specific_elt_number,
        auxiliary_device,
    })
}

fn decode_maritime_user(
    reader: &mut BeaconReader<'_>,
    country_code: u16,
) -> Result<MaritimeUser, BeaconError> {
    let raw = reader.read_text(layout::MARITIME_ID_CHARS, CodeWidth::Six)?;
    let identity = match raw.parse::<u32>() {
        Ok(suffix) => MaritimeIdentity::Mmsi(combine_mmsi(country_code, suffix)),
        Err(_) => MaritimeIdentity::CallSign(raw.trim().to_string()),
    };
    let specific_beacon_number = reader.read_symbol()?;
    reader.skip(layout::USER_SPARE_BITS)?;
    let auxiliary_device = reader.read_aux_device()?;
    Ok(MaritimeUser {
        identity,
        specific_beacon_number,
        auxiliary_device,
    })
}

fn decode_radio_call_sign_user(
    reader: &mut BeaconReader<'_>,
) -> Result<RadioCallSignUser, BeaconError> {
    let mut call_sign = reader.read_text(layout::RADIO_CALL_SIGN_CHARS, CodeWidth::Six)?;
    call_sign.push_str(&reader.read_bcd_digits(layout::RADIO_CALL_SIGN_DIGITS)?);
    let specific_beacon_number = reader.read_symbol()?;
    reader.skip(layout::USER_SPARE_BITS)?;
    let auxiliary_device = reader.read_aux_device()?;
    Ok(RadioCallSignUser {
        call_sign: call_sign.trim().to_string(),
        specific_beacon_number,
        auxiliary_device,
    })
}

fn decode_serial_user(reader: &mut BeaconReader<'_>) -> Result<SerialUser, BeaconError> {
    let beacon_type = reader.read_u8(layout::SERIAL_BEACON_TYPE_BITS)?;
    let has_certificate = reader.read_flag()?;
    debug!(beacon_type, has_certificate, "serial user layout");

    let identity = match beacon_type {
        layout::SERIAL_TYPE_ELT_AIRCRAFT_ADDRESS => SerialIdentity::AircraftAddress {
            aircraft_address: reader.read_u32(layout::AIRCRAFT_ADDRESS_BITS)?,
            specific_elt_number: reader.read_u8(layout::SERIAL_ELT_NUMBER_BITS)?,
        },
        layout::SERIAL_TYPE_ELT_AOD => {
            let operator_designator =
                reader.read_trimmed_text(layout::OPERATOR_DESIGNATOR_CHARS, CodeWidth::Five)?;
            let serial_number = reader.read_u16(layout::AOD_USER_SERIAL_BITS)?;
            reader.skip(layout::AOD_USER_SPARE_BITS)?;
            SerialIdentity::OperatorDesignator {
                operator_designator,
                serial_number,
            }
        }
        code => {
            let kind = SerialUserKind::from_code(code)
                .ok_or(BeaconError::UnhandledBeaconType { code })?;
            SerialIdentity::SerialNumber {
                kind,
                serial_number: reader.read_u32(layout::SERIAL_NUMBER_BITS)?,
                national_use: reader.read_u16(layout::SERIAL_NATIONAL_USE_BITS)?,
            }
        }
    };

    let tail_bits = reader.read_u16(layout::SERIAL_TAIL_BITS)?;
    let tail = if has_certificate {
        SerialTail::CertificateNumber(tail_bits)
    } else {
        SerialTail::NationalUse(tail_bits)
    };
    let auxiliary_device = reader.read_aux_device()?;
    Ok(SerialUser {
        identity,
        tail,
        auxiliary_device,
    })
}

fn decode_national_use(reader: &mut BeaconReader<'_>) -> Result<NationalUse, BeaconError> {
    Ok(NationalUse {
        national_use: reader.read_u64(layout::NATIONAL_USE_BITS)?,
    })
}

fn decode_maritime_location(
    reader: &mut BeaconReader<'_>,
    country_code: u16,
) -> Result<MaritimeLocation, BeaconError> {
    let mmsi = reader.read_mmsi(country_code)?;
    let specific_beacon_number = reader.read_u8(layout::MARITIME_BEACON_NUMBER_BITS)?;
    Ok(MaritimeLocation {
        mmsi,
        specific_beacon_number,
    })
}

fn decode_serial_location(
    reader: &mut BeaconReader<'_>,
    code: u8,
) -> Result<SerialLocation, BeaconError> {
    let identity = if code == layout::LOCATION_CODE_SERIAL_ELT_AOD {
        SerialLocationIdentity::OperatorDesignator {
            operator_designator: reader
                .read_trimmed_text(layout::OPERATOR_DESIGNATOR_CHARS, CodeWidth::Five)?,
            serial_number: reader.read_u16(layout::AOD_LOCATION_SERIAL_BITS)?,
        }
    } else {
        let beacon_type = match code {
            layout::LOCATION_CODE_SERIAL_EPIRB => BeaconType::Epirb,
            layout::LOCATION_CODE_SERIAL_PLB => BeaconType::Plb,
            _ => BeaconType::Elt,
        };
        SerialLocationIdentity::Certificate {
            beacon_type,
            certificate_number: reader.read_u16(layout::CERTIFICATE_BITS)?,
            serial_number: reader.read_u16(layout::LOCATION_SERIAL_BITS)?,
        }
    };
    Ok(SerialLocation { identity })
}

fn decode_national_location(
    reader: &mut BeaconReader<'_>,
    beacon_type: BeaconType,
) -> Result<NationalLocation, BeaconError> {
    Ok(NationalLocation {
        beacon_type,
        serial_number: reader.read_u32(layout::NATIONAL_SERIAL_BITS)?,
    })
}

fn decode_rls_location(
    reader: &mut BeaconReader<'_>,
    country_code: u16,
) -> Result<RlsLocation, BeaconError> {
    let beacon_type = RlsBeaconType::from_code(reader.read_u8(layout::RLS_BEACON_TYPE_BITS)?);
    let marker = reader.read_u8(layout::RLS_MARKER_BITS)?;
    if marker == layout::RLS_MMSI_MARKER {
        return Ok(RlsLocation {
            beacon_type,
            identity: RlsIdentity::Mmsi {
                mmsi: reader.read_mmsi(country_code)?,
            },
        });
    }

    let tail = reader.read_u16(layout::RLS_NUMBER_TAIL_BITS)?;
    let value = (u16::from(marker) << layout::RLS_NUMBER_TAIL_BITS) | tail;
    let number = beacon_type.number_base() + value;
    let serial_number = reader.read_u16(layout::RLS_SERIAL_BITS)?;
    let identity = if value < layout::RLS_TAC_LIMIT {
        RlsIdentity::TacNumber {
            tac_number: number,
            serial_number,
        }
    } else {
        RlsIdentity::NationalRlsNumber {
            national_rls_number: number,
            serial_number,
        }
    };
    Ok(RlsLocation {
        beacon_type,
        identity,
    })
}
