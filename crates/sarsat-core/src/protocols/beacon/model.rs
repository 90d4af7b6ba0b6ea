use std::fmt;

use serde::{Deserialize, Serialize};

use super::layout;

/// Decoded 15-hex beacon identifier.
///
/// # Examples
/// ```
/// use sarsat_core::{AviationLocation, Beacon, BeaconProtocol};
///
/// let beacon = Beacon {
///     hex_id: "202600157800000".to_string(),
///     country_code: 257,
///     protocol: BeaconProtocol::AviationStandardLocation(AviationLocation {
///         aircraft_address: 0xABC,
///     }),
/// };
/// assert_eq!(beacon.protocol.name(), "aviation_standard_location");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beacon {
    /// Source identifier, case as supplied. Ignored when encoding.
    #[serde(default)]
    pub hex_id: String,
    /// 10-bit maritime identification digits / country code.
    pub country_code: u16,
    /// Protocol-specific payload.
    pub protocol: BeaconProtocol,
}

/// Exactly one protocol payload per beacon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BeaconProtocol {
    Orbitography(Orbitography),
    AviationUser(AviationUser),
    MaritimeUser(MaritimeUser),
    SerialUser(SerialUser),
    NationalUser(NationalUse),
    RadioCallSignUser(RadioCallSignUser),
    TestUser(NationalUse),
    MaritimeStandardLocation(MaritimeLocation),
    AviationStandardLocation(AviationLocation),
    SerialStandardLocation(SerialLocation),
    NationalLocation(NationalLocation),
    ShipSecurityLocation(ShipSecurityLocation),
    RlsLocation(RlsLocation),
}

impl BeaconProtocol {
    /// Stable snake_case name, identical to the serialized `kind` tag.
    pub fn name(&self) -> &'static str {
        match self {
            BeaconProtocol::Orbitography(_) => "orbitography",
            BeaconProtocol::AviationUser(_) => "aviation_user",
            BeaconProtocol::MaritimeUser(_) => "maritime_user",
            BeaconProtocol::SerialUser(_) => "serial_user",
            BeaconProtocol::NationalUser(_) => "national_user",
            BeaconProtocol::RadioCallSignUser(_) => "radio_call_sign_user",
            BeaconProtocol::TestUser(_) => "test_user",
            BeaconProtocol::MaritimeStandardLocation(_) => "maritime_standard_location",
            BeaconProtocol::AviationStandardLocation(_) => "aviation_standard_location",
            BeaconProtocol::SerialStandardLocation(_) => "serial_standard_location",
            BeaconProtocol::NationalLocation(_) => "national_location",
            BeaconProtocol::ShipSecurityLocation(_) => "ship_security_location",
            BeaconProtocol::RlsLocation(_) => "rls_location",
        }
    }

    pub fn family(&self) -> ProtocolFamily {
        match self {
            BeaconProtocol::Orbitography(_)
            | BeaconProtocol::AviationUser(_)
            | BeaconProtocol::MaritimeUser(_)
            | BeaconProtocol::SerialUser(_)
            | BeaconProtocol::NationalUser(_)
            | BeaconProtocol::RadioCallSignUser(_)
            | BeaconProtocol::TestUser(_) => ProtocolFamily::User,
            _ => ProtocolFamily::Location,
        }
    }
}

/// Protocol family selected by the leading flag bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolFamily {
    User,
    Location,
}

impl fmt::Display for ProtocolFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolFamily::User => f.write_str("user"),
            ProtocolFamily::Location => f.write_str("location"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Orbitography {
    pub data: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationalUse {
    pub national_use: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AviationUser {
    pub registration_marking: String,
    pub specific_elt_number: u8,
    pub auxiliary_device: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaritimeUser {
    pub identity: MaritimeIdentity,
    pub specific_beacon_number: char,
    pub auxiliary_device: u8,
}

/// Six-character maritime identity: digits resolve to an MMSI, anything else
/// is kept as a radio call sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritimeIdentity {
    Mmsi(u32),
    CallSign(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioCallSignUser {
    pub call_sign: String,
    pub specific_beacon_number: char,
    pub auxiliary_device: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialUser {
    pub identity: SerialIdentity,
    pub tail: SerialTail,
    pub auxiliary_device: u8,
}

impl SerialUser {
    /// 3-bit beacon type implied by the identity layout.
    pub fn beacon_type(&self) -> u8 {
        match &self.identity {
            SerialIdentity::SerialNumber { kind, .. } => kind.code(),
            SerialIdentity::AircraftAddress { .. } => layout::SERIAL_TYPE_ELT_AIRCRAFT_ADDRESS,
            SerialIdentity::OperatorDesignator { .. } => layout::SERIAL_TYPE_ELT_AOD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SerialIdentity {
    SerialNumber {
        kind: SerialUserKind,
        serial_number: u32,
        national_use: u16,
    },
    AircraftAddress {
        aircraft_address: u32,
        specific_elt_number: u8,
    },
    OperatorDesignator {
        operator_designator: String,
        serial_number: u16,
    },
}

/// Beacon types that use the plain serial-number layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SerialUserKind {
    Elt,
    FloatFreeEpirb,
    NonFloatFreeEpirb,
    Plb,
}

impl SerialUserKind {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            layout::SERIAL_TYPE_ELT => Some(SerialUserKind::Elt),
            layout::SERIAL_TYPE_EPIRB_FLOAT_FREE => Some(SerialUserKind::FloatFreeEpirb),
            layout::SERIAL_TYPE_EPIRB_NON_FLOAT_FREE => Some(SerialUserKind::NonFloatFreeEpirb),
            layout::SERIAL_TYPE_PLB => Some(SerialUserKind::Plb),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            SerialUserKind::Elt => layout::SERIAL_TYPE_ELT,
            SerialUserKind::FloatFreeEpirb => layout::SERIAL_TYPE_EPIRB_FLOAT_FREE,
            SerialUserKind::NonFloatFreeEpirb => layout::SERIAL_TYPE_EPIRB_NON_FLOAT_FREE,
            SerialUserKind::Plb => layout::SERIAL_TYPE_PLB,
        }
    }
}

/// Last 10 identity bits of a serial user beacon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SerialTail {
    CertificateNumber(u16),
    NationalUse(u16),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaritimeLocation {
    pub mmsi: u32,
    pub specific_beacon_number: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AviationLocation {
    pub aircraft_address: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialLocation {
    pub identity: SerialLocationIdentity,
}

impl SerialLocation {
    /// 4-bit location protocol code implied by the identity.
    pub fn protocol_code(&self) -> u8 {
        match &self.identity {
            SerialLocationIdentity::Certificate { beacon_type, .. } => match beacon_type {
                BeaconType::Elt => layout::LOCATION_CODE_SERIAL_ELT,
                BeaconType::Epirb => layout::LOCATION_CODE_SERIAL_EPIRB,
                BeaconType::Plb => layout::LOCATION_CODE_SERIAL_PLB,
            },
            SerialLocationIdentity::OperatorDesignator { .. } => {
                layout::LOCATION_CODE_SERIAL_ELT_AOD
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SerialLocationIdentity {
    Certificate {
        beacon_type: BeaconType,
        certificate_number: u16,
        serial_number: u16,
    },
    OperatorDesignator {
        operator_designator: String,
        serial_number: u16,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeaconType {
    Elt,
    Epirb,
    Plb,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationalLocation {
    pub beacon_type: BeaconType,
    pub serial_number: u32,
}

impl NationalLocation {
    pub fn protocol_code(&self) -> u8 {
        match self.beacon_type {
            BeaconType::Elt => layout::LOCATION_CODE_NATIONAL_ELT,
            BeaconType::Epirb => layout::LOCATION_CODE_NATIONAL_EPIRB,
            BeaconType::Plb => layout::LOCATION_CODE_NATIONAL_PLB,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipSecurityLocation {
    pub mmsi: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RlsLocation {
    pub beacon_type: RlsBeaconType,
    pub identity: RlsIdentity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RlsBeaconType {
    Elt,
    Epirb,
    Plb,
    Test,
}

impl RlsBeaconType {
    pub fn from_code(code: u8) -> Self {
        match code & 0b11 {
            0b00 => RlsBeaconType::Elt,
            0b01 => RlsBeaconType::Epirb,
            0b10 => RlsBeaconType::Plb,
            _ => RlsBeaconType::Test,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            RlsBeaconType::Elt => 0b00,
            RlsBeaconType::Epirb => 0b01,
            RlsBeaconType::Plb => 0b10,
            RlsBeaconType::Test => 0b11,
        }
    }

    /// Numbering-plan base added to the 10-bit TAC / national RLS value.
    pub fn number_base(self) -> u16 {
        match self {
            RlsBeaconType::Elt => layout::RLS_BASE_ELT,
            RlsBeaconType::Epirb => layout::RLS_BASE_EPIRB,
            RlsBeaconType::Plb => layout::RLS_BASE_PLB,
            RlsBeaconType::Test => layout::RLS_BASE_TEST,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RlsIdentity {
    Mmsi {
        mmsi: u32,
    },
    TacNumber {
        tac_number: u16,
        serial_number: u16,
    },
    NationalRlsNumber {
        national_rls_number: u16,
        serial_number: u16,
    },
}

/// Rebuild a 9-digit MMSI from the country code and the embedded suffix.
///
/// # Examples
/// ```
/// use sarsat_core::combine_mmsi;
///
/// assert_eq!(combine_mmsi(257, 743_921), 257_743_921);
/// ```
pub fn combine_mmsi(country_code: u16, suffix: u32) -> u32 {
    u32::from(country_code) * layout::MMSI_COUNTRY_FACTOR + suffix
}

/// Split an MMSI into its country prefix and six-digit suffix.
pub fn split_mmsi(mmsi: u32) -> (u16, u32) {
    (
        (mmsi / layout::MMSI_COUNTRY_FACTOR) as u16,
        mmsi % layout::MMSI_COUNTRY_FACTOR,
    )
}
