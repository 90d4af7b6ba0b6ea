use thiserror::Error;

use super::model::ProtocolFamily;
use crate::protocols::baudot::BaudotError;
use crate::protocols::bits::BitError;

/// Errors returned by beacon identifier decoding and encoding.
///
/// A decode error is terminal: no partially populated `Beacon` is returned.
///
/// # Examples
/// ```
/// use sarsat_core::BeaconError;
///
/// let err = BeaconError::InvalidLength { length: 14 };
/// assert!(err.to_string().contains("expected 15 hex characters"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BeaconError {
    #[error("invalid beacon id length: expected 15 hex characters, got {length}")]
    InvalidLength { length: usize },
    #[error("invalid hex in beacon id: {0}")]
    InvalidHex(String),
    #[error("unhandled {family} protocol code: {code}")]
    UnhandledProtocol { family: ProtocolFamily, code: u8 },
    #[error("unhandled serial beacon type: {code:#05b}")]
    UnhandledBeaconType { code: u8 },
    #[error("invalid BCD digit: {nibble:#x}")]
    InvalidBcdDigit { nibble: u8 },
    #[error("character {character:?} has no BCD code")]
    UnsupportedBcdCharacter { character: char },
    #[error("{field} value {value} does not fit in {bits} bits")]
    FieldOverflow {
        field: &'static str,
        value: u64,
        bits: u32,
    },
    #[error("{field} value {value} is outside {min}..={max}")]
    FieldOutOfRange {
        field: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
    #[error("call sign {call_sign:?} would decode as an MMSI")]
    AmbiguousCallSign { call_sign: String },
    #[error("MMSI {mmsi} does not belong to country code {country_code}")]
    MmsiCountryMismatch { mmsi: u32, country_code: u16 },
    #[error(transparent)]
    Baudot(#[from] BaudotError),
    #[error(transparent)]
    Bits(#[from] BitError),
}
