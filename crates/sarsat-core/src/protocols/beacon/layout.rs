//! Bit widths and protocol codes of the 60-bit beacon identifier.
//!
//! Widths are listed in wire order per protocol. Every decoder and encoder
//! reads its layout from here.

pub const HEX_ID_LEN: usize = 15;
pub const HEX_ID_BITS: usize = 60;
/// Nibble appended so the 15 hex digits decode to whole bytes.
pub const HEX_ID_PAD: &str = "0";

pub const PROTOCOL_FLAG_BITS: u32 = 1;
pub const COUNTRY_CODE_BITS: u32 = 10;
pub const USER_CODE_BITS: u32 = 3;
pub const LOCATION_CODE_BITS: u32 = 4;

pub const USER_CODE_ORBITOGRAPHY: u8 = 0;
pub const USER_CODE_AVIATION: u8 = 1;
pub const USER_CODE_MARITIME: u8 = 2;
pub const USER_CODE_SERIAL: u8 = 3;
pub const USER_CODE_NATIONAL: u8 = 4;
pub const USER_CODE_RADIO_CALL_SIGN: u8 = 6;
pub const USER_CODE_TEST: u8 = 7;

pub const LOCATION_CODE_MARITIME: u8 = 2;
pub const LOCATION_CODE_AVIATION: u8 = 3;
pub const LOCATION_CODE_SERIAL_ELT: u8 = 4;
pub const LOCATION_CODE_SERIAL_ELT_AOD: u8 = 5;
pub const LOCATION_CODE_SERIAL_EPIRB: u8 = 6;
pub const LOCATION_CODE_SERIAL_PLB: u8 = 7;
pub const LOCATION_CODE_NATIONAL_ELT: u8 = 8;
pub const LOCATION_CODE_NATIONAL_EPIRB: u8 = 10;
pub const LOCATION_CODE_NATIONAL_PLB: u8 = 11;
pub const LOCATION_CODE_SHIP_SECURITY: u8 = 12;
pub const LOCATION_CODE_RLS: u8 = 13;

// User protocols. The auxiliary radio-locating device is always last.
pub const AUX_DEVICE_BITS: u32 = 2;
pub const USER_SPARE_BITS: u32 = 2;

pub const AVIATION_REGISTRATION_CHARS: usize = 7;
pub const AVIATION_ELT_NUMBER_BITS: u32 = 2;

pub const MARITIME_ID_CHARS: usize = 6;
pub const MARITIME_ID_DIGITS: usize = 6;

pub const RADIO_CALL_SIGN_CHARS: usize = 4;
pub const RADIO_CALL_SIGN_DIGITS: usize = 3;
pub const BCD_DIGIT_BITS: u32 = 4;
pub const BCD_SPACE: u8 = 0xA;

pub const NATIONAL_USE_BITS: u32 = 45;
pub const ORBITOGRAPHY_BITS: u32 = 45;

pub const SERIAL_BEACON_TYPE_BITS: u32 = 3;
pub const SERIAL_CERTIFICATE_FLAG_BITS: u32 = 1;
pub const SERIAL_TYPE_ELT: u8 = 0b000;
pub const SERIAL_TYPE_ELT_AOD: u8 = 0b001;
pub const SERIAL_TYPE_EPIRB_FLOAT_FREE: u8 = 0b010;
pub const SERIAL_TYPE_ELT_AIRCRAFT_ADDRESS: u8 = 0b011;
pub const SERIAL_TYPE_EPIRB_NON_FLOAT_FREE: u8 = 0b100;
pub const SERIAL_TYPE_PLB: u8 = 0b110;
pub const SERIAL_NUMBER_BITS: u32 = 20;
pub const SERIAL_NATIONAL_USE_BITS: u32 = 10;
pub const AIRCRAFT_ADDRESS_BITS: u32 = 24;
pub const SERIAL_ELT_NUMBER_BITS: u32 = 6;
pub const OPERATOR_DESIGNATOR_CHARS: usize = 3;
pub const AOD_USER_SERIAL_BITS: u32 = 12;
pub const AOD_USER_SPARE_BITS: u32 = 3;
/// Certificate number when the certificate flag is set, national use otherwise.
pub const SERIAL_TAIL_BITS: u32 = 10;

// Location protocols.
pub const MMSI_SUFFIX_BITS: u32 = 20;
pub const MARITIME_BEACON_NUMBER_BITS: u32 = 4;
pub const SHIP_SECURITY_SPARE_BITS: u32 = 4;
pub const CERTIFICATE_BITS: u32 = 10;
pub const LOCATION_SERIAL_BITS: u32 = 14;
pub const AOD_LOCATION_SERIAL_BITS: u32 = 9;
pub const NATIONAL_SERIAL_BITS: u32 = 18;

pub const RLS_BEACON_TYPE_BITS: u32 = 2;
pub const RLS_MARKER_BITS: u32 = 4;
pub const RLS_MMSI_MARKER: u8 = 0b1111;
pub const RLS_NUMBER_TAIL_BITS: u32 = 6;
pub const RLS_SERIAL_BITS: u32 = 14;
/// Values below this limit are TAC numbers; the rest are national RLS numbers.
pub const RLS_TAC_LIMIT: u16 = 920;
pub const RLS_BASE_ELT: u16 = 1000;
pub const RLS_BASE_EPIRB: u16 = 2000;
pub const RLS_BASE_PLB: u16 = 3000;
pub const RLS_BASE_TEST: u16 = 0;

pub const MMSI_COUNTRY_FACTOR: u32 = 1_000_000;
