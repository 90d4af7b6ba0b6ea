//! COSPAS-SARSAT 15-hex beacon identifier.
//!
//! The identifier is a 60-bit frame: a protocol flag, a 10-bit country code,
//! then a 3-bit user or 4-bit location protocol code that selects one of the
//! fixed field layouts. Decoding walks the layout once, front to back, and
//! either yields a complete `Beacon` or fails; there is no partial result.
//!
//! Layering follows the other protocol modules:
//! - `layout`: bit widths and protocol codes (source of truth)
//! - `reader` / `writer`: field conventions (Baudot text, BCD, MMSI)
//! - `parser`: protocol dispatch and per-protocol decoders
//! - `model`: the decoded value, one enum variant per protocol
//! - `error`: explicit, terminal errors

pub mod error;
pub mod layout;
pub mod model;
pub mod parser;
pub mod reader;
pub mod writer;

pub use error::BeaconError;
pub use model::*;
pub use parser::decode_beacon_id;
pub use writer::encode_beacon;
