//! Core library for COSPAS-SARSAT 15-hex beacon identifiers.
//!
//! The codec turns a 15-character hex identifier into a typed `Beacon`
//! (and back). Decoding is bit-oriented and side-effect free: the `bits`
//! cursor walks the 60 information bits, `baudot` handles text fields and the
//! `beacon` module dispatches on protocol codes (layout/reader/parser). Batch
//! decoding of hex-id files lives in `analysis`, fed by `source`, and yields a
//! deterministic report.
//!
//! Invariants:
//! - A decode either returns a complete beacon or a single error.
//! - Report ordering is stable across runs (input order, sorted summaries).
//!
//! # Examples
//! ```
//! use sarsat_core::{BeaconProtocol, decode_beacon_id, encode_beacon};
//!
//! let beacon = decode_beacon_id("2024F72524FFBFF")?;
//! assert!(matches!(
//!     beacon.protocol,
//!     BeaconProtocol::MaritimeStandardLocation(_)
//! ));
//! // Trailing location bits are not part of the identity.
//! assert_eq!(encode_beacon(&beacon)?, "2024F7252400000");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod analysis;
pub mod protocols;
mod source;

pub use analysis::{AnalysisError, analyze_hex_file, analyze_source};
pub use protocols::beacon::{
    AviationLocation, AviationUser, Beacon, BeaconError, BeaconProtocol, BeaconType,
    MaritimeIdentity, MaritimeLocation, MaritimeUser, NationalLocation, NationalUse,
    Orbitography, ProtocolFamily, RadioCallSignUser, RlsBeaconType, RlsIdentity, RlsLocation,
    SerialIdentity, SerialLocation, SerialLocationIdentity, SerialTail, SerialUser,
    SerialUserKind, ShipSecurityLocation, combine_mmsi, decode_beacon_id, encode_beacon,
    split_mmsi,
};
pub use source::{HexIdEvent, HexIdSource, LineFileSource, LineSource, SourceError};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used until the caller stamps the report.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Batch decode report with deterministic ordering.
///
/// # Examples
/// ```
/// use sarsat_core::make_stub_report;
///
/// let report = make_stub_report("beacons.txt", 123);
/// assert_eq!(report.report_version, sarsat_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    pub tool: ToolInfo,
    /// RFC3339 timestamp representing the report generation time.
    pub generated_at: String,
    pub input: InputInfo,
    pub summary: DecodeSummary,
    /// Per-protocol counts sorted by protocol name.
    pub protocols: Vec<ProtocolSummary>,
    /// Decoded beacons in input order.
    pub beacons: Vec<BeaconRecord>,
    /// Rejected identifiers in input order.
    pub failures: Vec<DecodeFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Input file metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the analyzer.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Identifier counts for one input.
///
/// `duplicates` counts ids already seen earlier in the input, ignoring case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeSummary {
    pub ids_total: u64,
    pub decoded: u64,
    pub failed: u64,
    pub duplicates: u64,
}

/// Decoded beacons grouped by protocol.
///
/// # Examples
/// ```
/// use sarsat_core::{ProtocolFamily, ProtocolSummary};
///
/// let summary = ProtocolSummary {
///     protocol: "maritime_user".to_string(),
///     family: ProtocolFamily::User,
///     count: 2,
///     countries: vec![257, 366],
/// };
/// assert_eq!(summary.count, 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolSummary {
    /// Protocol name as returned by `BeaconProtocol::name`.
    pub protocol: String,
    pub family: ProtocolFamily,
    pub count: u64,
    /// Distinct country codes, ascending.
    pub countries: Vec<u16>,
}

/// A decoded beacon and the input line it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeaconRecord {
    pub line: u64,
    #[serde(flatten)]
    pub beacon: Beacon,
}

/// An identifier that failed to decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeFailure {
    pub line: u64,
    pub hex_id: String,
    /// Rendered `BeaconError`.
    pub message: String,
}

/// Build a stub report with base fields filled and empty aggregates.
///
/// # Examples
/// ```
/// use sarsat_core::make_stub_report;
///
/// let report = make_stub_report("beacons.txt", 123);
/// assert_eq!(report.summary.ids_total, 0);
/// assert!(report.beacons.is_empty());
/// ```
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "sarsat".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        summary: DecodeSummary::default(),
        protocols: vec![],
        beacons: vec![],
        failures: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beacon_records_flatten_into_one_object() {
        let mut report = make_stub_report("beacons.txt", 16);
        report.beacons.push(BeaconRecord {
            line: 3,
            beacon: decode_beacon_id("20383C480000000").expect("decode"),
        });

        let value = serde_json::to_value(&report).expect("report json");
        let record = &value["beacons"][0];
        assert_eq!(record["line"], 3);
        assert_eq!(record["hex_id"], "20383C480000000");
        assert_eq!(record["country_code"], 257);
        assert_eq!(record["protocol"]["kind"], "ship_security_location");
    }

    #[test]
    fn report_round_trips_through_json() {
        let mut report = make_stub_report("beacons.txt", 16);
        report.beacons.push(BeaconRecord {
            line: 1,
            beacon: decode_beacon_id("A029C2900D97591").expect("decode"),
        });
        report.failures.push(DecodeFailure {
            line: 2,
            hex_id: "ZZ".to_string(),
            message: "invalid length".to_string(),
        });

        let json = serde_json::to_string(&report).expect("serialize");
        let parsed: Report = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.beacons[0].beacon, report.beacons[0].beacon);
        assert_eq!(parsed.failures[0].line, 2);
        assert_eq!(parsed.tool.name, "sarsat");
    }
}
