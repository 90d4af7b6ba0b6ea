use std::collections::{HashMap, HashSet};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::protocols::beacon::decode_beacon_id;
use crate::source::{HexIdEvent, HexIdSource, LineFileSource, SourceError};
use crate::{BeaconRecord, DecodeFailure, DecodeSummary, Report, make_stub_report};

mod protocols;

use protocols::{ProtocolStats, add_protocol_stats, build_protocol_summaries};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Decode every beacon id in a text file, one id per line.
pub fn analyze_hex_file(path: &Path) -> Result<Report, AnalysisError> {
    let source = LineFileSource::open(path)?;
    analyze_source(path, source)
}

/// Decode every id yielded by `source` into a report.
///
/// Decode failures are recorded in the report; only source errors abort.
pub fn analyze_source<S: HexIdSource>(
    path: &Path,
    mut source: S,
) -> Result<Report, AnalysisError> {
    let mut summary = DecodeSummary::default();
    let mut seen: HashSet<String> = HashSet::new();
    let mut protocol_stats: HashMap<&'static str, ProtocolStats> = HashMap::new();
    let mut beacons = Vec::new();
    let mut failures = Vec::new();

    while let Some(HexIdEvent { line, hex_id }) = source.next_hex_id()? {
        summary.ids_total += 1;
        if !seen.insert(hex_id.to_ascii_uppercase()) {
            summary.duplicates += 1;
        }
        trace!(line, hex_id = %hex_id, "decoding beacon id");
        match decode_beacon_id(&hex_id) {
            Ok(beacon) => {
                summary.decoded += 1;
                add_protocol_stats(&mut protocol_stats, &beacon);
                beacons.push(BeaconRecord { line, beacon });
            }
            Err(err) => {
                summary.failed += 1;
                warn!(line, hex_id = %hex_id, error = %err, "beacon id rejected");
                failures.push(DecodeFailure {
                    line,
                    hex_id,
                    message: err.to_string(),
                });
            }
        }
    }

    debug!(
        ids_total = summary.ids_total,
        decoded = summary.decoded,
        failed = summary.failed,
        "analysis complete"
    );

    let mut report = make_stub_report(&path.display().to_string(), path.metadata()?.len());
    report.summary = summary;
    report.protocols = build_protocol_summaries(protocol_stats);
    report.beacons = beacons;
    report.failures = failures;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{analyze_hex_file, analyze_source};
    use crate::source::{HexIdEvent, HexIdSource, SourceError};

    struct VecSource(std::vec::IntoIter<HexIdEvent>);

    impl HexIdSource for VecSource {
        fn next_hex_id(&mut self) -> Result<Option<HexIdEvent>, SourceError> {
            Ok(self.0.next())
        }
    }

    struct FailingSource;

    impl HexIdSource for FailingSource {
        fn next_hex_id(&mut self) -> Result<Option<HexIdEvent>, SourceError> {
            Err(SourceError::Input("broken".to_string()))
        }
    }

    fn event(line: u64, hex_id: &str) -> HexIdEvent {
        HexIdEvent {
            line,
            hex_id: hex_id.to_string(),
        }
    }

    fn input_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "# test input").expect("write");
        file
    }

    #[test]
    fn failures_are_recorded_not_fatal() {
        let file = input_file();
        let source = VecSource(
            vec![
                event(1, "A029C2900D97591"),
                event(2, "XYZ"),
                event(3, "2024F72524FFBFF"),
            ]
            .into_iter(),
        );
        let report = analyze_source(file.path(), source).expect("report");

        assert_eq!(report.summary.ids_total, 3);
        assert_eq!(report.summary.decoded, 2);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.beacons[0].line, 1);
        assert_eq!(report.beacons[1].line, 3);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].line, 2);
        assert_eq!(report.failures[0].hex_id, "XYZ");
        assert!(report.failures[0].message.contains("length"));
    }

    #[test]
    fn duplicates_ignore_case() {
        let file = input_file();
        let source = VecSource(
            vec![event(1, "a029c2900d97591"), event(2, "A029C2900D97591")].into_iter(),
        );
        let report = analyze_source(file.path(), source).expect("report");
        assert_eq!(report.summary.duplicates, 1);
        assert_eq!(report.summary.decoded, 2);
    }

    #[test]
    fn source_errors_abort() {
        let file = input_file();
        assert!(analyze_source(file.path(), FailingSource).is_err());
    }

    #[test]
    fn reads_hex_file_with_comments() {
        let mut file = input_file();
        writeln!(file, "A029C2900D97591  # vessel").expect("write");
        writeln!(file).expect("write");
        writeln!(file, "20383C480000000").expect("write");
        file.flush().expect("flush");

        let report = analyze_hex_file(file.path()).expect("report");
        assert_eq!(report.summary.ids_total, 2);
        assert_eq!(report.beacons[0].line, 2);
        assert_eq!(report.beacons[1].line, 4);
        assert!(report.input.bytes > 0);
        let names: Vec<_> = report.protocols.iter().map(|p| p.protocol.as_str()).collect();
        assert_eq!(names, vec!["maritime_user", "ship_security_location"]);
    }
}
