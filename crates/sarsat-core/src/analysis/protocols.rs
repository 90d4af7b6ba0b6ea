use std::collections::{BTreeSet, HashMap};

use crate::ProtocolSummary;
use crate::protocols::beacon::{Beacon, ProtocolFamily};

#[derive(Debug, Clone)]
pub(crate) struct ProtocolStats {
    pub family: ProtocolFamily,
    pub count: u64,
    pub countries: BTreeSet<u16>,
}

pub(crate) fn add_protocol_stats(
    stats: &mut HashMap<&'static str, ProtocolStats>,
    beacon: &Beacon,
) {
    let entry = stats
        .entry(beacon.protocol.name())
        .or_insert_with(|| ProtocolStats {
            family: beacon.protocol.family(),
            count: 0,
            countries: BTreeSet::new(),
        });
    entry.count += 1;
    entry.countries.insert(beacon.country_code);
}

pub(crate) fn build_protocol_summaries(
    stats: HashMap<&'static str, ProtocolStats>,
) -> Vec<ProtocolSummary> {
    let mut summaries: Vec<ProtocolSummary> = stats
        .into_iter()
        .map(|(name, stats)| ProtocolSummary {
            protocol: name.to_string(),
            family: stats.family,
            count: stats.count,
            countries: stats.countries.into_iter().collect(),
        })
        .collect();

    summaries.sort_by(|a, b| a.protocol.cmp(&b.protocol));
    summaries
}
