//! Streamer acquisition geometry classification.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Shot geometry template types for streamer acquisition.
///
/// - `A`: channel numbering restarts on every cable, so channel ranges
///   overlap across cables (cable-relative addressing).
/// - `B`: channel numbering runs continuously across cables, so each
///   cable covers a disjoint channel interval (absolute addressing).
/// - `C`: a physical layout that cannot be told apart from header ranges
///   alone. The analyzer never emits it; it takes external knowledge of
///   the acquisition to assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamerShotGeometry {
    A,
    B,
    C,
}

/// Channel range observed for one cable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CableStats {
    pub cable: i64,
    pub chan_min: i64,
    pub chan_max: i64,
}

/// Classification plus the per-cable ranges it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamerGeometry {
    pub geometry: StreamerShotGeometry,
    pub cables: Vec<CableStats>,
}

/// Classify streamer geometry from `cable` and `channel` headers.
///
/// Computes the channel min/max per distinct cable id, then checks every
/// cable pair for overlapping channel intervals. Any overlap means the
/// channel numbering restarts per cable (type A); otherwise the ranges
/// are disjoint and the numbering is absolute (type B). The pairwise scan
/// is quadratic in the cable count, which stays in the tens.
pub fn analyze_streamer_headers(cable: &[i64], channel: &[i64]) -> StreamerGeometry {
    let mut ranges: BTreeMap<i64, (i64, i64)> = BTreeMap::new();
    for (&cable_id, &chan) in cable.iter().zip(channel) {
        let entry = ranges.entry(cable_id).or_insert((chan, chan));
        entry.0 = entry.0.min(chan);
        entry.1 = entry.1.max(chan);
    }

    let cables: Vec<CableStats> = ranges
        .into_iter()
        .map(|(cable, (chan_min, chan_max))| CableStats {
            cable,
            chan_min,
            chan_max,
        })
        .collect();

    let mut geometry = StreamerShotGeometry::B;
    for a in &cables {
        for b in &cables {
            if a.cable == b.cable {
                continue;
            }
            if b.chan_min < a.chan_max && b.chan_max > a.chan_min {
                geometry = StreamerShotGeometry::A;
            }
        }
    }

    StreamerGeometry { geometry, cables }
}
