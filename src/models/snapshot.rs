// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Immutable zone snapshots and their version tokens.

use crate::models::zone::{ZoneId, ZoneRecord};
use sha2::{Digest, Sha256};
use std::fmt;

/// Identity of a snapshot's geometry.
///
/// Derived from the sorted `(id, boundary)` pairs only, so changing a price or
/// flag on a zone does not invalidate parsed polygons.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SnapshotVersion(String);

impl SnapshotVersion {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SnapshotVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form is enough to tell versions apart in logs.
        f.write_str(&self.0[..12.min(self.0.len())])
    }
}

/// A zone collection frozen at one point in time, sorted by ascending id.
///
/// Ids are unique: when the store returns several records with the same id,
/// the first one in store order is kept.
#[derive(Debug, Clone)]
pub struct ZoneSnapshot {
    zones: Vec<ZoneRecord>,
    version: SnapshotVersion,
}

impl ZoneSnapshot {
    pub fn new(mut zones: Vec<ZoneRecord>) -> Self {
        zones.sort_by_key(|zone| zone.id);
        let before = zones.len();
        zones.dedup_by_key(|zone| zone.id);
        if zones.len() < before {
            tracing::warn!(
                dropped = before - zones.len(),
                "Duplicate zone ids, keeping the first record of each"
            );
        }
        let version = version_of(&zones);
        Self { zones, version }
    }

    pub fn zones(&self) -> &[ZoneRecord] {
        &self.zones
    }

    pub fn version(&self) -> &SnapshotVersion {
        &self.version
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Look up a zone by id.
    pub fn get(&self, id: ZoneId) -> Option<&ZoneRecord> {
        self.zones
            .binary_search_by_key(&id, |zone| zone.id)
            .ok()
            .map(|index| &self.zones[index])
    }
}

fn version_of(zones: &[ZoneRecord]) -> SnapshotVersion {
    let mut hasher = Sha256::new();
    for zone in zones {
        hasher.update(zone.id.to_le_bytes());
        // Length prefix keeps ("ab","c") and ("a","bc") distinct.
        hasher.update((zone.boundary.len() as u64).to_le_bytes());
        hasher.update(zone.boundary.as_bytes());
    }
    SnapshotVersion(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: &str = "[0,0],[0,1],[1,1],[1,0]";
    const B: &str = "[2,2],[2,3],[3,3],[3,2]";

    #[test]
    fn version_ignores_input_order() {
        let forward = ZoneSnapshot::new(vec![ZoneRecord::new(1, A), ZoneRecord::new(2, B)]);
        let reversed = ZoneSnapshot::new(vec![ZoneRecord::new(2, B), ZoneRecord::new(1, A)]);
        assert_eq!(forward.version(), reversed.version());
        assert_eq!(reversed.zones()[0].id, 1);
    }

    #[test]
    fn version_tracks_geometry_only() {
        let base = ZoneSnapshot::new(vec![ZoneRecord::new(1, A)]);
        let repriced = ZoneSnapshot::new(vec![ZoneRecord::new(1, A).with_prices(900, 100)]);
        let moved = ZoneSnapshot::new(vec![ZoneRecord::new(1, B)]);

        assert_eq!(base.version(), repriced.version());
        assert_ne!(base.version(), moved.version());
    }

    #[test]
    fn duplicate_ids_keep_first_record() {
        let snapshot = ZoneSnapshot::new(vec![
            ZoneRecord::new(1, A).with_prices(100, 10),
            ZoneRecord::new(2, B),
            ZoneRecord::new(1, B).with_prices(200, 20),
            ZoneRecord::new(1, A).with_prices(300, 30),
        ]);

        assert_eq!(snapshot.len(), 2);
        let first = snapshot.get(1).unwrap();
        assert_eq!(first.boundary, A);
        assert_eq!(first.order_price, 100);
        assert_eq!(
            snapshot.version(),
            ZoneSnapshot::new(vec![ZoneRecord::new(1, A), ZoneRecord::new(2, B)]).version()
        );
    }

    #[test]
    fn get_finds_zone_by_id() {
        let snapshot = ZoneSnapshot::new(vec![ZoneRecord::new(5, A), ZoneRecord::new(2, B)]);
        assert_eq!(snapshot.get(5).map(|z| z.boundary.as_str()), Some(A));
        assert!(snapshot.get(3).is_none());
    }
}
