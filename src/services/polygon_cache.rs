// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Parsed polygon sets, memoized per zone snapshot version.

use crate::error::ZoneError;
use crate::models::{GeoPoint, ParsedPolygon, Resolution, SnapshotVersion, ZoneId, ZoneSnapshot};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default lifetime of a parsed polygon set (3 hours).
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3 * 60 * 60);

/// One zone's parsed boundary.
#[derive(Debug, Clone)]
pub struct ZonePolygon {
    pub zone_id: ZoneId,
    pub polygon: ParsedPolygon,
}

/// Parsed polygons of a snapshot, in ascending zone id order.
#[derive(Debug, Default)]
pub struct PolygonSet {
    polygons: Vec<ZonePolygon>,
    rejected: Vec<ZoneError>,
}

impl PolygonSet {
    /// Parse every zone of a snapshot.
    ///
    /// Zones that fail to parse are logged and left out; they never prevent the
    /// remaining zones from being used.
    pub fn build(snapshot: &ZoneSnapshot) -> Self {
        let mut polygons: Vec<ZonePolygon> = Vec::with_capacity(snapshot.len());
        let mut rejected = Vec::new();

        for zone in snapshot.zones() {
            if zone.id == Resolution::NO_ZONE_ID {
                let err = ZoneError::ReservedZoneId;
                tracing::warn!(error = %err, "Skipping zone");
                rejected.push(err);
                continue;
            }

            match ParsedPolygon::parse(&zone.boundary) {
                Ok(polygon) => polygons.push(ZonePolygon {
                    zone_id: zone.id,
                    polygon,
                }),
                Err(reason) => {
                    let err = ZoneError::MalformedZoneBoundary {
                        zone_id: zone.id,
                        reason,
                    };
                    tracing::warn!(zone_id = zone.id, error = %err, "Skipping zone with malformed boundary");
                    rejected.push(err);
                }
            }
        }

        Self { polygons, rejected }
    }

    /// First zone (lowest id) whose polygon contains the point.
    pub fn resolve(&self, point: &GeoPoint) -> Resolution {
        self.polygons
            .iter()
            .find(|zone| zone.polygon.contains(point))
            .map_or(Resolution::NoZone, |zone| Resolution::Zone(zone.zone_id))
    }

    /// Every zone containing the point, ascending. Useful to spot overlaps.
    pub fn matching_zones(&self, point: &GeoPoint) -> Vec<ZoneId> {
        self.polygons
            .iter()
            .filter(|zone| zone.polygon.contains(point))
            .map(|zone| zone.zone_id)
            .collect()
    }

    pub fn polygons(&self) -> &[ZonePolygon] {
        &self.polygons
    }

    pub fn get(&self, zone_id: ZoneId) -> Option<&ParsedPolygon> {
        self.polygons
            .binary_search_by_key(&zone_id, |zone| zone.zone_id)
            .ok()
            .map(|index| &self.polygons[index].polygon)
    }

    /// Per-zone errors collected while building the set.
    pub fn rejected(&self) -> &[ZoneError] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

struct CachedPolygons {
    polygons: Arc<PolygonSet>,
    expires_at: Instant,
}

/// Memo table of parsed polygon sets keyed by snapshot version.
///
/// Concurrent misses on the same version may both parse; the last insert
/// wins and both results are identical. No lock is held while parsing.
pub struct PolygonCache {
    entries: DashMap<SnapshotVersion, CachedPolygons>,
    ttl: Duration,
    parse_count: AtomicU64,
}

impl Default for PolygonCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

impl PolygonCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            parse_count: AtomicU64::new(0),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Parsed polygons for a snapshot, parsing on a miss or after expiry.
    pub fn get_or_parse(&self, snapshot: &ZoneSnapshot) -> Arc<PolygonSet> {
        let version = snapshot.version();

        if let Some(polygons) = self.lookup(version) {
            tracing::trace!(version = %version, "Polygon cache hit");
            return polygons;
        }

        let polygons = Arc::new(PolygonSet::build(snapshot));
        self.parse_count.fetch_add(1, Ordering::Relaxed);

        let now = Instant::now();
        self.entries.retain(|_, entry| entry.expires_at > now);
        self.entries.insert(
            version.clone(),
            CachedPolygons {
                polygons: Arc::clone(&polygons),
                expires_at: now + self.ttl,
            },
        );

        tracing::debug!(
            version = %version,
            zones = polygons.len(),
            rejected = polygons.rejected().len(),
            "Parsed zone polygons"
        );
        polygons
    }

    fn lookup(&self, version: &SnapshotVersion) -> Option<Arc<PolygonSet>> {
        let entry = self.entries.get(version)?;
        (entry.expires_at > Instant::now()).then(|| Arc::clone(&entry.polygons))
    }

    /// Number of times a polygon set has been built.
    pub fn parse_count(&self) -> u64 {
        self.parse_count.load(Ordering::Relaxed)
    }

    /// Number of cached snapshot versions, expired ones included until purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached polygon set.
    pub fn invalidate(&self) {
        self.entries.clear();
        tracing::debug!("Polygon cache invalidated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoundaryError;
    use crate::models::ZoneRecord;

    const ZONE_1: &str = "[37.0,55.0],[37.0,55.1],[37.1,55.1],[37.1,55.0]";
    const ZONE_2: &str = "[37.05,55.05],[37.05,55.15],[37.15,55.15],[37.15,55.05]";

    fn point(raw: &str) -> GeoPoint {
        raw.parse().unwrap()
    }

    #[test]
    fn lowest_id_wins_regardless_of_input_order() {
        let forward = ZoneSnapshot::new(vec![ZoneRecord::new(1, ZONE_1), ZoneRecord::new(2, ZONE_2)]);
        let reversed =
            ZoneSnapshot::new(vec![ZoneRecord::new(2, ZONE_2), ZoneRecord::new(1, ZONE_1)]);

        for snapshot in [forward, reversed] {
            let set = PolygonSet::build(&snapshot);
            assert_eq!(set.resolve(&point("37.08,55.08")), Resolution::Zone(1));
            assert_eq!(set.matching_zones(&point("37.08,55.08")), vec![1, 2]);
            assert_eq!(set.resolve(&point("37.12,55.12")), Resolution::Zone(2));
        }
    }

    #[test]
    fn malformed_and_reserved_zones_are_excluded() {
        let snapshot = ZoneSnapshot::new(vec![
            ZoneRecord::new(0, ZONE_2),
            ZoneRecord::new(1, "[1,2],[3]"),
            ZoneRecord::new(2, ZONE_2),
        ]);
        let set = PolygonSet::build(&snapshot);

        assert_eq!(set.len(), 1);
        assert!(set.get(2).is_some());
        assert!(set.get(1).is_none());
        assert_eq!(set.resolve(&point("37.08,55.08")), Resolution::Zone(2));

        assert_eq!(set.rejected().len(), 2);
        assert!(matches!(set.rejected()[0], ZoneError::ReservedZoneId));
        assert!(matches!(
            set.rejected()[1],
            ZoneError::MalformedZoneBoundary {
                zone_id: 1,
                reason: BoundaryError::MissingComponent { index: 1 }
            }
        ));
    }

    #[test]
    fn duplicate_ids_keep_first_record() {
        let snapshot = ZoneSnapshot::new(vec![ZoneRecord::new(1, ZONE_1), ZoneRecord::new(1, ZONE_2)]);
        let set = PolygonSet::build(&snapshot);
        assert_eq!(set.len(), 1);
        assert_eq!(set.resolve(&point("37.12,55.12")), Resolution::NoZone);
    }

    #[test]
    fn same_version_parses_once() {
        let cache = PolygonCache::default();
        let snapshot = ZoneSnapshot::new(vec![ZoneRecord::new(1, ZONE_1)]);

        let first = cache.get_or_parse(&snapshot);
        let second = cache.get_or_parse(&ZoneSnapshot::new(vec![ZoneRecord::new(1, ZONE_1)]));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.parse_count(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn new_version_is_parsed_again() {
        let cache = PolygonCache::default();
        cache.get_or_parse(&ZoneSnapshot::new(vec![ZoneRecord::new(1, ZONE_1)]));
        let updated = cache.get_or_parse(&ZoneSnapshot::new(vec![ZoneRecord::new(1, ZONE_2)]));

        assert_eq!(cache.parse_count(), 2);
        assert_eq!(updated.resolve(&point("37.02,55.02")), Resolution::NoZone);
    }

    #[test]
    fn expired_entries_are_reparsed() {
        let cache = PolygonCache::new(Duration::ZERO);
        let snapshot = ZoneSnapshot::new(vec![ZoneRecord::new(1, ZONE_1)]);

        cache.get_or_parse(&snapshot);
        cache.get_or_parse(&snapshot);

        assert_eq!(cache.parse_count(), 2);
        // Expired entries are purged before each insert.
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn invalidate_forces_reparse() {
        let cache = PolygonCache::default();
        let snapshot = ZoneSnapshot::new(vec![ZoneRecord::new(1, ZONE_1)]);

        cache.get_or_parse(&snapshot);
        cache.invalidate();
        assert!(cache.is_empty());

        cache.get_or_parse(&snapshot);
        assert_eq!(cache.parse_count(), 2);
    }
}
