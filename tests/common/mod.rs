// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use zone_resolver::config::Config;
use zone_resolver::error::Result;
use zone_resolver::{GeoPoint, InMemoryZoneStore, ZoneRecord, ZoneResolver, ZoneStore};

/// Square zone from (37.0, 55.0) to (37.1, 55.1).
#[allow(dead_code)]
pub const ZONE_1: &str = "[37.0,55.0],[37.0,55.1],[37.1,55.1],[37.1,55.0]";

/// Square zone overlapping the upper-right quarter of `ZONE_1`.
#[allow(dead_code)]
pub const ZONE_2: &str = "[37.05,55.05],[37.05,55.15],[37.15,55.15],[37.15,55.05]";

/// Build a point from decimal strings.
#[allow(dead_code)]
pub fn point(lon: &str, lat: &str) -> GeoPoint {
    format!("{},{}", lon, lat)
        .parse()
        .expect("test point should parse")
}

/// The two overlapping, visible and available zones of the reference scenario.
#[allow(dead_code)]
pub fn example_zones() -> Vec<ZoneRecord> {
    vec![
        ZoneRecord::new(1, ZONE_1).with_name("Center"),
        ZoneRecord::new(2, ZONE_2).with_name("North-East"),
    ]
}

/// Create a resolver over an in-memory store.
/// Returns the resolver and a handle for replacing the zone set.
#[allow(dead_code)]
pub fn create_test_resolver(
    zones: Vec<ZoneRecord>,
) -> (ZoneResolver<InMemoryZoneStore>, InMemoryZoneStore) {
    let store = InMemoryZoneStore::new(zones);
    let resolver = ZoneResolver::new(store.clone(), &Config::default());
    (resolver, store)
}

/// Store that takes `delay` before answering.
#[allow(dead_code)]
pub struct SlowZoneStore {
    pub delay: Duration,
    pub inner: InMemoryZoneStore,
}

impl ZoneStore for SlowZoneStore {
    async fn load_zones(&self) -> Result<Vec<ZoneRecord>> {
        tokio::time::sleep(self.delay).await;
        self.inner.load_zones().await
    }
}

/// Store that counts how many times it has been read.
#[allow(dead_code)]
#[derive(Clone)]
pub struct CountingZoneStore {
    pub loads: Arc<AtomicUsize>,
    pub inner: InMemoryZoneStore,
}

#[allow(dead_code)]
impl CountingZoneStore {
    pub fn new(zones: Vec<ZoneRecord>) -> Self {
        Self {
            loads: Arc::new(AtomicUsize::new(0)),
            inner: InMemoryZoneStore::new(zones),
        }
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl ZoneStore for CountingZoneStore {
    async fn load_zones(&self) -> Result<Vec<ZoneRecord>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.inner.load_zones().await
    }
}
