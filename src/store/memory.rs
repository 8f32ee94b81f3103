// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process zone store.

use crate::error::{Result, ZoneError};
use crate::models::ZoneRecord;
use crate::store::ZoneStore;
use std::sync::{Arc, RwLock};

/// Zone store holding records in memory.
///
/// Clones share the same records, so a handle kept by the application can
/// `replace` the zone set while a resolver reads through another clone.
#[derive(Clone, Default)]
pub struct InMemoryZoneStore {
    zones: Option<Arc<RwLock<Vec<ZoneRecord>>>>,
}

impl InMemoryZoneStore {
    pub fn new(zones: Vec<ZoneRecord>) -> Self {
        Self {
            zones: Some(Arc::new(RwLock::new(zones))),
        }
    }

    /// Create an offline store for testing.
    ///
    /// Every read fails with `StoreUnavailable`.
    pub fn offline() -> Self {
        Self { zones: None }
    }

    /// Swap in a new zone set, e.g. after the dashboard edits a zone.
    pub fn replace(&self, zones: Vec<ZoneRecord>) -> Result<()> {
        let lock = self.get_zones()?;
        let mut guard = lock
            .write()
            .map_err(|_| ZoneError::StoreUnavailable("zone store lock poisoned".to_string()))?;
        tracing::debug!(count = zones.len(), "Replacing in-memory zones");
        *guard = zones;
        Ok(())
    }

    fn get_zones(&self) -> Result<&Arc<RwLock<Vec<ZoneRecord>>>> {
        self.zones.as_ref().ok_or_else(|| {
            ZoneError::StoreUnavailable("Zone store not connected (offline mode)".to_string())
        })
    }
}

impl ZoneStore for InMemoryZoneStore {
    async fn load_zones(&self) -> Result<Vec<ZoneRecord>> {
        let lock = self.get_zones()?;
        let guard = lock
            .read()
            .map_err(|_| ZoneError::StoreUnavailable("zone store lock poisoned".to_string()))?;
        Ok(guard.clone())
    }
}
