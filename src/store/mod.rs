// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Zone store backends and the snapshot provider built on top of them.
//!
//! A store only knows how to load every zone record. [`ZoneCatalog`] adds the
//! read timeout and the visible/available filters the resolver works with.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileZoneStore;
pub use memory::InMemoryZoneStore;

use crate::error::{Result, ZoneError};
use crate::models::{ZoneRecord, ZoneSnapshot};
use std::future::Future;
use std::time::Duration;

/// Source of zone records.
///
/// `load_zones` is the only suspend point of a resolution call. Backends
/// report outages as [`ZoneError::StoreUnavailable`], never as an empty list.
pub trait ZoneStore: Send + Sync {
    /// Load every zone record, hidden ones included.
    fn load_zones(&self) -> impl Future<Output = Result<Vec<ZoneRecord>>> + Send;
}

/// Views of the zone table taken from a single store read.
#[derive(Debug, Clone)]
pub struct ZoneViews {
    /// Every zone, hidden ones included; used by the dashboard export.
    pub all: ZoneSnapshot,
    /// Zones that are not hidden; candidates for containment.
    pub visible: ZoneSnapshot,
    /// Visible zones currently accepting orders.
    pub available: ZoneSnapshot,
}

impl ZoneViews {
    /// Duplicate ids are resolved on the full table first, so every view
    /// agrees on which record represents a zone.
    pub fn from_records(records: Vec<ZoneRecord>) -> Self {
        let all = ZoneSnapshot::new(records);
        let visible: Vec<ZoneRecord> = all
            .zones()
            .iter()
            .filter(|z| !z.is_hidden)
            .cloned()
            .collect();
        let available: Vec<ZoneRecord> = visible
            .iter()
            .filter(|z| z.is_available)
            .cloned()
            .collect();

        Self {
            all,
            visible: ZoneSnapshot::new(visible),
            available: ZoneSnapshot::new(available),
        }
    }
}

/// Snapshot provider: a store plus the read timeout.
pub struct ZoneCatalog<S> {
    store: S,
    timeout: Duration,
}

impl<S: ZoneStore> ZoneCatalog<S> {
    pub fn new(store: S, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every record in the store, bounded by the read timeout.
    pub async fn all_zones(&self) -> Result<Vec<ZoneRecord>> {
        match tokio::time::timeout(self.timeout, self.store.load_zones()).await {
            Ok(Ok(zones)) => Ok(zones),
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Failed to load zones");
                Err(e)
            }
            Err(_) => {
                let timeout_ms = self.timeout.as_millis() as u64;
                tracing::error!(timeout_ms, "Zone store read timed out");
                Err(ZoneError::StoreUnavailable(format!(
                    "read timed out after {} ms",
                    timeout_ms
                )))
            }
        }
    }

    /// Zones with `is_hidden == false`, whatever their availability.
    pub async fn all_visible_zones(&self) -> Result<ZoneSnapshot> {
        Ok(self.views().await?.visible)
    }

    /// Zones with `is_hidden == false && is_available == true`.
    pub async fn available_zones(&self) -> Result<ZoneSnapshot> {
        Ok(self.views().await?.available)
    }

    /// Every zone, hidden ones included.
    pub async fn every_zone(&self) -> Result<ZoneSnapshot> {
        Ok(self.views().await?.all)
    }

    /// All views from one store read.
    pub async fn views(&self) -> Result<ZoneViews> {
        Ok(ZoneViews::from_records(self.all_zones().await?))
    }
}
