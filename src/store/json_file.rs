// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Zone store backed by a JSON export of the zone table.

use crate::error::{Result, ZoneError};
use crate::models::ZoneRecord;
use crate::store::ZoneStore;
use std::path::{Path, PathBuf};

/// Reads a JSON array of zone records from disk on every load.
///
/// The file is re-read each time so edits are picked up without a restart;
/// the polygon cache keeps this cheap when the geometry has not changed.
#[derive(Debug, Clone)]
pub struct JsonFileZoneStore {
    path: PathBuf,
}

impl JsonFileZoneStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse a JSON array of zone records.
pub fn parse_zones_json(json_data: &str) -> Result<Vec<ZoneRecord>> {
    serde_json::from_str(json_data)
        .map_err(|e| ZoneError::StoreUnavailable(format!("Failed to parse zones JSON: {}", e)))
}

impl ZoneStore for JsonFileZoneStore {
    async fn load_zones(&self) -> Result<Vec<ZoneRecord>> {
        let json_data = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ZoneError::StoreUnavailable(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let zones = parse_zones_json(&json_data)?;
        tracing::debug!(path = %self.path.display(), count = zones.len(), "Loaded zones file");
        Ok(zones)
    }
}
