// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for zones, geometry and resolution results.

pub mod geometry;
pub mod snapshot;
pub mod zone;

pub use geometry::{GeoPoint, ParsedPolygon};
pub use snapshot::{SnapshotVersion, ZoneSnapshot};
pub use zone::{Resolution, ShippingQuote, ZoneId, ZoneOption, ZoneRecord, ZoneTerms};
