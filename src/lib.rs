// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Zone-Resolver: find the delivery zone that contains a coordinate
//!
//! This crate parses polygonal delivery/shipping zones from their stored
//! coordinate strings, caches the parsed polygons per zone snapshot, and
//! resolves points to zone ids for shipping-cost and order-acceptance checks.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use error::{BoundaryError, ZoneError};
pub use models::{GeoPoint, Resolution, ZoneRecord};
pub use services::ZoneResolver;
pub use store::{InMemoryZoneStore, JsonFileZoneStore, ZoneStore};
