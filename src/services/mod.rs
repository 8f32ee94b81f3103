// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - zone parsing, caching and resolution.

pub mod geojson_export;
pub mod polygon_cache;
pub mod resolver;

pub use polygon_cache::{PolygonCache, PolygonSet, ZonePolygon};
pub use resolver::ZoneResolver;
