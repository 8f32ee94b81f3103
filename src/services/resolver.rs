// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Point-to-zone resolution and zone listings.
//!
//! Each call reads one snapshot from the zone store, then works entirely in
//! memory against the cached polygon set for that snapshot.

use crate::config::Config;
use crate::error::Result;
use crate::models::{
    GeoPoint, Resolution, ShippingQuote, ZoneId, ZoneOption, ZoneRecord, ZoneSnapshot, ZoneTerms,
};
use crate::services::geojson_export::{self, ExportAudience};
use crate::services::polygon_cache::PolygonCache;
use crate::store::{ZoneCatalog, ZoneStore};
use geojson::FeatureCollection;

/// Resolves points to zones and answers zone pricing questions.
///
/// Share it across tasks behind an `Arc`; every method takes `&self`.
pub struct ZoneResolver<S> {
    catalog: ZoneCatalog<S>,
    cache: PolygonCache,
    default_min_order: u32,
}

impl<S: ZoneStore> ZoneResolver<S> {
    pub fn new(store: S, config: &Config) -> Self {
        Self {
            catalog: ZoneCatalog::new(store, config.store_timeout),
            cache: PolygonCache::new(config.cache_ttl),
            default_min_order: config.default_min_order,
        }
    }

    pub fn catalog(&self) -> &ZoneCatalog<S> {
        &self.catalog
    }

    pub fn cache(&self) -> &PolygonCache {
        &self.cache
    }

    // ─── Resolution ──────────────────────────────────────────────

    /// Zone containing the point, or `NoZone` when outside every visible zone.
    ///
    /// Unavailable zones still take part; overlapping zones resolve to the
    /// lowest id. Fails only when the zone store cannot be read.
    pub async fn resolve(&self, point: GeoPoint) -> Result<Resolution> {
        let snapshot = self.catalog.all_visible_zones().await?;
        Ok(self.resolve_in(&snapshot, point))
    }

    /// Resolve against a snapshot the caller already holds.
    pub fn resolve_in(&self, snapshot: &ZoneSnapshot, point: GeoPoint) -> Resolution {
        let polygons = self.cache.get_or_parse(snapshot);
        let resolution = polygons.resolve(&point);
        tracing::debug!(
            lon = %point.lon,
            lat = %point.lat,
            zone_id = resolution.zone_id(),
            "Resolved point"
        );
        resolution
    }

    /// All visible zones containing the point, ascending by id.
    pub async fn matching_zones(&self, point: GeoPoint) -> Result<Vec<ZoneId>> {
        let snapshot = self.catalog.all_visible_zones().await?;
        Ok(self.cache.get_or_parse(&snapshot).matching_zones(&point))
    }

    // ─── Listings ────────────────────────────────────────────────

    /// Zones currently accepting orders, ascending by id.
    pub async fn list_available(&self) -> Result<Vec<ZoneRecord>> {
        Ok(self.catalog.available_zones().await?.zones().to_vec())
    }

    /// Available zones shaped for selection widgets.
    pub async fn zone_options(&self) -> Result<Vec<ZoneOption>> {
        let available = self.catalog.available_zones().await?;
        Ok(available.zones().iter().map(ZoneOption::from).collect())
    }

    /// Boundaries of visible zones for the storefront map.
    pub async fn export_geojson(&self) -> Result<FeatureCollection> {
        let snapshot = self.catalog.all_visible_zones().await?;
        let polygons = self.cache.get_or_parse(&snapshot);
        Ok(geojson_export::feature_collection(
            &snapshot,
            &polygons,
            ExportAudience::Customer,
        ))
    }

    /// Boundaries of every zone, hidden ones included, for the dashboard map.
    pub async fn export_admin_geojson(&self) -> Result<FeatureCollection> {
        let snapshot = self.catalog.every_zone().await?;
        let polygons = self.cache.get_or_parse(&snapshot);
        Ok(geojson_export::feature_collection(
            &snapshot,
            &polygons,
            ExportAudience::Admin,
        ))
    }

    // ─── Zone terms ──────────────────────────────────────────────

    /// Pricing terms of an available zone; `None` if hidden, unavailable or unknown.
    pub async fn zone_terms(&self, zone_id: ZoneId) -> Result<Option<ZoneTerms>> {
        let available = self.catalog.available_zones().await?;
        Ok(available.get(zone_id).map(ZoneRecord::terms))
    }

    pub async fn is_zone_available(&self, zone_id: ZoneId) -> Result<bool> {
        Ok(self.zone_terms(zone_id).await?.is_some())
    }

    /// Minimum order sum for a zone, or the configured default.
    pub async fn min_order_for_zone(&self, zone_id: ZoneId) -> Result<u32> {
        Ok(self
            .zone_terms(zone_id)
            .await?
            .map_or(self.default_min_order, |terms| terms.min_order))
    }

    /// Delivery charge for a zone, or 0 when the zone is not available.
    pub async fn shipping_charge(&self, zone_id: ZoneId) -> Result<u32> {
        Ok(self
            .zone_terms(zone_id)
            .await?
            .map_or(0, |terms| terms.shipping_charge))
    }

    /// Resolve a point and price delivery to it from one store read.
    ///
    /// A point inside a visible zone that is not taking orders keeps that
    /// zone's id but is not deliverable.
    pub async fn quote(&self, point: GeoPoint) -> Result<ShippingQuote> {
        let views = self.catalog.views().await?;
        let resolution = self.resolve_in(&views.visible, point);

        let terms = resolution
            .zone()
            .and_then(|zone_id| views.available.get(zone_id))
            .map(ZoneRecord::terms);

        let quote = match terms {
            Some(terms) => ShippingQuote {
                zone_id: terms.zone_id,
                deliverable: true,
                shipping_charge: terms.shipping_charge,
                min_order: terms.min_order,
                min_shipping_time: terms.min_shipping_time,
            },
            None => ShippingQuote {
                zone_id: resolution.zone_id(),
                deliverable: false,
                shipping_charge: 0,
                min_order: self.default_min_order,
                min_shipping_time: 0,
            },
        };

        if !quote.deliverable {
            tracing::info!(
                lon = %point.lon,
                lat = %point.lat,
                zone_id = quote.zone_id,
                "Point is outside the delivery area"
            );
        }
        Ok(quote)
    }
}
