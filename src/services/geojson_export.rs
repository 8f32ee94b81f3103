// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GeoJSON export of zone boundaries for the dashboard map.

use crate::models::{ParsedPolygon, ZoneRecord, ZoneSnapshot};
use crate::services::polygon_cache::PolygonSet;
use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value as GeoValue};
use serde_json::json;

/// Which map the collection is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportAudience {
    /// Storefront map: visible zones only.
    Customer,
    /// Dashboard map: every zone, each tagged with a `hide` flag.
    Admin,
}

/// One Polygon feature per zone of the snapshot that parsed successfully.
///
/// Every feature carries `number` (the zone id) and `available`, the names
/// the map widgets read, plus pricing for display. Positions keep the
/// boundary's own axis order.
pub fn feature_collection(
    snapshot: &ZoneSnapshot,
    polygons: &PolygonSet,
    audience: ExportAudience,
) -> FeatureCollection {
    let features = polygons
        .polygons()
        .iter()
        .filter_map(|entry| {
            let zone = snapshot.get(entry.zone_id)?;
            if audience == ExportAudience::Customer && zone.is_hidden {
                return None;
            }
            Some(zone_feature(zone, &entry.polygon, audience))
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn zone_feature(zone: &ZoneRecord, polygon: &ParsedPolygon, audience: ExportAudience) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("number".to_string(), json!(zone.id));
    properties.insert("available".to_string(), json!(zone.is_available));
    if audience == ExportAudience::Admin {
        properties.insert("hide".to_string(), json!(zone.is_hidden));
    }
    properties.insert("name".to_string(), json!(zone.display_name()));
    properties.insert("order_price".to_string(), json!(zone.order_price));
    properties.insert("shipping_price".to_string(), json!(zone.shipping_price));
    properties.insert("min_shipping_time".to_string(), json!(zone.min_shipping_time));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(GeoValue::from(&polygon.to_geo()))),
        id: Some(Id::Number(zone.id.into())),
        properties: Some(properties),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exports_only_parsed_zones() {
        let snapshot = ZoneSnapshot::new(vec![
            ZoneRecord::new(1, "[0,0],[0,1],[1,1],[1,0]").with_name("Center"),
            ZoneRecord::new(2, "[1,2],[3]"),
        ]);
        let polygons = PolygonSet::build(&snapshot);
        let collection = feature_collection(&snapshot, &polygons, ExportAudience::Customer);

        assert_eq!(collection.features.len(), 1);
        let feature = &collection.features[0];
        assert_eq!(feature.id, Some(Id::Number(1u64.into())));
        assert_eq!(feature.property("number").and_then(|v| v.as_u64()), Some(1));
        assert_eq!(feature.property("available").and_then(|v| v.as_bool()), Some(true));
        assert!(feature.property("hide").is_none());
        assert_eq!(feature.property("name").and_then(|v| v.as_str()), Some("Center"));
        assert!(matches!(
            feature.geometry.as_ref().map(|g| &g.value),
            Some(GeoValue::Polygon(_))
        ));
    }

    #[test]
    fn admin_export_tags_hidden_zones() {
        let snapshot = ZoneSnapshot::new(vec![
            ZoneRecord::new(1, "[0,0],[0,1],[1,1],[1,0]"),
            ZoneRecord::new(2, "[2,2],[2,3],[3,3],[3,2]").hidden().unavailable(),
        ]);
        let polygons = PolygonSet::build(&snapshot);

        let customer = feature_collection(&snapshot, &polygons, ExportAudience::Customer);
        assert_eq!(customer.features.len(), 1);

        let admin = feature_collection(&snapshot, &polygons, ExportAudience::Admin);
        assert_eq!(admin.features.len(), 2);
        let hidden = &admin.features[1];
        assert_eq!(hidden.property("number").and_then(|v| v.as_u64()), Some(2));
        assert_eq!(hidden.property("hide").and_then(|v| v.as_bool()), Some(true));
        assert_eq!(hidden.property("available").and_then(|v| v.as_bool()), Some(false));
        assert_eq!(
            admin.features[0].property("hide").and_then(|v| v.as_bool()),
            Some(false)
        );
    }
}
