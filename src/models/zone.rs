// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Zone records and the values returned to shipping and UI callers.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Zone identifier. `0` is reserved for [`Resolution::NoZone`].
pub type ZoneId = u64;

/// Minimum order sum used when a zone record does not carry one.
pub const DEFAULT_ORDER_PRICE: u32 = 700;

/// A delivery/shipping zone as supplied by the zone store.
///
/// Older exports name the same fields differently (`coords`, `isHide`,
/// `isAvailable`, `delivery_price`); those names are accepted on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRecord {
    pub id: ZoneId,
    #[serde(default)]
    pub name: Option<String>,
    /// Raw boundary, e.g. `"[37.0,55.0],[37.0,55.1],[37.1,55.1]"`.
    #[serde(alias = "coords")]
    pub boundary: String,
    #[serde(default, alias = "isHide", alias = "isHidden")]
    pub is_hidden: bool,
    #[serde(default = "default_true", alias = "isAvailable")]
    pub is_available: bool,
    /// Minimum order sum accepted for delivery into this zone.
    #[serde(default = "default_order_price", alias = "min_order")]
    pub order_price: u32,
    /// Delivery charge for this zone.
    #[serde(default, alias = "delivery_price")]
    pub shipping_price: u32,
    /// Minimum delivery time in minutes.
    #[serde(default)]
    pub min_shipping_time: u32,
}

fn default_true() -> bool {
    true
}

fn default_order_price() -> u32 {
    DEFAULT_ORDER_PRICE
}

impl ZoneRecord {
    /// Visible, available zone with default pricing.
    pub fn new(id: ZoneId, boundary: impl Into<String>) -> Self {
        Self {
            id,
            name: None,
            boundary: boundary.into(),
            is_hidden: false,
            is_available: true,
            order_price: DEFAULT_ORDER_PRICE,
            shipping_price: 0,
            min_shipping_time: 0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.is_hidden = true;
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.is_available = false;
        self
    }

    pub fn with_prices(mut self, order_price: u32, shipping_price: u32) -> Self {
        self.order_price = order_price;
        self.shipping_price = shipping_price;
        self
    }

    /// Can this zone accept orders right now?
    pub fn accepts_orders(&self) -> bool {
        !self.is_hidden && self.is_available
    }

    /// Name shown to customers; falls back to the zone number.
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Zone {}", self.id),
        }
    }

    pub fn terms(&self) -> ZoneTerms {
        ZoneTerms {
            zone_id: self.id,
            min_order: self.order_price,
            shipping_charge: self.shipping_price,
            min_shipping_time: self.min_shipping_time,
        }
    }
}

/// Outcome of resolving a point against the zone set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub enum Resolution {
    Zone(ZoneId),
    /// The point lies outside every known service area.
    NoZone,
}

impl Resolution {
    /// Integer form of [`Resolution::NoZone`].
    pub const NO_ZONE_ID: ZoneId = 0;

    /// Zone id, or `0` for `NoZone`.
    pub fn zone_id(self) -> ZoneId {
        match self {
            Resolution::Zone(id) => id,
            Resolution::NoZone => Self::NO_ZONE_ID,
        }
    }

    pub fn zone(self) -> Option<ZoneId> {
        match self {
            Resolution::Zone(id) => Some(id),
            Resolution::NoZone => None,
        }
    }

    pub fn is_no_zone(self) -> bool {
        self == Resolution::NoZone
    }
}

impl From<u64> for Resolution {
    fn from(id: u64) -> Self {
        if id == Self::NO_ZONE_ID {
            Resolution::NoZone
        } else {
            Resolution::Zone(id)
        }
    }
}

impl From<Resolution> for u64 {
    fn from(resolution: Resolution) -> Self {
        resolution.zone_id()
    }
}

/// Zone entry for selection widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ZoneOption {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: ZoneId,
    pub name: String,
}

impl From<&ZoneRecord> for ZoneOption {
    fn from(zone: &ZoneRecord) -> Self {
        Self {
            id: zone.id,
            name: zone.display_name(),
        }
    }
}

/// Pricing terms of an available zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ZoneTerms {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub zone_id: ZoneId,
    pub min_order: u32,
    pub shipping_charge: u32,
    pub min_shipping_time: u32,
}

/// Delivery price for a point, as used by checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ShippingQuote {
    /// Containing zone id, `0` when the point is outside every zone.
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub zone_id: ZoneId,
    /// False when outside all zones or inside a zone that is not taking orders.
    pub deliverable: bool,
    pub shipping_charge: u32,
    pub min_order: u32,
    pub min_shipping_time: u32,
}
