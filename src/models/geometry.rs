// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Zone boundary parsing and exact point-in-polygon tests.
//!
//! Coordinates are `Decimal`, never `f64`, so containment answers do not depend
//! on platform float rounding. A point on an edge or vertex counts as inside.
//!
//! The parser does not care which axis comes first: the first component of
//! every vertex is stored as `lon` and the second as `lat`. Points passed to
//! [`ParsedPolygon::contains`] must use the same order as the boundaries.

use crate::error::BoundaryError;
use geo::{LineString, Polygon};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Largest absolute coordinate value accepted in a boundary.
const COORDINATE_LIMIT: i64 = 180;

/// A coordinate pair in fixed-point decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: Decimal,
    pub lat: Decimal,
}

impl GeoPoint {
    pub fn new(lon: Decimal, lat: Decimal) -> Self {
        Self { lon, lat }
    }

    /// Convert from float coordinates (e.g. a geocoder response).
    ///
    /// Returns `None` for NaN or infinite input.
    pub fn from_f64(lon: f64, lat: f64) -> Option<Self> {
        Some(Self::new(Decimal::from_f64(lon)?, Decimal::from_f64(lat)?))
    }

    /// Lossy float form for display.
    ///
    /// `Decimal::to_f64` only fails outside the f64 range; boundary vertices
    /// are limited to `COORDINATE_LIMIT`, so the zero fallback is unreachable.
    fn to_f64_pair(self) -> (f64, f64) {
        (
            self.lon.to_f64().unwrap_or_default(),
            self.lat.to_f64().unwrap_or_default(),
        )
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.lon, self.lat)
    }
}

impl FromStr for GeoPoint {
    type Err = BoundaryError;

    /// Parse `"lon,lat"`, with or without surrounding brackets.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_vertex(s, 0)
    }
}

/// A zone boundary parsed into an exact polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPolygon {
    /// Vertices exactly as written in the boundary string.
    vertices: Vec<GeoPoint>,
    /// Open ring used for geometry: no repeated neighbours, no closing vertex.
    ring: Vec<GeoPoint>,
    min: GeoPoint,
    max: GeoPoint,
}

impl ParsedPolygon {
    /// Parse a boundary string of the form `"[lon,lat],[lon,lat],..."`.
    ///
    /// Adjacent vertices without a separator (`"][`") are accepted, as are outer
    /// brackets around the whole list and whitespace around tokens.
    pub fn parse(raw: &str) -> Result<Self, BoundaryError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoundaryError::Empty);
        }

        let normalized = trimmed.replace("][", "],[");
        let vertices = normalized
            .split("],")
            .enumerate()
            .map(|(index, token)| parse_vertex(token, index))
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_vertices(vertices)
    }

    /// Build a polygon from an ordered vertex list, validating the ring.
    pub fn from_vertices(vertices: Vec<GeoPoint>) -> Result<Self, BoundaryError> {
        let mut ring: Vec<GeoPoint> = Vec::with_capacity(vertices.len());
        for vertex in &vertices {
            if ring.last() != Some(vertex) {
                ring.push(*vertex);
            }
        }
        while ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }

        let mut distinct = ring.clone();
        distinct.sort();
        distinct.dedup();
        if distinct.len() < 3 {
            return Err(BoundaryError::TooFewVertices {
                found: distinct.len(),
            });
        }

        if twice_signed_area(&ring).is_zero() {
            return Err(BoundaryError::ZeroArea);
        }

        if ring_self_intersects(&ring) {
            return Err(BoundaryError::SelfIntersecting);
        }

        // distinct is sorted by lon first, so only lat needs a scan.
        let min_lat = ring.iter().map(|p| p.lat).min().unwrap_or_default();
        let max_lat = ring.iter().map(|p| p.lat).max().unwrap_or_default();
        let min = GeoPoint::new(distinct[0].lon, min_lat);
        let max = GeoPoint::new(distinct[distinct.len() - 1].lon, max_lat);

        Ok(Self {
            vertices,
            ring,
            min,
            max,
        })
    }

    /// Vertices in the order they were written.
    pub fn vertices(&self) -> &[GeoPoint] {
        &self.vertices
    }

    /// Lower-left and upper-right corners of the bounding box.
    pub fn bounding_box(&self) -> (GeoPoint, GeoPoint) {
        (self.min, self.max)
    }

    /// Inclusive containment: points on an edge or vertex are inside.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        if point.lon < self.min.lon
            || point.lon > self.max.lon
            || point.lat < self.min.lat
            || point.lat > self.max.lat
        {
            return false;
        }

        let n = self.ring.len();
        let mut inside = false;
        for i in 0..n {
            let a = self.ring[i];
            let b = self.ring[(i + 1) % n];

            if on_segment(a, b, *point) {
                return true;
            }

            // Ray cast towards +lon. Comparing the cross product sign avoids
            // dividing to find the crossing point.
            if (a.lat > point.lat) != (b.lat > point.lat) {
                let turn = cross(a, b, *point);
                let crosses = if b.lat > a.lat {
                    turn > Decimal::ZERO
                } else {
                    turn < Decimal::ZERO
                };
                if crosses {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Serialize back to the persisted boundary format.
    pub fn to_boundary_string(&self) -> String {
        self.vertices
            .iter()
            .map(GeoPoint::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Float polygon for display and GeoJSON output.
    pub fn to_geo(&self) -> Polygon<f64> {
        let exterior: Vec<(f64, f64)> = self.ring.iter().map(|p| p.to_f64_pair()).collect();
        Polygon::new(LineString::from(exterior), vec![])
    }
}

fn parse_vertex(token: &str, index: usize) -> Result<GeoPoint, BoundaryError> {
    let cleaned: String = token.chars().filter(|c| !matches!(c, '[' | ']')).collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Err(BoundaryError::EmptyVertex { index });
    }

    let mut parts = cleaned.split(',');
    let lon = parse_component(parts.next(), index)?;
    let lat = parse_component(parts.next(), index)?;
    if parts.next().is_some() {
        return Err(BoundaryError::ExtraComponent { index });
    }

    Ok(GeoPoint::new(lon, lat))
}

fn parse_component(part: Option<&str>, index: usize) -> Result<Decimal, BoundaryError> {
    let raw = part
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(BoundaryError::MissingComponent { index })?;

    let value = raw
        .parse::<Decimal>()
        .map_err(|_| BoundaryError::NonNumeric {
            index,
            token: raw.to_string(),
        })?;

    if value.abs() > Decimal::from(COORDINATE_LIMIT) {
        return Err(BoundaryError::OutOfRange { index });
    }
    Ok(value)
}

/// Cross product of (b - a) and (p - a). Positive when p is left of a→b.
fn cross(a: GeoPoint, b: GeoPoint, p: GeoPoint) -> Decimal {
    (b.lon - a.lon) * (p.lat - a.lat) - (p.lon - a.lon) * (b.lat - a.lat)
}

fn orientation(a: GeoPoint, b: GeoPoint, p: GeoPoint) -> Ordering {
    cross(a, b, p).cmp(&Decimal::ZERO)
}

fn within_extent(a: GeoPoint, b: GeoPoint, p: GeoPoint) -> bool {
    a.lon.min(b.lon) <= p.lon
        && p.lon <= a.lon.max(b.lon)
        && a.lat.min(b.lat) <= p.lat
        && p.lat <= a.lat.max(b.lat)
}

fn on_segment(a: GeoPoint, b: GeoPoint, p: GeoPoint) -> bool {
    cross(a, b, p).is_zero() && within_extent(a, b, p)
}

fn segments_intersect(p1: GeoPoint, p2: GeoPoint, q1: GeoPoint, q2: GeoPoint) -> bool {
    let d1 = orientation(q1, q2, p1);
    let d2 = orientation(q1, q2, p2);
    let d3 = orientation(p1, p2, q1);
    let d4 = orientation(p1, p2, q2);

    let straddles = |x: Ordering, y: Ordering| {
        matches!(
            (x, y),
            (Ordering::Less, Ordering::Greater) | (Ordering::Greater, Ordering::Less)
        )
    };
    if straddles(d1, d2) && straddles(d3, d4) {
        return true;
    }

    (d1 == Ordering::Equal && within_extent(q1, q2, p1))
        || (d2 == Ordering::Equal && within_extent(q1, q2, p2))
        || (d3 == Ordering::Equal && within_extent(p1, p2, q1))
        || (d4 == Ordering::Equal && within_extent(p1, p2, q2))
}

fn twice_signed_area(ring: &[GeoPoint]) -> Decimal {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            a.lon * b.lat - b.lon * a.lat
        })
        .sum()
}

fn ring_self_intersects(ring: &[GeoPoint]) -> bool {
    let n = ring.len();
    let edge = |i: usize| (ring[i], ring[(i + 1) % n]);

    for i in 0..n {
        let (a, b) = edge(i);

        // Neighbouring edges share a vertex; they only conflict if the ring
        // folds back on itself along a line.
        let c = ring[(i + 2) % n];
        if orientation(a, b, c) == Ordering::Equal && (on_segment(a, b, c) || on_segment(b, c, a)) {
            return true;
        }

        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (c, d) = edge(j);
            if segments_intersect(a, b, c, d) {
                return true;
            }
        }
    }
    false
}
