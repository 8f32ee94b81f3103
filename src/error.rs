// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types for zone loading and resolution.

use crate::models::ZoneId;

/// Errors surfaced by the zone pipeline.
///
/// Only `StoreUnavailable` ever reaches a `resolve` caller. Per-zone errors are
/// logged and the offending zone is left out of the polygon set.
#[derive(Debug, thiserror::Error)]
pub enum ZoneError {
    #[error("Zone store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Malformed boundary for zone {zone_id}: {reason}")]
    MalformedZoneBoundary {
        zone_id: ZoneId,
        reason: BoundaryError,
    },

    #[error("Zone id 0 is reserved for the no-zone result")]
    ReservedZoneId,
}

impl ZoneError {
    /// True for failures that abort a whole resolution call.
    pub fn is_store_failure(&self) -> bool {
        matches!(self, ZoneError::StoreUnavailable(_))
    }

    /// Zone id the error refers to, if it is a per-zone error.
    pub fn zone_id(&self) -> Option<ZoneId> {
        match self {
            ZoneError::MalformedZoneBoundary { zone_id, .. } => Some(*zone_id),
            ZoneError::ReservedZoneId => Some(0),
            ZoneError::StoreUnavailable(_) => None,
        }
    }
}

/// Reasons a boundary string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoundaryError {
    #[error("boundary is empty")]
    Empty,

    #[error("vertex {index} is empty")]
    EmptyVertex { index: usize },

    #[error("vertex {index} is missing a coordinate component")]
    MissingComponent { index: usize },

    #[error("vertex {index} has more than two components")]
    ExtraComponent { index: usize },

    #[error("vertex {index} has non-numeric token {token:?}")]
    NonNumeric { index: usize, token: String },

    #[error("vertex {index} is out of coordinate range")]
    OutOfRange { index: usize },

    #[error("need at least 3 distinct vertices, found {found}")]
    TooFewVertices { found: usize },

    #[error("polygon has zero area")]
    ZeroArea,

    #[error("polygon ring intersects itself")]
    SelfIntersecting,
}

/// Result type alias for zone operations.
pub type Result<T> = std::result::Result<T, ZoneError>;
