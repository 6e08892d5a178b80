use serde::{Deserialize, Serialize};

use crate::entities::{CorridorKind, Priority, StandSource, WallSide, ZoneKind};
use crate::io::svg::Color;

/// External representation of a client briefing: the raw stand numbers and the requested zones.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ExtBriefing {
    /// Name of the project, used in titles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Declared total stand area (m²), authoritative when present
    #[serde(default, alias = "area_m2")]
    pub declared_area_m2: Option<f64>,
    /// Stand frontage (m)
    #[serde(default, alias = "width_m")]
    pub frontage_m: Option<f64>,
    /// Stand depth (m)
    #[serde(default)]
    pub depth_m: Option<f64>,
    /// Requested zones, a default exhibition area is synthesized when empty
    #[serde(default, alias = "zones")]
    pub zone_requests: Vec<ExtZoneRequest>,
}

/// External representation of a [`ZoneRequest`](crate::entities::ZoneRequest).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtZoneRequest {
    pub kind: ZoneKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_area_m2: Option<f64>,
    /// Medium if not specified
    #[serde(default)]
    pub priority: Priority,
    /// Number of people the zone must hold, sizes meeting rooms when no area is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub flags: ExtZoneFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ExtZoneFlags {
    /// Derived from the zone kind if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjacent_to_entrance: Option<bool>,
}

/// External representation of a [`StandSpec`](crate::entities::StandSpec).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtStand {
    pub width_m: f64,
    pub depth_m: f64,
    pub area_total_m2: f64,
    pub source: StandSource,
}

/// External representation of a [`Layout`](crate::entities::Layout).
/// All lengths and areas carry 2 decimals.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtLayout {
    pub stand: ExtStand,
    pub placed_zones: Vec<ExtPlacedZone>,
    pub circulation: Vec<ExtCirculationArea>,
    pub entrances: Vec<ExtEntrance>,
    pub walls: Vec<ExtWall>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropped_zones: Vec<ExtDroppedZone>,
    pub used_area_m2: f64,
    pub occupancy_pct: f64,
}

/// External representation of a [`PlacedZone`](crate::entities::PlacedZone).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtPlacedZone {
    pub kind: ZoneKind,
    pub display_name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub depth: f64,
    pub area_m2: f64,
    pub color: Color,
    pub priority: Priority,
    /// Position and size as fractions of the stand frontage and depth
    pub bbox_norm: ExtBBoxNorm,
}

/// Rectangle in normalized stand coordinates, each value in `[0, 1]`
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ExtBBoxNorm {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtCirculationArea {
    pub kind: CorridorKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub depth: f64,
    pub color: Color,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtEntrance {
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtWall {
    pub side: WallSide,
    pub start: (f64, f64),
    pub end: (f64, f64),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtDroppedZone {
    pub kind: ZoneKind,
    pub display_name: String,
    pub priority: Priority,
    pub width: f64,
    pub depth: f64,
    pub reason: String,
}

/// A layout described by an external analyzer, in normalized stand coordinates.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtNormalizedLayout {
    pub width_m: f64,
    pub depth_m: f64,
    pub areas: Vec<ExtNormalizedArea>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtNormalizedArea {
    pub id: String,
    pub kind: ZoneKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub bbox_norm: ExtBBoxNorm,
}
