use serde::{Deserialize, Serialize};

use crate::entities::ZoneKind;

/// Where the area budgeted for a zone came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaSource {
    /// Explicitly requested in the briefing
    Requested,
    /// Minimum footprint of the zone kind in the catalog
    CatalogMinimum,
    /// Flat minimum for kinds the catalog does not know
    FlatMinimum,
    /// Default exhibition area of the stand, for exhibition requests without an area
    StandDefault,
}

/// Area budget of a single zone request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneBreakdown {
    pub kind: ZoneKind,
    pub display_name: String,
    pub area_m2: f64,
    /// Share of the total stand area, in percent
    pub pct_of_stand: f64,
    pub source: AreaSource,
    /// The area was raised to the absolute floor
    pub clamped_to_floor: bool,
    /// Requested area exceeds the disproportion threshold. Informational only.
    pub disproportionate: bool,
}

/// Area budget of a whole briefing against the stand, computed before any placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub can_proceed: bool,
    pub zones_area_m2: f64,
    pub circulation_area_m2: f64,
    pub technical_area_m2: f64,
    pub required_area_m2: f64,
    pub available_area_m2: f64,
    /// Required area relative to the available area, in percent
    pub occupancy_pct: f64,
    /// Missing area (m²), zero when the briefing fits
    pub deficit_m2: f64,
    pub per_zone_breakdown: Vec<ZoneBreakdown>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ValidationReport {
    /// Zones flagged as disproportionate
    pub fn disproportionate_zones(&self) -> impl Iterator<Item = &ZoneBreakdown> {
        self.per_zone_breakdown.iter().filter(|z| z.disproportionate)
    }
}
