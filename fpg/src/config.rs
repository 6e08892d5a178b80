use estande::entities::{StandSpec, ZoneCatalog};
use estande::io::svg::SvgDrawOptions;
use serde::{Deserialize, Serialize};

/// Configuration for the floor plan generator
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FPGConfig {
    /// Side of an occupancy grid cell (m)
    pub grid_resolution: f64,
    /// Minimum distance kept between a zone and the far edges of the stand (m)
    pub boundary_margin: f64,
    /// Shortest allowed zone side (m)
    pub min_zone_side: f64,
    /// Every zone is budgeted at least this area (m²)
    pub min_zone_area: f64,
    /// Circulation area as a fraction of the zone area
    pub circulation_ratio: f64,
    /// Technical margin as a fraction of the stand area
    pub technical_ratio: f64,
    /// Lower bound of the technical margin (m²)
    pub min_technical_area: f64,
    /// Requested zones above this fraction of the stand area are flagged
    pub disproportion_ratio: f64,
    /// Upper bound on the area of the default exhibition zone (m²)
    pub default_zone_cap: f64,
    /// Area of the default exhibition zone as a fraction of the stand area
    pub default_zone_fraction: f64,
    /// Corridor dimensions
    pub corridors: CorridorConfig,
    /// Rows of a normalized layout whose widths sum to 1.0 within this tolerance are left untouched
    pub row_coverage_tolerance: f64,
    /// Ideal and minimum footprints, names and colors per zone kind
    pub catalog: ZoneCatalog,
    /// Optional SVG drawing options
    pub svg_draw_options: SvgDrawOptions,
    /// Abort the plan when the layout cannot be rendered, instead of returning a placeholder SVG
    pub strict_render: bool,
}

impl Default for FPGConfig {
    fn default() -> Self {
        Self {
            grid_resolution: 0.5,
            boundary_margin: 0.3,
            min_zone_side: 1.5,
            min_zone_area: 4.0,
            circulation_ratio: 0.25,
            technical_ratio: 0.02,
            min_technical_area: 1.0,
            disproportion_ratio: 0.40,
            default_zone_cap: 12.0,
            default_zone_fraction: 0.6,
            corridors: CorridorConfig::default(),
            row_coverage_tolerance: 0.01,
            catalog: ZoneCatalog::default(),
            svg_draw_options: SvgDrawOptions::default(),
            strict_render: false,
        }
    }
}

impl FPGConfig {
    /// Area given to exhibition zones that do not state one: `min(default_zone_fraction × stand area, default_zone_cap)`
    pub fn default_exhibition_area(&self, stand: &StandSpec) -> f64 {
        f64::min(self.default_zone_fraction * stand.area_total(), self.default_zone_cap)
    }
}

/// Dimensions of the circulation corridors
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct CorridorConfig {
    /// Upper bound on the width of any corridor (m)
    pub max_width: f64,
    /// Width of the horizontal corridor as a fraction of the stand depth
    pub horizontal_fraction: f64,
    /// Width of the vertical corridor as a fraction of the stand frontage
    pub vertical_fraction: f64,
    /// A vertical corridor is added once more than this many zones are placed
    pub vertical_after_n_zones: usize,
}

impl Default for CorridorConfig {
    fn default() -> Self {
        Self {
            max_width: 1.2,
            horizontal_fraction: 0.15,
            vertical_fraction: 0.10,
            vertical_after_n_zones: 3,
        }
    }
}
