use estande::entities::{StandSpec, ZoneKind, ZoneRequest};
use estande::util::round2;

use crate::config::FPGConfig;

/// Resolved footprint of a zone, before it is placed
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoneSize {
    pub width: f64,
    pub depth: f64,
    pub area: f64,
}

/// Determines the footprint of a zone.
///
/// An explicit area keeps the ideal aspect ratio of the kind (`width = sqrt(area × ratio)`).
/// Exhibition zones without one are sized the same way from the default exhibition area of the stand,
/// other kinds use the ideal footprint from the catalog as is.
/// Both sides are then clamped to the stand minus the boundary margin, and raised to the minimum zone side.
pub fn size_zone(zone: &ZoneRequest, stand: &StandSpec, config: &FPGConfig) -> ZoneSize {
    let ideal = config.catalog.ideal(&zone.kind);
    let area = zone.explicit_area().or_else(|| {
        (zone.kind == ZoneKind::Exhibition).then(|| config.default_exhibition_area(stand))
    });
    let (width, depth) = match area {
        Some(area) => {
            let width = (area * ideal.aspect_ratio()).sqrt();
            (width, area / width)
        }
        None => (ideal.width, ideal.depth),
    };

    let clamp = |value: f64, stand_side: f64| {
        round2(
            value
                .min(stand_side - config.boundary_margin)
                .max(config.min_zone_side),
        )
    };
    let (width, depth) = (clamp(width, stand.width()), clamp(depth, stand.depth()));

    ZoneSize {
        width,
        depth,
        area: round2(width * depth),
    }
}
