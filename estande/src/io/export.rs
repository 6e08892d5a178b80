use itertools::Itertools;

use crate::entities::{Layout, PlacedZone, StandSpec};
use crate::io::ext_repr::{
    ExtBBoxNorm, ExtCirculationArea, ExtDroppedZone, ExtEntrance, ExtLayout, ExtPlacedZone,
    ExtStand, ExtWall,
};
use crate::util::{round_to, round2};

/// Decimals kept in normalized coordinates
const NORM_DECIMALS: i32 = 4;

/// Exports a [`Layout`] into its external representation, rounding all geometry to 2 decimals.
pub fn export_layout(layout: &Layout) -> ExtLayout {
    let stand = layout.stand();
    ExtLayout {
        stand: export_stand(stand),
        placed_zones: layout
            .placed_zones()
            .iter()
            .map(|z| export_placed_zone(z, stand))
            .collect_vec(),
        circulation: layout
            .circulation()
            .iter()
            .map(|c| ExtCirculationArea {
                kind: c.kind,
                x: round2(c.x),
                y: round2(c.y),
                width: round2(c.width),
                depth: round2(c.depth),
                color: c.color,
            })
            .collect_vec(),
        entrances: layout
            .entrances()
            .iter()
            .map(|e| ExtEntrance {
                x: round2(e.x),
                y: round2(e.y),
                width: round2(e.width),
            })
            .collect_vec(),
        walls: layout
            .walls()
            .iter()
            .map(|w| ExtWall {
                side: w.side,
                start: (round2(w.start.x()), round2(w.start.y())),
                end: (round2(w.end.x()), round2(w.end.y())),
            })
            .collect_vec(),
        dropped_zones: layout
            .dropped_zones()
            .iter()
            .map(|d| ExtDroppedZone {
                kind: d.kind.clone(),
                display_name: d.display_name.clone(),
                priority: d.priority,
                width: round2(d.width),
                depth: round2(d.depth),
                reason: d.reason.clone(),
            })
            .collect_vec(),
        used_area_m2: round2(layout.used_area()),
        occupancy_pct: round2(layout.occupancy_pct()),
    }
}

pub fn export_stand(stand: &StandSpec) -> ExtStand {
    ExtStand {
        width_m: round2(stand.width()),
        depth_m: round2(stand.depth()),
        area_total_m2: round2(stand.area_total()),
        source: stand.source(),
    }
}

/// Normalized coordinates are derived from the rounded geometry, so re-exporting an imported layout is lossless.
pub fn export_placed_zone(zone: &PlacedZone, stand: &StandSpec) -> ExtPlacedZone {
    let (x, y, width, depth) = (
        round2(zone.x),
        round2(zone.y),
        round2(zone.width),
        round2(zone.depth),
    );
    ExtPlacedZone {
        kind: zone.kind.clone(),
        display_name: zone.display_name.clone(),
        x,
        y,
        width,
        depth,
        area_m2: round2(zone.area),
        color: zone.color,
        priority: zone.priority,
        bbox_norm: ExtBBoxNorm {
            x: round_to(x / stand.width(), NORM_DECIMALS),
            y: round_to(y / stand.depth(), NORM_DECIMALS),
            w: round_to(width / stand.width(), NORM_DECIMALS),
            h: round_to(depth / stand.depth(), NORM_DECIMALS),
        },
    }
}
