use log::debug;

use crate::entities::{
    CirculationArea, DroppedZone, Entrance, Layout, PlacedZone, StandError, StandSpec,
    ZoneRequest,
};
use crate::io::ext_repr::{ExtBriefing, ExtLayout, ExtZoneRequest};

/// Floor area per person (m²) used to size zones requested by capacity
pub const AREA_PER_PERSON: f64 = 1.5;

/// Converts a briefing into a validated stand and its zone requests, in briefing order.
pub fn import_briefing(ext: &ExtBriefing) -> Result<(StandSpec, Vec<ZoneRequest>), StandError> {
    let stand = StandSpec::from_briefing(ext.declared_area_m2, ext.frontage_m, ext.depth_m)?;
    let zones = ext
        .zone_requests
        .iter()
        .map(import_zone_request)
        .collect::<Vec<_>>();
    debug!(
        "[IMPORT] stand {:.2} x {:.2} m ({:.2} m², {:?}), {} zone request(s)",
        stand.width(),
        stand.depth(),
        stand.area_total(),
        stand.source(),
        zones.len()
    );
    Ok((stand, zones))
}

pub fn import_zone_request(ext: &ExtZoneRequest) -> ZoneRequest {
    let mut zone = ZoneRequest::new(ext.kind.clone(), ext.priority);
    let area = ext.requested_area_m2.filter(|a| *a > 0.0).or_else(|| {
        ext.capacity
            .filter(|c| *c > 0)
            .map(|c| c as f64 * AREA_PER_PERSON)
    });
    if let Some(area) = area {
        zone = zone.with_area(area);
    }
    if let Some(adjacent) = ext.flags.adjacent_to_entrance {
        zone = zone.with_adjacent_to_entrance(adjacent);
    }
    if let Some(label) = &ext.label {
        zone = zone.with_label(label.clone());
    }
    zone
}

/// Rebuilds a [`Layout`] from its external representation.
/// The walls and derived statistics are recomputed.
pub fn import_layout(ext: &ExtLayout) -> Result<Layout, StandError> {
    let stand = StandSpec::from_parts(
        ext.stand.width_m,
        ext.stand.depth_m,
        ext.stand.area_total_m2,
        ext.stand.source,
    )?;
    let placed_zones = ext
        .placed_zones
        .iter()
        .map(|z| PlacedZone {
            kind: z.kind.clone(),
            display_name: z.display_name.clone(),
            x: z.x,
            y: z.y,
            width: z.width,
            depth: z.depth,
            area: z.area_m2,
            color: z.color,
            priority: z.priority,
        })
        .collect();
    let circulation = ext
        .circulation
        .iter()
        .map(|c| {
            let mut area = CirculationArea::new(c.kind, c.x, c.y, c.width, c.depth);
            area.color = c.color;
            area
        })
        .collect();
    let entrances = ext
        .entrances
        .iter()
        .map(|e| Entrance {
            x: e.x,
            y: e.y,
            width: e.width,
        })
        .collect();
    let dropped_zones = ext
        .dropped_zones
        .iter()
        .map(|d| DroppedZone {
            kind: d.kind.clone(),
            display_name: d.display_name.clone(),
            priority: d.priority,
            width: d.width,
            depth: d.depth,
            reason: d.reason.clone(),
        })
        .collect();

    Ok(Layout::new(
        stand,
        placed_zones,
        circulation,
        entrances,
        dropped_zones,
    ))
}
