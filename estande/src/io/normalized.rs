use itertools::Itertools;
use log::debug;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::entities::{
    Entrance, Layout, PlacedZone, Priority, StandError, StandSpec, ZoneCatalog, ZoneNamer,
};
use crate::io::ext_repr::{ExtNormalizedArea, ExtNormalizedLayout};
use crate::util::round2;

/// Areas whose normalized `y` differ by at most this much belong to the same row
pub const ROW_TOLERANCE: f64 = 0.01;

/// Rescaling applied to one row of areas
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RowCorrection {
    /// Normalized `y` of the first area in the row
    pub y: f64,
    pub area_ids: Vec<String>,
    pub width_sum_before: f64,
    pub scale: f64,
}

/// Makes every row of areas span the full stand frontage.
///
/// Areas are grouped into rows by their normalized `y` (within [`ROW_TOLERANCE`]).
/// A row whose widths do not add up to 1.0 (± `tolerance`) has its widths scaled proportionally
/// and is re-packed from left to right, keeping the original x order.
pub fn fill_row_coverage(areas: &mut [ExtNormalizedArea], tolerance: f64) -> Vec<RowCorrection> {
    let by_y = (0..areas.len())
        .sorted_by_key(|&i| (OrderedFloat(areas[i].bbox_norm.y), i))
        .collect_vec();

    let mut rows: Vec<Vec<usize>> = vec![];
    for i in by_y {
        match rows.last_mut() {
            Some(row) if (areas[i].bbox_norm.y - areas[row[0]].bbox_norm.y).abs() <= ROW_TOLERANCE => {
                row.push(i)
            }
            _ => rows.push(vec![i]),
        }
    }

    let mut corrections = vec![];
    for row in rows {
        let width_sum = row.iter().map(|&i| areas[i].bbox_norm.w).sum::<f64>();
        if width_sum <= 0.0 || (width_sum - 1.0).abs() <= tolerance {
            continue;
        }
        let scale = 1.0 / width_sum;
        let mut cursor = 0.0;
        for &i in row
            .iter()
            .sorted_by_key(|&&i| (OrderedFloat(areas[i].bbox_norm.x), i))
        {
            let bbox = &mut areas[i].bbox_norm;
            bbox.w *= scale;
            bbox.x = cursor;
            cursor += bbox.w;
        }
        let correction = RowCorrection {
            y: areas[row[0]].bbox_norm.y,
            area_ids: row.iter().map(|&i| areas[i].id.clone()).collect(),
            width_sum_before: width_sum,
            scale,
        };
        debug!(
            "[NORM] row at y={:.3} covered {:.1}% of the frontage, scaled by {:.3}",
            correction.y,
            width_sum * 100.0,
            scale
        );
        corrections.push(correction);
    }
    corrections
}

/// Converts a normalized layout into metric geometry on a stand of `width_m` × `depth_m`.
/// Areas become medium priority [`PlacedZone`]s, no overlap or containment checks are made.
pub fn to_layout(ext: &ExtNormalizedLayout, catalog: &ZoneCatalog) -> Result<Layout, StandError> {
    let stand = StandSpec::from_dimensions(ext.width_m, ext.depth_m)?;
    let mut namer = ZoneNamer::new(catalog);
    let placed_zones = ext
        .areas
        .iter()
        .map(|area| {
            let bbox = area.bbox_norm;
            let (width, depth) = (
                round2(bbox.w * stand.width()),
                round2(bbox.h * stand.depth()),
            );
            PlacedZone {
                kind: area.kind.clone(),
                display_name: namer.name(&area.kind, area.label.as_deref()),
                x: round2(bbox.x * stand.width()),
                y: round2(bbox.y * stand.depth()),
                width,
                depth,
                area: round2(width * depth),
                color: catalog.color(&area.kind),
                priority: Priority::Medium,
            }
        })
        .collect();

    Ok(Layout::new(
        stand,
        placed_zones,
        vec![],
        vec![Entrance::centered(&stand)],
        vec![],
    ))
}
