use estande::entities::{StandSpec, ZoneKind, ZoneRequest};
use estande::geometry::OccupancyGrid;
use estande::geometry::primitives::{Point, Rect};
use estande::util::round2;
use itertools::Itertools;
use log::trace;
use ordered_float::OrderedFloat;

use crate::opt::sizer::ZoneSize;

/// Smallest step of the fallback raster scan (m)
pub const MIN_SCAN_STEP: f64 = 0.5;

/// Slack allowed when checking whether a candidate lies within the stand
const BOUNDS_EPSILON: f64 = 1e-9;

/// Ordered list of origins (bottom-left corners, `y = 0` being the front) to try for a zone.
///
/// The preferred positions of the kind come first, followed by a raster scan of the whole stand
/// (rows front to back, left to right within a row). Duplicates are removed, keeping the first occurrence.
pub fn candidate_origins(zone: &ZoneRequest, size: &ZoneSize, stand: &StandSpec) -> Vec<Point> {
    preferred_origins(zone, size, stand)
        .into_iter()
        .chain(raster_scan(size, stand))
        .map(|Point(x, y)| Point(round2(x), round2(y)))
        .unique_by(|p| (OrderedFloat(p.0), OrderedFloat(p.1)))
        .collect()
}

fn preferred_origins(zone: &ZoneRequest, size: &ZoneSize, stand: &StandSpec) -> Vec<Point> {
    let (w, d) = (stand.width(), stand.depth());
    let right = w - size.width;
    let center = (w - size.width) / 2.0;
    let rear = d - size.depth;

    if zone.adjacent_to_entrance || zone.kind == ZoneKind::Exhibition {
        vec![
            Point(0.0, 0.0),
            Point(right, 0.0),
            Point(center, 0.0),
            Point(center, d / 4.0),
        ]
    } else if zone.kind.is_private() {
        vec![Point(0.0, rear), Point(right, rear), Point(center, rear)]
    } else if zone.kind.is_service() {
        vec![
            Point(0.0, rear),
            Point(right, rear),
            Point(0.0, 0.0),
            Point(right, 0.0),
        ]
    } else {
        vec![]
    }
}

fn raster_scan(size: &ZoneSize, stand: &StandSpec) -> Vec<Point> {
    let step_x = f64::max(MIN_SCAN_STEP, size.width / 3.0);
    let step_y = f64::max(MIN_SCAN_STEP, size.depth / 3.0);
    //every stepped position along an axis, followed by the one flush with the far edge
    let positions = |step: f64, zone_side: f64, stand_side: f64| {
        let flush = stand_side - zone_side;
        (0..)
            .map(move |i| i as f64 * step)
            .take_while(move |pos| *pos <= flush + BOUNDS_EPSILON)
            .chain((flush >= -BOUNDS_EPSILON).then_some(flush))
            .collect_vec()
    };

    positions(step_y, size.depth, stand.depth())
        .into_iter()
        .cartesian_product(positions(step_x, size.width, stand.width()))
        .map(|(y, x)| Point(x, y))
        .collect()
}

/// The rectangle a zone of `size` would cover at `origin`, if it lies within the stand.
pub fn footprint_within_stand(origin: Point, size: &ZoneSize, stand: &StandSpec) -> Option<Rect> {
    let Point(x, y) = origin;
    let within = x >= -BOUNDS_EPSILON
        && y >= -BOUNDS_EPSILON
        && x + size.width <= stand.width() + BOUNDS_EPSILON
        && y + size.depth <= stand.depth() + BOUNDS_EPSILON;
    match within {
        true => Some(Rect {
            x_min: x,
            y_min: y,
            x_max: x + size.width,
            y_max: y + size.depth,
        }),
        false => None,
    }
}

/// First-fit placement: tries every candidate origin in order and claims the first free one on the grid.
/// Returns the origin of the zone, or `None` if no candidate is free.
pub fn place_zone(
    grid: &mut OccupancyGrid,
    stand: &StandSpec,
    zone: &ZoneRequest,
    size: &ZoneSize,
) -> Option<Point> {
    let candidates = candidate_origins(zone, size, stand);
    let accepted = candidates.iter().find_map(|&origin| {
        footprint_within_stand(origin, size, stand)
            .filter(|rect| grid.is_free(rect))
            .map(|rect| (origin, rect))
    });

    match accepted {
        Some((origin, rect)) => {
            let n_cells = grid.occupy(&rect);
            trace!(
                "[PLACE] {} at ({:.2}, {:.2}) claimed {n_cells} cells",
                zone.kind, origin.0, origin.1
            );
            Some(origin)
        }
        None => {
            trace!(
                "[PLACE] all {} candidates exhausted for {} ({:.2} x {:.2})",
                candidates.len(),
                zone.kind,
                size.width,
                size.depth
            );
            None
        }
    }
}
