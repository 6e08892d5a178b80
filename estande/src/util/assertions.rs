use itertools::Itertools;
use log::error;

use crate::entities::{Layout, PlacedZone};
use crate::geometry::geo_traits::AlmostCollidesWith;
use crate::geometry::primitives::Rect;

//Various checks to verify the correctness of layouts
//Used in debug_assert!() blocks and to audit layouts coming from outside

/// Index pairs of zones whose rectangles overlap with a positive area. Touching edges are fine.
pub fn overlapping_pairs(zones: &[PlacedZone]) -> Vec<(usize, usize)> {
    zones
        .iter()
        .map(PlacedZone::rect)
        .enumerate()
        .tuple_combinations()
        .filter(|((_, r1), (_, r2))| r1.almost_collides_with(r2))
        .map(|((i, _), (j, _))| (i, j))
        .collect()
}

/// Indices of zones that stick out of the stand rectangle
pub fn zones_outside(stand: &Rect, zones: &[PlacedZone]) -> Vec<usize> {
    zones
        .iter()
        .positions(|z| !stand.almost_contains(&z.rect()))
        .collect()
}

pub fn layout_is_overlap_free(layout: &Layout) -> bool {
    let pairs = overlapping_pairs(layout.placed_zones());
    for (i, j) in pairs.iter() {
        let (z1, z2) = (&layout.placed_zones()[*i], &layout.placed_zones()[*j]);
        error!(
            "{} ({:?}) overlaps with {} ({:?})",
            z1.display_name,
            z1.rect(),
            z2.display_name,
            z2.rect()
        );
    }
    pairs.is_empty()
}

pub fn layout_zones_within_stand(layout: &Layout) -> bool {
    let outside = zones_outside(&layout.stand().rect(), layout.placed_zones());
    for i in outside.iter() {
        let zone = &layout.placed_zones()[*i];
        error!("{} ({:?}) exceeds the stand", zone.display_name, zone.rect());
    }
    outside.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Priority, ZoneKind};
    use crate::io::svg::Color;

    fn zone(x: f64, y: f64, width: f64, depth: f64) -> PlacedZone {
        PlacedZone {
            kind: ZoneKind::Storage,
            display_name: "Depósito".into(),
            x,
            y,
            width,
            depth,
            area: width * depth,
            color: Color(0xF5, 0xF5, 0xF5),
            priority: Priority::Low,
        }
    }

    #[test]
    fn detects_overlaps_but_not_shared_edges() {
        let zones = [
            zone(0.0, 0.0, 2.0, 2.0),
            zone(2.0, 0.0, 2.0, 2.0),
            zone(3.0, 1.0, 2.0, 2.0),
        ];
        assert_eq!(overlapping_pairs(&zones), vec![(1, 2)]);
    }

    #[test]
    fn detects_zones_outside_the_stand() {
        let stand = Rect::from_origin(0.0, 0.0, 5.0, 4.0).unwrap();
        let zones = [zone(0.0, 0.0, 2.0, 2.0), zone(4.0, 3.0, 2.0, 2.0)];
        assert_eq!(zones_outside(&stand, &zones), vec![1]);
    }
}
