use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::entities::{CirculationArea, DroppedZone, PlacedZone, StandSpec, ZoneKind};
use crate::geometry::primitives::Point;

/// Default width of the entrance opening (m)
pub const ENTRANCE_WIDTH: f64 = 2.0;

/// Opening in the front edge (`y = 0`) of the stand
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entrance {
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

impl Entrance {
    /// An entrance centered on the front edge, as wide as the stand allows.
    pub fn centered(stand: &StandSpec) -> Self {
        let width = f64::min(ENTRANCE_WIDTH, stand.width());
        Entrance {
            x: (stand.width() - width) / 2.0,
            y: 0.0,
            width,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallSide {
    Front,
    Right,
    Rear,
    Left,
}

/// One of the four edges of the stand
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub side: WallSide,
    pub start: Point,
    pub end: Point,
}

impl Wall {
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }
}

/// The result of a planning run: a stand with its zones, corridors and entrances.
/// Immutable once assembled, the derived statistics are computed on construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    stand: StandSpec,
    placed_zones: Vec<PlacedZone>,
    circulation: Vec<CirculationArea>,
    entrances: Vec<Entrance>,
    dropped_zones: Vec<DroppedZone>,
    used_area: f64,
    occupancy_pct: f64,
}

impl Layout {
    pub fn new(
        stand: StandSpec,
        placed_zones: Vec<PlacedZone>,
        circulation: Vec<CirculationArea>,
        entrances: Vec<Entrance>,
        dropped_zones: Vec<DroppedZone>,
    ) -> Self {
        let used_area = placed_zones.iter().map(|z| z.area).sum::<f64>();
        let occupancy_pct = used_area / stand.area_total() * 100.0;
        Layout {
            stand,
            placed_zones,
            circulation,
            entrances,
            dropped_zones,
            used_area,
            occupancy_pct,
        }
    }

    pub fn stand(&self) -> &StandSpec {
        &self.stand
    }

    pub fn placed_zones(&self) -> &[PlacedZone] {
        &self.placed_zones
    }

    pub fn circulation(&self) -> &[CirculationArea] {
        &self.circulation
    }

    pub fn entrances(&self) -> &[Entrance] {
        &self.entrances
    }

    /// Non-mandatory zones that could not be placed
    pub fn dropped_zones(&self) -> &[DroppedZone] {
        &self.dropped_zones
    }

    /// Sum of the placed zone areas (m²)
    pub fn used_area(&self) -> f64 {
        self.used_area
    }

    /// Used area relative to the total stand area, in percent
    pub fn occupancy_pct(&self) -> f64 {
        self.occupancy_pct
    }

    /// The front, right, rear and left walls, in that order, running counterclockwise from the origin.
    pub fn walls(&self) -> [Wall; 4] {
        let (w, d) = (self.stand.width(), self.stand.depth());
        let corners = [Point(0.0, 0.0), Point(w, 0.0), Point(w, d), Point(0.0, d)];
        let sides = [WallSide::Front, WallSide::Right, WallSide::Rear, WallSide::Left];
        std::array::from_fn(|i| Wall {
            side: sides[i],
            start: corners[i],
            end: corners[(i + 1) % 4],
        })
    }

    /// Distinct kinds of the placed zones, in order of first appearance
    pub fn distinct_kinds(&self) -> Vec<&ZoneKind> {
        self.placed_zones.iter().map(|z| &z.kind).unique().collect()
    }
}
