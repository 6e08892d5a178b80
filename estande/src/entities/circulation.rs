use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::io::svg::Color;

/// Fill of every corridor
pub const CORRIDOR_COLOR: Color = Color(0xEE, 0xEE, 0xEE);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorridorKind {
    HorizontalCorridor,
    VerticalCorridor,
}

impl Display for CorridorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CorridorKind::HorizontalCorridor => write!(f, "horizontal corridor"),
            CorridorKind::VerticalCorridor => write!(f, "vertical corridor"),
        }
    }
}

/// Space reserved for visitors to walk through. Derived from the final placement,
/// it may cross placed zones since it only marks the intended walking axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CirculationArea {
    pub kind: CorridorKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub depth: f64,
    pub color: Color,
}

impl CirculationArea {
    pub fn new(kind: CorridorKind, x: f64, y: f64, width: f64, depth: f64) -> Self {
        CirculationArea {
            kind,
            x,
            y,
            width,
            depth,
            color: CORRIDOR_COLOR,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.depth
    }
}
