use serde::{Deserialize, Serialize};

/// Geometric primitive representing a point, in meters.
/// `x` runs along the stand frontage, `y` from the front edge (`y = 0`) towards the rear.
#[derive(Debug, Clone, PartialEq, Copy, Serialize, Deserialize)]
pub struct Point(pub f64, pub f64);

impl Point {
    pub fn x(&self) -> f64 {
        self.0
    }

    pub fn y(&self) -> f64 {
        self.1
    }

    pub fn distance(&self, other: &Point) -> f64 {
        f64::hypot(self.0 - other.0, self.1 - other.1)
    }
}
