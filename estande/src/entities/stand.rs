use std::fmt::{Display, Formatter};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::primitives::Rect;
use crate::util::round2;

/// Smallest stand area considered viable (m²)
pub const MIN_STAND_AREA: f64 = 4.0;
/// Largest stand area considered plausible (m²)
pub const MAX_STAND_AREA: f64 = 2000.0;
/// Shortest allowed stand side (m)
pub const MIN_STAND_SIDE: f64 = 1.5;
/// Longest allowed stand side (m)
pub const MAX_STAND_SIDE: f64 = 100.0;
/// Frontage to depth ratio assumed when only an area is known
pub const DEFAULT_ASPECT_RATIO: f64 = 1.6;
/// Declared and calculated areas differing by more than this (m²) are considered to disagree
pub const AREA_DISCREPANCY_TOLERANCE: f64 = 1.0;

/// How the stand dimensions were obtained
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandSource {
    /// The declared area is authoritative, dimensions were derived or rescaled from it
    AreaInformed,
    /// The area was calculated from frontage × depth
    DimensionsCalculated,
}

/// The rectangular footprint of an exhibition stand.
/// Only constructed through validating constructors, immutable afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StandSpec {
    width: f64,
    depth: f64,
    area_total: f64,
    source: StandSource,
}

impl StandSpec {
    /// Builds a stand from raw briefing numbers.
    ///
    /// * Declared area and both dimensions disagreeing by more than [`AREA_DISCREPANCY_TOLERANCE`]:
    ///   the area wins and the dimensions are rescaled by `sqrt(area / (width * depth))`.
    /// * Area and a single dimension: the other dimension is derived from the area.
    /// * Area only: an aspect ratio of [`DEFAULT_ASPECT_RATIO`] is assumed.
    /// * No area and fewer than two dimensions: [`StandError::InsufficientBriefingData`].
    pub fn from_briefing(
        declared_area: Option<f64>,
        frontage: Option<f64>,
        depth: Option<f64>,
    ) -> Result<Self, StandError> {
        let area = match declared_area {
            None => {
                return match (frontage, depth) {
                    (Some(w), Some(d)) => StandSpec::from_dimensions(w, d),
                    _ => Err(StandError::InsufficientBriefingData),
                };
            }
            Some(area) => area,
        };
        check_area(area)?;

        let (width, depth) = match (frontage, depth) {
            (Some(w), Some(d)) => {
                let calculated = w * d;
                if calculated > 0.0 && (area - calculated).abs() > AREA_DISCREPANCY_TOLERANCE {
                    let scale = (area / calculated).sqrt();
                    debug!(
                        "[STAND] declared area {area:.2} m² disagrees with {w:.2} x {d:.2} = {calculated:.2} m², rescaling dimensions by {scale:.4}"
                    );
                    (w * scale, d * scale)
                } else {
                    (w, d)
                }
            }
            (Some(w), None) => (w, area / w),
            (None, Some(d)) => (area / d, d),
            (None, None) => {
                let depth = (area / DEFAULT_ASPECT_RATIO).sqrt();
                (area / depth, depth)
            }
        };

        StandSpec::from_parts(
            round2(width),
            round2(depth),
            round2(area),
            StandSource::AreaInformed,
        )
    }

    /// Builds a stand whose area is calculated from its dimensions.
    pub fn from_dimensions(width: f64, depth: f64) -> Result<Self, StandError> {
        let (width, depth) = (round2(width), round2(depth));
        StandSpec::from_parts(
            width,
            depth,
            round2(width * depth),
            StandSource::DimensionsCalculated,
        )
    }

    /// Validates and assembles a stand from already resolved values.
    pub fn from_parts(
        width: f64,
        depth: f64,
        area_total: f64,
        source: StandSource,
    ) -> Result<Self, StandError> {
        check_area(area_total)?;
        check_side(StandQuantity::Width, width)?;
        check_side(StandQuantity::Depth, depth)?;
        Ok(StandSpec {
            width,
            depth,
            area_total,
            source,
        })
    }

    /// Frontage of the stand (m), along the x-axis
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Depth of the stand (m), along the y-axis
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Authoritative total area (m²)
    pub fn area_total(&self) -> f64 {
        self.area_total
    }

    pub fn source(&self) -> StandSource {
        self.source
    }

    pub fn rect(&self) -> Rect {
        Rect {
            x_min: 0.0,
            y_min: 0.0,
            x_max: self.width,
            y_max: self.depth,
        }
    }
}

fn check_area(area: f64) -> Result<(), StandError> {
    let violation = |bound, kind| {
        Err(StandError::Invalid(BoundViolation {
            quantity: StandQuantity::Area,
            value: area,
            bound,
            kind,
        }))
    };
    if area.is_nan() || area <= 0.0 {
        violation(0.0, BoundKind::Positive)
    } else if area < MIN_STAND_AREA {
        violation(MIN_STAND_AREA, BoundKind::Minimum)
    } else if area > MAX_STAND_AREA {
        violation(MAX_STAND_AREA, BoundKind::Maximum)
    } else {
        Ok(())
    }
}

fn check_side(quantity: StandQuantity, value: f64) -> Result<(), StandError> {
    let violation = |bound, kind| {
        Err(StandError::Invalid(BoundViolation {
            quantity,
            value,
            bound,
            kind,
        }))
    };
    if value.is_nan() || value < MIN_STAND_SIDE {
        violation(MIN_STAND_SIDE, BoundKind::Minimum)
    } else if value > MAX_STAND_SIDE {
        violation(MAX_STAND_SIDE, BoundKind::Maximum)
    } else {
        Ok(())
    }
}

/// Reasons why a [`StandSpec`] cannot be constructed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StandError {
    #[error("briefing has neither a stand area nor stand dimensions")]
    InsufficientBriefingData,
    #[error("invalid stand: {0}")]
    Invalid(BoundViolation),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandQuantity {
    Area,
    Width,
    Depth,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundKind {
    /// value must be strictly positive
    Positive,
    Minimum,
    Maximum,
}

/// A numeric stand property outside of its valid range
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundViolation {
    pub quantity: StandQuantity,
    pub value: f64,
    pub bound: f64,
    pub kind: BoundKind,
}

impl BoundViolation {
    /// How far the value lies past the violated bound
    pub fn excess(&self) -> f64 {
        (self.value - self.bound).abs()
    }
}

impl Display for BoundViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (value, bound, excess) = (self.value, self.bound, self.excess());
        match (self.quantity, self.kind) {
            (StandQuantity::Area, BoundKind::Positive) => {
                write!(f, "stand area must be positive, got {value} m²")
            }
            (StandQuantity::Area, BoundKind::Minimum) => write!(
                f,
                "stand area of {value:.2} m² is too small to be viable (minimum {bound} m², short by {excess:.2} m²)"
            ),
            (StandQuantity::Area, BoundKind::Maximum) => write!(
                f,
                "stand area of {value:.2} m² is implausible, verify inputs (maximum {bound} m², exceeded by {excess:.2} m²)"
            ),
            (side, BoundKind::Maximum) => write!(
                f,
                "stand {side} of {value:.2} m exceeds the maximum of {bound} m by {excess:.2} m"
            ),
            (side, _) => write!(
                f,
                "stand {side} of {value:.2} m is below the minimum of {bound} m by {excess:.2} m"
            ),
        }
    }
}

impl Display for StandQuantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StandQuantity::Area => write!(f, "area"),
            StandQuantity::Width => write!(f, "width"),
            StandQuantity::Depth => write!(f, "depth"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn dimensions_only() {
        let stand = StandSpec::from_briefing(None, Some(11.0), Some(8.0)).unwrap();
        assert_eq!(stand.width(), 11.0);
        assert_eq!(stand.depth(), 8.0);
        assert_eq!(stand.area_total(), 88.0);
        assert_eq!(stand.source(), StandSource::DimensionsCalculated);
    }

    #[test]
    fn declared_area_wins_over_disagreeing_dimensions() {
        let stand = StandSpec::from_briefing(Some(100.0), Some(10.0), Some(9.0)).unwrap();
        assert_eq!(stand.area_total(), 100.0);
        assert_eq!(stand.width(), 10.54);
        assert_eq!(stand.depth(), 9.49);
        assert_eq!(stand.source(), StandSource::AreaInformed);
    }

    #[test]
    fn small_discrepancy_keeps_dimensions() {
        let stand = StandSpec::from_briefing(Some(48.5), Some(6.0), Some(8.0)).unwrap();
        assert_eq!(stand.width(), 6.0);
        assert_eq!(stand.depth(), 8.0);
        assert_eq!(stand.area_total(), 48.5);
    }

    #[test]
    fn area_only_assumes_aspect_ratio() {
        let stand = StandSpec::from_briefing(Some(40.0), None, None).unwrap();
        assert_eq!(stand.depth(), 5.0);
        assert_eq!(stand.width(), 8.0);
    }

    #[test]
    fn area_and_single_dimension() {
        let stand = StandSpec::from_briefing(Some(48.0), Some(6.0), None).unwrap();
        assert_eq!(stand.width(), 6.0);
        assert_eq!(stand.depth(), 8.0);
    }

    #[test_case(None, None, None; "nothing")]
    #[test_case(None, Some(6.0), None; "frontage only")]
    #[test_case(None, None, Some(4.0); "depth only")]
    fn insufficient_briefing(area: Option<f64>, frontage: Option<f64>, depth: Option<f64>) {
        assert_eq!(
            StandSpec::from_briefing(area, frontage, depth),
            Err(StandError::InsufficientBriefingData)
        );
    }

    #[test_case(Some(2.0), None, None, StandQuantity::Area, BoundKind::Minimum; "too small")]
    #[test_case(Some(0.0), None, None, StandQuantity::Area, BoundKind::Positive; "zero area")]
    #[test_case(Some(2500.0), None, None, StandQuantity::Area, BoundKind::Maximum; "implausible")]
    #[test_case(None, Some(1.0), Some(10.0), StandQuantity::Width, BoundKind::Minimum; "narrow")]
    #[test_case(None, Some(10.0), Some(120.0), StandQuantity::Depth, BoundKind::Maximum; "deep")]
    fn invalid_stand(
        area: Option<f64>,
        frontage: Option<f64>,
        depth: Option<f64>,
        quantity: StandQuantity,
        kind: BoundKind,
    ) {
        match StandSpec::from_briefing(area, frontage, depth) {
            Err(StandError::Invalid(v)) => {
                assert_eq!(v.quantity, quantity);
                assert_eq!(v.kind, kind);
            }
            other => panic!("expected an invalid stand, got {other:?}"),
        }
    }

    #[test]
    fn violation_message_states_bound_and_excess() {
        let err = StandSpec::from_briefing(Some(2.0), None, None).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("too small"), "{msg}");
        assert!(msg.contains("short by 2.00"), "{msg}");
    }
}
