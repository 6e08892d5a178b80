use std::path::PathBuf;

use estande::entities::{BoundViolation, StandError, ValidationReport, ZoneKind};
use estande::io::svg::RenderError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// Steps of a planning run, in the order they are visited
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStage {
    ValidatingInput,
    CheckingCapacity,
    PlacingZones,
    ComputingCirculation,
    Rendering,
    Done,
    /// Writing the plan to disk, after the run itself is done
    Persisting,
    Failed,
}

/// Reasons why a floor plan could not be produced
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("briefing has neither a stand area nor stand dimensions, more input is needed")]
    InsufficientBriefingData,
    #[error("invalid stand: {0}")]
    InvalidStandSpec(BoundViolation),
    #[error(
        "insufficient capacity: {:.2} m² required but only {:.2} m² available, missing {:.2} m²; reduce zone count or increase stand size",
        .0.required_area_m2,
        .0.available_area_m2,
        .0.deficit_m2
    )]
    InsufficientCapacity(Box<ValidationReport>),
    #[error("no free position for mandatory zone {display_name} ({width:.2} x {depth:.2} m)")]
    UnplaceableHighPriorityZone {
        kind: ZoneKind,
        display_name: String,
        width: f64,
        depth: f64,
    },
    #[error("could not render layout: {0}")]
    Render(#[from] RenderError),
    #[error("could not write {}: {message}", path.display())]
    Persist { path: PathBuf, message: String },
}

impl PlanError {
    /// Stage of the run the error aborted
    pub fn stage(&self) -> PlanStage {
        match self {
            PlanError::InsufficientBriefingData | PlanError::InvalidStandSpec(_) => {
                PlanStage::ValidatingInput
            }
            PlanError::InsufficientCapacity(_) => PlanStage::CheckingCapacity,
            PlanError::UnplaceableHighPriorityZone { .. } => PlanStage::PlacingZones,
            PlanError::Render(_) => PlanStage::Rendering,
            PlanError::Persist { .. } => PlanStage::Persisting,
        }
    }

    /// Machine-readable name of the error
    pub fn kind(&self) -> &'static str {
        match self {
            PlanError::InsufficientBriefingData => "insufficient_briefing_data",
            PlanError::InvalidStandSpec(_) => "invalid_stand_spec",
            PlanError::InsufficientCapacity(_) => "insufficient_capacity",
            PlanError::UnplaceableHighPriorityZone { .. } => "unplaceable_high_priority_zone",
            PlanError::Render(_) => "render_error",
            PlanError::Persist { .. } => "persist_error",
        }
    }

    /// Machine-readable fields a caller needs to suggest a remedy
    pub fn details(&self) -> serde_json::Value {
        match self {
            PlanError::InsufficientBriefingData => json!({}),
            PlanError::InvalidStandSpec(violation) => json!({
                "quantity": violation.quantity,
                "value": violation.value,
                "bound": violation.bound,
                "bound_kind": violation.kind,
                "excess": violation.excess(),
            }),
            PlanError::InsufficientCapacity(report) => json!({
                "zones_area_m2": report.zones_area_m2,
                "circulation_area_m2": report.circulation_area_m2,
                "technical_area_m2": report.technical_area_m2,
                "required_area_m2": report.required_area_m2,
                "available_area_m2": report.available_area_m2,
                "deficit_m2": report.deficit_m2,
                "per_zone_breakdown": report.per_zone_breakdown,
            }),
            PlanError::UnplaceableHighPriorityZone {
                kind,
                display_name,
                width,
                depth,
            } => json!({
                "zone_kind": kind,
                "display_name": display_name,
                "width": width,
                "depth": depth,
            }),
            PlanError::Render(err) => json!({ "reason": err.to_string() }),
            PlanError::Persist { path, message } => json!({
                "path": path.display().to_string(),
                "reason": message,
            }),
        }
    }

    /// The capacity report, if the run was stopped by the capacity check
    pub fn validation_report(&self) -> Option<&ValidationReport> {
        match self {
            PlanError::InsufficientCapacity(report) => Some(report),
            _ => None,
        }
    }
}

impl From<StandError> for PlanError {
    fn from(err: StandError) -> Self {
        match err {
            StandError::InsufficientBriefingData => PlanError::InsufficientBriefingData,
            StandError::Invalid(violation) => PlanError::InvalidStandSpec(violation),
        }
    }
}
