use estande::entities::ValidationReport;
use estande::io::ext_repr::{ExtBriefing, ExtLayout, ExtNormalizedLayout};
use estande::io::export::export_layout;
use estande::io::normalized::RowCorrection;
use serde::{Deserialize, Serialize};

use crate::config::FPGConfig;
use crate::error::{PlanError, PlanStage};
use crate::opt::Plan;
use crate::opt::audit::Audit;

/// Everything a caller needs to know about one planning run
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PlanOutput {
    pub success: bool,
    /// Last stage reached, `failed` runs report the stage they stopped at in `error`
    pub stage: PlanStage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<ExtLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ExtPlanError>,
    pub briefing: ExtBriefing,
    pub config: FPGConfig,
}

/// Human-readable message plus the machine-readable fields of a [`PlanError`]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtPlanError {
    pub kind: String,
    pub stage: PlanStage,
    pub message: String,
    pub details: serde_json::Value,
}

impl From<&PlanError> for ExtPlanError {
    fn from(err: &PlanError) -> Self {
        ExtPlanError {
            kind: err.kind().to_string(),
            stage: err.stage(),
            message: err.to_string(),
            details: err.details(),
        }
    }
}

impl PlanOutput {
    pub fn new(result: &Result<Plan, PlanError>, briefing: ExtBriefing, config: FPGConfig) -> Self {
        match result {
            Ok(plan) => PlanOutput {
                success: true,
                stage: PlanStage::Done,
                layout: Some(export_layout(&plan.layout)),
                svg: Some(plan.svg.clone()),
                validation: Some(plan.validation.clone()),
                error: None,
                briefing,
                config,
            },
            Err(err) => PlanOutput {
                success: false,
                stage: PlanStage::Failed,
                layout: None,
                svg: None,
                validation: err.validation_report().cloned(),
                error: Some(ExtPlanError::from(err)),
                briefing,
                config,
            },
        }
    }
}

impl PlanOutput {
    /// `plan_<stem>.json` for a plan, `error_<stem>.json` for the error report of a failed run
    pub fn file_name(&self, stem: &str) -> String {
        match self.success {
            true => format!("plan_{stem}.json"),
            false => format!("error_{stem}.json"),
        }
    }
}

/// Report of an audited normalized layout
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AuditOutput {
    pub valid: bool,
    pub layout: ExtLayout,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub row_corrections: Vec<RowCorrection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overlaps: Vec<(String, String)>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outside: Vec<String>,
    #[serde(flatten)]
    pub input: ExtNormalizedLayout,
}

impl AuditOutput {
    pub fn new(audit: &Audit, input: ExtNormalizedLayout) -> Self {
        AuditOutput {
            valid: audit.is_valid(),
            layout: export_layout(&audit.layout),
            row_corrections: audit.row_corrections.clone(),
            overlaps: audit.overlaps.clone(),
            outside: audit.outside.clone(),
            input,
        }
    }
}
