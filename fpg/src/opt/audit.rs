use estande::entities::Layout;
use estande::io::ext_repr::ExtNormalizedLayout;
use estande::io::normalized::{RowCorrection, fill_row_coverage, to_layout};
use estande::util::assertions::{overlapping_pairs, zones_outside};
use log::{info, warn};

use crate::config::FPGConfig;
use crate::error::PlanError;

/// A layout drawn by someone else, after row normalization and its geometric checks
#[derive(Clone, Debug)]
pub struct Audit {
    pub layout: Layout,
    pub row_corrections: Vec<RowCorrection>,
    /// Display names of zone pairs that overlap
    pub overlaps: Vec<(String, String)>,
    /// Display names of zones that stick out of the stand
    pub outside: Vec<String>,
}

impl Audit {
    pub fn is_valid(&self) -> bool {
        self.overlaps.is_empty() && self.outside.is_empty()
    }
}

/// Stretches incomplete rows to the full frontage, converts the layout to meters and checks it.
pub fn audit_normalized(ext: &ExtNormalizedLayout, config: &FPGConfig) -> Result<Audit, PlanError> {
    let mut ext = ext.clone();
    let row_corrections = fill_row_coverage(&mut ext.areas, config.row_coverage_tolerance);
    let layout = to_layout(&ext, &config.catalog)?;

    let zones = layout.placed_zones();
    let overlaps = overlapping_pairs(zones)
        .into_iter()
        .map(|(i, j)| (zones[i].display_name.clone(), zones[j].display_name.clone()))
        .collect::<Vec<_>>();
    let outside = zones_outside(&layout.stand().rect(), zones)
        .into_iter()
        .map(|i| zones[i].display_name.clone())
        .collect::<Vec<_>>();

    for (a, b) in &overlaps {
        warn!("[AUDIT] {a} overlaps with {b}");
    }
    for name in &outside {
        warn!("[AUDIT] {name} exceeds the stand");
    }
    info!(
        "[AUDIT] {} areas, {} row(s) corrected, {} overlap(s), {} outside the stand",
        zones.len(),
        row_corrections.len(),
        overlaps.len(),
        outside.len()
    );

    Ok(Audit {
        layout,
        row_corrections,
        overlaps,
        outside,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use estande::entities::ZoneKind;
    use estande::io::ext_repr::{ExtBBoxNorm, ExtNormalizedArea};

    fn area(id: &str, kind: ZoneKind, bbox: (f64, f64, f64, f64)) -> ExtNormalizedArea {
        ExtNormalizedArea {
            id: id.into(),
            kind,
            label: None,
            bbox_norm: ExtBBoxNorm {
                x: bbox.0,
                y: bbox.1,
                w: bbox.2,
                h: bbox.3,
            },
        }
    }

    #[test]
    fn stretched_rows_are_overlap_free() {
        let ext = ExtNormalizedLayout {
            width_m: 10.0,
            depth_m: 8.0,
            areas: vec![
                area("a", ZoneKind::Exhibition, (0.0, 0.0, 0.4, 0.5)),
                area("b", ZoneKind::Reception, (0.5, 0.0, 0.4, 0.5)),
                area("c", ZoneKind::Meeting, (0.0, 0.5, 1.0, 0.5)),
            ],
        };
        let audit = audit_normalized(&ext, &FPGConfig::default()).unwrap();
        assert_eq!(audit.row_corrections.len(), 1);
        assert!(audit.is_valid());
        //the input is left untouched
        assert_eq!(ext.areas[1].bbox_norm.x, 0.5);
        assert_eq!(audit.layout.placed_zones()[1].x, 5.0);
    }

    #[test]
    fn overlaps_and_overflow_are_reported() {
        let ext = ExtNormalizedLayout {
            width_m: 10.0,
            depth_m: 8.0,
            areas: vec![
                area("a", ZoneKind::Exhibition, (0.0, 0.0, 1.0, 0.6)),
                area("b", ZoneKind::Storage, (0.0, 0.5, 1.0, 0.6)),
            ],
        };
        let audit = audit_normalized(&ext, &FPGConfig::default()).unwrap();
        assert!(!audit.is_valid());
        assert_eq!(
            audit.overlaps,
            vec![("Exposição 1".to_string(), "Depósito 1".to_string())]
        );
        assert_eq!(audit.outside, vec!["Depósito 1".to_string()]);
    }

    #[test]
    fn invalid_stand_is_rejected() {
        let ext = ExtNormalizedLayout {
            width_m: 0.5,
            depth_m: 8.0,
            areas: vec![],
        };
        assert!(matches!(
            audit_normalized(&ext, &FPGConfig::default()),
            Err(PlanError::InvalidStandSpec(_))
        ));
    }
}
