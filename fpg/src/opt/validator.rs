use estande::entities::{
    AreaSource, StandSpec, ValidationReport, ZoneBreakdown, ZoneKind, ZoneNamer, ZoneRequest,
};
use estande::util::round2;
use log::{info, warn};

use crate::config::FPGConfig;

/// Area (m²) budgeted for a single zone request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaNeeded {
    pub area: f64,
    pub source: AreaSource,
    pub clamped_to_floor: bool,
}

/// Explicit areas are taken verbatim. Exhibition zones without one get the default exhibition area of the stand,
/// other kinds the minimum footprint of the kind in the catalog (or the flat minimum for kinds the catalog does not know).
/// The result is never below `config.min_zone_area`.
pub fn area_needed(zone: &ZoneRequest, stand: &StandSpec, config: &FPGConfig) -> AreaNeeded {
    let (area, source) = match zone.explicit_area() {
        Some(area) => (area, AreaSource::Requested),
        None if zone.kind == ZoneKind::Exhibition => {
            (config.default_exhibition_area(stand), AreaSource::StandDefault)
        }
        None => match config.catalog.lookup(&zone.kind) {
            Some(spec) => (spec.minimum.area(), AreaSource::CatalogMinimum),
            None => (config.min_zone_area, AreaSource::FlatMinimum),
        },
    };
    AreaNeeded {
        area: f64::max(area, config.min_zone_area),
        source,
        clamped_to_floor: area < config.min_zone_area,
    }
}

/// Checks whether the requested zones, together with circulation and a technical margin, fit within the stand.
///
/// `required = zones + circulation_ratio × zones + max(min_technical_area, technical_ratio × stand area)`.
/// Nothing is placed here, this is a cheap gate before any placement work.
pub fn validate(stand: &StandSpec, zones: &[ZoneRequest], config: &FPGConfig) -> ValidationReport {
    let available = stand.area_total();
    let mut namer = ZoneNamer::new(&config.catalog);
    let mut warnings = vec![];

    let per_zone = zones
        .iter()
        .map(|zone| {
            let needed = area_needed(zone, stand, config);
            let display_name = namer.name(&zone.kind, zone.label.as_deref());
            let disproportionate = needed.source == AreaSource::Requested
                && needed.area > config.disproportion_ratio * available;
            if disproportionate {
                warnings.push(format!(
                    "{display_name} requests {:.2} m², {:.1}% of the stand (above {:.0}%)",
                    needed.area,
                    needed.area / available * 100.0,
                    config.disproportion_ratio * 100.0
                ));
            }
            ZoneBreakdown {
                kind: zone.kind.clone(),
                display_name,
                area_m2: round2(needed.area),
                pct_of_stand: round2(needed.area / available * 100.0),
                source: needed.source,
                clamped_to_floor: needed.clamped_to_floor,
                disproportionate,
            }
        })
        .collect::<Vec<_>>();

    let zones_area = zones
        .iter()
        .map(|zone| area_needed(zone, stand, config).area)
        .sum::<f64>();
    let circulation_area = zones_area * config.circulation_ratio;
    let technical_area = f64::max(config.min_technical_area, available * config.technical_ratio);
    let required = zones_area + circulation_area + technical_area;
    let can_proceed = required <= available;
    let deficit = f64::max(0.0, required - available);

    let error_message = match can_proceed {
        true => {
            info!(
                "[CAPACITY] {:.2} m² required of {:.2} m² available ({:.1}%)",
                required,
                available,
                required / available * 100.0
            );
            None
        }
        false => {
            let message = format!(
                "{required:.2} m² required (zones {zones_area:.2} m², circulation {circulation_area:.2} m², technical {technical_area:.2} m²) but the stand only has {available:.2} m²; missing {deficit:.2} m², reduce zone count or increase stand size"
            );
            warn!("[CAPACITY] {message}");
            Some(message)
        }
    };
    for warning in &warnings {
        warn!("[CAPACITY] {warning}");
    }

    ValidationReport {
        can_proceed,
        zones_area_m2: round2(zones_area),
        circulation_area_m2: round2(circulation_area),
        technical_area_m2: round2(technical_area),
        required_area_m2: round2(required),
        available_area_m2: round2(available),
        occupancy_pct: round2(required / available * 100.0),
        deficit_m2: round2(deficit),
        per_zone_breakdown: per_zone,
        warnings,
        error_message,
    }
}
