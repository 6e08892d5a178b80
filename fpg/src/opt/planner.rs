use std::time::Instant;

use estande::entities::{
    DroppedZone, Entrance, Layout, PlacedZone, StandSpec, ValidationReport, ZoneNamer,
    ZoneRequest,
};
use estande::geometry::OccupancyGrid;
use estande::io::ext_repr::ExtBriefing;
use estande::io::import::import_briefing;
use estande::io::svg::{XML_DECLARATION, layout_to_svg, render_layout};
use estande::util::assertions;
use itertools::Itertools;
use log::{debug, error, info, warn};

use crate::config::FPGConfig;
use crate::error::{PlanError, PlanStage};
use crate::opt::circulation::compute_circulation;
use crate::opt::placement::place_zone;
use crate::opt::sizer::size_zone;
use crate::opt::validator::validate;

/// Reason attached to zones that could not be placed
pub const NO_FREE_POSITION: &str = "no free position left in the stand";

/// Outcome of a successful planning run
#[derive(Clone, Debug)]
pub struct Plan {
    pub layout: Layout,
    pub validation: ValidationReport,
    /// Complete SVG document of the floor plan
    pub svg: String,
}

/// Turns a stand and its zone requests into a floor plan.
///
/// A run moves through [`PlanStage`]s in order and stops at the first error, leaving the planner in
/// [`PlanStage::Failed`]. Every run starts from an empty occupancy grid, so identical inputs yield identical plans.
pub struct LayoutPlanner {
    pub config: FPGConfig,
    stage: PlanStage,
}

impl LayoutPlanner {
    pub fn new(config: FPGConfig) -> Self {
        Self {
            config,
            stage: PlanStage::ValidatingInput,
        }
    }

    /// Stage reached by the last run
    pub fn stage(&self) -> PlanStage {
        self.stage
    }

    /// Plans a briefing, from raw stand numbers onwards.
    pub fn plan_briefing(&mut self, briefing: &ExtBriefing) -> Result<Plan, PlanError> {
        self.stage = PlanStage::ValidatingInput;
        let title = briefing.name.clone().unwrap_or_default();
        match import_briefing(briefing) {
            Ok((stand, zones)) => self.plan(stand, zones, &title),
            Err(err) => {
                let err = PlanError::from(err);
                warn!("[FPG] briefing rejected: {err}");
                self.stage = PlanStage::Failed;
                Err(err)
            }
        }
    }

    /// Plans zones on an already validated stand.
    pub fn plan(
        &mut self,
        stand: StandSpec,
        zones: Vec<ZoneRequest>,
        title: &str,
    ) -> Result<Plan, PlanError> {
        let start = Instant::now();
        let result = self.run(stand, zones, title);
        match &result {
            Ok(plan) => info!(
                "[FPG] placed {}/{} zones, {:.2} m² used ({:.1}%) in {}ms",
                plan.layout.placed_zones().len(),
                plan.layout.placed_zones().len() + plan.layout.dropped_zones().len(),
                plan.layout.used_area(),
                plan.layout.occupancy_pct(),
                start.elapsed().as_millis()
            ),
            Err(err) => {
                warn!("[FPG] run failed while {:?}: {err}", self.stage);
                self.stage = PlanStage::Failed;
            }
        }
        result
    }

    fn run(
        &mut self,
        stand: StandSpec,
        zones: Vec<ZoneRequest>,
        title: &str,
    ) -> Result<Plan, PlanError> {
        self.stage = PlanStage::ValidatingInput;
        let zones = match zones.is_empty() {
            true => {
                let zone = ZoneRequest::default_exhibition(
                    &stand,
                    self.config.default_zone_fraction,
                    self.config.default_zone_cap,
                );
                info!(
                    "[FPG] no zones requested, using a default exhibition area of {:.2} m²",
                    zone.requested_area.unwrap_or_default()
                );
                vec![zone]
            }
            false => zones,
        };

        self.stage = PlanStage::CheckingCapacity;
        let validation = validate(&stand, &zones, &self.config);
        if !validation.can_proceed {
            return Err(PlanError::InsufficientCapacity(Box::new(validation)));
        }

        self.stage = PlanStage::PlacingZones;
        let (placed, dropped) = self.place_zones(&stand, zones)?;

        self.stage = PlanStage::ComputingCirculation;
        let circulation = compute_circulation(&stand, placed.len(), &self.config.corridors);
        let entrances = vec![Entrance::centered(&stand)];
        let layout = Layout::new(stand, placed, circulation, entrances, dropped);

        debug_assert!(assertions::layout_is_overlap_free(&layout));
        debug_assert!(assertions::layout_zones_within_stand(&layout));

        self.stage = PlanStage::Rendering;
        let options = &self.config.svg_draw_options;
        let svg = match self.config.strict_render {
            true => {
                let document = layout_to_svg(&layout, &self.config.catalog, options, title)?;
                format!("{XML_DECLARATION}\n{document}")
            }
            false => render_layout(&layout, &self.config.catalog, options, title),
        };

        self.stage = PlanStage::Done;
        Ok(Plan {
            layout,
            validation,
            svg,
        })
    }

    /// Sizes and places the zones in priority order (input order among equal priorities).
    /// Names are handed out in input order, matching the capacity report.
    fn place_zones(
        &self,
        stand: &StandSpec,
        zones: Vec<ZoneRequest>,
    ) -> Result<(Vec<PlacedZone>, Vec<DroppedZone>), PlanError> {
        let catalog = &self.config.catalog;
        let mut namer = ZoneNamer::new(catalog);
        let named = zones
            .into_iter()
            .map(|zone| {
                let name = namer.name(&zone.kind, zone.label.as_deref());
                (zone, name)
            })
            .sorted_by_key(|(zone, _)| zone.priority)
            .collect_vec();

        let mut grid = OccupancyGrid::new(stand.width(), stand.depth(), self.config.grid_resolution);
        let mut placed = vec![];
        let mut dropped = vec![];

        for (zone, display_name) in named {
            let size = size_zone(&zone, stand, &self.config);
            match place_zone(&mut grid, stand, &zone, &size) {
                Some(origin) => {
                    debug!(
                        "[PLACE] {display_name} ({:.2} x {:.2} m) at ({:.2}, {:.2})",
                        size.width, size.depth, origin.0, origin.1
                    );
                    placed.push(PlacedZone {
                        color: catalog.color(&zone.kind),
                        kind: zone.kind,
                        display_name,
                        x: origin.0,
                        y: origin.1,
                        width: size.width,
                        depth: size.depth,
                        area: size.area,
                        priority: zone.priority,
                    });
                }
                None if zone.priority.is_mandatory() => {
                    error!(
                        "[PLACE] mandatory zone {display_name} ({:.2} x {:.2} m) does not fit anywhere, aborting",
                        size.width, size.depth
                    );
                    return Err(PlanError::UnplaceableHighPriorityZone {
                        kind: zone.kind,
                        display_name,
                        width: size.width,
                        depth: size.depth,
                    });
                }
                None => {
                    warn!(
                        "[PLACE] {} priority zone {display_name} ({:.2} x {:.2} m) does not fit, dropped",
                        zone.priority, size.width, size.depth
                    );
                    dropped.push(DroppedZone {
                        kind: zone.kind,
                        display_name,
                        priority: zone.priority,
                        width: size.width,
                        depth: size.depth,
                        reason: NO_FREE_POSITION.to_string(),
                    });
                }
            }
        }
        Ok((placed, dropped))
    }
}
