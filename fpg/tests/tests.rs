#[cfg(test)]
mod tests {
    use estande::entities::{Layout, Priority, StandSpec, ZoneKind, ZoneRequest};
    use estande::io::export::export_layout;
    use estande::io::ext_repr::{ExtBriefing, ExtLayout};
    use estande::io::import::import_layout;
    use estande::io::svg::{SvgDrawOptions, render_layout};
    use estande::util::assertions::{overlapping_pairs, zones_outside};
    use float_cmp::approx_eq;
    use fpg::config::FPGConfig;
    use fpg::error::{PlanError, PlanStage};
    use fpg::opt::validator::validate;
    use fpg::opt::{LayoutPlanner, Plan};
    use proptest::prelude::*;
    use test_case::test_case;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn briefing(json: &str) -> ExtBriefing {
        serde_json::from_str(json).unwrap()
    }

    fn plan_briefing(json: &str) -> (LayoutPlanner, Result<Plan, PlanError>) {
        init_logger();
        let mut planner = LayoutPlanner::new(FPGConfig::default());
        let result = planner.plan_briefing(&briefing(json));
        (planner, result)
    }

    fn rects(layout: &Layout) -> Vec<(f64, f64, f64, f64)> {
        layout
            .placed_zones()
            .iter()
            .map(|z| (z.x, z.y, z.width, z.depth))
            .collect()
    }

    #[test]
    fn small_stand_without_zones() {
        let (planner, result) = plan_briefing(r#"{"frontage_m": 11.0, "depth_m": 8.0}"#);
        let plan = result.unwrap();
        assert_eq!(planner.stage(), PlanStage::Done);

        let report = &plan.validation;
        assert!(report.can_proceed);
        assert_eq!(report.required_area_m2, 16.76);

        let zones = plan.layout.placed_zones();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].kind, ZoneKind::Exhibition);
        assert_eq!(zones[0].priority, Priority::High);
        assert_eq!((zones[0].x, zones[0].y), (0.0, 0.0));
        assert!(approx_eq!(f64, zones[0].area, 12.0, epsilon = 0.05));
        assert!(plan.svg.starts_with("<?xml"));
    }

    #[test]
    fn exhibition_request_without_area() {
        let (_, result) = plan_briefing(
            r#"{
                "frontage_m": 11.0,
                "depth_m": 8.0,
                "zone_requests": [{"kind": "exhibition", "priority": "high"}]
            }"#,
        );
        let plan = result.unwrap();
        assert_eq!(plan.validation.zones_area_m2, 12.0);
        assert_eq!(plan.validation.required_area_m2, 16.76);

        let zones = plan.layout.placed_zones();
        assert_eq!(zones.len(), 1);
        assert_eq!((zones[0].x, zones[0].y), (0.0, 0.0));
        assert!(approx_eq!(f64, zones[0].area, 12.0, epsilon = 0.05));
    }

    #[test]
    fn optional_zone_fits_against_the_far_edge() {
        let (_, result) = plan_briefing(
            r#"{
                "frontage_m": 7.0,
                "depth_m": 6.0,
                "zone_requests": [
                    {"kind": "exhibition", "requested_area_m2": 12.25, "priority": "high"},
                    {"kind": "demo", "requested_area_m2": 14.45, "priority": "low"}
                ]
            }"#,
        );
        let plan = result.unwrap();
        assert!(plan.layout.dropped_zones().is_empty());
        assert_eq!(
            rects(&plan.layout),
            vec![(0.0, 0.0, 3.5, 3.5), (3.6, 0.0, 3.4, 4.25)]
        );
    }

    #[test]
    fn capacity_shortage_stops_before_placement() {
        let (planner, result) = plan_briefing(
            r#"{
                "frontage_m": 5.0,
                "depth_m": 4.0,
                "zone_requests": [
                    {"kind": "storage", "requested_area_m2": 8.0, "priority": "high"},
                    {"kind": "workshop", "requested_area_m2": 10.0, "priority": "high"}
                ]
            }"#,
        );
        let err = result.unwrap_err();
        assert_eq!(planner.stage(), PlanStage::Failed);
        assert_eq!(err.stage(), PlanStage::CheckingCapacity);

        let report = err.validation_report().unwrap();
        assert!(!report.can_proceed);
        assert_eq!(report.zones_area_m2, 18.0);
        assert_eq!(report.circulation_area_m2, 4.5);
        assert_eq!(report.deficit_m2, 3.5);
        assert_eq!(report.per_zone_breakdown.len(), 2);
    }

    #[test]
    fn declared_area_rescales_dimensions() {
        let (_, result) =
            plan_briefing(r#"{"declared_area_m2": 100.0, "frontage_m": 10.0, "depth_m": 9.0}"#);
        let stand = *result.unwrap().layout.stand();
        assert_eq!(stand.width(), 10.54);
        assert_eq!(stand.depth(), 9.49);
        assert_eq!(stand.area_total(), 100.0);
    }

    #[test_case(r#"{"declared_area_m2": 2.0}"#, "invalid_stand_spec"; "too small")]
    #[test_case(r#"{"declared_area_m2": 2500.0}"#, "invalid_stand_spec"; "implausible")]
    #[test_case(r#"{"frontage_m": 120.0, "depth_m": 5.0}"#, "invalid_stand_spec"; "too wide")]
    #[test_case(r#"{"frontage_m": 12.0}"#, "insufficient_briefing_data"; "single dimension")]
    #[test_case(r#"{}"#, "insufficient_briefing_data"; "empty briefing")]
    fn rejected_briefings(json: &str, kind: &str) {
        let (planner, result) = plan_briefing(json);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), kind);
        assert_eq!(err.stage(), PlanStage::ValidatingInput);
        assert_eq!(planner.stage(), PlanStage::Failed);
    }

    #[test]
    fn too_small_names_the_bound() {
        let (_, result) = plan_briefing(r#"{"declared_area_m2": 2.0}"#);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("too small"), "{message}");
    }

    #[test]
    fn default_zone_on_declared_area() {
        let (_, result) = plan_briefing(r#"{"declared_area_m2": 88.0, "zone_requests": []}"#);
        let plan = result.unwrap();
        assert!(plan.validation.can_proceed);
        assert_eq!(plan.validation.per_zone_breakdown.len(), 1);
        assert_eq!(plan.validation.zones_area_m2, 12.0);
        assert_eq!(plan.layout.placed_zones().len(), 1);
        assert_eq!(plan.layout.placed_zones()[0].display_name, "Exposição 1");
    }

    #[test]
    fn unplaceable_optional_zone_is_dropped() {
        let (_, result) = plan_briefing(
            r#"{
                "frontage_m": 10.0,
                "depth_m": 10.0,
                "zone_requests": [
                    {"kind": "exhibition", "requested_area_m2": 16.0, "priority": "medium"},
                    {"kind": "exhibition", "requested_area_m2": 16.0, "priority": "medium"},
                    {"kind": "demo", "requested_area_m2": 30.0, "priority": "low"},
                    {"kind": "exhibition", "requested_area_m2": 16.0, "priority": "medium"}
                ]
            }"#,
        );
        let plan = result.unwrap();
        let layout = &plan.layout;

        assert_eq!(
            rects(layout),
            vec![(0.0, 0.0, 4.0, 4.0), (6.0, 0.0, 4.0, 4.0), (0.0, 4.0, 4.0, 4.0)]
        );
        assert_eq!(layout.dropped_zones().len(), 1);
        assert_eq!(layout.dropped_zones()[0].kind, ZoneKind::Demo);
        assert_eq!(layout.dropped_zones()[0].display_name, "Demonstração 1");
        assert_eq!(layout.used_area(), 48.0);
        assert_eq!(layout.occupancy_pct(), 48.0);
        //three zones placed: horizontal corridor only
        assert_eq!(layout.circulation().len(), 1);

        let ext = export_layout(layout);
        assert_eq!(ext.dropped_zones.len(), 1);
        assert_eq!(ext.entrances[0].x, 4.0);
    }

    #[test]
    fn meeting_room_sized_by_capacity() {
        let (_, result) = plan_briefing(
            r#"{
                "frontage_m": 12.0,
                "depth_m": 10.0,
                "zones": [
                    {"kind": "sala_reuniao", "capacity": 8, "priority": "alta"},
                    {"kind": "copa", "priority": "baixa", "label": "Copa VIP"}
                ]
            }"#,
        );
        let plan = result.unwrap();
        let zones = plan.layout.placed_zones();

        let meeting = &zones[0];
        assert_eq!(meeting.kind, ZoneKind::Meeting);
        assert!(approx_eq!(f64, meeting.area, 12.0, epsilon = 0.05));
        //private zones go to the rear
        assert!(approx_eq!(f64, meeting.y + meeting.depth, 10.0, epsilon = 1e-9));

        assert_eq!(zones[1].display_name, "Copa VIP");
    }

    #[test]
    fn zero_zone_layout_renders() {
        let stand = StandSpec::from_dimensions(6.0, 4.0).unwrap();
        let layout = Layout::new(stand, vec![], vec![], vec![], vec![]);
        let svg = render_layout(
            &layout,
            &FPGConfig::default().catalog,
            &SvgDrawOptions::default(),
            "",
        );
        assert!(svg.starts_with("<?xml"));
    }

    fn zone_strategy() -> impl Strategy<Value = ZoneRequest> {
        (
            0..ZoneKind::KNOWN.len(),
            proptest::option::of(1.0..30.0f64),
            0..3usize,
            any::<bool>(),
        )
            .prop_map(|(kind, area, priority, adjacent)| {
                let priority = [Priority::High, Priority::Medium, Priority::Low][priority];
                let zone = ZoneRequest::new(ZoneKind::KNOWN[kind].clone(), priority)
                    .with_adjacent_to_entrance(adjacent);
                match area {
                    Some(area) => zone.with_area(area),
                    None => zone,
                }
            })
    }

    fn stand_strategy() -> impl Strategy<Value = StandSpec> {
        (3.0..25.0f64, 3.0..25.0f64)
            .prop_map(|(width, depth)| StandSpec::from_dimensions(width, depth).unwrap())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn accepted_layouts_are_overlap_free_and_contained(
            stand in stand_strategy(),
            zones in proptest::collection::vec(zone_strategy(), 0..7),
        ) {
            if let Ok(plan) = LayoutPlanner::new(FPGConfig::default()).plan(stand, zones, "") {
                let layout = &plan.layout;
                prop_assert!(overlapping_pairs(layout.placed_zones()).is_empty());
                prop_assert!(zones_outside(&stand.rect(), layout.placed_zones()).is_empty());
                for zone in layout.placed_zones() {
                    prop_assert!(zone.x >= 0.0 && zone.y >= 0.0);
                    prop_assert!(zone.x + zone.width <= stand.width() + 1e-6);
                    prop_assert!(zone.y + zone.depth <= stand.depth() + 1e-6);
                }
            }
        }

        #[test]
        fn planning_is_deterministic(
            stand in stand_strategy(),
            zones in proptest::collection::vec(zone_strategy(), 0..7),
        ) {
            let first = LayoutPlanner::new(FPGConfig::default()).plan(stand, zones.clone(), "");
            let second = LayoutPlanner::new(FPGConfig::default()).plan(stand, zones, "");
            match (first, second) {
                (Ok(a), Ok(b)) => {
                    prop_assert_eq!(rects(&a.layout), rects(&b.layout));
                    prop_assert_eq!(a.svg, b.svg);
                }
                (Err(a), Err(b)) => prop_assert_eq!(a.kind(), b.kind()),
                _ => prop_assert!(false, "identical inputs gave different outcomes"),
            }
        }

        #[test]
        fn over_budget_never_places(
            stand in stand_strategy(),
            zones in proptest::collection::vec(zone_strategy(), 1..7),
        ) {
            let config = FPGConfig::default();
            let report = validate(&stand, &zones, &config);
            let result = LayoutPlanner::new(config).plan(stand, zones, "");
            if report.required_area_m2 > report.available_area_m2 {
                prop_assert!(!report.can_proceed);
                prop_assert!(matches!(result, Err(PlanError::InsufficientCapacity(_))));
            }
            if !report.can_proceed {
                prop_assert!(result.is_err());
            }
        }

        #[test]
        fn json_round_trip_keeps_geometry(
            stand in stand_strategy(),
            zones in proptest::collection::vec(zone_strategy(), 0..7),
        ) {
            if let Ok(plan) = LayoutPlanner::new(FPGConfig::default()).plan(stand, zones, "") {
                let ext = export_layout(&plan.layout);
                let json = serde_json::to_string(&ext).unwrap();
                let parsed: ExtLayout = serde_json::from_str(&json).unwrap();
                prop_assert_eq!(&parsed, &ext);

                let reimported = import_layout(&parsed).unwrap();
                let original = rects(&plan.layout);
                let restored = rects(&reimported);
                prop_assert_eq!(original.len(), restored.len());
                for (a, b) in original.iter().zip(restored.iter()) {
                    prop_assert!((a.0 - b.0).abs() <= 0.005 && (a.1 - b.1).abs() <= 0.005);
                    prop_assert!((a.2 - b.2).abs() <= 0.005 && (a.3 - b.3).abs() <= 0.005);
                }
            }
        }

        #[test]
        fn svg_is_always_produced(
            stand in stand_strategy(),
            zones in proptest::collection::vec(zone_strategy(), 0..7),
            canvas_px in -100.0..1000.0f64,
        ) {
            let mut config = FPGConfig::default();
            config.svg_draw_options.canvas_px = canvas_px;
            if let Ok(plan) = LayoutPlanner::new(config).plan(stand, zones, "") {
                prop_assert!(plan.svg.starts_with("<?xml") || plan.svg.starts_with("<svg"));
            }
        }
    }
}
