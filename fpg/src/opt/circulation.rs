use estande::entities::{CirculationArea, CorridorKind, StandSpec};

use crate::config::CorridorConfig;

/// Corridors of a stand with `n_placed` zones.
///
/// A horizontal corridor always crosses the full frontage at mid-depth.
/// Once more than `vertical_after_n_zones` zones are placed, a vertical one runs the full depth at mid-width.
pub fn compute_circulation(
    stand: &StandSpec,
    n_placed: usize,
    config: &CorridorConfig,
) -> Vec<CirculationArea> {
    let (width, depth) = (stand.width(), stand.depth());

    let h = f64::min(config.max_width, config.horizontal_fraction * depth);
    let mut corridors = vec![CirculationArea::new(
        CorridorKind::HorizontalCorridor,
        0.0,
        depth / 2.0 - h / 2.0,
        width,
        h,
    )];

    if n_placed > config.vertical_after_n_zones {
        let w = f64::min(config.max_width, config.vertical_fraction * width);
        corridors.push(CirculationArea::new(
            CorridorKind::VerticalCorridor,
            width / 2.0 - w / 2.0,
            0.0,
            w,
            depth,
        ));
    }
    corridors
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use test_case::test_case;

    #[test_case(3, 1; "three zones")]
    #[test_case(4, 2; "four zones")]
    #[test_case(0, 1; "no zones")]
    fn vertical_corridor_after_three_zones(n_placed: usize, n_corridors: usize) {
        let stand = StandSpec::from_dimensions(10.0, 10.0).unwrap();
        let corridors = compute_circulation(&stand, n_placed, &CorridorConfig::default());
        assert_eq!(corridors.len(), n_corridors);
    }

    #[test]
    fn corridor_dimensions() {
        let stand = StandSpec::from_dimensions(11.0, 6.0).unwrap();
        let corridors = compute_circulation(&stand, 5, &CorridorConfig::default());

        let horizontal = &corridors[0];
        assert_eq!(horizontal.kind, CorridorKind::HorizontalCorridor);
        //0.15 x 6 = 0.9 < 1.2
        assert!(approx_eq!(f64, horizontal.depth, 0.9, epsilon = 1e-9));
        assert!(approx_eq!(f64, horizontal.y, 2.55, epsilon = 1e-9));
        assert_eq!(horizontal.width, 11.0);

        let vertical = &corridors[1];
        assert_eq!(vertical.kind, CorridorKind::VerticalCorridor);
        //0.10 x 11 = 1.1 < 1.2
        assert!(approx_eq!(f64, vertical.width, 1.1, epsilon = 1e-9));
        assert!(approx_eq!(f64, vertical.x, 4.95, epsilon = 1e-9));
        assert_eq!(vertical.depth, 6.0);
    }

    #[test]
    fn corridor_width_is_capped() {
        let stand = StandSpec::from_dimensions(30.0, 20.0).unwrap();
        let corridors = compute_circulation(&stand, 4, &CorridorConfig::default());
        assert!(corridors.iter().all(|c| c.width.min(c.depth) == 1.2));
    }
}
