/// Number of decimals kept in exported geometry (centimeter precision).
pub const PRECISION_DECIMALS: i32 = 2;

/// Rounds a length, area or percentage to [`PRECISION_DECIMALS`] decimals.
pub fn round2(value: f64) -> f64 {
    round_to(value, PRECISION_DECIMALS)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(10.5409, 10.54)]
    #[test_case(9.4868, 9.49)]
    #[test_case(12.0, 12.0)]
    #[test_case(0.005, 0.01)]
    fn rounds_to_centimeters(value: f64, expected: f64) {
        assert_eq!(round2(value), expected);
    }

    #[test]
    fn rounding_is_idempotent() {
        for v in [10.54, 9.49, 0.07, 1234.56] {
            assert_eq!(round2(round2(v)), round2(v));
        }
    }
}
