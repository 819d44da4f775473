/// Lowest grade on the scale.
pub const MIN_GRADE: f64 = 1.0;
/// Highest grade on the scale.
pub const MAX_GRADE: f64 = 10.0;

/// Round `value` to the nearest multiple of `precision`.
/// A precision of 0 rounds to the nearest integer. Halves round away from zero.
pub fn round_to_nearest(value: f64, precision: f64) -> f64 {
    if precision == 0.0 {
        return value.round();
    }
    (value / precision).round() * precision
}

/// Force a raw grade onto the 1-10 scale. NaN (e.g. 0/0 with a zero K factor)
/// maps to the minimum grade.
pub fn clamp_grade(grade: f64) -> f64 {
    if grade.is_nan() {
        return MIN_GRADE;
    }
    grade.clamp(MIN_GRADE, MAX_GRADE)
}

/// Round to two decimals for chart display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Decimal places shown for a grade at the given rounding granularity.
pub fn display_decimals(precision: f64) -> usize {
    if precision >= 1.0 {
        0
    } else if precision == 0.5 || precision == 0.1 {
        1
    } else {
        2
    }
}

/// Format `value` with a fixed number of decimals, rounding halves away from zero.
pub fn to_fixed(value: f64, decimals: usize) -> String {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    // avoid "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.*}", decimals, rounded)
}

/// Display string for a grade; the decimal count follows the rounding
/// granularity, not the value.
pub fn format_grade(grade: f64, precision: f64) -> String {
    to_fixed(grade, display_decimals(precision))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_half() {
        assert_eq!(round_to_nearest(5.43, 0.5), 5.5);
        assert_eq!(round_to_nearest(5.2, 0.5), 5.0);
    }

    #[test]
    fn test_round_to_tenth() {
        assert!((round_to_nearest(5.43, 0.1) - 5.4).abs() < 1e-9);
        assert!((round_to_nearest(5.46, 0.1) - 5.5).abs() < 1e-9);
    }

    #[test]
    fn test_round_to_integer() {
        assert_eq!(round_to_nearest(5.43, 1.0), 5.0);
        assert_eq!(round_to_nearest(5.5, 1.0), 6.0);
    }

    #[test]
    fn test_round_zero_precision() {
        assert_eq!(round_to_nearest(5.43, 0.0), 5.0);
        assert_eq!(round_to_nearest(7.5, 0.0), 8.0);
    }

    #[test]
    fn test_clamp_grade() {
        assert_eq!(clamp_grade(11.2), 10.0);
        assert_eq!(clamp_grade(-3.0), 1.0);
        assert_eq!(clamp_grade(6.4), 6.4);
        assert_eq!(clamp_grade(f64::INFINITY), 10.0);
        assert_eq!(clamp_grade(f64::NEG_INFINITY), 1.0);
        assert_eq!(clamp_grade(f64::NAN), 1.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(5.4567), 5.46);
        assert_eq!(round2(0.5), 0.5);
    }

    #[test]
    fn test_format_grade() {
        assert_eq!(format_grade(5.5, 0.01), "5.50");
        assert_eq!(format_grade(6.0, 1.0), "6");
        assert_eq!(format_grade(6.0, 0.5), "6.0");
        assert_eq!(format_grade(5.43, 0.1), "5.4");
    }

    #[test]
    fn test_format_grade_rounds_ties_up() {
        assert_eq!(format_grade(2.5, 1.0), "3");
        assert_eq!(format_grade(6.25, 0.1), "6.3");
    }

    #[test]
    fn test_decimals_follow_precision_not_value() {
        assert_eq!(format_grade(7.0, 0.01), "7.00");
        assert_eq!(format_grade(7.123, 1.0), "7");
    }
}
