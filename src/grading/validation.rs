use super::config::{GradingConfig, MAX_TOTAL_POINTS, ROUNDING_OPTIONS};
use super::method::GradingMethod;

/// Validate a grading configuration.
/// Returns all validation errors at once (not just the first).
///
/// The engine itself accepts degenerate configurations; this is for callers
/// that want to warn about or reject them before use.
pub fn validate_config(config: &GradingConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if !config.total_points.is_finite() || config.total_points <= 0.0 {
        errors.push(format!(
            "totalPoints: must be a positive number (got {})",
            config.total_points
        ));
    } else if config.total_points > MAX_TOTAL_POINTS {
        errors.push(format!(
            "totalPoints: must be at most {} (got {})",
            MAX_TOTAL_POINTS, config.total_points
        ));
    }

    if !(1.0..=10.0).contains(&config.voldoende) {
        errors.push(format!(
            "voldoende: must be between 1 and 10 (got {})",
            config.voldoende
        ));
    }

    if let Err(e) = GradingMethod::parse(&config.method) {
        errors.push(format!("method: {}", e));
    }

    if !(0.0..=100.0).contains(&config.pass_percentage) {
        errors.push(format!(
            "passPercentage: must be between 0 and 100 (got {})",
            config.pass_percentage
        ));
    }

    // NaN fails the comparison as well
    if !(config.fouten_k_factor > 0.0) {
        errors.push(format!(
            "foutenKFactor: must be greater than 0 (got {})",
            config.fouten_k_factor
        ));
    }

    if !(config.goed_k_factor > 0.0) {
        errors.push(format!(
            "goedKFactor: must be greater than 0 (got {})",
            config.goed_k_factor
        ));
    }

    if !(0.0..=config.total_points).contains(&config.fixed_cutoff) {
        errors.push(format!(
            "fixedCutoff: must be between 0 and totalPoints {} (got {})",
            config.total_points, config.fixed_cutoff
        ));
    }

    if !ROUNDING_OPTIONS.contains(&config.rounding) {
        errors.push(format!(
            "rounding: must be one of 1, 0.5, 0.1, 0.01 (got {})",
            config.rounding
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&GradingConfig::default()).is_ok());
    }

    #[test]
    fn test_non_positive_total() {
        let config = GradingConfig {
            total_points: 0.0,
            fixed_cutoff: 0.0,
            ..GradingConfig::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("totalPoints"));
    }

    #[test]
    fn test_oversized_total() {
        let config = GradingConfig {
            total_points: 1e20,
            ..GradingConfig::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("at most 10000"));
    }

    #[test]
    fn test_unknown_method() {
        let config = GradingConfig {
            method: "z-score".to_string(),
            ..GradingConfig::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].starts_with("method:"));
        assert!(errors[0].contains("z-score"));
    }

    #[test]
    fn test_zero_k_factor() {
        let config = GradingConfig {
            fouten_k_factor: 0.0,
            ..GradingConfig::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("foutenKFactor"));
    }

    #[test]
    fn test_nan_k_factor() {
        let config = GradingConfig {
            goed_k_factor: f64::NAN,
            ..GradingConfig::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_cutoff_above_total() {
        let config = GradingConfig {
            fixed_cutoff: 60.0,
            ..GradingConfig::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("fixedCutoff"));
    }

    #[test]
    fn test_unsupported_rounding() {
        let config = GradingConfig {
            rounding: 0.25,
            ..GradingConfig::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("rounding"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = GradingConfig {
            voldoende: 11.0,                // Error 1
            method: "bogus".to_string(),    // Error 2
            pass_percentage: 120.0,         // Error 3
            goed_k_factor: -1.0,            // Error 4
            ..GradingConfig::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }
}
