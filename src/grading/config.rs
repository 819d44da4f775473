use serde::{Deserialize, Serialize};

/// Rounding granularities offered for the grade table and lookup.
pub const ROUNDING_OPTIONS: [f64; 4] = [1.0, 0.5, 0.1, 0.01];

/// Largest total the grade table and chart are generated for.
pub const MAX_TOTAL_POINTS: f64 = 10_000.0;

/// Grading configuration.
///
/// Flat on purpose: every method's parameter is always present so the
/// persisted blob keeps one shape, and a UI can remember a slider position
/// for a method that is not currently selected. Only the fields belonging to
/// `method` take part in a calculation; see [`crate::grading::Formula`].
///
/// Serialized with camelCase keys:
/// ```json
/// {
///   "totalPoints": 50,
///   "voldoende": 5.5,
///   "method": "n-term",
///   "nTerm": 1.0,
///   "passPercentage": 55,
///   "foutenKFactor": 5,
///   "goedKFactor": 5,
///   "fixedCutoff": 27,
///   "rounding": 0.1
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GradingConfig {
    /// Maximum achievable score
    pub total_points: f64,

    /// Minimum grade that counts as passing
    pub voldoende: f64,

    /// Active method selector, e.g. "n-term" or "fixed-cutoff"
    pub method: String,

    /// Offset for the n-term method
    pub n_term: f64,

    /// Cesuur as a percentage of `total_points` (percentage method)
    pub pass_percentage: f64,

    /// Mistakes per grade point (fouten method)
    pub fouten_k_factor: f64,

    /// Correct answers per grade point (goed method)
    pub goed_k_factor: f64,

    /// Cesuur in raw points (fixed-cutoff method)
    pub fixed_cutoff: f64,

    /// Grade rounding granularity, one of [`ROUNDING_OPTIONS`]
    pub rounding: f64,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            total_points: 50.0,
            voldoende: 5.5,
            method: "n-term".to_string(),
            n_term: 1.0,
            pass_percentage: 55.0,
            fouten_k_factor: 5.0,
            goed_k_factor: 5.0,
            fixed_cutoff: 27.0,
            rounding: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GradingConfig::default();

        assert_eq!(config.total_points, 50.0);
        assert_eq!(config.voldoende, 5.5);
        assert_eq!(config.method, "n-term");
        assert_eq!(config.rounding, 0.1);
    }

    #[test]
    fn test_serializes_camel_case_keys() {
        let json = serde_json::to_value(GradingConfig::default()).unwrap();
        let obj = json.as_object().unwrap();

        for key in [
            "totalPoints",
            "voldoende",
            "method",
            "nTerm",
            "passPercentage",
            "foutenKFactor",
            "goedKFactor",
            "fixedCutoff",
            "rounding",
        ] {
            assert!(obj.contains_key(key), "missing key {}", key);
        }
        assert_eq!(obj.len(), 9);
    }

    #[test]
    fn test_parse_persisted_blob() {
        let json = r#"{
            "totalPoints": 27.5,
            "voldoende": 6,
            "method": "fixed-cutoff",
            "nTerm": 1.2,
            "passPercentage": 60,
            "foutenKFactor": 4,
            "goedKFactor": 3,
            "fixedCutoff": 15,
            "rounding": 0.5
        }"#;
        let config: GradingConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.total_points, 27.5);
        assert_eq!(config.method, "fixed-cutoff");
        assert_eq!(config.fixed_cutoff, 15.0);
        assert_eq!(config.rounding, 0.5);
    }

    #[test]
    fn test_unknown_method_string_still_parses() {
        let mut json = serde_json::to_value(GradingConfig::default()).unwrap();
        json["method"] = serde_json::Value::String("z-score".to_string());

        let config: GradingConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.method, "z-score");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let json = r#"{ "totalPoints": 40, "voldoende": 6 }"#;
        let config: GradingConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.total_points, 40.0);
        assert_eq!(config.voldoende, 6.0);
        assert_eq!(config.method, "n-term");
        assert_eq!(config.fixed_cutoff, 27.0);
    }
}
