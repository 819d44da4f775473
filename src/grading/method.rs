use super::config::GradingConfig;
use super::error::{GradingError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradingMethod {
    NTerm,
    Percentage,
    Fouten,
    Goed,
    FixedCutoff,
}

impl GradingMethod {
    /// All methods in picker order.
    pub const ALL: [GradingMethod; 5] = [
        GradingMethod::NTerm,
        GradingMethod::Percentage,
        GradingMethod::Fouten,
        GradingMethod::Goed,
        GradingMethod::FixedCutoff,
    ];

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim() {
            "n-term" => Ok(GradingMethod::NTerm),
            "percentage" => Ok(GradingMethod::Percentage),
            "fouten" => Ok(GradingMethod::Fouten),
            "goed" => Ok(GradingMethod::Goed),
            "fixed-cutoff" => Ok(GradingMethod::FixedCutoff),
            other => Err(GradingError::UnknownMethod(other.to_string())),
        }
    }

    /// Selector string as stored in [`GradingConfig::method`].
    pub fn as_str(&self) -> &'static str {
        match self {
            GradingMethod::NTerm => "n-term",
            GradingMethod::Percentage => "percentage",
            GradingMethod::Fouten => "fouten",
            GradingMethod::Goed => "goed",
            GradingMethod::FixedCutoff => "fixed-cutoff",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GradingMethod::NTerm => "N-term",
            GradingMethod::Percentage => "Cesuur %",
            GradingMethod::Fouten => "Fouten per punt",
            GradingMethod::Goed => "Goed per punt",
            GradingMethod::FixedCutoff => "Punten Cesuur",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GradingMethod::NTerm => "Cijfer = 9 × (Score / Totaal) + N",
            GradingMethod::Percentage => "Lineaire schaal met cesuur percentage",
            GradingMethod::Fouten => "Cijfer = 10 - (Fouten / K)",
            GradingMethod::Goed => "Cijfer = 1 + (Score / K)",
            GradingMethod::FixedCutoff => "Lineaire schaal met vast puntenaantal voor voldoende",
        }
    }

    /// Next method in picker order, wrapping around.
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|m| m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        let idx = Self::ALL.iter().position(|m| m == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// The live parameter set of a configuration.
///
/// Built from the flat [`GradingConfig`] at dispatch time. Each variant carries
/// only what its formula reads, so inactive method fields cannot leak into a
/// calculation.
#[derive(Debug, Clone, PartialEq)]
pub enum Formula {
    NTerm { n_term: f64 },
    Percentage { pass_percentage: f64, voldoende: f64 },
    Fouten { k_factor: f64 },
    Goed { k_factor: f64 },
    FixedCutoff { cutoff_points: f64, voldoende: f64 },
}

impl Formula {
    pub fn from_config(config: &GradingConfig) -> Result<Self> {
        let formula = match GradingMethod::parse(&config.method)? {
            GradingMethod::NTerm => Formula::NTerm {
                n_term: config.n_term,
            },
            GradingMethod::Percentage => Formula::Percentage {
                pass_percentage: config.pass_percentage,
                voldoende: config.voldoende,
            },
            GradingMethod::Fouten => Formula::Fouten {
                k_factor: config.fouten_k_factor,
            },
            GradingMethod::Goed => Formula::Goed {
                k_factor: config.goed_k_factor,
            },
            GradingMethod::FixedCutoff => Formula::FixedCutoff {
                cutoff_points: config.fixed_cutoff,
                voldoende: config.voldoende,
            },
        };
        Ok(formula)
    }

    pub fn method(&self) -> GradingMethod {
        match self {
            Formula::NTerm { .. } => GradingMethod::NTerm,
            Formula::Percentage { .. } => GradingMethod::Percentage,
            Formula::Fouten { .. } => GradingMethod::Fouten,
            Formula::Goed { .. } => GradingMethod::Goed,
            Formula::FixedCutoff { .. } => GradingMethod::FixedCutoff,
        }
    }

    /// Unclamped grade for `score` out of `total`.
    pub fn apply(&self, score: f64, total: f64) -> f64 {
        match self {
            Formula::NTerm { n_term } => 9.0 * (score / total) + n_term,
            Formula::Percentage {
                pass_percentage,
                voldoende,
            } => {
                let pass_points = (pass_percentage / 100.0) * total;
                piecewise(score, total, pass_points, *voldoende)
            }
            Formula::Fouten { k_factor } => {
                let mistakes = total - score;
                10.0 - mistakes / k_factor
            }
            Formula::Goed { k_factor } => 1.0 + score / k_factor,
            Formula::FixedCutoff {
                cutoff_points,
                voldoende,
            } => piecewise(score, total, *cutoff_points, *voldoende),
        }
    }
}

/// Linear from (0, 1) to (breakpoint, voldoende), then to (total, 10).
/// A zero-width segment yields its end value instead of dividing by zero.
fn piecewise(score: f64, total: f64, breakpoint: f64, voldoende: f64) -> f64 {
    if score <= breakpoint {
        if breakpoint == 0.0 {
            return voldoende;
        }
        1.0 + ((voldoende - 1.0) * score) / breakpoint
    } else {
        let remaining = total - breakpoint;
        if remaining == 0.0 {
            return 10.0;
        }
        voldoende + ((10.0 - voldoende) * (score - breakpoint)) / remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(method: &str) -> GradingConfig {
        GradingConfig {
            method: method.to_string(),
            ..GradingConfig::default()
        }
    }

    #[test]
    fn test_parse_all_methods() {
        for method in GradingMethod::ALL {
            assert_eq!(GradingMethod::parse(method.as_str()).unwrap(), method);
        }
    }

    #[test]
    fn test_parse_unknown_method() {
        let err = GradingMethod::parse("z-score").unwrap_err();
        assert_eq!(err, GradingError::UnknownMethod("z-score".to_string()));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!(GradingMethod::parse("N-Term").is_err());
    }

    #[test]
    fn test_next_and_previous_wrap() {
        assert_eq!(GradingMethod::NTerm.next(), GradingMethod::Percentage);
        assert_eq!(GradingMethod::FixedCutoff.next(), GradingMethod::NTerm);
        assert_eq!(GradingMethod::NTerm.previous(), GradingMethod::FixedCutoff);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(GradingMethod::Percentage.display_name(), "Cesuur %");
        assert_eq!(GradingMethod::FixedCutoff.display_name(), "Punten Cesuur");
    }

    #[test]
    fn test_formula_carries_only_live_fields() {
        let mut config = config_with("goed");
        config.goed_k_factor = 4.0;
        config.fouten_k_factor = 99.0;

        let formula = Formula::from_config(&config).unwrap();
        assert_eq!(formula, Formula::Goed { k_factor: 4.0 });
        assert_eq!(formula.method(), GradingMethod::Goed);
    }

    #[test]
    fn test_n_term_formula() {
        let formula = Formula::NTerm { n_term: 1.0 };
        assert_eq!(formula.apply(50.0, 50.0), 10.0);
        assert_eq!(formula.apply(0.0, 50.0), 1.0);
        assert_eq!(formula.apply(25.0, 50.0), 5.5);
    }

    #[test]
    fn test_fouten_formula() {
        let formula = Formula::Fouten { k_factor: 5.0 };
        // 10 mistakes, 5 per point
        assert_eq!(formula.apply(40.0, 50.0), 8.0);
    }

    #[test]
    fn test_goed_formula() {
        let formula = Formula::Goed { k_factor: 5.0 };
        assert_eq!(formula.apply(20.0, 50.0), 5.0);
    }

    #[test]
    fn test_percentage_segments() {
        let formula = Formula::Percentage {
            pass_percentage: 50.0,
            voldoende: 5.5,
        };
        assert_eq!(formula.apply(0.0, 50.0), 1.0);
        assert_eq!(formula.apply(25.0, 50.0), 5.5);
        assert_eq!(formula.apply(50.0, 50.0), 10.0);
        // halfway up the upper segment
        assert_eq!(formula.apply(37.5, 50.0), 7.75);
    }

    #[test]
    fn test_piecewise_zero_width_lower_segment() {
        assert_eq!(piecewise(0.0, 50.0, 0.0, 5.5), 5.5);
    }

    #[test]
    fn test_piecewise_zero_width_upper_segment() {
        // score above a breakpoint equal to total
        assert_eq!(piecewise(51.0, 50.0, 50.0, 5.5), 10.0);
    }
}
