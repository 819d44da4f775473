use anyhow::{bail, Context, Result};

use super::config::{GradingConfig, MAX_TOTAL_POINTS, ROUNDING_OPTIONS};
use super::method::GradingMethod;
use super::rounding::to_fixed;

/// An editable field of [`GradingConfig`], with the input bounds and step
/// size of its settings control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    TotalPoints,
    Voldoende,
    Method,
    NTerm,
    PassPercentage,
    FoutenKFactor,
    GoedKFactor,
    FixedCutoff,
    Rounding,
}

impl ConfigField {
    pub const ALL: [ConfigField; 9] = [
        ConfigField::TotalPoints,
        ConfigField::Voldoende,
        ConfigField::Method,
        ConfigField::NTerm,
        ConfigField::PassPercentage,
        ConfigField::FoutenKFactor,
        ConfigField::GoedKFactor,
        ConfigField::FixedCutoff,
        ConfigField::Rounding,
    ];

    /// Accepts the JSON key ("totalPoints") or its kebab form ("total-points").
    pub fn parse(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.key() == wanted || f.kebab_key() == wanted)
            .with_context(|| {
                let keys: Vec<&str> = Self::ALL.iter().map(|f| f.key()).collect();
                format!("Unknown field '{}'. Expected one of: {}", wanted, keys.join(", "))
            })
    }

    /// Key in the persisted JSON blob.
    pub fn key(&self) -> &'static str {
        match self {
            ConfigField::TotalPoints => "totalPoints",
            ConfigField::Voldoende => "voldoende",
            ConfigField::Method => "method",
            ConfigField::NTerm => "nTerm",
            ConfigField::PassPercentage => "passPercentage",
            ConfigField::FoutenKFactor => "foutenKFactor",
            ConfigField::GoedKFactor => "goedKFactor",
            ConfigField::FixedCutoff => "fixedCutoff",
            ConfigField::Rounding => "rounding",
        }
    }

    fn kebab_key(&self) -> &'static str {
        match self {
            ConfigField::TotalPoints => "total-points",
            ConfigField::Voldoende => "voldoende",
            ConfigField::Method => "method",
            ConfigField::NTerm => "n-term",
            ConfigField::PassPercentage => "pass-percentage",
            ConfigField::FoutenKFactor => "fouten-k-factor",
            ConfigField::GoedKFactor => "goed-k-factor",
            ConfigField::FixedCutoff => "fixed-cutoff",
            ConfigField::Rounding => "rounding",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfigField::TotalPoints => "Totaal punten",
            ConfigField::Voldoende => "Voldoende",
            ConfigField::Method => "Methode",
            ConfigField::NTerm => "N-waarde",
            ConfigField::PassPercentage => "Cesuur %",
            ConfigField::FoutenKFactor => "K-factor (fouten)",
            ConfigField::GoedKFactor => "K-factor (goed)",
            ConfigField::FixedCutoff => "Cesuur punten",
            ConfigField::Rounding => "Afronding",
        }
    }

    /// Parameter field read by `method`.
    pub fn for_method(method: GradingMethod) -> ConfigField {
        match method {
            GradingMethod::NTerm => ConfigField::NTerm,
            GradingMethod::Percentage => ConfigField::PassPercentage,
            GradingMethod::Fouten => ConfigField::FoutenKFactor,
            GradingMethod::Goed => ConfigField::GoedKFactor,
            GradingMethod::FixedCutoff => ConfigField::FixedCutoff,
        }
    }

    /// Whether this field is one method's parameter.
    pub fn is_method_parameter(&self) -> bool {
        GradingMethod::ALL
            .iter()
            .any(|m| ConfigField::for_method(*m) == *self)
    }

    /// Input bounds for numeric fields (min, max). The fixed cutoff is
    /// bounded by the configured total.
    pub fn bounds(&self, config: &GradingConfig) -> (Option<f64>, Option<f64>) {
        match self {
            ConfigField::TotalPoints => (Some(1.0), Some(MAX_TOTAL_POINTS)),
            ConfigField::Voldoende => (Some(1.0), Some(10.0)),
            ConfigField::NTerm => (Some(0.0), Some(3.0)),
            ConfigField::PassPercentage => (Some(0.0), Some(100.0)),
            ConfigField::FoutenKFactor | ConfigField::GoedKFactor => (Some(0.1), Some(20.0)),
            ConfigField::FixedCutoff => (Some(0.0), Some(config.total_points)),
            ConfigField::Method | ConfigField::Rounding => (None, None),
        }
    }

    /// Increment used by step adjustments.
    pub fn step(&self) -> f64 {
        match self {
            ConfigField::TotalPoints | ConfigField::FixedCutoff => 0.5,
            ConfigField::PassPercentage => 1.0,
            _ => 0.1,
        }
    }

    /// Current value rendered for display.
    pub fn display_value(&self, config: &GradingConfig) -> String {
        match self {
            ConfigField::Method => match GradingMethod::parse(&config.method) {
                Ok(method) => method.display_name().to_string(),
                Err(_) => format!("? ({})", config.method),
            },
            ConfigField::Rounding => rounding_label(config.rounding),
            ConfigField::PassPercentage => format!("{}%", config.pass_percentage),
            _ => format!("{}", self.numeric(config).unwrap_or_default()),
        }
    }

    fn numeric(&self, config: &GradingConfig) -> Option<f64> {
        match self {
            ConfigField::TotalPoints => Some(config.total_points),
            ConfigField::Voldoende => Some(config.voldoende),
            ConfigField::NTerm => Some(config.n_term),
            ConfigField::PassPercentage => Some(config.pass_percentage),
            ConfigField::FoutenKFactor => Some(config.fouten_k_factor),
            ConfigField::GoedKFactor => Some(config.goed_k_factor),
            ConfigField::FixedCutoff => Some(config.fixed_cutoff),
            ConfigField::Rounding => Some(config.rounding),
            ConfigField::Method => None,
        }
    }

    fn numeric_mut<'a>(&self, config: &'a mut GradingConfig) -> Option<&'a mut f64> {
        match self {
            ConfigField::TotalPoints => Some(&mut config.total_points),
            ConfigField::Voldoende => Some(&mut config.voldoende),
            ConfigField::NTerm => Some(&mut config.n_term),
            ConfigField::PassPercentage => Some(&mut config.pass_percentage),
            ConfigField::FoutenKFactor => Some(&mut config.fouten_k_factor),
            ConfigField::GoedKFactor => Some(&mut config.goed_k_factor),
            ConfigField::FixedCutoff => Some(&mut config.fixed_cutoff),
            ConfigField::Rounding => Some(&mut config.rounding),
            ConfigField::Method => None,
        }
    }

    /// Set the field from user text. Numbers are clamped into [`Self::bounds`];
    /// the method must be a known selector; rounding must be one of the options.
    pub fn set_from_str(&self, config: &mut GradingConfig, input: &str) -> Result<()> {
        let input = input.trim();
        match self {
            ConfigField::Method => {
                let method = GradingMethod::parse(input)?;
                config.method = method.as_str().to_string();
            }
            ConfigField::Rounding => {
                let value: f64 = input
                    .parse()
                    .with_context(|| format!("rounding: '{}' is not a number", input))?;
                if !ROUNDING_OPTIONS.contains(&value) {
                    bail!("rounding: must be one of 1, 0.5, 0.1, 0.01 (got {})", input);
                }
                config.rounding = value;
            }
            _ => {
                let value: f64 = input
                    .parse()
                    .with_context(|| format!("{}: '{}' is not a number", self.key(), input))?;
                if !value.is_finite() {
                    bail!("{}: must be a finite number", self.key());
                }
                self.set_clamped(config, value);
            }
        }
        Ok(())
    }

    fn set_clamped(&self, config: &mut GradingConfig, value: f64) {
        let (min, max) = self.bounds(config);
        let mut clamped = value;
        if let Some(min) = min {
            clamped = clamped.max(min);
        }
        if let Some(max) = max {
            clamped = clamped.min(max);
        }
        if let Some(slot) = self.numeric_mut(config) {
            *slot = clamped;
        }
    }

    /// Move the field one step. `direction` is +1 or -1. Method and rounding
    /// cycle through their options.
    pub fn adjust(&self, config: &mut GradingConfig, direction: i32) {
        match self {
            ConfigField::Method => {
                let current = GradingMethod::parse(&config.method).unwrap_or(GradingMethod::NTerm);
                let next = if direction >= 0 {
                    current.next()
                } else {
                    current.previous()
                };
                config.method = next.as_str().to_string();
            }
            ConfigField::Rounding => {
                let idx = ROUNDING_OPTIONS
                    .iter()
                    .position(|r| *r == config.rounding)
                    .unwrap_or(0);
                let len = ROUNDING_OPTIONS.len();
                let next = if direction >= 0 {
                    (idx + 1) % len
                } else {
                    (idx + len - 1) % len
                };
                config.rounding = ROUNDING_OPTIONS[next];
            }
            _ => {
                let current = self.numeric(config).unwrap_or_default();
                let step = self.step();
                // Snap to the step grid so repeated 0.1 steps don't drift.
                let raw = current + step * direction as f64;
                let snapped = (raw / step).round() * step;
                let decimals = if step < 1.0 { 2 } else { 0 };
                let value = to_fixed(snapped, decimals).parse().unwrap_or(raw);
                self.set_clamped(config, value);
            }
        }
    }
}

pub fn rounding_label(rounding: f64) -> String {
    if rounding >= 1.0 {
        "Heel".to_string()
    } else if rounding == 0.5 {
        "Half (0.5)".to_string()
    } else {
        format!("{}", rounding)
    }
}
