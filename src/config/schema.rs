use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application settings, read from `~/.config/cijfer/config.yaml`.
///
/// Example YAML:
/// ```yaml
/// theme: dark
/// color: true
/// state_path: /home/me/grading/cijfer-calculator-config.json
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// TUI colour theme (default: auto-detect from the terminal background)
    #[serde(default)]
    pub theme: Option<ThemeMode>,

    /// Force coloured CLI output on or off (default: only on a TTY)
    #[serde(default)]
    pub color: Option<bool>,

    /// Where the grading configuration is persisted
    #[serde(default)]
    pub state_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Auto,
    Dark,
    Light,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_parse() {
        let config: AppConfig = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
theme: light
color: false
state_path: /tmp/cijfer.json
"#;
        let config: AppConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.theme, Some(ThemeMode::Light));
        assert_eq!(config.color, Some(false));
        assert_eq!(config.state_path, Some(PathBuf::from("/tmp/cijfer.json")));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let yaml = "colour: true\n";
        assert!(serde_saphyr::from_str::<AppConfig>(yaml).is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = AppConfig {
            theme: Some(ThemeMode::Dark),
            color: Some(true),
            state_path: None,
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: AppConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }
}
