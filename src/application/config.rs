use crate::application::Theme;
use crate::domain::{GridShape, StartOfWeek};
use anyhow::{Context, Result, bail};
use std::path::PathBuf;

pub const START_WEEK_VAR: &str = "RANGE_PICKER_START_WEEK";
pub const SIX_WEEKS_VAR: &str = "RANGE_PICKER_SIX_WEEKS";
pub const THEME_VAR: &str = "RANGE_PICKER_THEME";
pub const LOG_DIR_VAR: &str = "RANGE_PICKER_LOG_DIR";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub start_of_week: StartOfWeek,
    pub grid_shape: GridShape,
    pub theme: String,
    pub log_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; missing keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let start_of_week = match lookup(START_WEEK_VAR) {
            Some(value) => value
                .parse()
                .with_context(|| format!("Invalid {}", START_WEEK_VAR))?,
            None => StartOfWeek::default(),
        };

        let six_weeks = match lookup(SIX_WEEKS_VAR) {
            Some(value) => {
                parse_flag(&value).with_context(|| format!("Invalid {}", SIX_WEEKS_VAR))?
            }
            None => false,
        };
        let grid_shape = if six_weeks {
            GridShape::SixWeeks
        } else {
            GridShape::Compact
        };

        let theme = match lookup(THEME_VAR) {
            Some(value) => {
                let name = value.trim().to_lowercase();
                if !Theme::available_themes().contains(&name) {
                    bail!(
                        "Invalid {}: unknown theme '{}', expected one of {}",
                        THEME_VAR,
                        value,
                        Theme::available_themes().join(", ")
                    );
                }
                name
            }
            None => "dark".to_string(),
        };

        let log_dir = lookup(LOG_DIR_VAR).map(PathBuf::from).unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("range-picker")
        });

        Ok(Self {
            start_of_week,
            grid_shape,
            theme,
            log_dir,
        })
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("Expected a boolean, got '{}'", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.start_of_week, StartOfWeek::Sun);
        assert_eq!(config.grid_shape, GridShape::Compact);
        assert_eq!(config.theme, "dark");
        assert!(config.log_dir.ends_with("range-picker"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            (START_WEEK_VAR, "monday"),
            (SIX_WEEKS_VAR, "yes"),
            (THEME_VAR, "light"),
            (LOG_DIR_VAR, "/tmp/picker-logs"),
        ])
        .unwrap();

        assert_eq!(config.start_of_week, StartOfWeek::Mon);
        assert_eq!(config.grid_shape, GridShape::SixWeeks);
        assert_eq!(config.theme, "light");
        assert_eq!(config.log_dir, PathBuf::from("/tmp/picker-logs"));
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let err = config_from(&[(START_WEEK_VAR, "wednesday")]).unwrap_err();
        assert!(err.to_string().contains(START_WEEK_VAR));

        let err = config_from(&[(SIX_WEEKS_VAR, "maybe")]).unwrap_err();
        assert!(err.to_string().contains(SIX_WEEKS_VAR));

        let config = config_from(&[(SIX_WEEKS_VAR, "0")]).unwrap();
        assert_eq!(config.grid_shape, GridShape::Compact);
    }

    #[test]
    fn test_theme_must_be_known() {
        let config = config_from(&[(THEME_VAR, " Minimal ")]).unwrap();
        assert_eq!(config.theme, "minimal");

        let err = config_from(&[(THEME_VAR, "solarized")]).unwrap_err();
        assert!(err.to_string().contains(THEME_VAR));
        assert!(err.to_string().contains("dark, light, minimal"));
    }
}
