//! Layout parameters and the host-facing option bag they are resolved from.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

pub const DEFAULT_COVERAGE: f64 = 0.2;
pub const DEFAULT_VARIATION: f64 = 0.2;
pub const DEFAULT_RESIZE_DELAY: Duration = Duration::from_millis(300);

/// Options as a host passes them, every key optional.
///
/// Keys use the host's camelCase names so a JSON object can be handed over
/// unchanged: `{"coverage": 0.4, "resizeDelayMs": 150, "resizeEnabled": false}`.
/// The older `resizeDelay` and `disableResize` spellings are accepted too;
/// `resizeEnabled` wins when both toggles are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MoodboardOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation: Option<f64>,
    /// Milliseconds.
    #[serde(
        default,
        rename = "resizeDelayMs",
        alias = "resizeDelay",
        skip_serializing_if = "Option::is_none"
    )]
    pub resize_delay: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resize_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_resize: Option<bool>,
}

impl MoodboardOptions {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Fill missing keys with defaults and validate the result.
    pub fn resolve(&self) -> Result<LayoutConfig> {
        let defaults = LayoutConfig::default();
        let config = LayoutConfig {
            coverage: self.coverage.unwrap_or(defaults.coverage),
            variation: self.variation.unwrap_or(defaults.variation),
            resize_delay: self
                .resize_delay
                .map(Duration::from_millis)
                .unwrap_or(defaults.resize_delay),
            resize_enabled: self
                .resize_enabled
                .or(self.disable_resize.map(|disabled| !disabled))
                .unwrap_or(defaults.resize_enabled),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Resolved layout-wide parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Fraction of the viewport area all elements together aim to cover.
    pub coverage: f64,
    /// Fractional jitter applied to each element's target area.
    pub variation: f64,
    /// Quiet period before a resize triggers a layout pass.
    pub resize_delay: Duration,
    /// When false no resize handling happens at all.
    pub resize_enabled: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            coverage: DEFAULT_COVERAGE,
            variation: DEFAULT_VARIATION,
            resize_delay: DEFAULT_RESIZE_DELAY,
            resize_enabled: true,
        }
    }
}

impl LayoutConfig {
    pub fn with_coverage(mut self, coverage: f64) -> Self {
        self.coverage = coverage;
        self
    }

    pub fn with_variation(mut self, variation: f64) -> Self {
        self.variation = variation;
        self
    }

    pub fn with_resize_delay(mut self, delay: Duration) -> Self {
        self.resize_delay = delay;
        self
    }

    pub fn with_resize_enabled(mut self, enabled: bool) -> Self {
        self.resize_enabled = enabled;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !(self.coverage > 0.0 && self.coverage <= 1.0) {
            return Err(ConfigError::Coverage(self.coverage));
        }
        if !(0.0..=1.0).contains(&self.variation) {
            return Err(ConfigError::Variation(self.variation));
        }
        Ok(())
    }

    /// Equal split of the total coverage across `count` elements.
    pub fn coverage_share(&self, count: usize) -> f64 {
        if count == 0 {
            return 0.0;
        }
        self.coverage / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MoodboardError;

    #[test]
    fn empty_options_resolve_to_defaults() {
        let config = MoodboardOptions::default().resolve().unwrap();
        assert_eq!(config, LayoutConfig::default());
        assert_eq!(config.coverage, 0.2);
        assert_eq!(config.variation, 0.2);
        assert_eq!(config.resize_delay, Duration::from_millis(300));
        assert!(config.resize_enabled);
    }

    #[test]
    fn parses_host_option_names() {
        let options = MoodboardOptions::from_json_str(
            r#"{"coverage": 0.5, "variation": 0, "resizeDelay": 120, "disableResize": true}"#,
        )
        .unwrap();
        let config = options.resolve().unwrap();
        assert_eq!(config.coverage, 0.5);
        assert_eq!(config.variation, 0.0);
        assert_eq!(config.resize_delay, Duration::from_millis(120));
        assert!(!config.resize_enabled);
    }

    #[test]
    fn parses_documented_option_names() {
        let options =
            MoodboardOptions::from_json_str(r#"{"resizeDelayMs": 100, "resizeEnabled": false}"#)
                .unwrap();
        assert_eq!(options.resize_delay, Some(100));
        assert_eq!(options.resize_enabled, Some(false));
        let config = options.resolve().unwrap();
        assert_eq!(config.resize_delay, Duration::from_millis(100));
        assert!(!config.resize_enabled);
    }

    #[test]
    fn resize_enabled_overrides_disable_resize() {
        let options = MoodboardOptions::from_json_str(
            r#"{"resizeEnabled": true, "disableResize": true}"#,
        )
        .unwrap();
        assert!(options.resolve().unwrap().resize_enabled);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = MoodboardOptions::from_json_str(r#"{"coverag": 0.5}"#).unwrap_err();
        assert!(matches!(err, MoodboardError::Json(_)));
    }

    #[test]
    fn out_of_range_values_fail_validation() {
        let err = LayoutConfig::default().with_coverage(0.0).validate().unwrap_err();
        assert_eq!(err, ConfigError::Coverage(0.0));
        let err = LayoutConfig::default().with_coverage(1.5).validate().unwrap_err();
        assert_eq!(err, ConfigError::Coverage(1.5));
        let err = LayoutConfig::default().with_variation(-0.1).validate().unwrap_err();
        assert_eq!(err, ConfigError::Variation(-0.1));
        assert!(LayoutConfig::default().with_coverage(f64::NAN).validate().is_err());
        assert!(LayoutConfig::default().with_coverage(1.0).validate().is_ok());
    }

    #[test]
    fn resolve_reports_invalid_config() {
        let options = MoodboardOptions {
            variation: Some(2.0),
            ..MoodboardOptions::default()
        };
        let err = options.resolve().unwrap_err();
        assert!(matches!(
            err,
            MoodboardError::InvalidConfig(ConfigError::Variation(_))
        ));
    }

    #[test]
    fn coverage_share_divides_equally() {
        let config = LayoutConfig::default().with_coverage(0.6);
        let share = config.coverage_share(3);
        assert!((share * 3.0 - 0.6).abs() < 1e-12);
        assert_eq!(config.coverage_share(0), 0.0);
    }
}
