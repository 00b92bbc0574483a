//! Request configuration schemas for off-design and part-load runs.

use serde::{Deserialize, Serialize};

/// One temperature axis of the off-design envelope.
///
/// `constant` keeps the axis at the design-point value; a ranged axis sweeps
/// `start..=end` in `steps` points.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemperatureRange {
    #[serde(default = "default_constant")]
    pub constant: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
    /// Number of points; derived from the span when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<usize>,
}

impl Default for TemperatureRange {
    fn default() -> Self {
        Self {
            constant: true,
            start: None,
            end: None,
            steps: None,
        }
    }
}

/// Load-ratio axis configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PartloadConfig {
    #[serde(default = "default_min_ratio")]
    pub min_ratio: f64,
    #[serde(default = "default_max_ratio")]
    pub max_ratio: f64,
    /// Number of load points; derived from the span when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<usize>,
}

impl Default for PartloadConfig {
    fn default() -> Self {
        Self {
            min_ratio: default_min_ratio(),
            max_ratio: default_max_ratio(),
            steps: None,
        }
    }
}

/// Off-design sweep configuration. Absent axes stay at the design point.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OffdesignConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_source_range: Option<TemperatureRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_sink_range: Option<TemperatureRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partload_range: Option<PartloadConfig>,
}

fn default_constant() -> bool {
    true
}

fn default_min_ratio() -> f64 {
    0.3
}

fn default_max_ratio() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partload_defaults() {
        let config = PartloadConfig::default();
        assert_eq!(config.min_ratio, 0.3);
        assert_eq!(config.max_ratio, 1.0);
        assert_eq!(config.steps, None);
    }

    #[test]
    fn temperature_range_deserializes_with_defaults() {
        let range: TemperatureRange = serde_json::from_str("{}").expect("empty range");
        assert!(range.constant);
        assert_eq!(range.start, None);

        let range: TemperatureRange =
            serde_json::from_str(r#"{"constant": false, "start": 5.0, "end": 20.0, "steps": 4}"#)
                .expect("ranged");
        assert!(!range.constant);
        assert_eq!(range.steps, Some(4));
    }

    #[test]
    fn offdesign_config_accepts_partial_axes() {
        let config: OffdesignConfig = serde_json::from_str(
            r#"{"partload_range": {"min_ratio": 0.5, "max_ratio": 1.0, "steps": 3}}"#,
        )
        .expect("partial config");
        assert!(config.heat_source_range.is_none());
        assert_eq!(
            config.partload_range.expect("partload range").min_ratio,
            0.5
        );
    }
}
