//! Request configuration validation.

use crate::config::{OffdesignConfig, PartloadConfig, TemperatureRange};

/// Load ratios above this push the cycle far outside its stable envelope.
pub const MAX_LOAD_RATIO: f64 = 1.5;

/// Temperature bounds accepted on sweep axes, in Celsius.
pub const MIN_AXIS_TEMP_C: f64 = -50.0;
pub const MAX_AXIS_TEMP_C: f64 = 200.0;

pub const MAX_AXIS_STEPS: usize = 50;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing field: {field} ({reason})")]
    MissingField { field: String, reason: String },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_temperature_range(
    range: &TemperatureRange,
    field: &str,
) -> Result<(), ValidationError> {
    if range.constant {
        return Ok(());
    }

    let start = range.start.ok_or_else(|| ValidationError::MissingField {
        field: format!("{field}.start"),
        reason: "required when constant is false".to_string(),
    })?;
    let end = range.end.ok_or_else(|| ValidationError::MissingField {
        field: format!("{field}.end"),
        reason: "required when constant is false".to_string(),
    })?;

    for (name, value) in [("start", start), ("end", end)] {
        if !(MIN_AXIS_TEMP_C..=MAX_AXIS_TEMP_C).contains(&value) {
            return Err(invalid(
                &format!("{field}.{name}"),
                value,
                "temperature outside supported axis bounds",
            ));
        }
    }
    if end < start {
        return Err(invalid(&format!("{field}.end"), end, "end must be >= start"));
    }
    if let Some(steps) = range.steps
        && !(1..=MAX_AXIS_STEPS).contains(&steps)
    {
        return Err(invalid(
            &format!("{field}.steps"),
            steps,
            "steps must be in 1..=50",
        ));
    }
    Ok(())
}

pub fn validate_partload_config(config: &PartloadConfig) -> Result<(), ValidationError> {
    for (name, value) in [
        ("partload.min_ratio", config.min_ratio),
        ("partload.max_ratio", config.max_ratio),
    ] {
        if !(0.0..=MAX_LOAD_RATIO).contains(&value) {
            return Err(invalid(name, value, "load ratio must be in 0..=1.5"));
        }
    }
    if config.max_ratio <= config.min_ratio {
        return Err(invalid(
            "partload.max_ratio",
            config.max_ratio,
            "max_ratio must be greater than min_ratio",
        ));
    }
    if let Some(steps) = config.steps
        && !(2..=MAX_AXIS_STEPS).contains(&steps)
    {
        return Err(invalid(
            "partload.steps",
            steps,
            "steps must be in 2..=50",
        ));
    }
    Ok(())
}

pub fn validate_offdesign_config(config: &OffdesignConfig) -> Result<(), ValidationError> {
    if let Some(range) = &config.heat_source_range {
        validate_temperature_range(range, "heat_source_range")?;
    }
    if let Some(range) = &config.heat_sink_range {
        validate_temperature_range(range, "heat_sink_range")?;
    }
    if let Some(partload) = &config.partload_range {
        validate_partload_config(partload)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranged(start: f64, end: f64, steps: Option<usize>) -> TemperatureRange {
        TemperatureRange {
            constant: false,
            start: Some(start),
            end: Some(end),
            steps,
        }
    }

    #[test]
    fn constant_range_needs_nothing() {
        let range = TemperatureRange::default();
        validate_temperature_range(&range, "heat_source_range").expect("constant is valid");
    }

    #[test]
    fn ranged_axis_requires_endpoints() {
        let range = TemperatureRange {
            constant: false,
            start: Some(5.0),
            end: None,
            steps: None,
        };
        let err = validate_temperature_range(&range, "heat_source_range").unwrap_err();
        assert!(matches!(err, ValidationError::MissingField { .. }));
    }

    #[test]
    fn reversed_range_rejected() {
        let err = validate_temperature_range(&ranged(20.0, 5.0, None), "heat_sink_range")
            .unwrap_err();
        assert!(format!("{err}").contains("end must be >= start"));
    }

    #[test]
    fn equal_endpoints_allowed() {
        validate_temperature_range(&ranged(12.5, 12.5, Some(1)), "heat_source_range")
            .expect("degenerate range is valid");
    }

    #[test]
    fn partload_bounds_enforced() {
        let config = PartloadConfig {
            min_ratio: 0.3,
            max_ratio: 1.8,
            steps: None,
        };
        assert!(validate_partload_config(&config).is_err());

        let config = PartloadConfig {
            min_ratio: 0.8,
            max_ratio: 0.5,
            steps: None,
        };
        let err = validate_partload_config(&config).unwrap_err();
        assert!(format!("{err}").contains("greater than min_ratio"));

        let config = PartloadConfig {
            min_ratio: 0.3,
            max_ratio: 1.0,
            steps: Some(1),
        };
        assert!(validate_partload_config(&config).is_err());
    }

    #[test]
    fn offdesign_config_validates_all_axes() {
        let config = OffdesignConfig {
            heat_source_range: Some(ranged(5.0, 20.0, Some(4))),
            heat_sink_range: Some(TemperatureRange::default()),
            partload_range: Some(PartloadConfig::default()),
        };
        validate_offdesign_config(&config).expect("valid config");
    }
}
