//! Off-design grid generation.
//!
//! The grid is the cartesian product of three ordered axes in a fixed
//! traversal order: source temperature outer, sink temperature middle, load
//! ratio inner. Consumers index operating points positionally, so that order
//! is a contract, not an implementation detail.

use crate::SweepResult;
use hp_params::validate::MAX_AXIS_STEPS;
use hp_params::{
    OffdesignConfig, PartloadConfig, TemperatureRange, validate_partload_config,
    validate_temperature_range,
};
use hp_solver::DesignConditions;

/// Derived step count for a ranged axis that omitted `steps`.
const TEMP_STEP_INCREMENT_K: f64 = 5.0;
const LOAD_STEP_INCREMENT: f64 = 0.1;

/// Evenly spaced points from `start` to `end` inclusive, endpoint-exact.
/// `steps <= 1` collapses to `[start]`.
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps <= 1 {
        return vec![start];
    }
    let span = end - start;
    (0..steps)
        .map(|i| start + span * i as f64 / (steps - 1) as f64)
        .collect()
}

fn derived_steps(span: f64, increment: f64) -> usize {
    if span <= 0.0 {
        return 1;
    }
    (((span / increment).round() as usize) + 1).clamp(2, MAX_AXIS_STEPS)
}

fn temperature_axis(
    design_value: f64,
    range: Option<&TemperatureRange>,
    field: &str,
) -> SweepResult<Vec<f64>> {
    let Some(range) = range else {
        return Ok(vec![design_value]);
    };
    if range.constant {
        return Ok(vec![design_value]);
    }
    validate_temperature_range(range, field)?;

    // start/end presence is guaranteed by validation.
    let start = range.start.unwrap_or(design_value);
    let end = range.end.unwrap_or(design_value);
    let steps = range
        .steps
        .unwrap_or_else(|| derived_steps(end - start, TEMP_STEP_INCREMENT_K));
    Ok(linspace(start, end, steps))
}

/// The load-ratio axis. `defaults` carries the topology's load range and is
/// used when the request supplies no explicit range.
pub fn load_axis(
    defaults: &PartloadConfig,
    config: Option<&PartloadConfig>,
) -> SweepResult<Vec<f64>> {
    let config = config.unwrap_or(defaults);
    validate_partload_config(config)?;

    let steps = config.steps.unwrap_or_else(|| {
        derived_steps(config.max_ratio - config.min_ratio, LOAD_STEP_INCREMENT)
    });
    Ok(linspace(config.min_ratio, config.max_ratio, steps))
}

/// One grid cell in canonical traversal order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub index: usize,
    pub source_temp_c: f64,
    pub sink_temp_c: f64,
    pub load_ratio: f64,
}

#[derive(Debug, Clone)]
pub struct Grid {
    pub sources: Vec<f64>,
    pub sinks: Vec<f64>,
    pub load_ratios: Vec<f64>,
}

impl Grid {
    /// Build the three axes from the request configuration, collapsing absent
    /// or constant axes to the design-point values.
    pub fn build(
        design: &DesignConditions,
        partload_defaults: &PartloadConfig,
        config: Option<&OffdesignConfig>,
    ) -> SweepResult<Grid> {
        let sources = temperature_axis(
            design.source_temp_c,
            config.and_then(|c| c.heat_source_range.as_ref()),
            "heat_source_range",
        )?;
        let sinks = temperature_axis(
            design.sink_temp_c,
            config.and_then(|c| c.heat_sink_range.as_ref()),
            "heat_sink_range",
        )?;
        let load_ratios = load_axis(
            partload_defaults,
            config.and_then(|c| c.partload_range.as_ref()),
        )?;

        Ok(Grid {
            sources,
            sinks,
            load_ratios,
        })
    }

    /// Degenerate grid for a part-load projection: both temperature axes
    /// pinned at the design point.
    pub fn partload_slice(design: &DesignConditions, load_ratios: Vec<f64>) -> Grid {
        Grid {
            sources: vec![design.source_temp_c],
            sinks: vec![design.sink_temp_c],
            load_ratios,
        }
    }

    pub fn len(&self) -> usize {
        self.sources.len() * self.sinks.len() * self.load_ratios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All cells in canonical order: source outer, sink middle, ratio inner.
    pub fn cells(&self) -> Vec<GridCell> {
        let mut cells = Vec::with_capacity(self.len());
        let mut index = 0;
        for &source_temp_c in &self.sources {
            for &sink_temp_c in &self.sinks {
                for &load_ratio in &self.load_ratios {
                    cells.push(GridCell {
                        index,
                        source_temp_c,
                        sink_temp_c,
                        load_ratio,
                    });
                    index += 1;
                }
            }
        }
        cells
    }
}
