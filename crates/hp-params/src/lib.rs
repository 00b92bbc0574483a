//! hp-params: topology catalog, parameter trees and request configuration.

pub mod catalog;
pub mod config;
pub mod resolve;
pub mod validate;

pub use catalog::{Catalog, ComponentKind, RefrigerantInfo, TopologyDescriptor};
pub use config::{OffdesignConfig, PartloadConfig, TemperatureRange};
pub use resolve::{get_f64, get_path, get_str, resolve};
pub use validate::{
    ValidationError, validate_offdesign_config, validate_partload_config,
    validate_temperature_range,
};
