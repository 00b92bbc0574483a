//! Component network specification handed to the solver.

use crate::error::{SolverError, SolverResult};
use hp_params::{ComponentKind, TopologyDescriptor};
use serde::{Deserialize, Serialize};

/// The component network for one request: the topology's fixed component
/// graph plus the refrigerant filling each circuit slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub topology_key: String,
    pub components: Vec<ComponentKind>,
    /// One refrigerant per circuit, in slot order.
    pub refrigerants: Vec<String>,
}

impl NetworkSpec {
    pub fn for_topology(descriptor: &TopologyDescriptor, refrigerants: Vec<String>) -> Self {
        Self {
            topology_key: descriptor.key.to_string(),
            components: descriptor.components.clone(),
            refrigerants,
        }
    }

    /// Check every component against a solver's supported vocabulary.
    pub fn check_supported(&self, supported: &[ComponentKind]) -> SolverResult<()> {
        for kind in &self.components {
            if !supported.contains(kind) {
                return Err(SolverError::UnsupportedComponent(*kind));
            }
        }
        Ok(())
    }
}
