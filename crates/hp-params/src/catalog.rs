//! Topology and refrigerant catalog.
//!
//! The catalog is an immutable process-wide registry built once on first
//! access. Requests resolve against it but never mutate it; the Parameter
//! Resolver copies defaults before merging so no request can alias a shared
//! default tree.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use std::sync::OnceLock;

/// Closed component vocabulary shared with the solver boundary.
///
/// Replaces string-keyed component lookup: a topology that names a component
/// the linked solver does not support is rejected at service construction,
/// not deep inside a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Evaporator,
    Compressor,
    Condenser,
    ExpansionValve,
    InternalHeatExchanger,
    Economizer,
    CascadeHeatExchanger,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentKind::Evaporator => "evaporator",
            ComponentKind::Compressor => "compressor",
            ComponentKind::Condenser => "condenser",
            ComponentKind::ExpansionValve => "expansion valve",
            ComponentKind::InternalHeatExchanger => "internal heat exchanger",
            ComponentKind::Economizer => "economizer",
            ComponentKind::CascadeHeatExchanger => "cascade heat exchanger",
        };
        f.write_str(name)
    }
}

/// One catalog entry: a fixed component-graph variant of the cycle.
#[derive(Debug, Clone)]
pub struct TopologyDescriptor {
    pub key: &'static str,
    pub display_name: &'static str,
    /// Refrigerant slots the configuration must fill ("wf" or "wf1"/"wf2").
    pub refrigerant_slots: usize,
    pub ihx_variants: usize,
    pub components: Vec<ComponentKind>,
    pub defaults: Value,
}

impl TopologyDescriptor {
    /// Names of the refrigerant leaves under `fluids` for this topology.
    pub fn refrigerant_keys(&self) -> Vec<String> {
        if self.refrigerant_slots == 1 {
            vec!["wf".to_string()]
        } else {
            (1..=self.refrigerant_slots)
                .map(|i| format!("wf{i}"))
                .collect()
        }
    }
}

/// Supported refrigerant with the critical-point data the solver layer needs
/// to reject flash calculations forced above the critical pressure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RefrigerantInfo {
    pub key: &'static str,
    pub t_crit_c: f64,
    pub p_crit_bar: f64,
}

#[derive(Debug)]
pub struct Catalog {
    topologies: Vec<TopologyDescriptor>,
    refrigerants: Vec<RefrigerantInfo>,
}

impl Catalog {
    /// The process-wide catalog, built on first access.
    pub fn builtin() -> &'static Catalog {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(build_catalog)
    }

    pub fn descriptors(&self) -> &[TopologyDescriptor] {
        &self.topologies
    }

    pub fn get(&self, key: &str) -> Option<&TopologyDescriptor> {
        self.topologies.iter().find(|t| t.key == key)
    }

    pub fn refrigerants(&self) -> &[RefrigerantInfo] {
        &self.refrigerants
    }

    pub fn refrigerant(&self, key: &str) -> Option<&RefrigerantInfo> {
        self.refrigerants.iter().find(|r| r.key == key)
    }
}

use ComponentKind::*;

fn build_catalog() -> Catalog {
    let topologies = vec![
        TopologyDescriptor {
            key: "simple",
            display_name: "Single-stage cycle",
            refrigerant_slots: 1,
            ihx_variants: 0,
            components: vec![Evaporator, Compressor, Condenser, ExpansionValve],
            defaults: single_stage_defaults("R290"),
        },
        TopologyDescriptor {
            key: "ihx",
            display_name: "Single-stage cycle with internal heat exchanger",
            refrigerant_slots: 1,
            ihx_variants: 1,
            components: vec![
                Evaporator,
                InternalHeatExchanger,
                Compressor,
                Condenser,
                ExpansionValve,
            ],
            defaults: with_ihx_section(single_stage_defaults("R290")),
        },
        TopologyDescriptor {
            key: "econ_closed",
            display_name: "Two-stage cycle with closed economizer",
            refrigerant_slots: 1,
            ihx_variants: 0,
            components: vec![
                Evaporator,
                Compressor,
                Economizer,
                Compressor,
                Condenser,
                ExpansionValve,
            ],
            defaults: with_econ_section(single_stage_defaults("R134a")),
        },
        TopologyDescriptor {
            key: "econ_open",
            display_name: "Two-stage cycle with open economizer",
            refrigerant_slots: 1,
            ihx_variants: 0,
            components: vec![
                Evaporator,
                Compressor,
                Economizer,
                Compressor,
                Condenser,
                ExpansionValve,
            ],
            defaults: with_econ_section(single_stage_defaults("R717")),
        },
        TopologyDescriptor {
            key: "cascade",
            display_name: "Two-circuit cascade cycle",
            refrigerant_slots: 2,
            ihx_variants: 0,
            components: vec![
                Evaporator,
                Compressor,
                CascadeHeatExchanger,
                Compressor,
                Condenser,
                ExpansionValve,
                ExpansionValve,
            ],
            defaults: cascade_defaults(),
        },
        TopologyDescriptor {
            key: "cascade_2ihx",
            display_name: "Two-circuit cascade cycle with internal heat exchangers",
            refrigerant_slots: 2,
            ihx_variants: 2,
            components: vec![
                Evaporator,
                InternalHeatExchanger,
                Compressor,
                CascadeHeatExchanger,
                InternalHeatExchanger,
                Compressor,
                Condenser,
                ExpansionValve,
                ExpansionValve,
            ],
            defaults: with_ihx_section(cascade_defaults()),
        },
    ];

    // Critical-point data per supported refrigerant. The solver uses these to
    // keep subcritical topologies below the critical point.
    let refrigerants = vec![
        RefrigerantInfo {
            key: "R290",
            t_crit_c: 96.7,
            p_crit_bar: 42.5,
        },
        RefrigerantInfo {
            key: "R134a",
            t_crit_c: 101.1,
            p_crit_bar: 40.6,
        },
        RefrigerantInfo {
            key: "R600",
            t_crit_c: 152.0,
            p_crit_bar: 38.0,
        },
        RefrigerantInfo {
            key: "R717",
            t_crit_c: 132.3,
            p_crit_bar: 113.3,
        },
        RefrigerantInfo {
            key: "R1234yf",
            t_crit_c: 94.7,
            p_crit_bar: 33.8,
        },
        RefrigerantInfo {
            key: "R245fa",
            t_crit_c: 154.0,
            p_crit_bar: 36.5,
        },
    ];

    Catalog {
        topologies,
        refrigerants,
    }
}

fn single_stage_defaults(refrigerant: &str) -> Value {
    json!({
        "fluids": { "wf": refrigerant },
        "T_hs_ff": 10.0,
        "T_cons_ff": 35.0,
        "cons": { "Q": 1000000.0 },
        "evap": { "pr1": 0.98, "pr2": 0.98, "dT_sh": 5.0 },
        "cond": { "pr1": 0.98, "pr2": 0.98, "dT_sc": 2.0 },
        "comp": { "eta_s": 0.85 },
        "offdesign": { "partload_min": 0.3, "partload_max": 1.0 }
    })
}

fn cascade_defaults() -> Value {
    json!({
        "fluids": { "wf1": "R290", "wf2": "R134a" },
        "T_hs_ff": 10.0,
        "T_cons_ff": 70.0,
        "cons": { "Q": 1000000.0 },
        "evap": { "pr1": 0.98, "pr2": 0.98, "dT_sh": 5.0 },
        "cond": { "pr1": 0.98, "pr2": 0.98, "dT_sc": 2.0 },
        "inter": { "pr1": 0.98, "pr2": 0.98, "dT": 5.0 },
        "comp": { "eta_s": 0.85 },
        "offdesign": { "partload_min": 0.3, "partload_max": 1.0 }
    })
}

fn with_ihx_section(mut defaults: Value) -> Value {
    if let Some(map) = defaults.as_object_mut() {
        map.insert(
            "ihx".to_string(),
            json!({ "pr1": 0.98, "pr2": 0.98, "dT_sh": 5.0 }),
        );
    }
    defaults
}

fn with_econ_section(mut defaults: Value) -> Value {
    if let Some(map) = defaults.as_object_mut() {
        map.insert("econ".to_string(), json!({ "pr1": 0.99, "pr2": 0.99 }));
    }
    defaults
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::{get_f64, get_str};

    #[test]
    fn builtin_catalog_has_expected_entries() {
        let catalog = Catalog::builtin();
        assert!(catalog.get("simple").is_some());
        assert!(catalog.get("cascade_2ihx").is_some());
        assert!(catalog.get("unknown").is_none());
    }

    #[test]
    fn every_topology_carries_design_leaves() {
        for topo in Catalog::builtin().descriptors() {
            assert!(
                get_f64(&topo.defaults, &["T_hs_ff"]).is_some(),
                "{} missing T_hs_ff",
                topo.key
            );
            assert!(
                get_f64(&topo.defaults, &["T_cons_ff"]).is_some(),
                "{} missing T_cons_ff",
                topo.key
            );
            assert!(
                get_f64(&topo.defaults, &["cons", "Q"]).is_some(),
                "{} missing cons.Q",
                topo.key
            );
            assert!(
                get_f64(&topo.defaults, &["offdesign", "partload_min"]).is_some(),
                "{} missing partload_min",
                topo.key
            );
        }
    }

    #[test]
    fn refrigerant_slots_match_default_fluids() {
        let catalog = Catalog::builtin();
        for topo in catalog.descriptors() {
            for key in topo.refrigerant_keys() {
                let name = get_str(&topo.defaults, &["fluids", key.as_str()])
                    .unwrap_or_else(|| panic!("{} missing fluids.{key}", topo.key));
                assert!(
                    catalog.refrigerant(name).is_some(),
                    "{} default refrigerant {name} not in registry",
                    topo.key
                );
            }
        }
    }

    #[test]
    fn ihx_topologies_carry_ihx_section() {
        let catalog = Catalog::builtin();
        for topo in catalog.descriptors() {
            let has_section = topo.defaults.get("ihx").is_some();
            assert_eq!(has_section, topo.ihx_variants > 0, "{}", topo.key);
        }
    }
}
