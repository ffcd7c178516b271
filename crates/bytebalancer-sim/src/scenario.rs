//! TOML scenario configuration for the slot loop.

use std::collections::HashSet;

use serde::Deserialize;

use bytebalancer_core::Ue;

pub const SCENARIO_VERSION: u32 = 1;

/// Raw deserialized form of a scenario file. Everything is optional;
/// `resolve` fills defaults and validates.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScenarioInput {
    pub version: u32,
    pub slots: Option<u32>,
    pub rb_budget: Option<u32>,
    pub ues: Vec<UeInput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UeInput {
    pub ue_id: Option<u16>,
    pub weight: u8,
    pub active: Option<bool>,
}

/// A resolved, ready-to-run scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub version: u32,
    /// Number of scheduling slots (TTIs) to simulate.
    pub slots: u32,
    /// Resource-block budget available in each slot, reset every slot.
    pub rb_budget: u32,
    pub ues: Vec<Ue>,
}

impl Default for Scenario {
    /// Three UEs with low/medium/high weights and six RBs per slot over
    /// five slots.
    fn default() -> Self {
        Self {
            version: SCENARIO_VERSION,
            slots: 5,
            rb_budget: 6,
            ues: vec![
                Ue::new(1001, 1, true),
                Ue::new(1002, 2, true),
                Ue::new(1003, 4, true),
            ],
        }
    }
}

impl ScenarioInput {
    pub fn resolve(self) -> Result<Scenario, String> {
        let version = if self.version == 0 {
            SCENARIO_VERSION
        } else {
            self.version
        };
        if version != SCENARIO_VERSION {
            return Err(format!("Unsupported scenario version {}", version));
        }

        let defaults = Scenario::default();
        let slots = self.slots.unwrap_or(defaults.slots);
        let rb_budget = self.rb_budget.unwrap_or(defaults.rb_budget);

        // Duplicate ids keep the first entry, like link dedup elsewhere.
        // Weight 0 is allowed; the scheduler skips such UEs.
        let mut used = HashSet::new();
        let mut ues = Vec::new();
        for (idx, ue) in self.ues.into_iter().enumerate() {
            let ue_id = ue.ue_id.unwrap_or(idx as u16);
            if !used.insert(ue_id) {
                continue;
            }
            ues.push(Ue::new(ue_id, ue.weight, ue.active.unwrap_or(true)));
        }

        Ok(Scenario {
            version,
            slots,
            rb_budget,
            ues,
        })
    }
}

impl Scenario {
    pub fn from_toml_str(input: &str) -> Result<Self, String> {
        if input.trim().is_empty() {
            return Ok(Scenario::default());
        }
        let parsed: ScenarioInput =
            toml::from_str(input).map_err(|e| format!("Invalid scenario TOML: {}", e))?;
        parsed.resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_toml_scenario_basic() {
        let toml = r#"
            version = 1
            slots = 3
            rb_budget = 4

            [[ues]]
            ue_id = 17
            weight = 2

            [[ues]]
            weight = 5
            active = false
        "#;

        let s = Scenario::from_toml_str(toml).unwrap();
        assert_eq!(s.version, SCENARIO_VERSION);
        assert_eq!(s.slots, 3);
        assert_eq!(s.rb_budget, 4);
        assert_eq!(s.ues.len(), 2);
        assert_eq!(s.ues[0], Ue::new(17, 2, true));
        assert_eq!(s.ues[1], Ue::new(1, 5, false));
    }

    #[test]
    fn parse_toml_scenario_dedup() {
        let toml = r#"
            [[ues]]
            ue_id = 7
            weight = 1
            [[ues]]
            ue_id = 7
            weight = 9
        "#;
        let s = Scenario::from_toml_str(toml).unwrap();
        assert_eq!(s.ues.len(), 1);
        assert_eq!(s.ues[0].weight, 1);
    }

    #[test]
    fn empty_input_yields_default_scenario() {
        let s = Scenario::from_toml_str("").unwrap();
        assert_eq!(s.slots, 5);
        assert_eq!(s.rb_budget, 6);
        assert_eq!(s.ues.len(), 3);
        assert_eq!(s.ues[2], Ue::new(1003, 4, true));
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let err = Scenario::from_toml_str("version = 2").unwrap_err();
        assert!(err.contains("version"));
    }
}
