use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::Write;

use crate::models::datasets::state::{ContractStateChange, StateChange};
use crate::utils::shorten_address;

/// Which contract sections of the state-change panel are expanded.
/// Sections start collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: BTreeSet<usize>,
}

impl ExpansionState {
    pub fn from_indices<I: IntoIterator<Item = usize>>(indices: I) -> Self {
        Self {
            expanded: indices.into_iter().collect(),
        }
    }

    pub fn toggle(&mut self, index: usize) {
        if !self.expanded.remove(&index) {
            self.expanded.insert(index);
        }
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateChangeLine {
    pub key: String,
    pub r#type: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSection {
    pub index: usize,
    pub contract: String,
    pub address: String,
    pub short_address: String,
    pub expanded: bool,
    // Empty while collapsed
    pub changes: Vec<StateChangeLine>,
}

fn change_lines(change: &StateChange) -> Vec<String> {
    if let Some(value) = &change.value {
        return vec![format!("→ {value}")];
    }
    change
        .values
        .iter()
        .flatten()
        .map(|value| match &value.from {
            Some(from) => format!("→ {from} → {}", value.to),
            None => format!("→ {}", value.to),
        })
        .collect()
}

pub fn state_sections(changes: &[ContractStateChange], expansion: &ExpansionState) -> Vec<StateSection> {
    changes
        .iter()
        .enumerate()
        .map(|(index, contract)| {
            let expanded = expansion.is_expanded(index);
            StateSection {
                index,
                contract: contract.contract.clone(),
                address: contract.address.clone(),
                short_address: shorten_address(&contract.address),
                expanded,
                changes: if expanded {
                    contract
                        .changes
                        .iter()
                        .map(|change| StateChangeLine {
                            key: change.key.clone(),
                            r#type: change.r#type.clone(),
                            lines: change_lines(change),
                        })
                        .collect()
                } else {
                    Vec::new()
                },
            }
        })
        .collect()
}

pub fn render_text(sections: &[StateSection]) -> String {
    let mut out = String::from("State Changes\n");
    for section in sections {
        let marker = if section.expanded { "v" } else { ">" };
        let _ = writeln!(out, "{} {} {}", marker, section.contract, section.short_address);
        for change in &section.changes {
            let _ = writeln!(out, "    {} ({})", change.key, change.r#type);
            for line in &change.lines {
                let _ = writeln!(out, "      {line}");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_collapses() {
        let mut state = ExpansionState::default();
        assert!(!state.is_expanded(0));
        state.toggle(0);
        assert!(state.is_expanded(0));
        state.toggle(0);
        assert!(!state.is_expanded(0));
    }
}
