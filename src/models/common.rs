use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::datasets::balances::BalanceChange;
use crate::models::datasets::fund_flow::FundFlow;
use crate::models::datasets::gas::GasProfile;
use crate::models::datasets::state::ContractStateChange;
use crate::models::datasets::traces::CallRecord;
use crate::models::datasets::transactions::TransactionInfo;

pub const DEFAULT_INDENT_UNIT: u32 = 20; // px per call depth level

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub address: String,
    pub port: u16,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            address: "0.0.0.0".to_string(),
            port: 9100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub indent_unit: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            indent_unit: DEFAULT_INDENT_UNIT,
        }
    }
}

// Keys are hex strings: 20-byte addresses and 4-byte function selectors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelsConfig {
    pub addresses: HashMap<String, String>,
    pub selectors: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub view: ViewConfig,
    pub metrics: MetricsConfig,
    pub labels: LabelsConfig,
    pub fixture_path: Option<String>, // Built-in fixture is served when unset
    pub trace_path: Option<String>,   // Geth callTracer JSON replacing the fixture's calls
}

// Everything the dashboard shows for one transaction. Loaded once at startup
// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub transaction: TransactionInfo,
    pub fund_flow: FundFlow,
    pub gas_profile: GasProfile,
    pub state_changes: Vec<ContractStateChange>,
    pub balance_changes: Vec<BalanceChange>,
    pub calls: Vec<CallRecord>,
}
