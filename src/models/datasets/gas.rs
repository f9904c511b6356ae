use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasOperation {
    pub name: String,
    pub gas: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasProfile {
    pub total_gas: u64,
    pub actual_gas_used: u64,
    pub executed_gas: u64,
    pub operations: Vec<GasOperation>,
}
