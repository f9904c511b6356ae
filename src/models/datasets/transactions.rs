use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Display-ready summary of a transaction. Amounts are kept as the strings the
// explorer shows (units included), not as raw integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInfo {
    pub status: String,
    pub block: u64,
    pub timestamp: DateTime<Utc>,
    pub position: u64,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub gas_price: String,
    pub base_fee: String,
    pub max_priority_fee: String,
    pub transaction_fee: String,
    pub sender: String,
    pub receiver: String,
    pub value: String,
    pub tx_type: String,
    pub event_count: u64,
    pub internal_txns: u64,
}
