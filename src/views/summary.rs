use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;

use crate::models::datasets::transactions::TransactionInfo;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoRow {
    pub label: &'static str,
    pub value: String,
    pub copyable: bool,
}

impl InfoRow {
    fn new(label: &'static str, value: impl ToString) -> Self {
        Self {
            label,
            value: value.to_string(),
            copyable: false,
        }
    }

    fn copyable(label: &'static str, value: impl ToString) -> Self {
        Self {
            copyable: true,
            ..Self::new(label, value)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    pub status: String,
    pub overview: Vec<InfoRow>,
    pub fees: Vec<InfoRow>,
    pub kind: Vec<InfoRow>,
}

// "2025-02-04 19:21:35 (UTC) (5 days ago)"
pub fn format_timestamp(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let age = now.signed_duration_since(timestamp);
    let relative = match age.num_days() {
        d if d > 1 => format!("{d} days ago"),
        1 => "1 day ago".to_string(),
        _ if age.num_hours() > 1 => format!("{} hrs ago", age.num_hours()),
        _ if age.num_hours() == 1 => "1 hr ago".to_string(),
        _ if age.num_minutes() > 1 => format!("{} mins ago", age.num_minutes()),
        _ if age.num_seconds() >= 0 => "just now".to_string(),
        _ => "in the future".to_string(),
    };
    format!("{} (UTC) ({})", timestamp.format("%Y-%m-%d %H:%M:%S"), relative)
}

pub fn summary_view(tx: &TransactionInfo, now: DateTime<Utc>) -> SummaryView {
    SummaryView {
        status: tx.status.clone(),
        overview: vec![
            InfoRow::new("Block", tx.block),
            InfoRow::new("Timestamp", format_timestamp(tx.timestamp, now)),
            InfoRow::new("Position", tx.position),
            InfoRow::copyable("From", &tx.sender),
            InfoRow::copyable("To", &tx.receiver),
            InfoRow::new("Value", &tx.value),
        ],
        fees: vec![
            InfoRow::new("Gas Limit", tx.gas_limit),
            InfoRow::new("Gas Used", tx.gas_used),
            InfoRow::new("Gas Price", &tx.gas_price),
            InfoRow::new("Base", &tx.base_fee),
            InfoRow::new("Max Priority", &tx.max_priority_fee),
            InfoRow::new("Transaction Fee", &tx.transaction_fee),
        ],
        kind: vec![
            InfoRow::new("Transaction Type", &tx.tx_type),
            InfoRow::new("Event Count", tx.event_count),
            InfoRow::new("Internal Transactions", tx.internal_txns),
        ],
    }
}

pub fn render_text(view: &SummaryView) -> String {
    let mut out = format!("Transaction Details [{}]\n\nBasic Info\n", view.status);
    for row in view.overview.iter().chain(&view.fees).chain(&view.kind) {
        let _ = writeln!(out, "  {:<22}{}", row.label, row.value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_timestamp_relative() {
        let ts = DateTime::from_timestamp(1_738_696_895, 0).unwrap();
        assert_eq!(
            format_timestamp(ts, ts + Duration::days(5)),
            "2025-02-04 19:21:35 (UTC) (5 days ago)"
        );
        assert_eq!(
            format_timestamp(ts, ts + Duration::hours(3)),
            "2025-02-04 19:21:35 (UTC) (3 hrs ago)"
        );
        assert_eq!(
            format_timestamp(ts, ts + Duration::minutes(90)),
            "2025-02-04 19:21:35 (UTC) (1 hr ago)"
        );
        assert_eq!(
            format_timestamp(ts, ts + Duration::minutes(45)),
            "2025-02-04 19:21:35 (UTC) (45 mins ago)"
        );
        assert_eq!(format_timestamp(ts, ts), "2025-02-04 19:21:35 (UTC) (just now)");
    }
}
