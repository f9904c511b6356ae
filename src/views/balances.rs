use serde::Serialize;
use std::fmt::Write;

use crate::models::datasets::balances::{BalanceChange, TokenChange};
use crate::utils::{format_usd, shorten_address};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Gain,
    Loss,
}

impl Direction {
    pub fn of(balance: &str) -> Self {
        if balance.starts_with('+') {
            Direction::Gain
        } else {
            Direction::Loss
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRow {
    pub token: String,
    pub balance: String,
    pub direction: Direction,
    pub value_usd: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub address: String,
    pub short_address: String,
    pub tokens: Vec<TokenRow>,
}

fn token_row(change: &TokenChange) -> TokenRow {
    TokenRow {
        token: change.token.clone(),
        balance: change.balance.clone(),
        direction: Direction::of(&change.balance),
        value_usd: format!("${}", format_usd(change.value_usd)),
        icon: change.icon.clone(),
    }
}

pub fn balance_rows(changes: &[BalanceChange]) -> Vec<BalanceRow> {
    changes
        .iter()
        .map(|change| BalanceRow {
            label: change.label.clone(),
            address: change.address.clone(),
            short_address: shorten_address(&change.address),
            tokens: change.changes.iter().map(token_row).collect(),
        })
        .collect()
}

pub fn render_text(rows: &[BalanceRow]) -> String {
    let mut out = String::from("Balance Changes\n");
    for row in rows {
        match &row.label {
            Some(label) => {
                let _ = writeln!(out, "[{}] {}", label, row.short_address);
            }
            None => {
                let _ = writeln!(out, "{}", row.short_address);
            }
        }
        for token in &row.tokens {
            let _ = writeln!(out, "  {}  {}  {}", token.token, token.balance, token.value_usd);
        }
    }
    out
}
