use chrono::Duration;

use tx_dashboard::fixtures::BUILTIN;
use tx_dashboard::models::datasets::gas::GasProfile;
use tx_dashboard::views::balances::{Direction, balance_rows};
use tx_dashboard::views::fund_flow::{fund_flow_view, highlighted_edges};
use tx_dashboard::views::gas::{efficiency_percent, gas_view};
use tx_dashboard::views::state::{ExpansionState, state_sections};
use tx_dashboard::views::summary::summary_view;
use tx_dashboard::views::{PageState, render_dashboard};

#[test]
fn test_gas_profile_view() {
    let view = gas_view(&BUILTIN.gas_profile);

    assert_eq!(view.total_gas, "1,806,808");
    assert_eq!(view.actual_gas_used, "1,775,708");
    assert_eq!(view.executed_gas, "1,785,480");

    let names: Vec<&str> = view.operations.iter().map(|op| op.name.as_str()).collect();
    assert_eq!(names, vec!["flashLoan", "receiveFlashLoan", "swapIn", "swap"]);
    assert_eq!(view.operations[0].gas_display, "334,172");

    // 1775708 / 1806808
    assert!((view.efficiency_percent - 98.2787).abs() < 0.001);
}

#[test]
fn test_gas_efficiency_bounds() {
    let empty = GasProfile {
        total_gas: 0,
        actual_gas_used: 100,
        executed_gas: 0,
        operations: Vec::new(),
    };
    assert_eq!(efficiency_percent(&empty), 0.0);

    let overspent = GasProfile {
        total_gas: 100,
        actual_gas_used: 150,
        ..empty
    };
    assert_eq!(efficiency_percent(&overspent), 100.0);
}

#[test]
fn test_balance_rows() {
    let rows = balance_rows(&BUILTIN.balance_changes);
    assert_eq!(rows.len(), 6);

    let sender = &rows[0];
    assert_eq!(sender.label.as_deref(), Some("Sender"));
    assert_eq!(sender.short_address, "0xfd29...5e77");
    assert_eq!(sender.tokens[0].direction, Direction::Gain);
    assert_eq!(sender.tokens[0].value_usd, "$31.1");

    // Named accounts are shown verbatim
    let builder = &rows[2];
    assert_eq!(builder.short_address, "Titan Builder");

    let fluid = &rows[3];
    assert_eq!(fluid.tokens[1].direction, Direction::Loss);
    assert_eq!(fluid.tokens[1].value_usd, "$82,897.5");
    assert_eq!(fluid.tokens[0].value_usd, "$79,692.76");
}

#[test]
fn test_state_sections_collapsed_by_default() {
    let sections = state_sections(&BUILTIN.state_changes, &ExpansionState::default());
    assert_eq!(sections.len(), 1);
    assert!(!sections[0].expanded);
    assert!(sections[0].changes.is_empty());
    assert_eq!(sections[0].short_address, "0x52aa...e497");
}

#[test]
fn test_state_sections_expanded() {
    let mut expansion = ExpansionState::default();
    expansion.toggle(0);
    let sections = state_sections(&BUILTIN.state_changes, &expansion);

    let changes = &sections[0].changes;
    assert_eq!(changes.len(), 2);
    assert_eq!(changes[0].key, "_userBorrowData");
    assert_eq!(
        changes[0].lines,
        vec!["→ 0x836951eb21f3df98273517b7249dceff270d34bf".to_string()]
    );
    assert_eq!(changes[1].lines.len(), 2);
    assert_eq!(
        changes[1].lines[0],
        "→ 0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48 → 122109847355824500122113115268342768686509130318396722688"
    );
}

#[test]
fn test_fund_flow_dimming() {
    let flow = &BUILTIN.fund_flow;

    let nothing_selected = highlighted_edges(flow, None);
    assert!(nothing_selected.iter().all(|edge| !edge.dimmed));

    // Receiver touches every edge
    let receiver = highlighted_edges(flow, Some("receiver"));
    assert!(receiver.iter().all(|edge| !edge.dimmed));

    let fluid = fund_flow_view(flow, Some("fluid"));
    let lit: Vec<(&str, &str)> = fluid
        .edges
        .iter()
        .filter(|edge| !edge.dimmed)
        .map(|edge| (edge.edge.from.as_str(), edge.edge.to.as_str()))
        .collect();
    assert_eq!(lit, vec![("receiver", "fluid")]);
}

#[test]
fn test_summary_rows() {
    let tx = &BUILTIN.transaction;
    let view = summary_view(tx, tx.timestamp + Duration::days(5));

    assert_eq!(view.status, "Success");
    let timestamp = view.overview.iter().find(|row| row.label == "Timestamp").unwrap();
    assert_eq!(timestamp.value, "2025-02-04 19:21:35 (UTC) (5 days ago)");

    let copyable: Vec<&str> = view
        .overview
        .iter()
        .chain(&view.fees)
        .chain(&view.kind)
        .filter(|row| row.copyable)
        .map(|row| row.label)
        .collect();
    assert_eq!(copyable, vec!["From", "To"]);
    assert_eq!(view.kind[2].value, "210");
}

#[test]
fn test_render_dashboard_contains_every_panel() {
    let tx = &BUILTIN.transaction;
    let page = PageState::default();
    let text = render_dashboard(&BUILTIN, &page, 20, tx.timestamp + Duration::days(5));

    for heading in [
        "Basic Info",
        "Fund Flow",
        "Gas Profiler",
        "State Changes",
        "Balance Changes",
        "Invocation Flow",
    ] {
        assert!(text.contains(heading), "missing panel {heading}");
    }
    assert!(text.contains("  [1] STATICCALL Uniswap V3: USDC 3.tickSpacing (10)"));
    assert!(text.contains("showing 3 of 3"));
}
