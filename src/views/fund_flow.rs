use serde::Serialize;
use std::fmt::Write;

use crate::models::datasets::fund_flow::{FlowEdge, FlowKind, FlowNode, FundFlow};
use crate::utils::shorten_address;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeView {
    #[serde(flatten)]
    pub edge: FlowEdge,
    pub dimmed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundFlowView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<EdgeView>,
}

// With a node selected, only the edges touching it stay at full opacity
pub fn highlighted_edges(flow: &FundFlow, selected: Option<&str>) -> Vec<EdgeView> {
    flow.edges
        .iter()
        .map(|edge| EdgeView {
            edge: edge.clone(),
            dimmed: selected.is_some_and(|node| edge.from != node && edge.to != node),
        })
        .collect()
}

pub fn fund_flow_view(flow: &FundFlow, selected: Option<&str>) -> FundFlowView {
    FundFlowView {
        selected: selected.map(str::to_string),
        nodes: flow.nodes.clone(),
        edges: highlighted_edges(flow, selected),
    }
}

fn node_name(flow: &FundFlow, id: &str) -> String {
    match flow.node(id) {
        Some(FlowNode {
            label,
            address: Some(address),
            ..
        }) => format!("{label} ({})", shorten_address(address)),
        Some(node) => node.label.clone(),
        None => id.to_string(),
    }
}

pub fn render_text(flow: &FundFlow, view: &FundFlowView) -> String {
    let mut out = String::from("Fund Flow\n");
    for edge_view in &view.edges {
        let edge = &edge_view.edge;
        let kind = match edge.kind {
            FlowKind::EthTransfer => "ETH Transfer",
            FlowKind::TokenTransfer => "Token Transfer",
            FlowKind::ContractInteraction => "Contract Interaction",
        };
        let amount = edge.amount.as_deref().map(|a| format!(" {a}")).unwrap_or_default();
        let dimmed = if edge_view.dimmed { " (dimmed)" } else { "" };
        let _ = writeln!(
            out,
            "  {} -> {} [{}{}]{}",
            node_name(flow, &edge.from),
            node_name(flow, &edge.to),
            kind,
            amount,
            dimmed
        );
    }
    out
}
