pub mod balances;
pub mod fund_flow;
pub mod gas;
pub mod invocation;
pub mod state;
pub mod summary;

use chrono::{DateTime, Utc};

use crate::models::common::DashboardData;
use crate::models::datasets::traces::{DisplayFilter, RenderOptions};
use crate::views::state::ExpansionState;

/// Per-request UI state for a full dashboard render.
#[derive(Debug, Clone, Default)]
pub struct PageState {
    pub filter: DisplayFilter,
    pub options: RenderOptions,
    pub expansion: ExpansionState,
    pub selected_node: Option<String>,
}

pub fn render_dashboard(data: &DashboardData, page: &PageState, indent_unit: u32, now: DateTime<Utc>) -> String {
    let flow = fund_flow::fund_flow_view(&data.fund_flow, page.selected_node.as_deref());

    [
        summary::render_text(&summary::summary_view(&data.transaction, now)),
        fund_flow::render_text(&data.fund_flow, &flow),
        gas::render_text(&gas::gas_view(&data.gas_profile)),
        state::render_text(&state::state_sections(&data.state_changes, &page.expansion)),
        balances::render_text(&balances::balance_rows(&data.balance_changes)),
        invocation::render_text(&invocation::invocation_view(
            &data.calls,
            &page.filter,
            page.options,
            indent_unit,
        )),
    ]
    .join("\n")
}
