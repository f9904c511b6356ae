use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::metrics::Metrics;
use crate::models::common::{DEFAULT_INDENT_UNIT, DashboardData};
use crate::models::datasets::traces::{DetailLevel, DisplayFilter, RenderOptions};
use crate::models::datasets::transactions::TransactionInfo;
use crate::models::errors::QueryError;
use crate::views::{
    self, PageState,
    balances::{BalanceRow, balance_rows},
    fund_flow::{FundFlowView, fund_flow_view},
    gas::{GasView, gas_view},
    invocation::{self, InvocationView, invocation_view},
    state::{ExpansionState, StateSection, state_sections},
};

#[derive(Clone)]
pub struct AppState {
    pub data: Arc<DashboardData>,
    pub indent_unit: u32,
    pub metrics: Option<Arc<Metrics>>,
}

impl AppState {
    pub fn new(data: DashboardData) -> Self {
        Self {
            data: Arc::new(data),
            indent_unit: DEFAULT_INDENT_UNIT,
            metrics: None,
        }
    }

    pub fn with_indent_unit(mut self, indent_unit: u32) -> Self {
        self.indent_unit = indent_unit;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    fn observe(&self, route: &'static str, start: Instant, ok: bool) {
        if let Some(metrics) = &self.metrics {
            metrics.record_request(route, start.elapsed().as_secs_f64(), ok);
        }
    }
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

/////////////////////////////////// Query Parameters ///////////////////////////////////
// Raw strings so malformed values surface as QueryError instead of axum's rejection text
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub q: Option<String>,
    #[serde(rename = "static")]
    pub include_static: Option<String>,
    pub gas: Option<String>,
    pub detail: Option<String>,
    pub expanded: Option<String>,
    pub selected: Option<String>,
}

fn parse_flag(param: &str, value: Option<&str>, default: bool) -> Result<bool, QueryError> {
    match value.map(str::to_ascii_lowercase).as_deref() {
        None | Some("") => Ok(default),
        Some("true") | Some("1") | Some("on") => Ok(true),
        Some("false") | Some("0") | Some("off") => Ok(false),
        Some(_) => Err(QueryError::InvalidFlag {
            param: param.to_string(),
            value: value.unwrap_or_default().to_string(),
        }),
    }
}

fn parse_indices(param: &str, value: Option<&str>) -> Result<ExpansionState, QueryError> {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return Ok(ExpansionState::default());
    };
    value
        .split(',')
        .map(|part| part.trim().parse::<usize>())
        .collect::<Result<Vec<_>, _>>()
        .map(ExpansionState::from_indices)
        .map_err(|_| QueryError::InvalidIndexList {
            param: param.to_string(),
            value: value.to_string(),
        })
}

impl DashboardQuery {
    pub fn display_filter(&self) -> Result<DisplayFilter, QueryError> {
        let detail_level = match self.detail.as_deref() {
            None | Some("") => DetailLevel::Default,
            Some(level) => level.parse()?,
        };
        Ok(DisplayFilter::default()
            .with_query(self.q.clone().unwrap_or_default())
            .with_static_calls(parse_flag("static", self.include_static.as_deref(), true)?)
            .with_detail_level(detail_level))
    }

    pub fn render_options(&self) -> Result<RenderOptions, QueryError> {
        Ok(RenderOptions {
            show_gas_used: parse_flag("gas", self.gas.as_deref(), false)?,
        })
    }

    pub fn page_state(&self) -> Result<PageState, QueryError> {
        Ok(PageState {
            filter: self.display_filter()?,
            options: self.render_options()?,
            expansion: parse_indices("expanded", self.expanded.as_deref())?,
            selected_node: self.selected.clone().filter(|s| !s.is_empty()),
        })
    }
}

/////////////////////////////////////// Handlers ///////////////////////////////////////
async fn dashboard_handler(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<String, QueryError> {
    let start = Instant::now();
    let page = query.page_state().inspect_err(|e| {
        warn!("Rejected dashboard query: {}", e);
        state.observe("dashboard", start, false);
    })?;
    let body = views::render_dashboard(&state.data, &page, state.indent_unit, Utc::now());
    state.observe("dashboard", start, true);
    Ok(body)
}

fn calls_view(state: &AppState, query: &DashboardQuery, route: &'static str) -> Result<InvocationView, QueryError> {
    let start = Instant::now();
    let filter = query.display_filter();
    let options = query.render_options();
    let (filter, options) = match (filter, options) {
        (Ok(filter), Ok(options)) => (filter, options),
        (Err(e), _) | (_, Err(e)) => {
            warn!("Rejected call trace query: {}", e);
            state.observe(route, start, false);
            return Err(e);
        }
    };

    let view = invocation_view(&state.data.calls, &filter, options, state.indent_unit);
    debug!(
        "Call trace filter {:?} kept {} of {} records",
        filter,
        view.rows.len(),
        view.total_calls
    );
    if let Some(metrics) = &state.metrics {
        metrics.filtered_calls.record(view.rows.len() as u64, &[]);
    }
    state.observe(route, start, true);
    Ok(view)
}

async fn calls_json_handler(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<InvocationView>, QueryError> {
    calls_view(&state, &query, "api_calls").map(Json)
}

async fn calls_text_handler(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<String, QueryError> {
    calls_view(&state, &query, "calls").map(|view| invocation::render_text(&view))
}

async fn transaction_handler(State(state): State<AppState>) -> Json<TransactionInfo> {
    let start = Instant::now();
    let tx = state.data.transaction.clone();
    state.observe("api_transaction", start, true);
    Json(tx)
}

async fn balances_handler(State(state): State<AppState>) -> Json<Vec<BalanceRow>> {
    let start = Instant::now();
    let rows = balance_rows(&state.data.balance_changes);
    state.observe("api_balances", start, true);
    Json(rows)
}

async fn gas_handler(State(state): State<AppState>) -> Json<GasView> {
    let start = Instant::now();
    let view = gas_view(&state.data.gas_profile);
    state.observe("api_gas", start, true);
    Json(view)
}

async fn state_handler(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<Vec<StateSection>>, QueryError> {
    let start = Instant::now();
    let expansion = parse_indices("expanded", query.expanded.as_deref()).inspect_err(|_| {
        state.observe("api_state", start, false);
    })?;
    let sections = state_sections(&state.data.state_changes, &expansion);
    state.observe("api_state", start, true);
    Ok(Json(sections))
}

async fn fund_flow_handler(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Json<FundFlowView> {
    let start = Instant::now();
    let selected = query.selected.as_deref().filter(|s| !s.is_empty());
    let view = fund_flow_view(&state.data.fund_flow, selected);
    state.observe("api_fund_flow", start, true);
    Json(view)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard_handler))
        .route("/calls", get(calls_text_handler))
        .route("/api/transaction", get(transaction_handler))
        .route("/api/balances", get(balances_handler))
        .route("/api/gas", get(gas_handler))
        .route("/api/state", get(state_handler))
        .route("/api/fund-flow", get(fund_flow_handler))
        .route("/api/calls", get(calls_json_handler))
        .with_state(state)
}
