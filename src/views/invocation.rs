use serde::Serialize;
use std::fmt::Write;

use crate::models::datasets::traces::{CallKind, CallRecord, DetailLevel, DisplayFilter, RenderOptions};
use crate::trace::{filter_and_order, indent_for};

const TEXT_INDENT_UNIT: u32 = 2; // spaces per depth level in text output

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRow {
    pub id: u64,
    pub kind: CallKind,
    pub depth: u32,
    pub indent: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller: Option<String>,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationView {
    pub text_query: String,
    pub include_static_calls: bool,
    pub show_gas_used: bool,
    pub detail_level: DetailLevel,
    pub total_calls: usize,
    pub rows: Vec<CallRow>,
}

/// Filters `records` and lays the survivors out as display rows.
pub fn invocation_view(
    records: &[CallRecord],
    filter: &DisplayFilter,
    options: RenderOptions,
    indent_unit: u32,
) -> InvocationView {
    let rows = filter_and_order(records, filter)
        .into_iter()
        .map(|record| call_row(record, options, indent_unit))
        .collect();

    InvocationView {
        text_query: filter.text_query.clone(),
        include_static_calls: filter.include_static_calls,
        show_gas_used: options.show_gas_used,
        detail_level: filter.detail_level,
        total_calls: records.len(),
        rows,
    }
}

fn call_row(record: &CallRecord, options: RenderOptions, indent_unit: u32) -> CallRow {
    CallRow {
        id: record.id,
        kind: record.kind,
        depth: record.depth,
        indent: indent_for(record.depth, indent_unit),
        value: record.value_transferred.clone(),
        caller: record.caller.clone(),
        target: record.target.clone(),
        function: (!record.function_name.is_empty()).then(|| record.function_name.clone()),
        arguments: record.arguments_display.clone(),
        result: record.result_display.clone(),
        gas: record.gas_display.clone().filter(|_| options.show_gas_used),
    }
}

pub fn render_row(row: &CallRow) -> String {
    let mut line = " ".repeat(indent_for(row.depth, TEXT_INDENT_UNIT) as usize);
    let _ = write!(line, "[{}] {}", row.id, row.kind);
    if let Some(value) = &row.value {
        let _ = write!(line, " value: {value}");
    }
    if let Some(caller) = &row.caller {
        let _ = write!(line, " {caller}");
    }
    let _ = write!(line, " {}", row.target);
    if let Some(function) = &row.function {
        let _ = write!(line, ".{function}");
    }
    if let Some(arguments) = &row.arguments {
        let _ = write!(line, " {arguments}");
    }
    if let Some(result) = &row.result {
        let _ = write!(line, " {result}");
    }
    if let Some(gas) = &row.gas {
        let _ = write!(line, " ({gas} gas)");
    }
    line
}

pub fn render_text(view: &InvocationView) -> String {
    let mut out = String::from("Invocation Flow\n");
    let _ = writeln!(
        out,
        "filter: {:?} | static calls: {} | gas used: {} | expand: {} | showing {} of {}",
        view.text_query,
        if view.include_static_calls { "on" } else { "off" },
        if view.show_gas_used { "on" } else { "off" },
        view.detail_level,
        view.rows.len(),
        view.total_calls,
    );
    for row in &view.rows {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out
}
