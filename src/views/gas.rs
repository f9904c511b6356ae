use serde::Serialize;
use std::fmt::Write;

use crate::models::datasets::gas::GasProfile;
use crate::utils::format_thousands;

const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GasOperationRow {
    pub name: String,
    pub gas: u64,
    pub gas_display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GasView {
    pub total_gas: String,
    pub actual_gas_used: String,
    pub executed_gas: String,
    pub efficiency_percent: f64,
    pub operations: Vec<GasOperationRow>,
}

// Share of the total gas budget actually consumed, in [0, 100]
pub fn efficiency_percent(profile: &GasProfile) -> f64 {
    if profile.total_gas == 0 {
        return 0.0;
    }
    let percent = profile.actual_gas_used as f64 / profile.total_gas as f64 * 100.0;
    percent.clamp(0.0, 100.0)
}

pub fn gas_view(profile: &GasProfile) -> GasView {
    GasView {
        total_gas: format_thousands(profile.total_gas),
        actual_gas_used: format_thousands(profile.actual_gas_used),
        executed_gas: format_thousands(profile.executed_gas),
        efficiency_percent: efficiency_percent(profile),
        operations: profile
            .operations
            .iter()
            .map(|op| GasOperationRow {
                name: op.name.clone(),
                gas: op.gas,
                gas_display: format_thousands(op.gas),
            })
            .collect(),
    }
}

pub fn render_text(view: &GasView) -> String {
    let filled = ((view.efficiency_percent / 100.0) * BAR_WIDTH as f64).round() as usize;

    let mut out = String::from("Gas Profiler\n");
    let _ = writeln!(out, "Total Gas - {}", view.total_gas);
    let _ = writeln!(out, "Actual Gas Used - {}", view.actual_gas_used);
    let _ = writeln!(out, "Executed Gas - {}", view.executed_gas);
    for op in &view.operations {
        let _ = writeln!(out, "  {} - {}", op.name, op.gas_display);
    }
    let _ = writeln!(
        out,
        "Gas Efficiency: [{}{}] {:.2}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        view.efficiency_percent
    );
    out
}
