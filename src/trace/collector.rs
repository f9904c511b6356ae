use std::collections::HashMap;
use std::str::FromStr;

use alloy_primitives::{Address, Selector, utils::format_ether};
use alloy_rpc_types_trace::geth::{CallFrame, GethTrace};
use tracing::debug;

use crate::models::common::LabelsConfig;
use crate::models::datasets::traces::{CallKind, CallRecord};
use crate::models::errors::TraceError;

const RAW_DATA: &str = "(raw data)";
const SENDER: &str = "[Sender]";

/// Known contract labels and function selectors used to make collected
/// traces readable. Anything missing falls back to raw addresses/calldata.
#[derive(Debug, Clone, Default)]
pub struct AddressBook {
    labels: HashMap<Address, String>,
    selectors: HashMap<Selector, String>,
}

impl AddressBook {
    pub fn from_config(config: &LabelsConfig) -> Result<Self, TraceError> {
        let mut book = Self::default();
        for (address, label) in &config.addresses {
            let address = Address::from_str(address).map_err(|_| TraceError::InvalidLabelKey {
                key: address.clone(),
            })?;
            book.labels.insert(address, label.clone());
        }
        for (selector, name) in &config.selectors {
            let selector = Selector::from_str(selector).map_err(|_| TraceError::InvalidLabelKey {
                key: selector.clone(),
            })?;
            book.selectors.insert(selector, name.clone());
        }
        Ok(book)
    }

    pub fn with_label(mut self, address: Address, label: impl Into<String>) -> Self {
        self.labels.insert(address, label.into());
        self
    }

    pub fn with_selector(mut self, selector: Selector, name: impl Into<String>) -> Self {
        self.selectors.insert(selector, name.into());
        self
    }

    pub fn label_for(&self, address: &Address) -> String {
        self.labels
            .get(address)
            .cloned()
            .unwrap_or_else(|| address.to_checksum(None))
    }

    pub fn function_for(&self, input: &[u8]) -> Option<&str> {
        if input.len() < 4 {
            return None;
        }
        self.selectors
            .get(&Selector::from_slice(&input[..4]))
            .map(String::as_str)
    }
}

/// Flattens a `debug_traceTransaction` result produced by the built-in call tracer.
pub fn collect_from_geth_trace(trace: GethTrace, book: &AddressBook) -> Result<Vec<CallRecord>, TraceError> {
    match trace {
        GethTrace::CallTracer(frame) => collect_call_records(frame, book),
        _ => Err(TraceError::UnsupportedTracer),
    }
}

// Recursively flattens a CallFrame and its nested calls in execution order.
// Ids follow visit order and depth is the nesting level of the frame.
pub fn collect_call_records(frame: CallFrame, book: &AddressBook) -> Result<Vec<CallRecord>, TraceError> {
    fn process_frame(
        frame: CallFrame,
        book: &AddressBook,
        depth: u32,
        records: &mut Vec<CallRecord>,
    ) -> Result<(), TraceError> {
        let kind = CallKind::from_str(&frame.typ)?;
        let id = records.len() as u64;

        let target = match &frame.to {
            Some(to) => book.label_for(to),
            None => "[New Contract]".to_string(),
        };

        let mut record = CallRecord::new(id, kind, target, depth)
            .with_gas(frame.gas_used.to_string());

        if depth == 0 {
            record = record.with_caller(SENDER);
        }

        if let Some(value) = frame.value.filter(|v| !v.is_zero()) {
            record = record.with_value(format_ether(value));
        }

        match book.function_for(&frame.input) {
            Some(name) => record = record.with_function(name),
            None if !frame.input.is_empty() => record = record.with_arguments(RAW_DATA),
            None => {}
        }

        if let Some(reason) = frame.revert_reason.as_ref().or(frame.error.as_ref()) {
            record = record.with_result(format!("(reverted: {reason})"));
        } else if let Some(output) = frame.output.as_ref().filter(|o| !o.is_empty()) {
            record = record.with_result(format!("({output})"));
        }

        records.push(record);

        for nested_call in frame.calls {
            process_frame(nested_call, book, depth + 1, records)?;
        }

        Ok(())
    }

    let mut records = Vec::new();
    process_frame(frame, book, 0, &mut records)?;
    debug!("Collected {} call records from trace", records.len());
    Ok(records)
}
