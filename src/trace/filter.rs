use crate::models::datasets::traces::{CallRecord, DisplayFilter};

/// Selects the call records to display, in execution order.
///
/// Always run against the full record list: toggling `include_static_calls`
/// back on must bring hidden STATICCALLs back, so a previously filtered
/// subset is never reused. `detail_level` is not consulted.
pub fn filter_and_order<'a>(records: &'a [CallRecord], filter: &DisplayFilter) -> Vec<&'a CallRecord> {
    let query = filter.text_query.to_lowercase();

    records
        .iter()
        .filter(|record| {
            // Static call exclusion is applied before, and independently of, the text match
            if !filter.include_static_calls && record.is_static() {
                return false;
            }
            query.is_empty() || matches_query(record, &query)
        })
        .collect()
}

// `query` must already be lowercased
fn matches_query(record: &CallRecord, query: &str) -> bool {
    record.target.to_lowercase().contains(query)
        || (!record.function_name.is_empty() && record.function_name.to_lowercase().contains(query))
}

/// Horizontal offset for a record at `depth`.
pub fn indent_for(depth: u32, unit: u32) -> u32 {
    depth.saturating_mul(unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::datasets::traces::CallKind;

    #[test]
    fn test_empty_function_name_never_matches() {
        let record = CallRecord::new(0, CallKind::Call, "0xce21...1954", 0);
        assert!(!matches_query(&record, "fee"));
        assert!(matches_query(&record, "ce21"));
    }

    #[test]
    fn test_indent_saturates() {
        assert_eq!(indent_for(3, 20), 60);
        assert_eq!(indent_for(u32::MAX, 20), u32::MAX);
    }
}
