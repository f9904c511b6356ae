pub mod collector;
pub mod filter;

pub use collector::{AddressBook, collect_call_records, collect_from_geth_trace};
pub use filter::{filter_and_order, indent_for};
