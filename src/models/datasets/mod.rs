pub mod balances;
pub mod fund_flow;
pub mod gas;
pub mod state;
pub mod traces;
pub mod transactions;
