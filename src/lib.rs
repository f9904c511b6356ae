pub mod fixtures;
pub mod metrics;
pub mod models;
pub mod server;
pub mod trace;
pub mod utils;
pub mod views;
