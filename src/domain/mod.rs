//! Domain aggregates rendered by the dashboard.

pub mod order;
pub mod types;
