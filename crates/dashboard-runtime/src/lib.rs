//! Session runtime for the Netflix dashboard.
//!
//! Holds the loaded dataset and active filter for one session and re-runs
//! aggregation when the filter changes.

pub mod data_manager;

pub use dashboard_core as core;
pub use dashboard_data as data;
