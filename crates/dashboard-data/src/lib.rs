//! Data layer for the Netflix dashboard.
//!
//! Loads and cleans the titles CSV, applies the session filter, builds the
//! summary tables and runs the top-level analysis pipeline.

pub mod aggregator;
pub mod analysis;
pub mod filter;
pub mod reader;

pub use dashboard_core as core;
