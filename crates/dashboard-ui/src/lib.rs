//! Terminal UI layer for the Netflix dashboard.
//!
//! Provides themes, bar and header components, count tables, the per-tab
//! dashboard views, plain-text and JSON reports, and the main application
//! event loop built on top of [`ratatui`].

pub mod app;
pub mod components;
pub mod dashboard_view;
pub mod report;
pub mod table_view;
pub mod themes;

pub use dashboard_core as core;
