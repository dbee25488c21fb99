//! Shared domain layer for the Netflix dashboard.
//!
//! Holds the title data model, load errors and warnings, cell parsers,
//! display formatting helpers and command-line settings used by every other
//! crate in the workspace.

pub mod data_processors;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
