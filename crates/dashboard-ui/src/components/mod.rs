//! Small line-level widgets shared by the views.

pub mod header;
pub mod indicators;
pub mod progress_bar;
