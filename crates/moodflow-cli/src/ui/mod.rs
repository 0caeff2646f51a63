//! Terminal presentation for the moodflow CLI.
//!
//! `UiContext` captures what the terminal supports, `OutputMode` decides
//! between JSON, plain and pretty output, and the `render` helpers build
//! the strings each command prints.

mod context;
pub mod format;
mod mode;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use mode::OutputMode;

pub use render::{blank_line, divider, header, hint, kv, print, receipt, simple_table, Column};

pub use format::{format_datetime, short_id, truncate};
