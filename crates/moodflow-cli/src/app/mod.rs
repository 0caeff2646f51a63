//! Application-level plumbing: settings resolution and the per-run context.

mod context;
mod resolver;

pub use context::AppContext;
pub use resolver::{resolve_config_path, resolve_settings, Settings};
