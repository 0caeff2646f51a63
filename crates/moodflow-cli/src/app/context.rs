//! Per-invocation context shared by every command handler.

use once_cell::unsync::OnceCell;

use moodflow_core::storage::JsonFileStore;

use crate::cli::Cli;
use crate::ui::UiContext;

use super::resolver::{resolve_settings, Settings};

/// CLI arguments plus lazily resolved settings.
pub struct AppContext<'a> {
    cli: &'a Cli,
    settings: OnceCell<Settings>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            settings: OnceCell::new(),
        }
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    pub fn settings(&self) -> anyhow::Result<&Settings> {
        self.settings.get_or_try_init(|| resolve_settings(self.cli))
    }

    pub fn timezone(&self) -> anyhow::Result<chrono_tz::Tz> {
        Ok(self.settings()?.timezone)
    }

    /// Open the journal. A missing file reads as an empty journal.
    pub fn open_journal(&self) -> anyhow::Result<JsonFileStore> {
        let path = &self.settings()?.journal_path;
        Ok(JsonFileStore::open(path)?)
    }

    pub fn ui_context(&self, json: bool, format: Option<&str>) -> UiContext {
        UiContext::from_env(json, format, self.cli.no_color, self.cli.ascii)
    }
}
