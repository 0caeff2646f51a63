//! Output mode routing.

/// How a command formats its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// JSON on stdout and nothing else
    Json,
    /// Stable `key=value` text for scripts
    #[default]
    Plain,
    /// Colors, tables and bars (TTY only)
    Pretty,
}

impl OutputMode {
    /// Resolve the mode from flags and environment.
    ///
    /// `--json` wins over everything. `--format plain` and `TERM=dumb`
    /// force plain. Otherwise pretty is used only when stdout is a TTY.
    pub fn resolve(
        json_flag: bool,
        format_flag: Option<&str>,
        is_tty: bool,
        term_is_dumb: bool,
    ) -> Self {
        if json_flag {
            return Self::Json;
        }
        if format_flag == Some("plain") || term_is_dumb {
            return Self::Plain;
        }
        if is_tty {
            Self::Pretty
        } else {
            Self::Plain
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    pub fn is_pretty(&self) -> bool {
        matches!(self, Self::Pretty)
    }
}
