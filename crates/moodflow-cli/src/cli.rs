use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use moodflow_core::VERSION;

/// Moodflow - track how you feel, one entry a day
#[derive(Parser)]
#[command(name = "moodflow")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the journal file
    #[arg(short, long, global = true, env = "MOODFLOW_PATH")]
    pub journal: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the journal will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// IANA timezone used for day boundaries (e.g. "Europe/Berlin")
    #[arg(long)]
    pub timezone: Option<String>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Mood to record (happy, sad, angry, calm, excited)
    #[arg(value_name = "MOOD")]
    pub mood: Option<String>,

    /// Optional note
    #[arg(short, long)]
    pub note: Option<String>,

    /// Set custom date/time (ISO-8601 or YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Limit number of results
    #[arg(long, conflicts_with = "all")]
    pub limit: Option<usize>,

    /// Show every entry
    #[arg(long)]
    pub all: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Entry ID (full UUID)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `stats` command
#[derive(Args)]
pub struct StatsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Export format (json, jsonl)
    #[arg(long, default_value = "json")]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the config file and an empty journal
    Init(InitArgs),

    /// Record a mood
    Add(AddArgs),

    /// List recent entries, newest first
    List(ListArgs),

    /// Show a specific entry by ID
    Show(ShowArgs),

    /// Show the analytics dashboard
    Stats(StatsArgs),

    /// Export all entries
    Export(ExportArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
