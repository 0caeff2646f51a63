use std::path::PathBuf;

use clap::Parser;

/// Server settings. Every flag falls back to an environment variable, and
/// `.env` is read before parsing.
#[derive(Parser, Clone, Debug)]
#[command(name = "moodflow-server", author, version, about, long_about = None)]
pub struct Config {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "5000")]
    pub port: u16,

    /// SQLite database file
    #[arg(long, env = "DATABASE_PATH", default_value = "moodflow.db")]
    pub database_path: PathBuf,

    /// Secret used to sign bearer tokens
    #[arg(long, env = "TOKEN_SECRET", hide_env_values = true)]
    pub token_secret: String,

    /// Token lifetime in seconds
    #[arg(long, env = "TOKEN_TTL_SECONDS", default_value = "86400")]
    pub token_ttl_seconds: i64,

    /// IANA timezone for day boundaries in trends
    #[arg(long, env = "TIMEZONE", default_value = "UTC")]
    pub timezone: chrono_tz::Tz,

    /// Create the demo account and sample moods on an empty database
    #[arg(long, env = "SEED_DEMO")]
    pub seed_demo: bool,

    /// Use JSON formatting for tracing
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,

    /// Tracing filter directives
    #[arg(long, env = "RUST_LOG")]
    pub rust_log: Option<String>,
}

impl Config {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["moodflow-server", "--token-secret", "s3cret"])
            .expect("parse should succeed");
        assert_eq!(config.port, 5000);
        assert_eq!(config.token_ttl_seconds, 86400);
        assert_eq!(config.timezone, chrono_tz::UTC);
        assert_eq!(config.bind_address(), format!("{}:5000", config.host));
    }

    #[test]
    fn test_timezone_flag() {
        let config = Config::try_parse_from([
            "moodflow-server",
            "--token-secret",
            "s3cret",
            "--timezone",
            "Asia/Tokyo",
        ])
        .expect("parse should succeed");
        assert_eq!(config.timezone, chrono_tz::Asia::Tokyo);
    }

    #[test]
    fn test_command_is_valid() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
