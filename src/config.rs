use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use crate::notify::{calendar::DEFAULT_CALENDAR_URL, CalendarNotifier, DisabledNotifier, Notifier};

#[derive(Parser, Debug)]
#[command(name = "expense-tracker")]
#[command(about = "Daily, weekly and monthly expense tracker", long_about = None)]
pub struct Args {
    /// Calendar events endpoint that receives add/delete notifications
    #[arg(long, env = "EXPENSE_CALENDAR_URL", default_value = DEFAULT_CALENDAR_URL)]
    pub calendar_url: String,

    /// OAuth access token for the calendar API; notifications are skipped without one
    #[arg(long, env = "EXPENSE_CALENDAR_TOKEN", hide_env_values = true)]
    pub calendar_token: Option<String>,

    /// File that receives log output (the terminal is owned by the UI)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub calendar_url: String,
    pub calendar_token: Option<String>,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            calendar_url: args.calendar_url,
            calendar_token: args.calendar_token.filter(|t| !t.trim().is_empty()),
            log_file: args
                .log_file
                .unwrap_or_else(|| std::env::temp_dir().join("expense-tracker.log")),
            log_level: args.log_level,
        }
    }
}

impl Config {
    pub fn notifier(&self) -> Arc<dyn Notifier> {
        match &self.calendar_token {
            Some(token) => Arc::new(CalendarNotifier::new(&self.calendar_url, token)),
            None => Arc::new(DisabledNotifier),
        }
    }

    pub fn init_logging(&self) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file)
            .with_context(|| format!("Failed to open log file {}", self.log_file.display()))?;

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&self.log_level))
            .target(env_logger::Target::Pipe(Box::new(file)))
            .try_init()
            .context("Failed to initialize logger")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Args, Config};

    #[test]
    fn blank_token_counts_as_missing() {
        let args = Args::try_parse_from(["expense-tracker", "--calendar-token", "  "]);
        assert!(args.is_ok());
        if let Ok(args) = args {
            let config = Config::from(args);
            assert!(config.calendar_token.is_none());
        }
    }

    #[test]
    fn explicit_flags_override_defaults() {
        let args = Args::try_parse_from([
            "expense-tracker",
            "--calendar-url",
            "http://127.0.0.1:9000/events",
            "--calendar-token",
            "abc",
            "--log-file",
            "/tmp/x.log",
            "--log-level",
            "debug",
        ]);
        assert!(args.is_ok());
        if let Ok(args) = args {
            let config = Config::from(args);
            assert_eq!(config.calendar_url, "http://127.0.0.1:9000/events");
            assert_eq!(config.calendar_token.as_deref(), Some("abc"));
            assert_eq!(config.log_file.to_string_lossy(), "/tmp/x.log");
            assert_eq!(config.log_level, "debug");
        }
    }
}
