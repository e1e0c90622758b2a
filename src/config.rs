//! Configuration and CLI argument handling

use clap::Parser;

use crate::timer::{DEFAULT_MINUTES, MAX_MINUTES, MIN_MINUTES};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "pomodoro")]
#[command(about = "A state-managed HTTP server driving a Pomodoro countdown timer")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Countdown duration in minutes (1-120)
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_MINUTES,
        value_parser = clap::value_parser!(u64).range(MIN_MINUTES..=MAX_MINUTES)
    )]
    pub minutes: u64,

    /// Shell command to run when the countdown completes
    #[arg(long, value_name = "CMD")]
    pub on_complete: Option<String>,

    /// Start the countdown immediately
    #[arg(long)]
    pub autostart: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["pomodoro"]).unwrap();
        assert_eq!(config.minutes, 20);
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");
        assert!(config.on_complete.is_none());
        assert!(!config.autostart);
    }

    #[test]
    fn test_minutes_range() {
        assert!(Config::try_parse_from(["pomodoro", "-m", "0"]).is_err());
        assert!(Config::try_parse_from(["pomodoro", "-m", "121"]).is_err());
        assert_eq!(Config::try_parse_from(["pomodoro", "-m", "120"]).unwrap().minutes, 120);
        assert_eq!(Config::try_parse_from(["pomodoro", "--minutes", "1"]).unwrap().minutes, 1);
    }

    #[test]
    fn test_hook_and_flags() {
        let config = Config::try_parse_from([
            "pomodoro",
            "--on-complete",
            "paplay bell.wav",
            "--autostart",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.on_complete.as_deref(), Some("paplay bell.wav"));
        assert!(config.autostart);
        assert_eq!(config.log_level(), "debug");
    }
}
