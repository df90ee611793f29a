//! Configuration and CLI argument handling

use clap::Parser;

use crate::state::{
    timer_state::{DEFAULT_BREAK_MINUTES, DEFAULT_WORK_MINUTES, MAX_MINUTES},
    Preset, Theme, TimerConfig,
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "pomodoro-server")]
#[command(about = "A Pomodoro timer daemon with presets, session history and desktop notifications")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Work duration in minutes
    #[arg(short, long, default_value_t = DEFAULT_WORK_MINUTES)]
    pub work: u64,

    /// Break duration in minutes
    #[arg(short, long = "break-minutes", default_value_t = DEFAULT_BREAK_MINUTES)]
    pub break_minutes: u64,

    /// Start from a preset (25/5, 35/10, 50/10); overrides --work and --break-minutes
    #[arg(long)]
    pub preset: Option<Preset>,

    /// Initial theme index
    #[arg(long, default_value = "0")]
    pub theme: usize,

    /// Never show desktop notifications
    #[arg(long)]
    pub no_notifications: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Check values clap cannot express
    pub fn validate(&self) -> Result<(), String> {
        if self.preset.is_none() {
            if self.work == 0 {
                return Err("Work duration must be at least 1 minute".to_string());
            }
            if self.break_minutes == 0 {
                return Err("Break duration must be at least 1 minute".to_string());
            }
            if self.work > MAX_MINUTES || self.break_minutes > MAX_MINUTES {
                return Err(format!("Durations cannot exceed {} minutes", MAX_MINUTES));
            }
        }
        Theme::from_index(self.theme)?;
        Ok(())
    }

    /// Initial work/break durations
    pub fn timer_config(&self) -> TimerConfig {
        match self.preset {
            Some(preset) => TimerConfig::from(preset),
            None => TimerConfig::from_minutes(self.work, self.break_minutes),
        }
    }

    /// Initial theme, falling back to the first palette if out of range
    pub fn initial_theme(&self) -> Theme {
        Theme::from_index(self.theme).unwrap_or_default()
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

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("pomodoro-server").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.timer_config(), TimerConfig::from_minutes(25, 5));
        assert_eq!(config.log_level(), "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_preset_overrides_minutes() {
        let config = parse(&["--work", "10", "--preset", "50/10"]);
        assert_eq!(config.timer_config().work_seconds, 3000);
        assert_eq!(config.timer_config().break_seconds, 600);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(parse(&["--work", "0"]).validate().is_err());
        assert!(parse(&["--theme", "9"]).validate().is_err());
        assert!(parse(&["--work", "400000000000000000"]).validate().is_err());
        assert!(parse(&["--break-minutes", "1441"]).validate().is_err());
        assert!(parse(&["--work", "1440"]).validate().is_ok());
        assert!(Config::try_parse_from(["pomodoro-server", "--preset", "1/1"]).is_err());
    }
}
