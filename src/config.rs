use crate::countdown::Locale;
use crate::pool::RefreshConfig;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable consulted when `--schedule` is not given.
pub const SCHEDULE_ENV: &str = "EXAM_SCHEDULE";

/// Application configuration from CLI
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Config {
    /// Print countdown lines to stdout instead of the full-screen view
    #[arg(long)]
    pub pipe: bool,
    /// With --pipe, print one snapshot and exit
    #[arg(long)]
    pub once: bool,
    /// JSON schedule table to display. If absent, EXAM_SCHEDULE is used,
    /// then the built-in table.
    #[arg(long, value_name = "PATH")]
    pub schedule: Option<PathBuf>,
    /// Wording for countdown labels
    #[arg(long, value_enum, default_value_t = Locale::English)]
    pub locale: Locale,
    /// Start with the dark palette (toggle with 'd')
    #[arg(long)]
    pub dark: bool,
    /// Refresh period in milliseconds
    #[arg(long = "interval-ms", default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_ms: u64,
    /// Enable log output to stderr (filter with RUST_LOG)
    #[arg(long)]
    pub debug_log: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pipe: false,
            once: false,
            schedule: None,
            locale: Locale::English,
            dark: false,
            interval_ms: 1000,
            debug_log: false,
        }
    }
}

impl Config {
    pub fn refresh_config(&self) -> RefreshConfig {
        RefreshConfig {
            interval: Duration::from_millis(self.interval_ms.max(1)),
            locale: self.locale,
        }
    }

    /// Fill `schedule` from `value` (normally `EXAM_SCHEDULE`) when the flag
    /// was not given. Blank values are ignored.
    pub fn schedule_from_env_if_empty(&mut self, value: Option<String>) {
        if self.schedule.is_none()
            && let Some(s) = value
        {
            let trimmed = s.trim();
            if !trimmed.is_empty() {
                self.schedule = Some(PathBuf::from(trimmed));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let cfg = Config::try_parse_from([
            "exam-schedule",
            "--pipe",
            "--once",
            "--locale",
            "arabic",
            "--interval-ms",
            "250",
            "--schedule",
            "exams.json",
        ])
        .unwrap();
        assert!(cfg.pipe && cfg.once);
        assert_eq!(cfg.locale, Locale::Arabic);
        assert_eq!(cfg.refresh_config().interval, Duration::from_millis(250));
        assert_eq!(cfg.schedule, Some(PathBuf::from("exams.json")));
    }

    #[test]
    fn defaults_match_parse_without_flags() {
        let parsed = Config::try_parse_from(["exam-schedule"]).unwrap();
        let default = Config::default();
        assert_eq!(parsed.locale, default.locale);
        assert_eq!(parsed.interval_ms, default.interval_ms);
        assert_eq!(parsed.refresh_config(), RefreshConfig::default());
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(Config::try_parse_from(["exam-schedule", "--interval-ms", "0"]).is_err());
    }

    #[test]
    fn env_only_fills_missing_schedule() {
        let mut cfg = Config::default();
        cfg.schedule_from_env_if_empty(Some("  ".to_string()));
        assert_eq!(cfg.schedule, None);
        cfg.schedule_from_env_if_empty(Some("/tmp/a.json".to_string()));
        assert_eq!(cfg.schedule, Some(PathBuf::from("/tmp/a.json")));
        cfg.schedule_from_env_if_empty(Some("/tmp/b.json".to_string()));
        assert_eq!(cfg.schedule, Some(PathBuf::from("/tmp/a.json")));
    }
}
