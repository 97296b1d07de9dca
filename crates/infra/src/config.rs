use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// JSON file holding the persisted events. Its directory is created on
    /// first write if absent.
    pub data_file: PathBuf,
    /// Seconds between reminder loop iterations
    pub reminder_check_interval_secs: u64,
    /// Window in minutes within which an event counts as due soon
    pub reminder_window_minutes: i64,
}

impl Config {
    pub fn new() -> Self {
        let data_file = std::env::var("DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/events.json"));
        Self {
            port: env_or("PORT", 5000),
            data_file,
            reminder_check_interval_secs: env_or("REMINDER_CHECK_INTERVAL_SECS", 60),
            reminder_window_minutes: env_or("REMINDER_WINDOW_MINUTES", 60),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
{
    let Ok(raw) = std::env::var(key) else {
        return default;
    };
    match raw.parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            warn!(
                "The given {}: {} is not valid, falling back to the default: {}.",
                key, raw, default
            );
            default
        }
    }
}
