use chrono_tz::Tz;
use shared::models::collections;

/// Default number of products a chart shows
pub const DEFAULT_TOP_N: usize = 10;

/// Back-office configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | BACKOFFICE_TIMEZONE | UTC | IANA zone for calendar dates and naive close times |
/// | CHART_TOP_N | 10 | Products shown per chart |
/// | SHIFT_COLLECTION | closed_shifts | Collection holding closed shifts |
/// | LOG_LEVEL | info | Log filter |
/// | LOG_DIR | (unset) | Directory for daily rolling log files |
#[derive(Debug, Clone)]
pub struct Config {
    /// Business time zone
    pub timezone: Tz,
    /// Products shown per chart (top-N by quantity)
    pub chart_top_n: usize,
    /// Collection holding closed shifts
    pub shift_collection: String,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from the environment (and `.env` if present)
    ///
    /// Unset or unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let defaults = Self::default();
        Self {
            timezone: std::env::var("BACKOFFICE_TIMEZONE")
                .ok()
                .and_then(|tz| match tz.parse::<Tz>() {
                    Ok(tz) => Some(tz),
                    Err(e) => {
                        tracing::warn!("Invalid BACKOFFICE_TIMEZONE '{}': {}, using UTC", tz, e);
                        None
                    }
                })
                .unwrap_or(defaults.timezone),
            chart_top_n: std::env::var("CHART_TOP_N")
                .ok()
                .and_then(|n| n.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(defaults.chart_top_n),
            shift_collection: std::env::var("SHIFT_COLLECTION")
                .unwrap_or(defaults.shift_collection),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: std::env::var("LOG_DIR").ok().or(defaults.log_dir),
        }
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn with_chart_top_n(mut self, n: usize) -> Self {
        self.chart_top_n = n.max(1);
        self
    }

    pub fn with_shift_collection(mut self, collection: impl Into<String>) -> Self {
        self.shift_collection = collection.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::UTC,
            chart_top_n: DEFAULT_TOP_N,
            shift_collection: collections::CLOSED_SHIFTS.to_string(),
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}
