use crate::vocabulary::Vocabulary;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_MAIN_URL: &str = "https://pogodadlaslaska.pl/blog/prognoza-tygodniowa/";
pub const DEFAULT_SNAPSHOT_URL: &str =
    "https://patrykkotulak.github.io/download-pogoda-slask/forecast.json";

#[derive(Clone, Debug)]
pub struct Config {
    pub main_url: String,
    pub snapshot_source: SnapshotLocation,
    pub forecast_file: PathBuf,
    pub short_forecast_file: PathBuf,
    pub app_timezone: chrono_tz::Tz,
    pub short_forecast_mode: ShortForecastMode,
    pub selectors: Selectors,
    pub render_timeout: Duration,
    pub snapshot_timeout: Duration,
    pub vocabulary: Vocabulary,
}

/// Where the previously published forecast comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SnapshotLocation {
    Remote(String),
    Local(PathBuf),
    Disabled,
}

impl FromStr for SnapshotLocation {
    type Err = std::convert::Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        Ok(if raw.eq_ignore_ascii_case("none") || raw.is_empty() {
            SnapshotLocation::Disabled
        } else if raw.starts_with("http://") || raw.starts_with("https://") {
            SnapshotLocation::Remote(raw.to_string())
        } else {
            SnapshotLocation::Local(PathBuf::from(raw))
        })
    }
}

/// When the short forecast is rebuilt from the full forecast file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShortForecastMode {
    /// Every run, from whatever full forecast is on disk.
    Always,
    /// Only after this run wrote a new full forecast.
    AfterWrite,
}

impl FromStr for ShortForecastMode {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(ShortForecastMode::Always),
            "after-write" | "after_write" => Ok(ShortForecastMode::AfterWrite),
            other => Err(anyhow::anyhow!("Invalid SHORT_FORECAST_MODE: {}", other)),
        }
    }
}

/// CSS selectors of the listing and article pages.
#[derive(Clone, Debug)]
pub struct Selectors {
    pub article_button: String,
    pub article_content: String,
    pub paragraph: String,
    pub marked: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            article_button: ".elementor-button-link".to_string(),
            article_content: ".elementor-widget-container".to_string(),
            paragraph: ".elementor-widget-container p".to_string(),
            marked: "mark".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let timezone = lookup("APP_TIMEZONE").unwrap_or_else(|| "Europe/Warsaw".to_string());

        Ok(Config {
            main_url: lookup("FORECAST_MAIN_URL").unwrap_or_else(|| DEFAULT_MAIN_URL.to_string()),
            snapshot_source: lookup("FORECAST_SNAPSHOT_SOURCE")
                .unwrap_or_else(|| DEFAULT_SNAPSHOT_URL.to_string())
                .parse::<SnapshotLocation>()?,
            forecast_file: lookup("FORECAST_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public/forecast.json")),
            short_forecast_file: lookup("SHORT_FORECAST_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public/forecast_ha.json")),
            app_timezone: timezone
                .parse::<chrono_tz::Tz>()
                .map_err(|_| anyhow::anyhow!("Invalid timezone: {}", timezone))?,
            short_forecast_mode: lookup("SHORT_FORECAST_MODE")
                .map(|raw| raw.parse::<ShortForecastMode>())
                .transpose()?
                .unwrap_or(ShortForecastMode::Always),
            selectors: Selectors::default(),
            render_timeout: Duration::from_secs(30),
            snapshot_timeout: Duration::from_secs(10),
            vocabulary: Vocabulary::polish(),
        })
    }
}
