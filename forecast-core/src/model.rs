use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of daily entries requested from the forecast API.
pub const FORECAST_DAYS: u32 = 16;

/// Measurement system passed through to the API. Returned values are never
/// converted locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Standard,
    Metric,
    #[default]
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Standard => "standard",
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    /// Degree suffix for display purposes.
    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Units::Standard => "K",
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fetch attempt: the free-text location the user typed plus the fixed
/// request parameters. Built fresh for every submission.
#[derive(Debug, Clone)]
pub struct ForecastQuery {
    pub location: String,
    pub days: u32,
    pub units: Units,
}

impl ForecastQuery {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            days: FORECAST_DAYS,
            units: Units::default(),
        }
    }

    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }
}

/// One day of the forecast, copied verbatim from the provider payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Epoch seconds.
    pub timestamp: i64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Percentage.
    pub humidity: f64,
    pub description: String,
    pub icon: String,
}

impl ForecastEntry {
    /// Entry timestamp as UTC, `None` when the epoch value is out of range.
    pub fn date(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}
