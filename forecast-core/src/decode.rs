use serde::Deserialize;
use serde_json::Value;

use crate::{error::DecodeError, model::ForecastEntry};

#[derive(Debug, Deserialize)]
struct Document {
    list: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct Day {
    dt: i64,
    temp: Temperature,
    humidity: f64,
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct Temperature {
    min: f64,
    max: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
    icon: String,
}

/// Decode a raw forecast payload into daily entries, in payload order.
///
/// The payload must be a JSON document with a top-level `"list"` array;
/// anything else fails with [`DecodeError::MalformedPayload`]. Individual
/// days missing an expected field (or with an empty `"weather"` array) are
/// skipped with a warning and the remaining days are kept.
pub fn decode(payload: &str) -> Result<Vec<ForecastEntry>, DecodeError> {
    let document: Document =
        serde_json::from_str(payload).map_err(DecodeError::MalformedPayload)?;

    let mut entries = Vec::with_capacity(document.list.len());

    for (index, value) in document.list.into_iter().enumerate() {
        match serde_json::from_value::<Day>(value) {
            Ok(day) => match entry_from_day(day) {
                Some(entry) => entries.push(entry),
                None => {
                    tracing::warn!(index, "skipping forecast day without conditions");
                }
            },
            Err(error) => {
                tracing::warn!(index, %error, "skipping malformed forecast day");
            }
        }
    }

    Ok(entries)
}

fn entry_from_day(day: Day) -> Option<ForecastEntry> {
    // Description and icon come from the first condition of the day.
    let condition = day.weather.into_iter().next()?;

    Some(ForecastEntry {
        timestamp: day.dt,
        temp_min: day.temp.min,
        temp_max: day.temp.max,
        humidity: day.humidity,
        description: condition.description,
        icon: condition.icon,
    })
}
