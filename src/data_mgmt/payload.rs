use itertools::Itertools;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::constants::keys;

use super::format;
use super::models::{HistoryEntry, Reading};

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("could not parse payload JSON: {0}")]
    ParseJson(#[from] serde_json::Error),
    #[error("payload is empty")]
    Empty,
    #[error("payload is not a JSON object")]
    NotObject,
}

pub fn reading_from_str(raw: &str) -> Result<Reading, PayloadError> {
    let value: Value = serde_json::from_str(raw)?;
    reading_from_value(&value)
}

/// Normalize a latest-reading payload
///
/// The database returns `null` for a path that holds no data, which is treated as a
/// payload failure just like a body that is not an object.
pub fn reading_from_value(value: &Value) -> Result<Reading, PayloadError> {
    match value {
        Value::Object(fields) => Ok(reading_from_object(fields)),
        Value::Null => Err(PayloadError::Empty),
        _ => Err(PayloadError::NotObject),
    }
}

/// Map recognized keys onto a reading; unknown keys are ignored
///
/// Soil moisture comes from `soil_pct` when that holds a number, else from `soil`.
/// The secondary label comes from the first usable key of `period`, `crop`, `irrig_ms`.
pub fn reading_from_object(fields: &Map<String, Value>) -> Reading {
    Reading {
        air_temp: numeric(fields.get(keys::AIR_TEMP)),
        air_rh: numeric(fields.get(keys::AIR_RH)),
        soil: numeric(fields.get(keys::SOIL_PCT)).or_else(|| numeric(fields.get(keys::SOIL))),
        lux: numeric(fields.get(keys::LUX)),
        ppfd: numeric(fields.get(keys::PPFD)),
        pump: pump_label(fields.get(keys::PUMP)),
        secondary: secondary_label(fields),
    }
}

pub fn history_from_str(raw: &str) -> Result<Vec<HistoryEntry>, PayloadError> {
    let value: Value = serde_json::from_str(raw)?;
    history_from_value(&value)
}

/// Turn a history payload into entries sorted by timestamp, oldest first
///
/// Keys are millisecond timestamps and are compared numerically. Entries whose key is
/// not a number or whose value is not an object are skipped.
pub fn history_from_value(value: &Value) -> Result<Vec<HistoryEntry>, PayloadError> {
    let entries = match value {
        Value::Object(entries) => entries,
        Value::Null => return Ok(Vec::new()),
        _ => return Err(PayloadError::NotObject),
    };

    Ok(entries
        .iter()
        .filter_map(|(key, entry)| {
            let Some(timestamp_ms) = timestamp_from_key(key) else {
                log::debug!("Skipping history entry with non-numeric key '{}'", key);
                return None;
            };
            let Value::Object(fields) = entry else {
                log::debug!("Skipping history entry '{}': not an object", key);
                return None;
            };
            Some(HistoryEntry {
                timestamp_ms,
                reading: reading_from_object(fields),
            })
        })
        .sorted_by_key(|e| e.timestamp_ms)
        .collect())
}

fn timestamp_from_key(key: &str) -> Option<i64> {
    let key = key.trim();
    key.parse::<i64>().ok().or_else(|| {
        key.parse::<f64>()
            .ok()
            .filter(|ts| ts.is_finite())
            .map(|ts| ts as i64)
    })
}

/// JSON numbers, and strings holding a finite number, count as numeric
fn numeric(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn pump_label(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::Bool(true)) => Some("ON".to_string()),
        Some(Value::Bool(false)) => Some("OFF".to_string()),
        other => text(other),
    }
}

fn secondary_label(fields: &Map<String, Value>) -> Option<String> {
    text(fields.get(keys::PERIOD))
        .or_else(|| text(fields.get(keys::CROP)))
        .or_else(|| {
            numeric(fields.get(keys::IRRIG_MS)).map(|ms| format!("{} ms", format::fixed(ms, 0)))
        })
}
