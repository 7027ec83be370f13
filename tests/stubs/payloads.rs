#![allow(dead_code)]
// Each test binary only uses some of these

use once_cell::sync::Lazy;
use serde_json::{json, Value};

pub const LATEST_PATH: &str = "/last.json";
pub const HISTORY_PATH: &str = "/history.json";

pub static FULL_READING: Lazy<Value> = Lazy::new(|| {
    json!({
        "air_temp": 21.46,
        "air_rh": 54.6,
        "soil_pct": 38.2,
        "soil": 12,
        "lux": 118.7,
        "ppfd": 7.25,
        "pump": "ON",
        "crop": "tomato",
        "bmp_temp": 21.9,
        "pressure_hpa": 1012.4
    })
});

pub static PUMP_ONLY_READING: Lazy<Value> = Lazy::new(|| json!({ "pump": "OFF" }));

pub const UNSORTED_HISTORY: &str =
    r#"{"1000": {"air_temp": 20}, "3000": {"air_temp": 21}, "2000": {"air_temp": 22}}"#;

/// 40 entries keyed 1000..=40000 ms, air_temp equal to the index
pub static LONG_HISTORY: Lazy<Value> = Lazy::new(|| {
    let entries = (1..=40)
        .map(|i| (format!("{}", i * 1000), json!({ "air_temp": i, "soil": 100 - i })))
        .collect::<serde_json::Map<String, Value>>();
    Value::Object(entries)
});
