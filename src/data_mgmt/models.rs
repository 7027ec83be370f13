/// One polled snapshot of sensor values
///
/// Every field is optional since upstream devices may omit any key. A reading is
/// built fresh on every poll tick and discarded once it has been rendered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Reading {
    /// Air temperature in °C
    pub air_temp: Option<f64>,
    /// Air relative humidity in %
    pub air_rh: Option<f64>,
    /// Soil moisture in %
    pub soil: Option<f64>,
    /// Illuminance in lux
    pub lux: Option<f64>,
    /// Photosynthetic photon flux density
    pub ppfd: Option<f64>,
    /// Pump state label, e.g. "ON" / "OFF"
    pub pump: Option<String>,
    /// Crop, period or irrigation duration label
    pub secondary: Option<String>,
}

impl Reading {
    pub fn is_empty(&self) -> bool {
        *self == Reading::default()
    }
}

/// A single chart sample
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A reading taken from the history endpoint, with its source timestamp
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub timestamp_ms: i64,
    pub reading: Reading,
}
