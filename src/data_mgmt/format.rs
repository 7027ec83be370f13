//! Formatting rules for display fields
//!
//! Precision is fixed per field. Anything without a usable value renders as the
//! placeholder token, never as an empty string.
use crate::constants::defaults::{LABEL_SEPARATOR, PLACEHOLDER};

use super::models::Reading;

/// Named display slots written on every poll tick
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    AirTemp,
    AirRh,
    Soil,
    Lux,
    Ppfd,
    PumpLabel,
    LastUpdate,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::AirTemp,
        Field::AirRh,
        Field::Soil,
        Field::Lux,
        Field::Ppfd,
        Field::PumpLabel,
        Field::LastUpdate,
    ];

    pub fn slot_id(self) -> &'static str {
        match self {
            Field::AirTemp => "airTemp",
            Field::AirRh => "airRH",
            Field::Soil => "soil",
            Field::Lux => "lux",
            Field::Ppfd => "ppfd",
            Field::PumpLabel => "pumpPeriod",
            Field::LastUpdate => "lastUpdate",
        }
    }

    pub fn caption(self) -> &'static str {
        match self {
            Field::AirTemp => "Air",
            Field::AirRh => "RH",
            Field::Soil => "Soil",
            Field::Lux => "Lux",
            Field::Ppfd => "PPFD",
            Field::PumpLabel => "Pump",
            Field::LastUpdate => "Updated",
        }
    }

    /// Decimal places for numeric fields
    pub fn precision(self) -> Option<usize> {
        match self {
            Field::AirTemp => Some(1),
            Field::AirRh => Some(0),
            Field::Soil => Some(0),
            Field::Lux => Some(0),
            Field::Ppfd => Some(1),
            Field::PumpLabel | Field::LastUpdate => None,
        }
    }

    pub fn unit(self) -> Option<&'static str> {
        match self {
            Field::AirTemp => Some("°C"),
            Field::AirRh | Field::Soil => Some("%"),
            Field::Lux => Some("lx"),
            Field::Ppfd => Some("µmol/m²/s"),
            Field::PumpLabel | Field::LastUpdate => None,
        }
    }
}

/// Round half away from zero to `digits` decimals and render with exactly that many
pub fn fixed(value: f64, digits: usize) -> String {
    let factor = 10f64.powi(digits as i32);
    let scaled = value * factor;
    // Overflows near f64::MAX, where values are already integral
    if !scaled.is_finite() {
        return format!("{:.*}", digits, value);
    }
    format!("{:.*}", digits, scaled.round() / factor)
}

pub fn numeric_field(value: Option<f64>, digits: usize) -> String {
    match value {
        Some(v) if v.is_finite() => fixed(v, digits),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Combine pump state and secondary label, e.g. "ON • tomato"
pub fn pump_and_secondary(pump: Option<&str>, secondary: Option<&str>) -> String {
    let pump = pump.unwrap_or(PLACEHOLDER);
    match secondary {
        Some(label) => format!("{pump}{LABEL_SEPARATOR}{label}"),
        None => pump.to_string(),
    }
}

/// Render every reading-backed field; the last-update stamp is left to the caller
pub fn render_reading(reading: &Reading) -> Vec<(Field, String)> {
    let numeric = |field: Field, value: Option<f64>| {
        let digits = field.precision().unwrap_or(0);
        (field, numeric_field(value, digits))
    };

    vec![
        numeric(Field::AirTemp, reading.air_temp),
        numeric(Field::AirRh, reading.air_rh),
        numeric(Field::Soil, reading.soil),
        numeric(Field::Lux, reading.lux),
        numeric(Field::Ppfd, reading.ppfd),
        (
            Field::PumpLabel,
            pump_and_secondary(reading.pump.as_deref(), reading.secondary.as_deref()),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(reading: &Reading, field: Field) -> String {
        render_reading(reading)
            .into_iter()
            .find(|(f, _)| *f == field)
            .map(|(_, text)| text)
            .unwrap()
    }

    #[test]
    fn test_fixed_precision() {
        assert_eq!(fixed(21.0, 1), "21.0");
        assert_eq!(fixed(21.46, 1), "21.5");
        assert_eq!(fixed(118.7, 0), "119");
        assert_eq!(fixed(2.5, 0), "3");
        assert_eq!(fixed(-3.25, 1), "-3.3");
        assert_eq!(fixed(12.346, 2), "12.35");
    }

    #[test]
    fn test_huge_values_keep_precision() {
        for value in [1e308, f64::MAX, -f64::MAX] {
            let one_decimal = numeric_field(Some(value), 1);
            assert!(!one_decimal.contains("inf"), "{one_decimal}");
            assert_eq!(one_decimal.split('.').nth(1), Some("0"));

            let integer = numeric_field(Some(value), 0);
            assert!(!integer.contains("inf"), "{integer}");
            assert!(!integer.contains('.'));
        }

        let reading = Reading {
            air_temp: Some(f64::MAX),
            ppfd: Some(1e308),
            ..Default::default()
        };
        assert!(rendered(&reading, Field::AirTemp).ends_with(".0"));
        assert!(rendered(&reading, Field::Ppfd).ends_with(".0"));
    }

    #[test]
    fn test_temperature_one_decimal_or_placeholder() {
        for temp in [-12.04, 0.0, 19.95, 21.46, 35.0] {
            let reading = Reading {
                air_temp: Some(temp),
                ..Default::default()
            };
            assert_eq!(rendered(&reading, Field::AirTemp), fixed(temp, 1));
            assert_eq!(
                rendered(&reading, Field::AirTemp).split('.').nth(1).map(str::len),
                Some(1)
            );
        }
        assert_eq!(rendered(&Reading::default(), Field::AirTemp), "--");
    }

    #[test]
    fn test_lux_renders_as_integer() {
        let reading = Reading {
            lux: Some(118.7),
            ..Default::default()
        };
        assert_eq!(rendered(&reading, Field::Lux), "119");
    }

    #[test]
    fn test_pump_and_secondary() {
        assert_eq!(pump_and_secondary(Some("ON"), Some("tomato")), "ON • tomato");
        assert_eq!(pump_and_secondary(Some("OFF"), None), "OFF");
        assert_eq!(pump_and_secondary(None, Some("tomato")), "-- • tomato");
        assert_eq!(pump_and_secondary(None, None), "--");
    }

    #[test]
    fn test_empty_reading_renders_placeholders() {
        for (_, text) in render_reading(&Reading::default()) {
            assert_eq!(text, PLACEHOLDER);
        }
    }

    #[test]
    fn test_slot_ids_are_unique() {
        let mut ids: Vec<_> = Field::ALL.iter().map(|f| f.slot_id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), Field::ALL.len());
    }
}
