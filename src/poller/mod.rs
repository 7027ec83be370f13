//! The fetch-format-render loop
//!
//! A [`Poller`] owns everything a tick touches: the REST client, the connection
//! status, both rolling windows and the surface it renders into. Errors never leave
//! [`Poller::poll`]; they are downgraded to a connection status update and the next
//! tick is the retry.
mod schedule;
mod status;

use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::Deserialize;
use thiserror::Error;

use crate::constants::defaults::PLACEHOLDER;
use crate::data_mgmt::format;
use crate::data_mgmt::{Field, HistoryEntry, Reading, RollingWindow, SeriesPoint};
use crate::helpers;
use crate::interfaces::rtdb::{FetchError, RtdbClient};
use crate::interfaces::surface::{Chart, Surface};
use crate::settings::Settings;

pub use schedule::PollHandle;
pub use status::ConnectionStatus;

/// What the display fields show after a failed fetch
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// Keep the last good values on screen
    #[default]
    Preserve,
    /// Blank every field to the placeholder
    ResetToPlaceholder,
}

#[derive(Error, Debug)]
#[error("unknown error policy '{0}'; expected 'preserve' or 'reset-to-placeholder'")]
pub struct ParseErrorPolicyError(String);

impl FromStr for ErrorPolicy {
    type Err = ParseErrorPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preserve" => Ok(ErrorPolicy::Preserve),
            "reset-to-placeholder" | "reset" => Ok(ErrorPolicy::ResetToPlaceholder),
            _ => Err(ParseErrorPolicyError(s.to_string())),
        }
    }
}

pub struct Poller<S: Surface> {
    client: RtdbClient,
    on_error: ErrorPolicy,
    status: ConnectionStatus,
    temperature: RollingWindow,
    soil: RollingWindow,
    surface: S,
}

impl<S: Surface> Poller<S> {
    pub fn new(client: RtdbClient, on_error: ErrorPolicy, window_len: usize, surface: S) -> Self {
        let mut poller = Self {
            client,
            on_error,
            status: ConnectionStatus::connecting(),
            temperature: RollingWindow::new(window_len),
            soil: RollingWindow::new(window_len),
            surface,
        };
        poller.surface.set_status(&poller.status);
        poller
    }

    pub fn from_settings(settings: &Settings, surface: S) -> Result<Self, FetchError> {
        let client = RtdbClient::new(settings)?;
        Ok(Self::new(client, settings.on_error, settings.window_len, surface))
    }

    /// Run one tick: fetch the latest reading and render it, or record the failure
    pub fn poll(&mut self) {
        let outcome = self.client.fetch_latest();
        self.apply(outcome, helpers::now_local());
    }

    /// Bulk-replace both windows from the history endpoint
    pub fn seed_history(&mut self) {
        match self.client.fetch_history() {
            Ok(entries) => {
                self.set_status(ConnectionStatus::reachable());
                self.seed_from_entries(&entries);
            }
            Err(e) => {
                log::warn!("Could not load history: {}", e);
                self.set_status(ConnectionStatus::unreachable(&e));
            }
        }
        self.surface.flush();
    }

    pub fn status(&self) -> &ConnectionStatus {
        &self.status
    }

    pub fn temperature_window(&self) -> &RollingWindow {
        &self.temperature
    }

    pub fn soil_window(&self) -> &RollingWindow {
        &self.soil
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn apply(&mut self, outcome: Result<Reading, FetchError>, now: DateTime<Local>) {
        match outcome {
            Ok(reading) => self.render_reading(&reading, now),
            Err(e) => self.render_failure(&e),
        }
        self.surface.flush();
    }

    fn render_reading(&mut self, reading: &Reading, now: DateTime<Local>) {
        self.set_status(ConnectionStatus::reachable());

        for (field, text) in format::render_reading(reading) {
            self.surface.set_field(field, &text);
        }

        let label = helpers::time_label(now);
        if let Some(temp) = reading.air_temp {
            self.temperature.push(SeriesPoint::new(label.clone(), temp));
        }
        if let Some(soil) = reading.soil {
            self.soil.push(SeriesPoint::new(label, soil));
        }
        self.redraw_charts();

        self.surface.set_field(Field::LastUpdate, &helpers::wall_clock(now));
        log::debug!("Rendered reading: {:?}", reading);
    }

    fn render_failure(&mut self, err: &FetchError) {
        log::warn!("Poll failed: {}", err);
        self.set_status(ConnectionStatus::unreachable(err));

        if self.on_error == ErrorPolicy::ResetToPlaceholder {
            for field in Field::ALL {
                self.surface.set_field(field, PLACEHOLDER);
            }
        }
    }

    fn seed_from_entries(&mut self, entries: &[HistoryEntry]) {
        let skip = entries.len().saturating_sub(self.temperature.max_len());
        let mut temperature = Vec::new();
        let mut soil = Vec::new();

        for entry in &entries[skip..] {
            let Some(label) = helpers::time_label_from_millis(entry.timestamp_ms) else {
                continue;
            };
            if let Some(temp) = entry.reading.air_temp {
                temperature.push(SeriesPoint::new(label.clone(), temp));
            }
            if let Some(value) = entry.reading.soil {
                soil.push(SeriesPoint::new(label, value));
            }
        }

        log::info!(
            "Seeded history: {} temperature and {} soil points",
            temperature.len(),
            soil.len()
        );
        self.temperature.replace(temperature);
        self.soil.replace(soil);
        self.redraw_charts();
    }

    fn set_status(&mut self, status: ConnectionStatus) {
        self.status = status;
        self.surface.set_status(&self.status);
    }

    fn redraw_charts(&mut self) {
        for chart in Chart::ALL {
            let window = match chart {
                Chart::Temperature => &self.temperature,
                Chart::Soil => &self.soil,
            };
            self.surface.draw_chart(chart, &window.labels(), &window.values());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;
    use serde_json::json;

    use crate::data_mgmt::payload;
    use crate::interfaces::surface::MemorySurface;

    fn poller(on_error: ErrorPolicy, window_len: usize) -> Poller<MemorySurface> {
        let settings = Settings {
            base_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        let client = RtdbClient::new(&settings).unwrap();
        Poller::new(client, on_error, window_len, MemorySurface::new())
    }

    fn at(secs: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 1, 12, 0, secs).unwrap()
    }

    fn reading(value: serde_json::Value) -> Result<Reading, FetchError> {
        Ok(payload::reading_from_value(&value).unwrap())
    }

    #[test]
    fn test_initial_status_is_connecting() {
        let p = poller(ErrorPolicy::Preserve, 30);
        assert!(!p.status().reachable);
        assert_eq!(p.surface().status.as_ref(), Some(p.status()));
    }

    #[test]
    fn test_successful_tick_renders_everything() {
        let mut p = poller(ErrorPolicy::Preserve, 30);
        p.apply(
            reading(json!({"air_temp": 21.46, "soil_pct": 40, "lux": 118.7, "pump": "ON", "crop": "tomato"})),
            at(5),
        );

        let surface = p.surface();
        assert!(p.status().reachable);
        assert_eq!(surface.field(Field::AirTemp), Some("21.5"));
        assert_eq!(surface.field(Field::AirRh), Some("--"));
        assert_eq!(surface.field(Field::Soil), Some("40"));
        assert_eq!(surface.field(Field::Lux), Some("119"));
        assert_eq!(surface.field(Field::PumpLabel), Some("ON • tomato"));
        assert_eq!(surface.field(Field::LastUpdate), Some("2024-05-01 12:00:05"));
        assert_eq!(
            surface.chart(Chart::Temperature).unwrap(),
            &crate::interfaces::surface::ChartData {
                labels: vec!["12:00:05".to_string()],
                values: vec![21.46],
            }
        );
        assert_eq!(surface.chart(Chart::Soil).unwrap().values, vec![40.0]);
        assert_eq!(surface.frames, 1);
    }

    #[test]
    fn test_missing_numeric_field_skips_window() {
        let mut p = poller(ErrorPolicy::Preserve, 30);
        p.apply(reading(json!({"air_temp": 20})), at(1));
        p.apply(reading(json!({"soil": 33})), at(2));

        assert_eq!(p.temperature_window().values(), vec![20.0]);
        assert_eq!(p.soil_window().values(), vec![33.0]);
        assert_eq!(p.surface().field(Field::AirTemp), Some("--"));
    }

    #[test]
    fn test_window_capped_over_many_ticks() {
        let mut p = poller(ErrorPolicy::Preserve, 30);
        for i in 0..40 {
            p.apply(reading(json!({ "air_temp": i })), at(i % 60));
        }
        let values = p.surface().chart(Chart::Temperature).unwrap().values.clone();
        assert_eq!(values.len(), 30);
        assert_eq!(values.first(), Some(&10.0));
        assert_eq!(values.last(), Some(&39.0));
    }

    #[test]
    fn test_failure_preserves_fields() {
        let mut p = poller(ErrorPolicy::Preserve, 30);
        p.apply(reading(json!({"air_temp": 19.0})), at(1));
        p.apply(Err(FetchError::Status(500)), at(2));

        assert!(!p.status().reachable);
        assert_eq!(p.status().message, "Database ERROR: HTTP 500");
        assert_eq!(p.surface().field(Field::AirTemp), Some("19.0"));
        assert_eq!(p.temperature_window().len(), 1);
    }

    #[test]
    fn test_failure_resets_fields() {
        let mut p = poller(ErrorPolicy::ResetToPlaceholder, 30);
        p.apply(reading(json!({"air_temp": 19.0, "pump": "ON"})), at(1));
        p.apply(Err(FetchError::Status(404)), at(2));

        for field in Field::ALL {
            assert_eq!(p.surface().field(field), Some("--"));
        }
        // Charts keep their history
        assert_eq!(p.temperature_window().values(), vec![19.0]);
    }

    #[test]
    fn test_recovers_after_failure() {
        let mut p = poller(ErrorPolicy::ResetToPlaceholder, 30);
        p.apply(Err(FetchError::Status(502)), at(1));
        p.apply(reading(json!({"air_temp": 22.0})), at(2));

        assert!(p.status().reachable);
        assert_eq!(p.surface().field(Field::AirTemp), Some("22.0"));
    }

    #[test]
    fn test_seed_sorts_numerically_and_keeps_tail() {
        let mut p = poller(ErrorPolicy::Preserve, 2);
        let entries = payload::history_from_value(&json!({
            "1000": {"air_temp": 20, "soil": 1},
            "3000": {"air_temp": 21},
            "2000": {"air_temp": 22, "soil": 2}
        }))
        .unwrap();
        p.seed_from_entries(&entries);

        assert_eq!(p.temperature_window().values(), vec![22.0, 21.0]);
        assert_eq!(p.soil_window().values(), vec![2.0]);
        assert_eq!(p.surface().chart(Chart::Soil).unwrap().values, vec![2.0]);
    }

    #[test]
    fn test_error_policy_parsing() {
        assert_eq!("preserve".parse::<ErrorPolicy>().unwrap(), ErrorPolicy::Preserve);
        assert_eq!(
            "Reset-To-Placeholder".parse::<ErrorPolicy>().unwrap(),
            ErrorPolicy::ResetToPlaceholder
        );
        assert!("flicker".parse::<ErrorPolicy>().is_err());
        assert_eq!(
            serde_json::from_str::<ErrorPolicy>(r#""reset-to-placeholder""#).unwrap(),
            ErrorPolicy::ResetToPlaceholder
        );
    }
}
