//! Polling telemetry dashboard for smart irrigation sensors
//!
//! Reads the latest sensor reading from a realtime database over REST on a fixed
//! interval, renders it into display fields and keeps two short rolling series
//! (air temperature, soil moisture) for charts.
pub mod argsets;
pub mod command;
pub mod constants;
pub mod data_mgmt;
pub mod helpers;
pub mod interfaces;
pub mod poller;
pub mod settings;

pub use data_mgmt::{Field, Reading, RollingWindow, SeriesPoint};
pub use interfaces::{Chart, MemorySurface, RtdbClient, Surface, TerminalSurface};
pub use poller::{ConnectionStatus, ErrorPolicy, PollHandle, Poller};
pub use settings::{Settings, SettingsOverrides};
