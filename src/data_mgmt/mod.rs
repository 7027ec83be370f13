pub mod format;
pub mod models;
pub mod payload;
pub mod window;

pub use format::Field;
pub use models::{HistoryEntry, Reading, SeriesPoint};
pub use window::RollingWindow;
