use std::time::Duration;

pub const BASE_URL: &str = "http://127.0.0.1:9000";
pub const DATA_PATH: &str = "/";
pub const HISTORY_PATH: &str = "history";
pub const POLL_INTERVAL_MS: u64 = 2000;
pub const WINDOW_LEN: usize = 30;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const LOG_LEVEL: &str = "INFO";

pub const PLACEHOLDER: &str = "--";
pub const LABEL_SEPARATOR: &str = " • ";
pub const STATUS_CONNECTING: &str = "Connecting...";
pub const STATUS_OK: &str = "Database OK";
