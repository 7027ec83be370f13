pub const LOGGING_LEVEL: &str = "LOGGING_LEVEL";

pub const BASE_URL: &str = "IDASH_BASE_URL";
pub const DATA_PATH: &str = "IDASH_PATH";
pub const INTERVAL_MS: &str = "IDASH_INTERVAL_MS";
pub const WINDOW_LEN: &str = "IDASH_WINDOW_LEN";
pub const TOKEN: &str = "IDASH_TOKEN";
pub const ON_ERROR: &str = "IDASH_ON_ERROR";
pub const HISTORY: &str = "IDASH_HISTORY";
pub const REQUEST_TIMEOUT_MS: &str = "IDASH_REQUEST_TIMEOUT_MS";
