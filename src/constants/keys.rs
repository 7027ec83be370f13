// Keys recognized in reading payloads
pub const AIR_TEMP: &str = "air_temp";
pub const AIR_RH: &str = "air_rh";
pub const SOIL: &str = "soil";
pub const SOIL_PCT: &str = "soil_pct";
pub const LUX: &str = "lux";
pub const PPFD: &str = "ppfd";
pub const PUMP: &str = "pump";
pub const PERIOD: &str = "period";
pub const CROP: &str = "crop";
pub const IRRIG_MS: &str = "irrig_ms";

// Query parameter carrying the read token
pub const TOKEN_PARAM: &str = "token";
