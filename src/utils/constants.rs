/// Source names used in load errors
pub const PROVINCES_SOURCE: &str = "provinces";
pub const STATIONS_SOURCE: &str = "stations";
pub const OBSERVATIONS_SOURCE: &str = "observations";

/// File names
pub const DEFAULT_DATA_DIR: &str = "data";
pub const PROVINCES_FILE: &str = "province_detail.csv";
pub const STATIONS_FILE: &str = "station_detail.csv";
pub const OBSERVATIONS_FILE: &str = "climate_data.csv";

/// Configuration sources
pub const CONFIG_FILE_STEM: &str = "climate-explorer";
pub const CONFIG_ENV_PREFIX: &str = "CLIMATE";

/// Day-first observation date format (DD/MM/YYYY)
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Sentinel codes in the source data: 8888 = not measured, 9999 = not recorded
pub const DEFAULT_MISSING_SENTINELS: [f64; 2] = [8888.0, 9999.0];

/// Physical bounds used by the integrity checker
pub const MAX_RELATIVE_HUMIDITY: f64 = 100.0;
pub const MAX_WIND_DIRECTION: f64 = 360.0;

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
pub const MAX_REPORTED_ISSUES: usize = 10;
