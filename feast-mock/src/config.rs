use std::path::PathBuf;

use shared::order::FeeSchedule;

/// Mock backend configuration
///
/// Read from the environment with typed defaults:
///
/// | Variable | Default |
/// |----------|---------|
/// | `FEAST_MOCK_PORT` | `8000` |
/// | `FEAST_DATA_DIR` | unset (embedded CSV catalog) |
/// | `LOG_LEVEL` | `info` |
/// | `LOG_JSON` | `false` |
/// | `LOG_DIR` | unset (console only) |
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub http_port: u16,
    /// Directory holding `restaurants.csv` and `menu.csv`
    pub data_dir: Option<PathBuf>,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    pub fees: FeeSchedule,
}

impl MockConfig {
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("FEAST_MOCK_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            data_dir: std::env::var("FEAST_DATA_DIR")
                .ok()
                .filter(|d| !d.trim().is_empty())
                .map(PathBuf::from),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            fees: FeeSchedule::default(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.http_port = port;
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn with_fees(mut self, fees: FeeSchedule) -> Self {
        self.fees = fees;
        self
    }
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            http_port: 8000,
            data_dir: None,
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            fees: FeeSchedule::default(),
        }
    }
}
