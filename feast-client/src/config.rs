//! Client configuration
//!
//! Loaded from environment variables (a `.env` file is honoured):
//!
//! | Variable | Default |
//! |---|---|
//! | `FEAST_API_URL` | `http://localhost:8000` |
//! | `FEAST_USE_LOCAL_DATA` | `false` |
//! | `FEAST_TIMEOUT_SECS` | `10` |
//! | `FEAST_STORAGE_DIR` | unset (in-memory storage) |
//! | `FEAST_LOGIN_PATH` | `/login` |

use std::path::PathBuf;

/// How requests reach a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendMode {
    /// Network first, replaying on the local backend when it is unreachable
    #[default]
    Fallback,
    /// Only the in-process backend
    Local,
    /// Only the network backend
    Network,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g. "http://localhost:8000")
    pub api_url: String,
    pub mode: BackendMode,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Directory for persisted cart/auth state; `None` keeps it in memory
    pub storage_dir: Option<PathBuf>,
    /// Where the navigator is sent after the session expires
    pub login_path: String,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            mode: BackendMode::Fallback,
            timeout_secs: 10,
            storage_dir: None,
            login_path: "/login".to_string(),
        }
    }

    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let defaults = Self::default();
        let use_local = std::env::var("FEAST_USE_LOCAL_DATA")
            .ok()
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            api_url: std::env::var("FEAST_API_URL").unwrap_or(defaults.api_url),
            mode: if use_local {
                BackendMode::Local
            } else {
                BackendMode::Fallback
            },
            timeout_secs: std::env::var("FEAST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            storage_dir: std::env::var("FEAST_STORAGE_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            login_path: std::env::var("FEAST_LOGIN_PATH").unwrap_or(defaults.login_path),
        }
    }

    /// Use only the in-process backend
    pub fn local() -> Self {
        Self::default().with_mode(BackendMode::Local)
    }

    pub fn with_mode(mut self, mode: BackendMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = seconds;
        self
    }

    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }

    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000")
    }
}
