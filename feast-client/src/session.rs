//! Session expiry handling
//!
//! When a request that carried a token comes back 401, the session is
//! dropped and the [`Navigator`] is sent to the login entry point. The
//! redirect fires once per session; a successful login re-arms it.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Moves the UI to another entry point
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Navigator that only logs; for headless use
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, path: &str) {
        tracing::info!(path, "Navigation requested");
    }
}

/// One-shot redirect to the login entry point
pub struct LoginRedirect {
    navigator: Arc<dyn Navigator>,
    login_path: String,
    fired: AtomicBool,
}

impl LoginRedirect {
    pub fn new(navigator: Arc<dyn Navigator>, login_path: impl Into<String>) -> Self {
        Self {
            navigator,
            login_path: login_path.into(),
            fired: AtomicBool::new(false),
        }
    }

    /// Navigate to the login path unless already done since the last reset;
    /// returns whether navigation happened
    pub fn trigger(&self) -> bool {
        if self.fired.swap(true, Ordering::AcqRel) {
            return false;
        }
        tracing::warn!(path = %self.login_path, "Session expired, redirecting to login");
        self.navigator.navigate(&self.login_path);
        true
    }

    pub fn reset(&self) {
        self.fired.store(false, Ordering::Release);
    }
}

impl fmt::Debug for LoginRedirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRedirect")
            .field("login_path", &self.login_path)
            .field("fired", &self.fired.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}
