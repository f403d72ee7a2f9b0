//! Logging Infrastructure
//!
//! - Console output (pretty or JSON)
//! - Optional daily rolling files under `LOG_DIR`: `app/` for everything,
//!   `audit/` for order status changes, `security/` for auth failures

use std::fs;
use std::path::Path;
use tracing::Subscriber;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter::filter_fn, fmt, prelude::*};

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync>;

/// File layer for one log stream, filtered by target
fn file_layer<S>(
    dir: &Path,
    prefix: &str,
    json: bool,
    keep: fn(&str) -> bool,
) -> anyhow::Result<BoxedLayer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let stream_dir = dir.join(prefix);
    fs::create_dir_all(&stream_dir)?;
    let appender = RollingFileAppender::new(Rotation::DAILY, stream_dir, prefix);
    let writer = std::sync::Mutex::new(appender);
    let filter = filter_fn(move |meta| keep(meta.target()));

    let layer = if json {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_writer(writer)
            .with_filter(filter)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(filter)
            .boxed()
    };
    Ok(layer)
}

/// Initialize the logging system
///
/// `RUST_LOG` overrides `level` when set.
pub fn init_logger(level: &str, json_format: bool, log_dir: Option<&str>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let mut layers: Vec<BoxedLayer<_>> = Vec::new();

    let console = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };
    layers.push(console);

    if let Some(dir) = log_dir {
        let dir = Path::new(dir);
        fs::create_dir_all(dir)?;
        layers.push(file_layer(dir, "app", json_format, |t| {
            t != "audit" && t != "security"
        })?);
        layers.push(file_layer(dir, "audit", json_format, |t| t == "audit")?);
        layers.push(file_layer(dir, "security", json_format, |t| t == "security")?);
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()?;

    Ok(())
}

/// Audit log helper - records order lifecycle changes
///
/// ```ignore
/// audit_log!("user_001", "status_change", "order:ORD-2025-007", "pending -> confirmed");
/// ```
#[macro_export]
macro_rules! audit_log {
    ($user_id:expr, $action:expr, $resource:expr) => {
        tracing::info!(
            target: "audit",
            user_id = $user_id,
            action = $action,
            resource = $resource,
            "AUDIT"
        );
    };
    ($user_id:expr, $action:expr, $resource:expr, $details:expr) => {
        tracing::info!(
            target: "audit",
            user_id = $user_id,
            action = $action,
            resource = $resource,
            details = $details,
            "AUDIT"
        );
    };
}

/// Security log helper - records authentication failures
///
/// ```ignore
/// security_log!("login_failed", email = "a@b.c", reason = "invalid_password");
/// ```
#[macro_export]
macro_rules! security_log {
    ($event:expr, $($arg:tt)*) => {
        tracing::warn!(
            target: "security",
            event = $event,
            $($arg)*
        );
    };
}
