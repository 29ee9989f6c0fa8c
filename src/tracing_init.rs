//! Subscriber for the crate's own diagnostics.
//!
//! Dropped writes, failed cleanups and opened files are reported through
//! `tracing` under the `tlog` target, never through the log stream itself.
//! Applications that already install a subscriber get these events for free;
//! [`init_diagnostics`] is for those that don't.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{Error, Result};

/// Install a stderr subscriber for diagnostics at the given level
/// (e.g. "warn", "debug"). `RUST_LOG` takes precedence when set.
pub fn init_diagnostics(level: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_new(effective_log_spec(level)).map_err(|e| Error::Init(e.to_string()))?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| Error::Init(e.to_string()))?;

    Ok(())
}

/// Determine the effective filter, considering `RUST_LOG` first.
fn effective_log_spec(level: &str) -> String {
    if let Ok(rust_log) = std::env::var("RUST_LOG")
        && !rust_log.is_empty()
    {
        return rust_log;
    }

    if level.is_empty() {
        "off,tlog=warn".to_string()
    } else {
        format!("off,tlog={level}")
    }
}
