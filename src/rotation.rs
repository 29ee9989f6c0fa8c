//! Day rollover and retention cleanup for the rotating hook.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Duration, OffsetDateTime, Time};

/// Which directory entries retention cleanup may delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanupScope {
    /// Every entry older than the cutoff, whatever its name.
    #[default]
    All,
    /// Only `*.log` files.
    LogFiles,
}

impl CleanupScope {
    fn covers(self, path: &Path) -> bool {
        match self {
            Self::All => true,
            Self::LogFiles => path.extension().is_some_and(|ext| ext == "log"),
        }
    }
}

/// Calendar day key used to detect rollover (`YYYY-MM-DD`).
pub fn day_key(now: OffsetDateTime) -> String {
    // The fixed description only contains numeric components, which cannot
    // fail to format.
    now.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

/// Oldest modification time that survives cleanup: midnight of the day
/// `retention_days - 1` days before `now`.
///
/// Returns `None` when that day lies before the earliest representable
/// date, in which case nothing is old enough to delete.
pub fn retention_cutoff(now: OffsetDateTime, retention_days: u32) -> Option<SystemTime> {
    let days = i64::from(retention_days.saturating_sub(1));
    let midnight = now.replace_time(Time::MIDNIGHT);
    midnight
        .checked_sub(Duration::days(days))
        .map(SystemTime::from)
}

/// Delete entries of `dir` modified strictly before `cutoff`.
///
/// Failures on individual entries are logged and skipped. Returns the number
/// of entries removed.
pub fn clean_expired(dir: &Path, cutoff: SystemTime, scope: CleanupScope) -> usize {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "skipping retention cleanup");
            return 0;
        }
    };

    let mut removed = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if !scope.covers(&path) {
            continue;
        }
        let Ok(modified) = entry.metadata().and_then(|m| m.modified()) else {
            continue;
        };
        if modified >= cutoff {
            continue;
        }
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(file = %path.display(), "removed expired log file");
                removed += 1;
            }
            Err(e) => tracing::warn!(file = %path.display(), error = %e, "failed to remove expired log file"),
        }
    }
    removed
}
