use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use once_cell::sync::Lazy;
use time::format_description;

use crate::clock::{Clock, SystemClock};
use crate::rotation;
use crate::{Error, FileHookConfig, Hook, Result};

/// Called with every error the hook swallows.
pub type DiagnosticHandler = Arc<dyn Fn(&Error) + Send + Sync>;

static DEFAULT_HOOK: Lazy<Arc<RotatingHook>> =
    Lazy::new(|| Arc::new(RotatingHook::new(FileHookConfig::default())));

/// The process-wide hook, configured with the defaults until `configure`
/// is called on it.
pub fn default_hook() -> Arc<RotatingHook> {
    Arc::clone(&DEFAULT_HOOK)
}

/// Mutable state of a hook, guarded as a whole.
struct HookState {
    config: FileHookConfig,
    /// Day key of the last write, used for rollover detection.
    last_date: String,
    file: Option<File>,
}

/// A hook that appends to one file per day inside a directory and removes
/// files that fall out of the retention window when the day changes.
pub struct RotatingHook {
    clock: Arc<dyn Clock>,
    state: Mutex<HookState>,
    diagnostics: Mutex<Option<DiagnosticHandler>>,
}

impl RotatingHook {
    /// Create a hook on the wall clock. Nothing touches the filesystem until
    /// the first write.
    pub fn new(config: FileHookConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: FileHookConfig, clock: Arc<dyn Clock>) -> Self {
        let config = FileHookConfig {
            path: trim_trailing_separators(&config.path),
            ..config
        };
        let last_date = rotation::day_key(clock.now());
        Self {
            clock,
            state: Mutex::new(HookState {
                config,
                last_date,
                file: None,
            }),
            diagnostics: Mutex::new(None),
        }
    }

    /// Build a hook from a config, rejecting invalid settings.
    pub fn from_config(config: FileHookConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Replace the directory, naming scheme and retention count.
    ///
    /// On error the current configuration is kept.
    pub fn configure(
        &self,
        path: impl AsRef<Path>,
        name_format: &str,
        retention_days: u32,
    ) -> Result<()> {
        let config = FileHookConfig {
            path: trim_trailing_separators(path.as_ref()),
            name_format: name_format.to_string(),
            retention_days,
            cleanup: self.lock().config.cleanup,
        };
        self.apply(config)
    }

    /// Replace the whole configuration, including the cleanup scope.
    pub fn apply(&self, config: FileHookConfig) -> Result<()> {
        config.validate()?;
        let mut state = self.lock();
        state.config = FileHookConfig {
            path: trim_trailing_separators(&config.path),
            ..config
        };
        state.file = None;
        Ok(())
    }

    pub fn config(&self) -> FileHookConfig {
        self.lock().config.clone()
    }

    /// Install a handler that observes dropped writes.
    pub fn set_diagnostic_handler<F>(&self, handler: F)
    where
        F: Fn(&Error) + Send + Sync + 'static,
    {
        *self.diagnostics.lock().unwrap_or_else(|e| e.into_inner()) = Some(Arc::new(handler));
    }

    pub fn clear_diagnostic_handler(&self) {
        *self.diagnostics.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }

    /// Path of the file a write at this instant would go to.
    pub fn current_file_path(&self) -> Result<PathBuf> {
        let state = self.lock();
        file_path(&state.config, self.clock.now())
    }

    /// Whether a file handle is currently held open.
    pub fn is_open(&self) -> bool {
        self.lock().file.is_some()
    }

    fn lock(&self) -> MutexGuard<'_, HookState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run the full rollover, cleanup, open and append sequence under the
    /// state lock.
    fn append(&self, message: &[u8]) -> Result<()> {
        let mut state = self.lock();
        let now = self.clock.now();

        let today = rotation::day_key(now);
        if today != state.last_date {
            state.last_date = today;
            if let Some(cutoff) = rotation::retention_cutoff(now, state.config.retention_days) {
                rotation::clean_expired(&state.config.path, cutoff, state.config.cleanup);
            }
            state.file = None;
        }

        ensure_dir(&state.config.path)?;

        let path = file_path(&state.config, now)?;
        if state.file.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|source| Error::Open {
                    path: path.clone(),
                    source,
                })?;
            tracing::debug!(file = %path.display(), "opened log file");
            state.file = Some(file);
        }

        match state.file.as_mut() {
            Some(file) => file
                .write_all(message)
                .map_err(|source| Error::Write { path, source }),
            None => Ok(()),
        }
    }

    fn report(&self, error: &Error) {
        tracing::warn!(error = %error, "log message dropped");
        let handler = self
            .diagnostics
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        if let Some(handler) = handler {
            handler(error);
        }
    }
}

impl Hook for RotatingHook {
    fn write(&self, message: &[u8]) {
        if let Err(e) = self.append(message) {
            self.report(&e);
        }
    }
}

impl std::fmt::Debug for RotatingHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("RotatingHook")
            .field("config", &state.config)
            .field("last_date", &state.last_date)
            .field("open", &state.file.is_some())
            .finish()
    }
}

/// Create the log directory if it is missing. Only the last path segment is
/// created.
fn ensure_dir(dir: &Path) -> Result<()> {
    match fs::metadata(dir) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::create_dir(dir).map_err(|source| Error::CreateDir {
                path: dir.to_path_buf(),
                source,
            })
        }
        Err(source) => Err(Error::Stat {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

fn file_path(config: &FileHookConfig, now: time::OffsetDateTime) -> Result<PathBuf> {
    let items = format_description::parse(&config.name_format)
        .map_err(|e| Error::Config(format!("invalid name_format: {e}")))?;
    let name = now.format(&items)?;
    Ok(config.path.join(format!("{name}.log")))
}

/// Strip trailing `/` (and `\` on Windows) without reducing a root path to
/// nothing.
fn trim_trailing_separators(path: &Path) -> PathBuf {
    let Some(s) = path.to_str() else {
        return path.to_path_buf();
    };
    let trimmed = s.trim_end_matches(std::path::is_separator);
    if trimmed.is_empty() {
        path.to_path_buf()
    } else {
        PathBuf::from(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::time::SystemTime;
    use time::macros::datetime;

    fn config_in(dir: &Path) -> FileHookConfig {
        FileHookConfig::new(dir.join("logs"))
    }

    fn manual_hook(config: FileHookConfig) -> (RotatingHook, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(datetime!(2024-01-02 10:00:00 UTC)));
        let hook = RotatingHook::with_clock(config, clock.clone());
        (hook, clock)
    }

    #[test]
    fn test_trim_trailing_separators() {
        assert_eq!(trim_trailing_separators(Path::new("log///")), PathBuf::from("log"));
        assert_eq!(trim_trailing_separators(Path::new("a/b")), PathBuf::from("a/b"));
        assert_eq!(trim_trailing_separators(Path::new("/")), PathBuf::from("/"));
    }

    #[test]
    fn test_lazy_open() {
        let dir = tempfile::tempdir().unwrap();
        let (hook, _clock) = manual_hook(config_in(dir.path()));

        assert!(!hook.is_open());
        assert!(!dir.path().join("logs").exists());

        hook.write(b"first\n");
        assert!(hook.is_open());

        let content = fs::read_to_string(dir.path().join("logs/2024-01-02.log")).unwrap();
        assert_eq!(content, "first\n");
    }

    #[test]
    fn test_custom_name_format() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path()).with_name_format("app-[year][month][day]");
        let (hook, _clock) = manual_hook(config);

        hook.write(b"x");
        assert!(dir.path().join("logs/app-20240102.log").exists());
        assert_eq!(
            hook.current_file_path().unwrap(),
            dir.path().join("logs/app-20240102.log")
        );
    }

    #[test]
    fn test_configure_rejects_zero_retention() {
        let dir = tempfile::tempdir().unwrap();
        let (hook, _clock) = manual_hook(config_in(dir.path()));
        let before = hook.config();

        let err = hook.configure(dir.path().join("other"), "[year]", 0).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(hook.config(), before);
    }

    #[test]
    fn test_configure_rejects_bad_format() {
        let dir = tempfile::tempdir().unwrap();
        let (hook, _clock) = manual_hook(config_in(dir.path()));
        let before = hook.config();

        assert!(hook.configure(dir.path(), "[nonsense", 3).is_err());
        assert_eq!(hook.config(), before);
    }

    #[test]
    fn test_configure_trims_and_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let (hook, _clock) = manual_hook(config_in(dir.path()));
        hook.write(b"a");
        assert!(hook.is_open());

        let target = format!("{}/moved//", dir.path().display());
        hook.configure(&target, "[year]-[month]-[day]", 2).unwrap();

        let config = hook.config();
        assert_eq!(config.path, dir.path().join("moved"));
        assert_eq!(config.retention_days, 2);
        assert!(!hook.is_open());

        hook.write(b"b");
        assert_eq!(
            fs::read_to_string(dir.path().join("moved/2024-01-02.log")).unwrap(),
            "b"
        );
    }

    #[test]
    fn test_missing_parent_drops_message() {
        let dir = tempfile::tempdir().unwrap();
        let config = FileHookConfig::new(dir.path().join("missing/inner"));
        let (hook, _clock) = manual_hook(config);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        hook.set_diagnostic_handler(move |e| sink.lock().unwrap().push(e.to_string()));

        hook.write(b"lost");

        assert!(!dir.path().join("missing").exists());
        assert!(!hook.is_open());
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].contains("failed to create log directory"));
    }

    #[test]
    fn test_same_day_no_cleanup() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        fs::create_dir(&logs).unwrap();
        let stale = logs.join("ancient.log");
        let f = File::create(&stale).unwrap();
        f.set_modified(SystemTime::from(datetime!(2000-01-01 00:00:00 UTC)))
            .unwrap();

        let (hook, clock) = manual_hook(config_in(dir.path()));
        hook.write(b"a");
        clock.advance(time::Duration::hours(5));
        hook.write(b"b");

        assert!(stale.exists());
    }
}
