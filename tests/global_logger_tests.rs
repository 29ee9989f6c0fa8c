use std::fs;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use tlog::{FileHookConfig, Level, LogConfig};

// The global logger is shared by every test in this binary.
static GLOBAL: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    GLOBAL.lock().unwrap_or_else(|e| e.into_inner())
}

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture() -> SharedBuf {
    let out = SharedBuf::default();
    tlog::detach_hook();
    tlog::set_level(Level::Trace);
    tlog::attach_output(out.clone());
    out
}

#[test]
fn test_free_functions_and_macros() {
    let _guard = serial();
    let out = capture();
    tlog::set_name("it");

    let info_line = line!() + 1;
    tlog::info("plain");
    let macro_line = line!() + 1;
    tlog::infof!("formatted {}", 7);
    tlog::debugf!("d");
    tlog::errorf!("e{}", 1);
    tlog::tracef!("t");
    tlog::logf!(Level::Panic, "p {}", "x");
    tlog::pretty(&serde_json::json!({ "k": 1 }));

    let s = out.contents();
    let lines: Vec<&str> = s.lines().collect();
    assert_eq!(lines.len(), 9, "got {s:?}");
    assert!(lines[0].contains(&format!("[info] [it] {}:{} plain ", file!(), info_line)));
    assert!(lines[1].contains(&format!("[info] [it] {}:{} formatted 7 ", file!(), macro_line)));
    assert!(lines[2].contains("\x1b[33m[debug]"));
    assert!(lines[3].contains("\x1b[31m[error] [it] ") && lines[3].contains(" e1 "));
    assert!(lines[4].contains("\x1b[37m[trace]"));
    assert!(lines[5].contains("[panic]") && lines[5].contains(" p x "));
    assert!(lines[6].contains("[pretty]") && lines[6].ends_with(" {"));
    assert_eq!(lines[7], " \"k\": 1");
    assert_eq!(lines[8], "} \x1b[0m");
}

#[test]
fn test_global_threshold() {
    let _guard = serial();
    let out = capture();
    tlog::set_level(Level::Error);

    tlog::info("hidden");
    tlog::debug("hidden");
    tlog::trace("hidden");
    tlog::error("shown");
    tlog::panic("shown");
    tlog::log(Level::Pretty, "shown");
    tlog::log_values(Level::Info, &[&"hidden"]);

    assert_eq!(out.contents().lines().count(), 3);
    assert_eq!(tlog::logger().level(), Level::Error);
}

#[test]
fn test_init_logging_mirrors_to_daily_file() {
    let _guard = serial();
    let tmp = tempfile::tempdir().expect("tempdir");
    let logs = tmp.path().join("logs");

    let config = LogConfig::new()
        .with_console(false)
        .with_level(Level::Info)
        .with_name("file")
        .with_file(FileHookConfig::new(&logs).with_retention_days(2));
    tlog::init_logging(&config).expect("init");

    let out = SharedBuf::default();
    tlog::attach_output(out.clone());
    tlog::trace("not written");
    tlog::info("mirrored");

    let path = tlog::default_hook().current_file_path().unwrap();
    assert!(path.starts_with(&logs));
    let file = fs::read_to_string(&path).expect("daily file");
    assert_eq!(file, out.contents());
    assert!(file.contains("[info] [file] "));
    assert!(file.contains(" mirrored "));
    assert!(!file.contains("not written"));

    tlog::detach_hook();
}

#[test]
fn test_builder_init_applies_to_global() {
    let _guard = serial();
    tlog::builder()
        .with_console(false)
        .with_level(Level::Debug)
        .init()
        .expect("init");
    assert_eq!(tlog::logger().level(), Level::Debug);
    assert!(tlog::logger().enabled(Level::Pretty));
    assert!(!tlog::logger().enabled(Level::Info));
}
