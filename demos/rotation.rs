//! Mirrors every line into a daily file inside a temporary directory.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tlog::init_diagnostics("debug")?;

    let temp_dir = tempfile::tempdir()?;
    let log_dir = temp_dir.path().join("log");

    tlog::builder()
        .with_file(&log_dir)
        .with_retention_days(3)
        .init()?;

    for i in 0..10 {
        tlog::infof!("Log message number {}", i);
    }

    let path = tlog::default_hook().current_file_path()?;
    println!("wrote {}", path.display());
    print!("{}", std::fs::read_to_string(&path)?);

    Ok(())
}
