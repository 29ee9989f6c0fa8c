//! Loads the logger configuration from TOML.

use tlog::LogConfig;

const CONFIG: &str = r#"
level = "debug"
name = "toml-demo"

[file]
path = "log"
name_format = "app-[year][month][day]"
retention_days = 7
cleanup = "log_files"
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config: LogConfig = toml::from_str(CONFIG)?;
    println!("{config:#?}");

    tlog::init_logging(&config)?;

    tlog::info("filtered out by the debug threshold");
    tlog::debug("written to stdout and log/app-YYYYMMDD.log");

    Ok(())
}
