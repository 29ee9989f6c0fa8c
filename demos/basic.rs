//! Basic console logging example.
//!
//! Initializes the global logger with the builder API and logs at every
//! level.

use serde::Serialize;
use tlog::Level;

#[derive(Serialize)]
struct Request<'a> {
    method: &'a str,
    path: &'a str,
    status: u16,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tlog::builder().with_level(Level::Trace).with_name("basic").init()?;

    tlog::trace("This is a trace message");
    tlog::info("This is an info message");
    tlog::debugf!("config loaded from {}", "defaults");
    tlog::error("This is an error message");
    tlog::pretty(&Request {
        method: "GET",
        path: "/health",
        status: 200,
    });

    Ok(())
}
