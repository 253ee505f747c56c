//! Logging setup for the CLI.
//!
//! - STUDYLOAD_LOG sets the filter (default "warn", e.g. "studyload_core=debug").
//! - STUDYLOAD_LOG_FORMAT=json switches to structured JSON lines.
//!
//! Logs go to stderr so stdout stays clean for plan and forecast output.

use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("STUDYLOAD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    match std::env::var("STUDYLOAD_LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}
