use chrono::Utc;
use log::{error as log_error, info as log_info, warn as log_warn, LevelFilter};
use std::str::FromStr;
use std::sync::Arc;

/// Logging port the route and navigation services write to.
/// Never fails from the caller's point of view.
pub trait DomainLogger: Send + Sync + 'static {
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
}

pub type DynLogger = Arc<dyn DomainLogger>;

/// Writes through the `log` facade into a `fast_log` file appender
/// (mirrored to the console).
pub struct FileLogger;

impl FileLogger {
    /// Install `fast_log` as the global logger. `level` is a `log` level name
    /// such as `"info"`; unknown names fall back to info.
    pub fn init(path: &str, level: &str) -> Result<(), Box<dyn std::error::Error>> {
        let level = LevelFilter::from_str(level).unwrap_or(LevelFilter::Info);
        fast_log::init(
            fast_log::config::Config::new()
                .console()
                .file(path)
                .level(level),
        )?;
        Ok(())
    }
}

impl DomainLogger for FileLogger {
    fn info(&self, msg: &str) {
        log_info!("{} - {}", Utc::now().to_rfc3339(), msg);
    }

    fn warn(&self, msg: &str) {
        log_warn!("{} - {}", Utc::now().to_rfc3339(), msg);
    }

    fn error(&self, msg: &str) {
        log_error!("{} - {}", Utc::now().to_rfc3339(), msg);
    }
}
