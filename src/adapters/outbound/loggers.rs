use crate::domains::logger::{DomainLogger, DynLogger, FileLogger};
use std::sync::{Arc, Mutex};

struct ConsoleBridge;

impl DomainLogger for ConsoleBridge {
    fn info(&self, msg: &str) { println!("{}", msg); }
    fn warn(&self, msg: &str) { println!("WARN: {}", msg); }
    fn error(&self, msg: &str) { eprintln!("ERROR: {}", msg); }
}

/// Plain stdout/stderr logger, the fallback when no file logger can be set up.
pub fn init_console_logger() -> DynLogger {
    Arc::new(ConsoleBridge)
}

struct NoOp;

impl DomainLogger for NoOp {
    fn info(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
}

/// Discards everything. Default for unit tests.
pub fn init_noop_logger() -> DynLogger {
    Arc::new(NoOp)
}

/// Install `fast_log` and return a logger that writes through it.
pub fn init_file_logger(path: &str, level: &str) -> Result<DynLogger, String> {
    FileLogger::init(path, level).map_err(|e| format!("Failed to initialize fast_log: {}", e))?;
    Ok(Arc::new(FileLogger))
}

/// Forwards every message to a primary and an optional secondary logger.
pub struct MultiLogger {
    primary: DynLogger,
    secondary: Option<DynLogger>,
}

impl MultiLogger {
    pub fn new(primary: DynLogger, secondary: Option<DynLogger>) -> Self {
        Self { primary, secondary }
    }
}

impl DomainLogger for MultiLogger {
    fn info(&self, msg: &str) {
        self.primary.info(msg);
        if let Some(sec) = &self.secondary {
            sec.info(msg);
        }
    }

    fn warn(&self, msg: &str) {
        self.primary.warn(msg);
        if let Some(sec) = &self.secondary {
            sec.warn(msg);
        }
    }

    fn error(&self, msg: &str) {
        self.primary.error(msg);
        if let Some(sec) = &self.secondary {
            sec.error(msg);
        }
    }
}

/// File logger when `path` is given and can be opened, console otherwise.
/// fast_log already mirrors to the console, so the two are never combined.
pub fn init_logger(path: Option<&str>, level: &str) -> DynLogger {
    match path.map(|p| init_file_logger(p, level)) {
        Some(Ok(file)) => file,
        Some(Err(e)) => {
            let console = init_console_logger();
            console.warn(&format!("{}; logging to console", e));
            console
        }
        None => init_console_logger(),
    }
}

/// Keeps every message in memory as `LEVEL:message`. Useful for asserting on
/// what a service reported.
#[derive(Default)]
pub struct RecordingLogger {
    messages: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    fn push(&self, level: &str, msg: &str) {
        if let Ok(mut m) = self.messages.lock() {
            m.push(format!("{}:{}", level, msg));
        }
    }
}

impl DomainLogger for RecordingLogger {
    fn info(&self, msg: &str) { self.push("INFO", msg); }
    fn warn(&self, msg: &str) { self.push("WARN", msg); }
    fn error(&self, msg: &str) { self.push("ERROR", msg); }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_logger_forwards_to_both() {
        let a = RecordingLogger::new();
        let b = RecordingLogger::new();
        let multi = MultiLogger::new(a.clone(), Some(b.clone()));
        multi.warn("low signal");
        assert_eq!(a.messages(), vec!["WARN:low signal".to_string()]);
        assert_eq!(b.messages(), vec!["WARN:low signal".to_string()]);
    }
}
