use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Mutex, OnceLock};

pub const LOG_ENV: &str = "CRASHLOAD_LOG";

static LOGGER: OnceLock<Logger> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level {:?}", other)),
        }
    }
}

impl LogLevel {
    fn label(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    /// Level named by `value`, `Info` when unset or unrecognised.
    fn from_value(value: Option<&str>) -> LogLevel {
        value.and_then(|v| v.parse().ok()).unwrap_or(LogLevel::Info)
    }

    fn from_env() -> LogLevel {
        LogLevel::from_value(std::env::var(LOG_ENV).ok().as_deref())
    }
}

/// Append-only log file with a minimum level.
pub struct Logger {
    file: Mutex<File>,
    level: LogLevel,
}

impl Logger {
    pub fn open(path: &Path, level: LogLevel) -> std::io::Result<Logger> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Logger {
            file: Mutex::new(file),
            level,
        })
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    pub fn write(&self, level: LogLevel, msg: &str) {
        if !self.enabled(level) {
            return;
        }
        if let Ok(mut f) = self.file.lock() {
            let _ = writeln!(f, "{} [{}] {}", now_ts(), level.label(), msg);
            let _ = f.flush();
        }
    }
}

/// Open the process log file, level taken from `CRASHLOAD_LOG`.
/// Later calls keep the first file.
pub fn init(log_path: impl AsRef<Path>) -> std::io::Result<PathBuf> {
    let path = log_path.as_ref();
    let logger = Logger::open(path, LogLevel::from_env())?;
    let _ = LOGGER.set(logger);
    info(&format!("logging initialized: {}", path.display()));
    Ok(path.to_path_buf())
}

fn now_ts() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    format!("{}.{:03}", now.as_secs(), now.subsec_millis())
}

fn log(level: LogLevel, msg: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.write(level, msg);
    }
}

pub fn error(msg: &str) {
    log(LogLevel::Error, msg);
}
pub fn warn(msg: &str) {
    log(LogLevel::Warn, msg);
}
pub fn info(msg: &str) {
    log(LogLevel::Info, msg);
}
pub fn debug(msg: &str) {
    log(LogLevel::Debug, msg);
}
pub fn trace(msg: &str) {
    log(LogLevel::Trace, msg);
}
