use crate::error::{Result, SumcheckError};
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::{format::Writer, time::FormatTime};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keeps the background log writers alive. Dropping it flushes pending lines.
pub struct LogGuards {
    _file: WorkerGuard,
    _console: WorkerGuard,
}

/// `2006/01/02 15:04:05` style local timestamps.
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y/%m/%d %H:%M:%S"))
    }
}

/// Initialize run logging: console plus the configured log file (append mode)
pub fn init_run_logging(log_file: &Path) -> Result<LogGuards> {
    // Set up environment filter (can be controlled via RUST_LOG env var)
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file = open_log_file(log_file)?;
    let (non_blocking_file, file_guard) = non_blocking(file);
    // stderr keeps stdout free for the summary echo
    let (non_blocking_console, console_guard) = non_blocking(std::io::stderr());

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false) // No colors in file logs
        .with_timer(LocalTime)
        .with_target(true)
        .with_line_number(false);

    let console_layer = fmt::layer()
        .with_writer(non_blocking_console)
        .with_ansi(true)
        .with_timer(LocalTime)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    info!("Logging initialized - appending to {}", log_file.display());

    Ok(LogGuards {
        _file: file_guard,
        _console: console_guard,
    })
}

pub fn open_log_file(path: &Path) -> Result<File> {
    let log_err = |source: std::io::Error| SumcheckError::LogFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(log_err)?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(log_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_open_log_file_creates_parents_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("run.log");

        writeln!(open_log_file(&path).unwrap(), "first").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_open_log_file_in_a_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let err = open_log_file(&blocker.join("run.log")).unwrap_err();
        assert!(matches!(err, SumcheckError::LogFile { .. }));
    }
}
