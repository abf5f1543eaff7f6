use std::env;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_FILE: &str = "./logs/sign_quiz.log";

/// Where and how much to log, read from `TRACING_LEVEL`, `FILE_LOG_LEVEL`
/// and `LOG_FILE_PATH`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LogSettings {
    terminal_level: String,
    file_level: String,
    file_path: PathBuf,
}

impl LogSettings {
    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let read = |key: &str, default: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            // The quiz draws on stdout; keep stderr quiet unless asked.
            terminal_level: read("TRACING_LEVEL", "warn"),
            file_level: read("FILE_LOG_LEVEL", "info"),
            file_path: PathBuf::from(read("LOG_FILE_PATH", DEFAULT_LOG_FILE)),
        }
    }

    fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Appender directory and file name. A bare file name logs to the working directory.
    fn split_file_path(&self) -> (PathBuf, PathBuf) {
        let dir = match self.file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file = self
            .file_path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("sign_quiz.log"));
        (dir, file)
    }
}

fn filter(directives: &str, fallback: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Installs a stderr layer and a non-blocking file layer, each with its own filter.
/// The returned guard flushes the file on drop; hold it for the life of `main`.
pub fn init_logger() -> WorkerGuard {
    let settings = LogSettings::from_env();
    let (dir, file) = settings.split_file_path();
    let dir_error = std::fs::create_dir_all(&dir).err();

    let (non_blocking, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(&dir, &file));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .pretty()
                .with_file(false)
                .without_time()
                .with_filter(filter(&settings.terminal_level, "warn")),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(false)
                .with_filter(filter(&settings.file_level, "info")),
        )
        .init();

    if let Some(err) = dir_error {
        warn!("Could not create log directory {}: {}", dir.display(), err);
    }
    info!(
        "Logging to {} at '{}'",
        settings.file_path.display(),
        settings.file_level
    );

    guard
}
