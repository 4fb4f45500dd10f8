use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::model::LogConfig;

/// Environment variable that overrides `log.level`
pub const LOG_ENV: &str = "GIFTDECK_LOG";

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// The TUI owns the terminal, so it logs to a file
    File,
    Stderr,
}

/// Default log file: `<data dir>/giftdeck/giftdeck.log`
pub fn default_log_file() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("giftdeck").join("giftdeck.log"))
}

/// The configured log file, or the default one
pub fn log_file(config: &LogConfig) -> Option<PathBuf> {
    config.file.clone().or_else(default_log_file)
}

/// Build the filter from GIFTDECK_LOG, then the configured level, then "info"
pub fn build_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Failures are reported on stderr and
/// otherwise ignored; the program runs without logs.
pub fn init(config: &LogConfig, target: LogTarget) {
    let filter = build_filter(config);
    let result = match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init(),
        LogTarget::File => {
            let Some(path) = log_file(config) else {
                return;
            };
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let file = match OpenOptions::new().create(true).append(true).open(&path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("warning: could not open log file {}: {}", path.display(), e);
                    return;
                }
            };
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
        }
    };
    if let Err(e) = result {
        eprintln!("warning: logging disabled: {}", e);
    }
}
