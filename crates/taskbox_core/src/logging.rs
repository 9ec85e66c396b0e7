//! Rolling-file logging for the core.
//!
//! # Invariants
//! - The first successful `init_logging` fixes level and directory for the
//!   process; repeating it is a no-op, changing either is rejected.
//! - Initialization never panics.
//! - Events carry ids and counts only; task titles and descriptions are
//!   never written to logs.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::path::PathBuf;

const LOG_FILE_BASENAME: &str = "taskbox";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const PANIC_PAYLOAD_LIMIT: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();

/// Validated `init_logging` input.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LogSettings {
    level: LevelFilter,
    dir: PathBuf,
}

impl LogSettings {
    fn parse(level: &str, log_dir: &str) -> Result<Self, String> {
        let level = match level.trim().parse::<LevelFilter>() {
            Ok(LevelFilter::Off) | Err(_) => {
                return Err(format!(
                    "unsupported log level `{}`; expected trace|debug|info|warn|error",
                    level.trim()
                ))
            }
            Ok(level) => level,
        };

        let dir = PathBuf::from(log_dir.trim());
        if dir.as_os_str().is_empty() {
            return Err("log_dir cannot be empty".to_string());
        }
        if !dir.is_absolute() {
            return Err(format!(
                "log_dir must be an absolute path, got `{}`",
                dir.display()
            ));
        }
        Ok(Self { level, dir })
    }

    fn spec(&self) -> String {
        self.level.as_str().to_ascii_lowercase()
    }
}

struct ActiveLogger {
    settings: LogSettings,
    _handle: LoggerHandle,
}

/// Starts rolling-file logging under `log_dir` at `level`.
///
/// # Errors
/// Returns a human-readable message when the input is invalid, the directory
/// cannot be created, the backend fails to start, or logging is already
/// running with different settings.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let requested = LogSettings::parse(level, log_dir)?;
    let active = ACTIVE.get_or_try_init(|| start(requested.clone()))?;
    if active.settings != requested {
        return Err(format!(
            "logging already initialized with level `{}` at `{}`; refusing to switch to level `{}` at `{}`",
            active.settings.spec(),
            active.settings.dir.display(),
            requested.spec(),
            requested.dir.display()
        ));
    }
    Ok(())
}

/// `debug` in debug builds, `info` in release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start(settings: LogSettings) -> Result<ActiveLogger, String> {
    std::fs::create_dir_all(&settings.dir).map_err(|err| {
        format!(
            "failed to create log directory `{}`: {err}",
            settings.dir.display()
        )
    })?;

    let handle = Logger::try_with_str(settings.spec())
        .map_err(|err| format!("invalid log level `{}`: {err}", settings.spec()))?
        .log_to_file(
            FileSpec::default()
                .directory(settings.dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    log_panics();
    info!(
        "event=logging_init module=core status=ok platform={} version={} level={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION"),
        settings.spec()
    );
    Ok(ActiveLogger {
        settings,
        _handle: handle,
    })
}

/// Chains a hook that records panics before the previous hook runs.
fn log_panics() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let payload = panic
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| panic.payload().downcast_ref::<String>().map(String::as_str))
            .unwrap_or("non-string panic payload");
        let location = panic
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        error!(
            "event=panic module=core status=error location={} payload={}",
            location,
            one_line(payload, PANIC_PAYLOAD_LIMIT)
        );
        previous(panic);
    }));
}

// Panic payloads may echo task text.
fn one_line(value: &str, limit: usize) -> String {
    let mut flat: String = value
        .chars()
        .map(|ch| if matches!(ch, '\n' | '\r') { ' ' } else { ch })
        .take(limit)
        .collect();
    if value.chars().count() > limit {
        flat.push_str("...");
    }
    flat
}
