use crate::error::{Result as ServerErrorResult, ServerError};

use ps_config::{Config, LogLevel};

use std::fmt::{Arguments, Display};
use std::path::PathBuf;
use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{LevelFilter, Record, info};

/// Crates whose chatter stays at warn unless the global level is stricter
const NOISY_TARGETS: [&str; 3] = ["sqlx", "hyper", "tower_http"];

/// Log file path from `logging.dir` + `logging.file`, creating the directory.
/// None means stdout.
pub fn log_file_path(config: &Config) -> ServerErrorResult<Option<PathBuf>> {
    let Some(filename) = config.logging.file.as_ref() else {
        return Ok(None);
    };

    let log_dir = Config::config_dir()?.join(&config.logging.dir);
    std::fs::create_dir_all(&log_dir).map_err(|e| ServerError::Io {
        path: log_dir.display().to_string(),
        source: e,
    })?;

    Ok(Some(log_dir.join(filename)))
}

fn write_line(
    out: FormatCallback<'_>,
    message: &Arguments<'_>,
    record: &Record<'_>,
    level: &dyn Display,
) {
    out.finish(format_args!(
        "[{date} - {level}] {message} [{file}:{line}]",
        date = humantime::format_rfc3339(SystemTime::now()),
        level = level,
        message = message,
        file = record.file().unwrap_or("unknown"),
        line = record.line().unwrap_or(0),
    ))
}

/// Initialize logger with fern
///
/// # Arguments
/// * `log_level` - Log level filter
/// * `log_file` - Optional path to log file. None = stdout, Some = file output
/// * `colored` - Enable colored output (ignored when logging to file)
#[track_caller]
pub fn initialize(
    log_level: LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let level_filter = log_level.0;

    let mut base_dispatch = Dispatch::new().level(level_filter);
    for target in NOISY_TARGETS {
        base_dispatch = base_dispatch.level_for(target, level_filter.min(LevelFilter::Warn));
    }

    let dispatch = match (&log_file, colored) {
        (Some(log_path), _) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)
                .map_err(|e| ServerError::Io {
                    path: log_path.display().to_string(),
                    source: e,
                })?;

            Dispatch::new()
                .format(|out, message, record| write_line(out, message, record, &record.level()))
                .chain(file)
        }
        (None, true) => {
            let colors = ColoredLevelConfig::new()
                .trace(Color::Magenta)
                .debug(Color::Blue)
                .info(Color::Green)
                .warn(Color::Yellow)
                .error(Color::Red);

            Dispatch::new()
                .format(move |out, message, record| {
                    write_line(out, message, record, &colors.color(record.level()))
                })
                .chain(std::io::stdout())
        }
        // Plain output for non-TTY (systemd, docker logs)
        (None, false) => Dispatch::new()
            .format(|out, message, record| write_line(out, message, record, &record.level()))
            .chain(std::io::stdout()),
    };

    base_dispatch
        .chain(dispatch)
        .apply()
        .map_err(|e| ServerError::Logger {
            message: format!("Failed to initialize logger: {e}"),
        })?;

    match log_file {
        Some(ref path) => info!(
            "Logger initialized: level={:?}, file={}",
            level_filter,
            path.display()
        ),
        None => info!("Logger initialized: level={:?}, stdout", level_filter),
    }

    // Bridge tracing to log
    tracing_log::LogTracer::init().ok();

    Ok(())
}
