//! Console and file logging set up from a [`SessionConfig`].
use crate::Utils::config::{AUTO_LOG_FILE, ConfigError, SessionConfig};
use chrono::Local;
use log::info;
use simplelog::*;
use std::fs::File;

/// `poly_log_<date>_<time>.txt`
pub fn default_log_file_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("poly_log_{}.txt", date_and_time)
}

/// Installs a combined terminal + file logger.
///
/// Returns `Ok(false)` when there was nothing to install (logging off, or
/// neither console nor file requested) or when a global logger already exists.
pub fn init_logger(config: &SessionConfig) -> Result<bool, ConfigError> {
    let level = config.level_filter();
    if level == LevelFilter::Off {
        return Ok(false);
    }
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    if config.log_to_console {
        loggers.push(TermLogger::new(
            level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }

    if let Some(ref filename) = config.log_file {
        let filename = if filename == AUTO_LOG_FILE {
            default_log_file_name()
        } else {
            filename.clone()
        };
        let file = File::create(&filename).map_err(ConfigError::LogFile)?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }

    if loggers.is_empty() {
        return Ok(false);
    }
    match CombinedLogger::init(loggers) {
        Ok(()) => {
            info!("logging started with level {}", level);
            Ok(true)
        }
        Err(_) => Ok(false),
    }
}
