//! Run-time settings of the polynomial calculator.
//!
//! Settings come from command line arguments of the form `key=value`:
//! - `loglevel=off|error|warn|info|debug|trace`
//! - `logfile=<path>` or `logfile=auto` for a timestamped file name
//! - `console=true|false`
use nom::{
    IResult, Parser,
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    combinator::rest,
    sequence::{delimited, separated_pair},
};
use simplelog::LevelFilter;
use std::fmt;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn filter(&self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Malformed(String),
    UnknownKey(String),
    InvalidValue { key: String, value: String },
    LogFile(std::io::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Malformed(arg) => {
                write!(f, "argument '{}' is not of the form key=value", arg)
            }
            ConfigError::UnknownKey(key) => write!(f, "unknown setting '{}'", key),
            ConfigError::InvalidValue { key, value } => {
                write!(f, "invalid value '{}' for setting '{}'", value, key)
            }
            ConfigError::LogFile(err) => write!(f, "cannot create log file: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::LogFile(err) => Some(err),
            _ => None,
        }
    }
}

/// `logfile=auto` resolves to a timestamped name
pub const AUTO_LOG_FILE: &str = "auto";

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// `None` keeps the default level (warn)
    pub loglevel: Option<LogLevel>,
    pub log_file: Option<String>,
    pub log_to_console: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            loglevel: None,
            log_file: None,
            log_to_console: true,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_log_level(&mut self, level: LogLevel) {
        self.loglevel = Some(level);
    }

    pub fn set_log_file(&mut self, filename: String) {
        self.log_file = Some(filename);
    }

    pub fn set_console_logging(&mut self, enabled: bool) {
        self.log_to_console = enabled;
    }

    pub fn disable_logging(&mut self) {
        self.loglevel = Some(LogLevel::Off);
        self.log_file = None;
    }

    pub fn level_filter(&self) -> LevelFilter {
        self.loglevel.unwrap_or(LogLevel::Warn).filter()
    }

    /// Applies every `key=value` argument in order; later arguments win.
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = SessionConfig::default();
        for arg in args {
            let arg = arg.as_ref();
            let (key, value) = match parse_setting(arg) {
                Ok((_, pair)) => pair,
                Err(_) => return Err(ConfigError::Malformed(arg.to_string())),
            };
            config.apply(key, value)?;
        }
        Ok(config)
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "loglevel" => self.set_log_level(LogLevel::from_str(value).map_err(|_| invalid())?),
            "logfile" => {
                if value.is_empty() {
                    return Err(invalid());
                }
                self.set_log_file(value.to_string())
            }
            "console" => self.set_console_logging(value.parse::<bool>().map_err(|_| invalid())?),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// `key=value` with optional blanks around the key
fn parse_setting(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(
        delimited(multispace0, take_while1(is_key_char), multispace0),
        char('='),
        rest,
    )
    .parse(input)
    .map(|(remaining, (key, value))| (remaining, (key, value.trim())))
}
