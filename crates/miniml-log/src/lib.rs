//! Leveled logging for the MiniML crates.
//!
//! Messages go to stderr, tagged with their level and the module path of the
//! call site. The minimum level is global and can be changed at any time,
//! either directly or from an environment variable.
//!
//! # Example
//!
//! ```
//! use miniml_log::{debug, info, Level};
//!
//! miniml_log::set_level(Level::Debug);
//!
//! info!("checking {} bindings", 3);
//! debug!("environment: {:?}", ["id", "const"]);
//! ```

use std::fmt::Arguments;
use std::io::Write;
use std::str::FromStr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Environment variable read by [`init_from_env`] when no other name is given.
pub const DEFAULT_ENV_VAR: &str = "MINIML_LOG";

/// Severity of a log message. Lower values are more severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Failures the caller must see
    Error = 0,
    /// Suspicious but recoverable situations
    Warn = 1,
    /// High-level progress
    Info = 2,
    /// Per-phase details (one line per inference run or let binding)
    Debug = 3,
    /// Per-step details (every unification)
    Trace = 4,
}

impl Level {
    const fn color_code(self) -> &'static str {
        match self {
            Level::Error => "\x1b[31m",
            Level::Warn => "\x1b[33m",
            Level::Info => "\x1b[32m",
            Level::Debug => "\x1b[36m",
            Level::Trace => "\x1b[35m",
        }
    }

    /// Upper-case name of the level.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Level::Error,
            1 => Level::Warn,
            2 => Level::Info,
            3 => Level::Debug,
            _ => Level::Trace,
        }
    }
}

/// Error returned when a level name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl std::fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid log level: {}", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Parses a level name, ignoring case.
    ///
    /// ```
    /// use miniml_log::Level;
    ///
    /// assert_eq!("debug".parse::<Level>(), Ok(Level::Debug));
    /// assert!("loud".parse::<Level>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ERROR" => Ok(Level::Error),
            "WARN" | "WARNING" => Ok(Level::Warn),
            "INFO" => Ok(Level::Info),
            "DEBUG" => Ok(Level::Debug),
            "TRACE" => Ok(Level::Trace),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// Global logger state: minimum level and whether to emit ANSI colors.
pub struct Logger {
    level: AtomicU8,
    color: AtomicBool,
}

impl Logger {
    const fn new(level: Level) -> Self {
        Logger {
            level: AtomicU8::new(level as u8),
            color: AtomicBool::new(true),
        }
    }

    /// Sets the minimum level.
    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    /// Returns the minimum level.
    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Whether a message at `level` would be written.
    pub fn enabled(&self, level: Level) -> bool {
        level as u8 <= self.level.load(Ordering::Relaxed)
    }

    /// Turns ANSI colors on or off.
    pub fn set_color(&self, enabled: bool) {
        self.color.store(enabled, Ordering::SeqCst);
    }

    fn color(&self) -> bool {
        self.color.load(Ordering::Relaxed)
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Returns the global logger, initialized at [`Level::Warn`] on first use.
pub fn get_logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger::new(Level::Warn))
}

/// Sets the global minimum level.
pub fn set_level(level: Level) {
    get_logger().set_level(level);
}

/// Sets the global minimum level from a level name.
pub fn set_level_from_str(s: &str) -> Result<(), ParseLevelError> {
    set_level(s.parse()?);
    Ok(())
}

/// Configures the global logger from the environment.
///
/// Reads the level from `var` (or [`DEFAULT_ENV_VAR`] when `None`) and
/// disables colors when `NO_COLOR` is set. An unset variable leaves the level
/// untouched; an unparsable one is reported and otherwise ignored.
///
/// Returns the level in effect afterwards.
pub fn init_from_env(var: Option<&str>) -> Level {
    let logger = get_logger();
    let var = var.unwrap_or(DEFAULT_ENV_VAR);

    if std::env::var_os("NO_COLOR").is_some() {
        logger.set_color(false);
    }

    if let Ok(value) = std::env::var(var) {
        match value.parse::<Level>() {
            Ok(level) => logger.set_level(level),
            Err(err) => __log_with_target(Level::Warn, module_path!(), format_args!("{var}: {err}")),
        }
    }

    logger.level()
}

#[doc(hidden)]
pub fn __log_with_target(level: Level, target: &str, args: Arguments) {
    const RESET: &str = "\x1b[0m";

    let logger = get_logger();
    if !logger.enabled(level) {
        return;
    }

    let mut stderr = std::io::stderr().lock();
    // write failures are ignored
    let _ = if logger.color() {
        writeln!(stderr, "{}[{}]{RESET} {target}: {args}", level.color_code(), level.as_str())
    } else {
        writeln!(stderr, "[{}] {target}: {args}", level.as_str())
    };
}

/// Logs at an explicit level, capturing the caller's module path.
///
/// ```
/// use miniml_log::{log, Level};
///
/// log!(level: Level::Info, "inferred {} expressions", 12);
/// ```
#[macro_export]
macro_rules! log {
    (level: $level:expr, $($arg:tt)*) => {
        {
            if $crate::get_logger().enabled($level) {
                $crate::__log_with_target(
                    $level,
                    module_path!(),
                    format_args!($($arg)*)
                );
            }
        }
    };
}

/// Logs at [`Level::Error`].
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Error, $($arg)*)
    };
}

/// Logs at [`Level::Warn`].
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Warn, $($arg)*)
    };
}

/// Logs at [`Level::Info`].
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Info, $($arg)*)
    };
}

/// Logs at [`Level::Debug`].
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Debug, $($arg)*)
    };
}

/// Logs at [`Level::Trace`].
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Trace, $($arg)*)
    };
}
