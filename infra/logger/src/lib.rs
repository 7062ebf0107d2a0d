//! # Logger
//!
//! Installs the global `tracing` subscriber for Dubbox tools.
//!
//! Console output goes to **stderr**, so a tool can keep stdout for its own results
//! (e.g. a JSON wiring report). An optional rolling file sink writes plain or JSON
//! lines through a non-blocking worker.
//!
//! Filtering follows `RUST_LOG` unless explicit directives are set with
//! [`LoggerBuilder::env_filter`]; in both cases [`LoggerBuilder::level`] is the default.
//!
//! ## Example
//!
//! ```rust
//! # use dbx_logger::{ConsoleFormat, LevelFilter, Logger};
//!
//! let _logger = Logger::builder()
//!     .name("dbx-wire")
//!     .console(ConsoleFormat::Compact)
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;
mod filter;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use crate::filter::parse_level;
pub use tracing::level_filters::LevelFilter;

use crate::filter::build_env_filter;
use private::Sealed;
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Console rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConsoleFormat {
    #[default]
    Compact,
    Pretty,
    Json,
    /// No console output.
    Off,
}

#[derive(Debug)]
struct LoggerConfig {
    console: ConsoleFormat,
    ansi: bool,
    path: Option<PathBuf>,
    level: LevelFilter,
    max_files: usize,
    json_file: bool,
    env_filter: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: ConsoleFormat::Compact,
            ansi: true,
            path: None,
            level: LevelFilter::INFO,
            max_files: DEFAULT_MAX_FILES,
            json_file: false,
            env_filter: None,
        }
    }
}

#[derive(Debug)]
pub struct Unnamed;
#[derive(Debug)]
pub struct Named(String);
#[derive(Debug)]
pub struct ConsoleSink;
#[derive(Debug)]
pub struct FileSink;

mod private {
    pub trait Sealed {}
}
impl Sealed for Unnamed {}
impl Sealed for Named {}
impl Sealed for ConsoleSink {}
impl Sealed for FileSink {}

/// Typestate builder: a name is required before [`init`](LoggerBuilder::init), and
/// file options only exist once a log directory is set.
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = Unnamed, S: Sealed = ConsoleSink> {
    config: LoggerConfig,
    name: N,
    sink: PhantomData<S>,
}

impl<S: Sealed> LoggerBuilder<Unnamed, S> {
    /// Names the logger; the name also prefixes rolling log files.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named, S> {
        LoggerBuilder { name: Named(name.into()), config: self.config, sink: PhantomData }
    }
}

impl LoggerBuilder<Named, FileSink> {
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.config.max_files = max;
        self
    }

    /// Writes the log file as JSON lines.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn json(mut self) -> Self {
        self.config.json_file = true;
        self
    }
}

impl<S: Sealed> LoggerBuilder<Named, S> {
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Explicit filter directives (e.g. `dbx=debug,dbx_kernel=trace`), replacing `RUST_LOG`.
    ///
    /// Invalid directives make [`init`](Self::init) fail.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.env_filter = Some(filter.into());
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, format: ConsoleFormat) -> Self {
        self.config.console = format;
        self
    }

    /// Toggles ANSI colors on the console.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn ansi(mut self, enabled: bool) -> Self {
        self.config.ansi = enabled;
        self
    }

    /// Adds a daily rolling file sink in `path`.
    pub fn path(self, path: impl Into<PathBuf>) -> LoggerBuilder<Named, FileSink> {
        let mut config = self.config;
        config.path = Some(path.into());
        LoggerBuilder { config, name: self.name, sink: PhantomData }
    }

    /// Installs the global subscriber.
    ///
    /// Keep the returned [`Logger`] alive until shutdown; dropping it stops the file worker.
    ///
    /// # Errors
    /// Returns [`LoggerError::Subscriber`] if a global subscriber is already set, and
    /// [`LoggerError::InvalidConfiguration`] for an empty name, zero `max_files`, bad
    /// filter directives, or when every sink is disabled.
    pub fn init(self) -> Result<Logger, LoggerError> {
        validate_config(&self.config, &self.name.0)?;

        let env_filter = build_env_filter(self.config.level, self.config.env_filter.as_deref())?;

        let mut layers: Vec<BoxedLayer> = Vec::new();
        if let Some(console) = console_layer(self.config.console, self.config.ansi) {
            layers.push(console);
        }

        let guard = if let Some(path) = self.config.path {
            fs::create_dir_all(&path).map_err(|e| LoggerError::Internal {
                message: e.to_string().into(),
                context: Some(format!("Failed to create path: {}", path.display()).into()),
            })?;

            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(&self.name.0)
                .filename_suffix(LOG_FILE_SUFFIX)
                .max_log_files(self.config.max_files)
                .build(path)?;

            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let file_layer = layer().with_writer(non_blocking).with_ansi(false);
            layers.push(if self.config.json_file { file_layer.json().boxed() } else { file_layer.boxed() });
            Some(guard)
        } else {
            None
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging sinks enabled. Enable the console or a log directory.".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(layers).with(env_filter).try_init()?;

        Ok(Logger { guard })
    }
}

fn console_layer(format: ConsoleFormat, ansi: bool) -> Option<BoxedLayer> {
    let console = layer().with_writer(io::stderr).with_ansi(ansi);
    match format {
        ConsoleFormat::Compact => Some(console.compact().boxed()),
        ConsoleFormat::Pretty => Some(console.pretty().boxed()),
        ConsoleFormat::Json => Some(console.json().boxed()),
        ConsoleFormat::Off => None,
    }
}

/// Handle to the installed logging system.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts configuring the global subscriber.
    ///
    /// ```rust
    /// use dbx_logger::{LevelFilter, Logger};
    ///
    /// let builder = Logger::builder().name("dbx-wire").level(LevelFilter::WARN);
    /// let _logger = builder.init();
    /// ```
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { config: LoggerConfig::default(), name: Unnamed, sink: PhantomData }
    }

    /// Returns the file worker guard, if a log directory was configured.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::debug!("Logging system shutting down, flushing buffers...");
        }
    }
}

fn validate_config(config: &LoggerConfig, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }

    if config.max_files == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: None,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    fn builder_defaults() {
        let builder = Logger::builder().name("dbx-wire");
        assert_eq!(builder.config.console, ConsoleFormat::Compact);
        assert_eq!(builder.config.level, LevelFilter::INFO);
        assert!(builder.config.ansi);
        assert!(builder.config.path.is_none());
        assert!(builder.config.env_filter.is_none());
    }

    #[test]
    fn file_options_are_recorded() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = tempdir()?;
        let log_dir = tmp_dir.path().join("logs");
        let builder = Logger::builder()
            .name("dbx-wire")
            .console(ConsoleFormat::Off)
            .env_filter("dbx=debug")
            .path(log_dir.clone())
            .max_files(3)
            .json();

        assert_eq!(builder.config.console, ConsoleFormat::Off);
        assert_eq!(builder.config.max_files, 3);
        assert!(builder.config.json_file);
        assert_eq!(builder.config.env_filter.as_deref(), Some("dbx=debug"));
        assert_eq!(builder.config.path.as_deref(), Some(log_dir.as_path()));
        Ok(())
    }

    #[test]
    #[serial]
    fn blank_name_is_rejected_before_install() {
        let err = Logger::builder().name("  ").init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    #[serial]
    fn no_sinks_is_rejected_before_install() {
        let err = Logger::builder().name("dbx-wire").console(ConsoleFormat::Off).init().unwrap_err();
        assert!(err.to_string().contains("No logging sinks enabled"));
    }

    #[test]
    #[serial]
    fn zero_max_files_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = tempdir()?;
        let err = Logger::builder().name("dbx-wire").path(tmp_dir.path()).max_files(0).init().unwrap_err();
        assert!(err.to_string().contains("max_files"));
        Ok(())
    }
}
