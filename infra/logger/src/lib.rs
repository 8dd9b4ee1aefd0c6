//! # Logger
//!
//! Installs the process-wide `tracing` subscriber for Hugo binaries.
//!
//! Output goes to the console (compact, ANSI) and, when a [`FileOutput`] is attached, to
//! rolling log files written by a non-blocking worker. Filtering starts from a default
//! level; explicit directives given through [`LoggerBuilder::env_filter`] replace
//! `RUST_LOG`, otherwise `RUST_LOG` refines the default.
//!
//! A name is required before [`LoggerBuilder::init`] can be called. It also prefixes the
//! rolling files (`hugo-server.2026-10-18.log`).
//!
//! ## Example
//!
//! ```rust
//! # use hugo_logger::{FileOutput, LevelFilter, Logger, Rotation};
//! # let dir = std::env::temp_dir().join("hugo-logger-doc");
//! let _logger = Logger::builder()
//!     .name("hugo-server")
//!     .level(LevelFilter::DEBUG)
//!     .file(FileOutput::new(dir).rotation(Rotation::HOURLY).max_files(24))
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::LoggerError;
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Rotated files kept on disk unless [`FileOutput::max_files`] says otherwise.
pub const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

/// Rolling file sink: target directory, rotation period, retention and record format.
#[derive(Debug, Clone)]
pub struct FileOutput {
    dir: PathBuf,
    rotation: Rotation,
    max_files: usize,
    json: bool,
}

impl FileOutput {
    /// Plain-text files under `dir`, rotated daily, keeping [`DEFAULT_MAX_FILES`].
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
        }
    }

    #[must_use]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Upper bound on rotated files; older ones are pruned. Must be non-zero.
    #[must_use]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.max_files = max;
        self
    }

    /// Writes records as JSON lines. Console output stays human-readable.
    #[must_use]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    fn open(&self, prefix: &str) -> Result<(NonBlocking, WorkerGuard), LoggerError> {
        fs::create_dir_all(&self.dir).map_err(|e| LoggerError::Internal {
            message: e.to_string().into(),
            context: Some(format!("Failed to create path: {}", self.dir.display()).into()),
        })?;

        let appender = RollingFileAppender::builder()
            .rotation(self.rotation.clone())
            .filename_prefix(prefix)
            .filename_suffix(LOG_FILE_SUFFIX)
            .max_log_files(self.max_files)
            .build(&self.dir)?;

        Ok(tracing_appender::non_blocking(appender))
    }
}

/// Builder state: no name given yet.
#[derive(Debug)]
pub struct Unnamed;

/// Builder state: named, ready to initialize.
#[derive(Debug)]
pub struct Named(String);

/// Configures and installs the global tracing subscriber.
#[derive(Debug)]
pub struct LoggerBuilder<N = Unnamed> {
    name: N,
    level: LevelFilter,
    directives: Option<String>,
    console: bool,
    file: Option<FileOutput>,
}

impl LoggerBuilder<Unnamed> {
    /// Names the logger; also the prefix of rolling log files.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named> {
        LoggerBuilder {
            name: Named(name.into()),
            level: self.level,
            directives: self.directives,
            console: self.console,
            file: self.file,
        }
    }
}

impl<N> LoggerBuilder<N> {
    /// Default level applied when no directive matches.
    #[must_use]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Explicit filter directives (e.g., `hugo_controls=debug,tower_http=info`).
    ///
    /// When set, `RUST_LOG` is not consulted. Invalid directives make
    /// [`LoggerBuilder::init`] fail.
    #[must_use]
    pub fn env_filter(mut self, directives: impl Into<String>) -> Self {
        self.directives = Some(directives.into());
        self
    }

    #[must_use]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    #[must_use]
    pub fn file(mut self, output: FileOutput) -> Self {
        self.file = Some(output);
        self
    }

    fn env_filter_layer(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        match &self.directives {
            Some(directives) => builder.parse(directives).map_err(|e| {
                LoggerError::invalid(format!("Invalid env filter '{directives}': {e}"))
            }),
            None => Ok(builder.from_env_lossy()),
        }
    }
}

impl LoggerBuilder<Named> {
    /// Installs the global subscriber.
    ///
    /// Keep the returned [`Logger`] alive until shutdown: dropping it stops the file
    /// worker after flushing buffered records.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, zero `max_files`,
    ///   bad filter directives, or when every output is disabled.
    /// * [`LoggerError::Subscriber`] if a global subscriber is already installed.
    /// * [`LoggerError::Internal`] / [`LoggerError::Appender`] if the log directory
    ///   cannot be prepared.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let name = self.name.0.trim();
        if name.is_empty() {
            return Err(LoggerError::invalid("Logger name cannot be empty"));
        }
        if self.file.as_ref().is_some_and(|file| file.max_files == 0) {
            return Err(LoggerError::invalid("max_files must be greater than zero"));
        }
        if !self.console && self.file.is_none() {
            return Err(LoggerError::invalid(
                "No logging layers enabled. Enable console or file output.",
            ));
        }

        let filter = self.env_filter_layer()?;
        let mut layers = Vec::new();
        if self.console {
            layers.push(layer().compact().with_ansi(true).boxed());
        }

        let mut guard = None;
        if let Some(file) = &self.file {
            let (writer, worker) = file.open(name)?;
            let plain = layer().with_writer(writer).with_ansi(false);
            layers.push(if file.json { plain.json().boxed() } else { plain.boxed() });
            guard = Some(worker);
        }

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }
}

/// Handle to the installed logging system.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts configuring the global subscriber: console only, `INFO`, no directives.
    #[must_use]
    pub const fn builder() -> LoggerBuilder {
        LoggerBuilder {
            name: Unnamed,
            level: LevelFilter::INFO,
            directives: None,
            console: true,
            file: None,
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}
