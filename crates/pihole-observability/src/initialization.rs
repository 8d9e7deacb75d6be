// Copyright (C) 2026  winnyboy5
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//! Logging initialization and setup.
//!
//! Installs the global `tracing` subscriber: one console layer and, when a
//! [`LogFile`] is configured, a second layer writing to an hourly-rotated file
//! through a non-blocking writer.

use crate::config::{LogConfig, LogError, LogFile, LogFormat, LogOutput};
use std::io;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Keeps the background file writer alive.
///
/// Buffered file records are flushed when the guard is dropped, so hold it
/// until the process exits.
#[must_use = "dropping the guard stops the file writer"]
pub struct LogGuard {
    file_guard: Option<WorkerGuard>,
}

impl LogGuard {
    /// Whether a file sink is attached
    pub fn has_file_sink(&self) -> bool {
        self.file_guard.is_some()
    }
}

/// Initialize tracing with a detailed configuration.
///
/// # Example
///
/// ```ignore
/// use pihole_observability::{init_tracing_with_config, LogConfig, LogFile};
///
/// let _guard = init_tracing_with_config(
///     LogConfig::new()
///         .with_level("info")
///         .with_file(LogFile::new("./logs", "pihole_exporter.log")),
/// )?;
/// tracing::info!("Setup log finished");
/// ```
pub fn init_tracing_with_config(config: LogConfig) -> Result<LogGuard, LogError> {
    let env_filter = build_env_filter(&config)?;

    let mut layers: Vec<BoxedLayer<Registry>> = vec![fmt_layer(
        &config,
        get_writer(&config.output),
        config.use_color,
    )];

    let file_guard = match &config.file {
        Some(file) => {
            let appender = build_file_appender(file)?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            layers.push(fmt_layer(&config, writer, false));
            Some(guard)
        }
        None => None,
    };

    Registry::default()
        .with(layers)
        .with(env_filter)
        .try_init()
        .map_err(|e| LogError::ConfigError(format!("Failed to install subscriber: {}", e)))?;

    Ok(LogGuard { file_guard })
}

/// Build one formatting layer for the given writer
fn fmt_layer<S, W>(config: &LogConfig, writer: W, ansi: bool) -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let base = fmt::layer()
        .with_writer(writer)
        .with_target(config.include_targets);

    match (config.format, config.use_timestamps) {
        (LogFormat::Pretty, true) => base.pretty().with_ansi(ansi).boxed(),
        (LogFormat::Pretty, false) => base.pretty().without_time().with_ansi(ansi).boxed(),
        (LogFormat::Compact, true) => base.compact().with_ansi(ansi).boxed(),
        (LogFormat::Compact, false) => base.compact().without_time().with_ansi(ansi).boxed(),
        (LogFormat::Json, true) => base.json().boxed(),
        (LogFormat::Json, false) => base.json().without_time().boxed(),
    }
}

/// Get the writer for the specified output
fn get_writer(output: &LogOutput) -> fn() -> Box<dyn io::Write + Send> {
    match output {
        LogOutput::Stderr => || Box::new(io::stderr()),
        LogOutput::Stdout => || Box::new(io::stdout()),
    }
}

/// Open the hourly-rotated appender, creating the directory if needed
fn build_file_appender(file: &LogFile) -> Result<RollingFileAppender, LogError> {
    std::fs::create_dir_all(&file.dir)?;

    RollingFileAppender::builder()
        .rotation(Rotation::HOURLY)
        .filename_prefix(&file.name)
        .build(&file.dir)
        .map_err(|e| {
            LogError::ConfigError(format!(
                "Failed to open log file {}/{}: {}",
                file.dir.display(),
                file.name,
                e
            ))
        })
}

/// Build an environment filter for the given configuration
fn build_env_filter(config: &LogConfig) -> Result<EnvFilter, LogError> {
    let level_str = config.get_effective_level();

    EnvFilter::try_new(&level_str)
        .map_err(|e| LogError::InvalidLogLevel(format!("'{}': {}", level_str, e)))
}
