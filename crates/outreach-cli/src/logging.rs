//! Subscriber setup for the `outreach` binary.
//!
//! Failed CSV write-backs log at warn, imports and guest changes at info,
//! column detection and HTTP calls at debug.
//!
//! Guest names and addresses are personal data. Log them through
//! [`redact_value`], which only passes values through when `--log-data`
//! was given.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::{self, writer::BoxMakeWriter};
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder used when guest data logging is disabled.
pub const REDACTED_VALUE: &str = "[REDACTED]";

const OUTREACH_TARGETS: &[&str] = &[
    "outreach",
    "outreach_cli",
    "outreach_core",
    "outreach_draft",
    "outreach_ingest",
    "outreach_map",
    "outreach_model",
    "outreach_store",
];

/// `value` when `--log-data` is on, otherwise [`REDACTED_VALUE`].
pub fn redact_value(value: &str) -> &str {
    if LOG_DATA_ENABLED.load(Ordering::Relaxed) {
        value
    } else {
        REDACTED_VALUE
    }
}

/// How the `outreach` binary reports events.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level applied to the outreach crates.
    pub level_filter: LevelFilter,
    /// Prefer `RUST_LOG` when it is set.
    pub use_env_filter: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Append to this file instead of writing to stderr. File output is
    /// always timestamped.
    pub log_file: Option<PathBuf>,
    /// Allow guest names and addresses in events.
    pub log_data: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_ansi: true,
            format: LogFormat::Pretty,
            log_file: None,
            log_data: false,
        }
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Installs the global subscriber.
///
/// # Errors
///
/// Fails when the log file cannot be opened for appending.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let (writer, timestamps) = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            (BoxMakeWriter::new(Mutex::new(file)), true)
        }
        None => (BoxMakeWriter::new(io::stderr), false),
    };
    LOG_DATA_ENABLED.store(config.log_data, Ordering::Release);
    tracing_subscriber::registry()
        .with(output_layer(config, writer, timestamps))
        .with(build_env_filter(config.level_filter, config.use_env_filter))
        .init();
    Ok(())
}

fn output_layer(config: &LogConfig, writer: BoxMakeWriter, timestamps: bool) -> BoxedLayer {
    let base = fmt::layer()
        .with_writer(writer)
        .with_target(false)
        .with_ansi(config.with_ansi && config.log_file.is_none());
    match (config.format, timestamps) {
        (LogFormat::Json, _) => base.json().with_target(true).boxed(),
        (LogFormat::Compact, true) => base.compact().boxed(),
        (LogFormat::Compact, false) => base.compact().without_time().boxed(),
        (LogFormat::Pretty, true) => base.boxed(),
        (LogFormat::Pretty, false) => base.without_time().boxed(),
    }
}

/// Outreach crates at `level`, dependencies at warn.
fn build_env_filter(level: LevelFilter, use_env: bool) -> EnvFilter {
    if use_env && let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(default_directives(level))
}

fn default_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    OUTREACH_TARGETS
        .iter()
        .fold(String::from("warn"), |mut directives, target| {
            directives.push_str(&format!(",{target}={level}"));
            directives
        })
}
