//! ---
//! pointy_section: "01-core-functionality"
//! pointy_subsection: "module"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Tracing setup for pointyd and the pointy command line tools."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{info, Subscriber};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::daily;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

const LOG_ENV: &str = "POINTY_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();
static STDOUT_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Console format for `pointyd`. The rolling file is always JSON.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    #[default]
    StructuredJson,
    Pretty,
}

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Install the daemon subscriber: console output in the configured format plus
/// a daily file `<service>.log` (or `<prefix>-<service>.log`) under `config.directory`.
///
/// The filter comes from `POINTY_LOG`, then `RUST_LOG`, then `info`.
pub fn init_tracing(service_name: &str, config: &LoggingConfig) -> Result<()> {
    std::fs::create_dir_all(&config.directory).with_context(|| {
        format!("unable to create log directory {}", config.directory.display())
    })?;

    let file_name = log_file_name(service_name, config.file_prefix.as_deref());
    let (file_writer, file_guard) =
        tracing_appender::non_blocking(daily(&config.directory, &file_name));
    let (stdout_writer, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    let _ = FILE_GUARD.set(file_guard);
    let _ = STDOUT_GUARD.set(stdout_guard);

    tracing_subscriber::registry()
        .with(filter_from(std::env::var(LOG_ENV).ok()))
        .with(console_layer(config.format, stdout_writer))
        .with(file_layer(file_writer))
        .try_init()
        .ok();

    info!(
        service = %service_name,
        log_file = %config.directory.join(&file_name).display(),
        format = ?config.format,
        "pointy logging ready"
    );
    Ok(())
}

/// Stderr-only subscriber for command line tools whose stdout carries data.
pub fn init_cli_tracing() {
    let _ = tracing_subscriber::registry()
        .with(filter_from(std::env::var(LOG_ENV).ok()))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn console_layer<S>(format: LogFormat, writer: NonBlocking) -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let layer = fmt::layer().with_timer(fmt::time::UtcTime::rfc_3339());
    match format {
        LogFormat::StructuredJson => layer.with_target(false).json().with_writer(writer).boxed(),
        LogFormat::Pretty => layer.with_target(true).with_writer(writer).boxed(),
    }
}

fn file_layer<S>(writer: NonBlocking) -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .json()
        .with_writer(writer)
        .boxed()
}

fn log_file_name(service_name: &str, prefix: Option<&str>) -> String {
    match prefix {
        Some(prefix) if prefix != service_name => format!("{prefix}-{service_name}.log"),
        _ => format!("{service_name}.log"),
    }
}

/// `POINTY_LOG` wins when it parses; otherwise `RUST_LOG`, then `info`.
fn filter_from(directive: Option<String>) -> EnvFilter {
    match directive {
        Some(directive) => EnvFilter::try_new(&directive).unwrap_or_else(|err| {
            eprintln!("invalid {LOG_ENV} directive ({err}); using {DEFAULT_DIRECTIVE}");
            EnvFilter::new(DEFAULT_DIRECTIVE)
        }),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
    }
}
