use std::{env, error::Error, io};

use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::paths::DeskletPaths;

const LOG_FORMAT_ENV: &str = "ANALOG_CLOCK_LOG_FORMAT";
const DAYS_TO_KEEP: usize = 7;

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn json_requested() -> bool {
    env::var(LOG_FORMAT_ENV).is_ok_and(|format| format == "json")
}

/// Initialize tracing for the desklet
///
/// Uses RUST_LOG environment variable if set, otherwise defaults to "info".
/// Output is pretty-printed unless `ANALOG_CLOCK_LOG_FORMAT=json`.
///
/// # Errors
/// Returns error if a global subscriber is already installed
pub fn init() -> Result<(), Box<dyn Error>> {
    let registry = Registry::default().with(env_filter("info"));

    if json_requested() {
        registry
            .with(fmt::layer().json().with_target(true).with_level(true))
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_level(true)
                    .with_thread_names(true),
            )
            .try_init()?;
    }

    Ok(())
}

/// Initialize tracing for one-shot editor commands.
///
/// Only warnings reach stderr so command output on stdout stays clean.
///
/// # Errors
/// Returns error if a global subscriber is already installed
pub fn init_cli_mode() -> Result<(), Box<dyn Error>> {
    Registry::default()
        .with(env_filter("warn"))
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .try_init()?;

    Ok(())
}

/// Initialize tracing with file output
///
/// Similar to [`init`] but also writes logs to a daily rotated file in the
/// desklet log directory.
///
/// # Errors
/// Returns error if file creation or tracing subscriber initialization fails
pub fn init_with_file() -> Result<(), Box<dyn Error>> {
    let log_dir = DeskletPaths::log_dir()?;

    let file_appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .max_log_files(DAYS_TO_KEEP)
        .filename_prefix("analog-clock")
        .filename_suffix("log")
        .build(&log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let registry = Registry::default().with(env_filter("info"));

    if json_requested() {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(io::stdout),
            )
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(non_blocking)
                    .with_ansi(false),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(io::stdout),
            )
            .with(
                fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(non_blocking)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    // The writer thread must outlive every span; the process owns it until exit.
    std::mem::forget(guard);

    Ok(())
}
