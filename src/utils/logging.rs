use std::{path::Path, sync::LazyLock};

use anyhow::Result;
use tracing::{level_filters::LevelFilter, Subscriber};
use tracing_appender::rolling::Rotation;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

const LOG_FILE_PREFIX: &str = "cli";

const DEFAULT_FILE_LEVEL: LevelFilter = LevelFilter::INFO;

/// Logs always go into a daily rolling file under `<state dir>/logs`. With `console` set they are
/// also printed to stderr. Stdout carries command output and never receives logs.
pub fn enable_logging(state_dir: &Path, console: Option<LevelFilter>) -> Result<()> {
    logging_subscriber(state_dir, console)?.try_init()?;
    Ok(())
}

fn logging_subscriber(
    state_dir: &Path,
    console: Option<LevelFilter>,
) -> Result<impl Subscriber + Send + Sync + 'static> {
    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(5)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(state_dir.join("logs"))?;

    // RUST_LOG only accepts a plain level here, directives for other crates are meaningless.
    let file_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| v.parse::<LevelFilter>().ok())
        .unwrap_or(DEFAULT_FILE_LEVEL);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(appender)
        .with_filter(crate_filter(file_level));

    let console_layer = console.map(|level| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_span_events(FmtSpan::CLOSE)
            .pretty()
            .with_filter(crate_filter(level))
    });

    Ok(Registry::default().with(file_layer).with(console_layer))
}

/// Only events of this crate are interesting, dependencies stay silent.
fn crate_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::new(format!(
        "{}={level}",
        env!("CARGO_PKG_NAME").replace('-', "_")
    ))
}

pub static TEST_LOGGING: LazyLock<()> = LazyLock::new(|| {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .pretty()
        .init()
});
