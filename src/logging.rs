use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes console plus daily-rotated JSON file logging.
///
/// `RUST_LOG` overrides the default `ptcg_prep=info` filter. The appender
/// guard is intentionally leaked so buffered log lines are flushed for the
/// whole process lifetime.
pub fn init_logging() {
    let _ = fs::create_dir_all("logs");

    let file_appender = tracing_appender::rolling::daily("logs", "ptcg_prep.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::from_default_env().add_directive("ptcg_prep=info".parse().unwrap());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_writer(file_writer))
        .with(fmt::layer().with_writer(std::io::stdout))
        .init();

    std::mem::forget(guard);
}
