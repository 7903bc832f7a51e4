use std::{
    env,
    fs::OpenOptions,
    sync::Mutex,
};

use tracing_subscriber::{
    filter::LevelFilter,
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
    Layer,
};

const FILTER_VAR: &str = "SHAKEIT_LOG";
const FILE_VAR: &str = "SHAKEIT_LOG_FILE";

pub fn init_tracing() {
    init_tracing_with_default("info");
}

/// Stderr logging filtered by `SHAKEIT_LOG` (falling back to
/// `default_directive`), plus a debug-level file log when `SHAKEIT_LOG_FILE`
/// names a path. Calling this twice keeps the first subscriber.
pub fn init_tracing_with_default(default_directive: &str) {
    let filter =
        EnvFilter::try_from_env(FILTER_VAR).unwrap_or_else(|_| EnvFilter::new(default_directive));

    let registry = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).with_filter(filter));

    let file_logging = env::var(FILE_VAR).ok();

    if let Some(log_path) = file_logging {
        let file = match OpenOptions::new().create(true).append(true).open(&log_path) {
            Ok(file) => file,
            Err(e) => {
                eprintln!("Failed to open log file {log_path}: {e}");
                let _ = registry.try_init();
                return;
            }
        };

        let file_layer = fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true)
            .with_filter(LevelFilter::DEBUG);

        let _ = registry.with(file_layer).try_init();
    } else {
        let _ = registry.try_init();
    }
}
