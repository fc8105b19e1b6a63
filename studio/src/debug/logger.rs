//! File-based logging initialization

use std::fs;

use tracing::Subscriber;
use tracing_appender::non_blocking::NonBlocking;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use super::config::{DebugConfig, DEFAULT_FILTER, LOG_FILE_NAME};

/// Initialize the logging system
///
/// Sets up:
/// - Daily rolling, non-blocking file log in `STUDIO_LOG_DIR`
/// - Optional stderr mirror
/// - Panic hook that logs the panic location and message
///
/// If the log directory cannot be created, logging falls back to stderr only.
pub fn init() {
    let config = DebugConfig::from_env();

    let file_writer = match fs::create_dir_all(&config.log_dir) {
        Ok(()) => {
            let file_appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_NAME);
            Some(tracing_appender::non_blocking(file_appender))
        }
        Err(e) => {
            eprintln!("Warning: Failed to create log directory: {}", e);
            None
        }
    };

    let (writer, guard) = file_writer.unzip();
    let has_file = writer.is_some();

    build_subscriber(&config, writer).init();

    if has_file {
        tracing::info!(
            log_file = %config.log_file().display(),
            log_level = %config.log_level,
            json = config.json,
            "Logging initialized"
        );
    }

    setup_panic_hook();

    // Keep the writer guard alive for the lifetime of the program
    if let Some(guard) = guard {
        std::mem::forget(guard);
    }
}

/// Compose the filter, the optional file layer and the optional stderr mirror.
///
/// Each branch builds its own stderr layer since the layer type depends on
/// the subscriber stack beneath it.
fn build_subscriber(
    config: &DebugConfig,
    file_writer: Option<NonBlocking>,
) -> Box<dyn Subscriber + Send + Sync> {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let Some(non_blocking) = file_writer else {
        let stderr_layer = config.stderr.then(|| {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact()
        });
        return Box::new(tracing_subscriber::registry().with(env_filter).with(stderr_layer));
    };

    let file_layer = if config.json {
        fmt::layer()
            .json()
            .with_writer(non_blocking)
            .with_target(true)
            .with_thread_ids(true)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .boxed()
    };

    let stderr_layer = config.stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
    });

    Box::new(
        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(stderr_layer),
    )
}

/// Set up panic hook to log panics before the default handler runs
fn setup_panic_hook() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown location".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic message".to_string()
        };

        tracing::error!(location = %location, message = %message, "Application panic");

        default_panic(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(json: bool, stderr: bool) -> DebugConfig {
        DebugConfig {
            json,
            stderr,
            ..DebugConfig::default()
        }
    }

    #[test]
    fn test_stderr_only_subscriber_accepts_events() {
        for stderr in [true, false] {
            let subscriber = build_subscriber(&config(false, stderr), None);
            tracing::subscriber::with_default(subscriber, || {
                tracing::info!(stderr, "stderr only");
            });
        }
    }

    #[test]
    fn test_file_subscriber_accepts_events() {
        for (json, stderr) in [(false, true), (true, true), (false, false), (true, false)] {
            let (writer, _guard) = tracing_appender::non_blocking(std::io::sink());
            let subscriber = build_subscriber(&config(json, stderr), Some(writer));
            tracing::subscriber::with_default(subscriber, || {
                tracing::info!(json, stderr, "file layer");
            });
        }
    }
}
