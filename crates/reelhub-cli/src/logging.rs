use anyhow::Result;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Install the global subscriber.
///
/// 0 = info, 1 = debug with HTTP internals quieted, 2+ = trace. `RUST_LOG`
/// wins over the verbosity flags; `--quiet` wins over both.
pub fn init_logging(verbose_level: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        let default_directive = match verbose_level {
            0 => "info",
            1 => "debug,hyper=warn,rustls=warn",
            _ => "trace",
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
    };

    let json = std::env::var("RUST_LOG_JSON")
        .map(|v| v == "true")
        .unwrap_or_else(|_| !io::stdout().is_terminal());

    let registry = Registry::default().with(filter);

    match log_file {
        Some(log_path) => {
            let log_dir = log_path
                .parent()
                .ok_or_else(|| anyhow::anyhow!("Log file path has no parent directory"))?;
            std::fs::create_dir_all(log_dir)?;

            // reelhub.log rotates to reelhub.YYYY-MM-DD
            let log_filename = log_path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;
            let log_prefix = log_filename.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(log_filename);

            let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, log_prefix);

            if json {
                registry
                    .with(fmt::layer().json().with_timer(ChronoUtc::rfc_3339()).with_writer(file_appender))
                    .init();
            } else {
                registry
                    .with(
                        fmt::layer()
                            .with_timer(ChronoUtc::rfc_3339())
                            .with_ansi(false)
                            .with_writer(file_appender),
                    )
                    .init();
            }
        }
        None => {
            if json {
                registry
                    .with(fmt::layer().json().with_timer(ChronoUtc::rfc_3339()).with_writer(io::stderr))
                    .init();
            } else {
                registry
                    .with(fmt::layer().with_timer(ChronoUtc::rfc_3339()).with_writer(io::stderr))
                    .init();
            }
        }
    }

    Ok(())
}
