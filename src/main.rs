//! modmirror binary entrypoint kept minimal. The full runtime lives in `app`.

use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use clap::Parser;
use modmirror::args::{Args, determine_log_level};
use modmirror::util::iso_timestamp;
use tracing_subscriber::EnvFilter;

struct MirrorTimer;

impl tracing_subscriber::fmt::time::FormatTime for MirrorTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        w.write_str(&iso_timestamp(chrono::Utc::now()))
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// `RUST_LOG` wins over `--log-level`.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// What: Install the global tracing subscriber.
///
/// Details:
/// - With a log directory, writes a daily rolling `modmirror.log` through a
///   non-blocking worker whose guard lives for the whole process.
/// - Falls back to stderr when the directory cannot be created.
fn init_logging(level: &str, log_dir: Option<&Path>) {
    let Some(dir) = log_dir else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter(level))
            .with_target(false)
            .with_timer(MirrorTimer)
            .init();
        return;
    };
    match std::fs::create_dir_all(dir) {
        Ok(()) => {
            let appender = tracing_appender::rolling::daily(dir, "modmirror.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(level))
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(MirrorTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(dir = %dir.display(), "logging initialized");
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(level))
                .with_target(false)
                .with_timer(MirrorTimer)
                .init();
            tracing::warn!(dir = %dir.display(), error = %e, "failed to create log directory; using stderr");
        }
    }
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let args = Args::parse();
    let level = determine_log_level(&args);
    let settings = modmirror::app::resolve_with_logging(&args, |dir| init_logging(&level, dir));

    let code = match modmirror::app::run(args, settings).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(kind = err.kind(), error = %err, "modmirror failed");
            std::process::ExitCode::FAILURE
        }
    };
    tracing::info!("modmirror exited");
    code
}
