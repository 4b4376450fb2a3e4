//! Process runtime: settings resolution, background jobs, and the HTTP listener.
//!
//! The binary entrypoint only sets up logging and hands over to [`run`].

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::args::{Args, apply_cli_overrides};
use crate::catalog::CatalogStore;
use crate::error::Result;
use crate::persist::Layout;
use crate::server;
use crate::settings::{self, Settings, resolve_settings_path, write_skeleton};
use crate::sources::{GeodeIndex, Upstream};
use crate::sync::{SyncContext, record_analytics, run_full_sync, spawn_jobs};

/// What: Resolve the effective settings for this invocation.
///
/// Details:
/// - Layering is defaults, settings file, environment, then flags.
/// - Problems in the file or environment are logged to the current subscriber.
#[must_use]
pub fn resolve_settings(args: &Args) -> Settings {
    let mut settings = settings::load(args.config.as_deref());
    apply_cli_overrides(&mut settings, args);
    settings
}

/// What: Resolve settings around logger setup so load warnings are not lost.
///
/// Inputs:
/// - `args`: Parsed command line.
/// - `init_logging`: Installs the subscriber, given the configured log directory.
///
/// Output:
/// - The effective settings.
///
/// Details:
/// - A silent first pass only finds the log directory; the real pass runs once
///   the subscriber is up, so each warning is emitted exactly once.
pub fn resolve_with_logging(args: &Args, init_logging: impl FnOnce(Option<&Path>)) -> Settings {
    let silent = tracing::subscriber::with_default(
        tracing::subscriber::NoSubscriber::default(),
        || resolve_settings(args),
    );
    init_logging(silent.log_dir.as_deref());
    resolve_settings(args)
}

/// What: Run the mirror until shutdown.
///
/// Inputs:
/// - `args`: Parsed command line.
/// - `settings`: Output of [`resolve_settings`].
///
/// Output:
/// - `Ok(())` after a graceful shutdown or a finished `--once`/`--init-config` run.
///
/// # Errors
/// - `Io` when the artifact directories cannot be created.
/// - `Server` when the port cannot be bound.
/// - With `--once`, whatever the catalog fetch returned.
///
/// Details:
/// - The listener is bound before any job starts, so a taken port fails fast.
/// - Queries see an empty catalog until the startup sync finishes.
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    if args.init_config {
        return init_config(&args);
    }
    info!(
        port = settings.port,
        data_root = %settings.data_root.display(),
        api = %settings.upstream.api_base_url,
        strategy = settings.upstream.fetch_strategy.as_config_key(),
        "modmirror starting"
    );

    let layout = Layout::new(&settings.data_root);
    layout.ensure_dirs()?;
    let upstream = GeodeIndex::new(settings.upstream.clone())?;
    let store = Arc::new(CatalogStore::new());
    let ctx = Arc::new(SyncContext::new(
        upstream,
        Arc::clone(&store),
        layout,
        settings.schedule.clone(),
    ));

    if args.once {
        return run_once(&ctx).await;
    }

    let listener = server::bind(settings.port).await?;
    let jobs = spawn_jobs(Arc::clone(&ctx));
    let served = server::serve(listener, store, server::shutdown_signal()).await;
    jobs.abort_all();
    served
}

/// Write the commented settings skeleton unless a file already exists.
fn init_config(args: &Args) -> Result<()> {
    let path = resolve_settings_path(args.config.as_deref());
    if write_skeleton(&path)? {
        info!(path = %path.display(), "wrote settings skeleton");
    } else {
        info!(path = %path.display(), "settings file already exists; left unchanged");
    }
    Ok(())
}

/// What: One full sync followed by one analytics pass.
///
/// # Errors
/// - The catalog fetch error; nothing is written in that case.
pub(crate) async fn run_once<U: Upstream>(ctx: &SyncContext<U>) -> Result<()> {
    let report = run_full_sync(ctx).await?;
    let analytics = record_analytics(ctx).await;
    info!(
        mods = ctx.store.len(),
        failures = report.failures() + analytics.failures(),
        "one-shot sync finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::record;
    use crate::settings::ScheduleSettings;
    use crate::sources::testing::FakeUpstream;

    /// What: `--once` leaves a snapshot, a logo and one analytics block per mod.
    #[tokio::test]
    async fn once_writes_every_artifact() {
        let dir = tempfile::tempdir().expect("tempdir");
        let layout = Layout::new(dir.path());
        layout.ensure_dirs().expect("dirs");
        let ctx = SyncContext::new(
            FakeUpstream::new(vec![record("a", "Alpha", 3)]),
            Arc::new(CatalogStore::new()),
            layout,
            ScheduleSettings::default(),
        );
        run_once(&ctx).await.expect("once");
        assert!(ctx.layout.snapshot_path("a").expect("p").exists());
        assert!(ctx.layout.logo_path("a").expect("p").exists());
        let text =
            std::fs::read_to_string(ctx.layout.analytics_path("a").expect("p")).expect("read");
        assert_eq!(text.matches("downloads=3").count(), 1);
    }

    #[tokio::test]
    async fn once_propagates_fetch_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        let upstream = FakeUpstream::new(Vec::new());
        upstream.set_catalog(Err("connection refused".to_string()));
        let ctx = SyncContext::new(
            upstream,
            Arc::new(CatalogStore::new()),
            Layout::new(dir.path()),
            ScheduleSettings::default(),
        );
        let err = run_once(&ctx).await.expect_err("fails");
        assert_eq!(err.kind(), "fetch");
    }

    /// What: `--init-config` writes once and never overwrites.
    #[tokio::test]
    async fn init_config_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.conf");
        let args = Args {
            config: Some(path.clone()),
            init_config: true,
            ..Args::default()
        };
        run(args, Settings::default()).await.expect("first");
        let first = std::fs::read_to_string(&path).expect("written");
        assert!(!first.is_empty());

        std::fs::write(&path, "port = 9000\n").expect("edit");
        let args = Args {
            config: Some(path.clone()),
            init_config: true,
            ..Args::default()
        };
        run(args, Settings::default()).await.expect("second");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "port = 9000\n");
    }

    #[test]
    fn flags_override_settings_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.conf");
        std::fs::write(&path, "port = 9000\ndata_root = /from/file\n").expect("write");
        let args = Args {
            config: Some(path),
            port: Some(9100),
            ..Args::default()
        };
        let settings = resolve_settings(&args);
        assert_eq!(settings.port, 9100);
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("capture lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// What: A bad settings value is reported once, after logging is set up.
    ///
    /// Inputs:
    /// - Settings file with `port = eighty`; the subscriber is installed by the
    ///   `init_logging` callback.
    ///
    /// Output:
    /// - The captured log holds the warning exactly once; the port keeps its default.
    #[test]
    fn settings_warnings_reach_the_logger() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.conf");
        std::fs::write(&path, "port = eighty\n").expect("write");
        let args = Args {
            config: Some(path),
            ..Args::default()
        };

        let captured = Captured::default();
        let writer = captured.clone();
        let mut guard = None;
        let settings = resolve_with_logging(&args, |_| {
            let subscriber = tracing_subscriber::fmt()
                .with_writer(move || writer.clone())
                .with_ansi(false)
                .with_max_level(tracing::Level::DEBUG)
                .finish();
            guard = Some(tracing::subscriber::set_default(subscriber));
        });
        drop(guard);

        let bytes = captured.0.lock().expect("capture lock").clone();
        let log = String::from_utf8(bytes).expect("utf8");
        assert_eq!(log.matches("invalid setting value").count(), 1, "{log}");
        assert_eq!(settings.port, Settings::default().port);
    }
}
