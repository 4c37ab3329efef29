//! Casebook binary entrypoint kept minimal. The full runtime lives in `app`.

mod app;
mod args;

use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

use clap::Parser;

/// Log timestamp formatter, `YYYY-MM-DD-T HH:MM:SS` in local time.
struct CasebookTimer;

impl tracing_subscriber::fmt::time::FormatTime for CasebookTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S").to_string();
        w.write_str(&ts)
    }
}

/// Keeps the non-blocking log writer alive for the whole process.
static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Initialize tracing to `<config>/logs/casebook.log`, falling back to stderr.
///
/// Inputs:
/// - `level`: Default filter when `RUST_LOG` is not set.
fn init_logging(level: &str) {
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    let log_path = casebook::theme::logs_dir().join("casebook.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(CasebookTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(CasebookTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() {
    let args = args::Args::parse();
    if let Some(dir) = &args.config_dir {
        casebook::theme::set_config_dir_override(PathBuf::from(dir));
    }
    init_logging(&args::determine_log_level(&args));

    if let Some(code) = args::process_args(&args) {
        std::process::exit(code);
    }

    casebook::theme::init_theme(args.no_color);
    tracing::info!(data = ?args.data, "Casebook starting");
    if let Err(err) = app::run(args.data.as_deref()).await {
        tracing::error!(error = %err, "Application error");
        eprintln!("casebook: {err}");
        std::process::exit(1);
    }
    tracing::info!("Casebook exited");
}

#[cfg(test)]
mod tests {
    /// What: FormatTime impl writes a non-empty timestamp without panicking
    ///
    /// - Input: Tracing writer buffer
    /// - Output: Buffer receives a timestamp with the date/time separator
    #[test]
    fn casebook_timer_formats_time_without_panic() {
        use tracing_subscriber::fmt::time::FormatTime;
        let mut buf = String::new();
        let mut writer = tracing_subscriber::fmt::format::Writer::new(&mut buf);
        let t = super::CasebookTimer;
        let _ = t.format_time(&mut writer);
        assert!(buf.contains("-T "));
    }
}
