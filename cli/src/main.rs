//! recoil-probe - times the dataset downloads behind the RECOIL interactive
//! examples and suggests where the UI needs loading feedback.
//!
//! ```text
//! main() -> init_tracing() -> load config -> Fetcher
//!        -> run_plan(ReportPrinter) -> summary, recommendations, estimates
//! ```
//!
//! The report is written to stdout. Logs never are: they go to
//! `~/.recoil-probe/logs/probe.log` (or `./.recoil-probe/logs/probe.log`),
//! and are dropped if neither can be opened.

use std::{
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::PathBuf,
    sync::Mutex,
};

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use probe_config::{ProbeConfig, ResolvedConfig};
use probe_core::{Dataset, Glyphs, ProbeRun, Section, glyphs, report};
use probe_engine::{ProbeObserver, run_plan};
use probe_types::{OperationRecord, Thresholds};
use probe_webfetch::Fetcher;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No log file: stay silent rather than interleave logs with the report.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.recoil-probe/logs/probe.log
    if let Some(home) = probe_config::home_dir() {
        candidates.push(home.join("logs").join("probe.log"));
    }

    // Fallback: ./.recoil-probe/logs/probe.log
    candidates.push(PathBuf::from(".recoil-probe").join("logs").join("probe.log"));

    candidates
}

/// Load and resolve the config file, falling back to built-in defaults when
/// it is unreadable or invalid. A bad config never stops the probe.
fn load_settings() -> ResolvedConfig {
    let config = match ProbeConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(path = ?err.path(), error = %err, "Unusable config, using defaults");
            eprintln!("Ignoring config: {err}");
            None
        }
    };

    match ResolvedConfig::from_config(config.as_ref()) {
        Ok(resolved) => resolved,
        Err(err) => {
            tracing::warn!(error = %err, "Invalid config, using defaults");
            eprintln!("Ignoring config: {err}");
            ResolvedConfig::default()
        }
    }
}

/// Prints progress and the final report as plain text.
struct ReportPrinter<W> {
    out: W,
    thresholds: Thresholds,
    glyphs: Glyphs,
}

impl<W: Write> ReportPrinter<W> {
    fn new(out: W, thresholds: Thresholds, glyphs: Glyphs) -> Self {
        Self {
            out,
            thresholds,
            glyphs,
        }
    }

    fn line(&mut self, text: &str) {
        // A closed stdout only loses the report; the run itself still completes.
        let _ = writeln!(self.out, "{text}");
        let _ = self.out.flush();
    }

    fn finish<T>(&mut self, run: &ProbeRun<T>) {
        let summary = report::summary(run, &self.glyphs);
        let recommendations = report::recommendations(run, &self.thresholds, &self.glyphs);
        let estimates = report::estimates(run);

        self.line(&summary);
        self.line(&recommendations);
        self.line(&estimates);
        self.line("\n");
    }
}

impl<W: Write> ProbeObserver for ReportPrinter<W> {
    fn on_section(&mut self, section: &Section) {
        self.line(&report::banner(section.title));
    }

    fn on_start(&mut self, _dataset: Dataset, name: &str) {
        self.line(&report::operation_header(name));
    }

    fn on_finish<T>(&mut self, _dataset: Dataset, record: &OperationRecord<T>) {
        let text = report::outcome_line(record, &self.thresholds, &self.glyphs);
        self.line(&text);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let settings = load_settings();
    tracing::info!(
        base_url = %settings.fetch.base_url,
        deadline_ms = settings.thresholds.deadline().as_millis() as u64,
        soft_ms = settings.thresholds.soft().as_millis() as u64,
        network_timeout_ms = settings.fetch.timeout.as_millis() as u64,
        "Probe configured"
    );

    let fetcher = Fetcher::new(settings.fetch).context("failed to build HTTP client")?;

    let mut printer = ReportPrinter::new(
        io::stdout(),
        settings.thresholds,
        glyphs(settings.display.ascii_only),
    );
    let run = run_plan(&fetcher, &settings.thresholds, &mut printer).await;
    printer.finish(&run);

    Ok(())
}
