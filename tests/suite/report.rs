//! Report rendering over real probe runs.

use std::time::Duration;

use probe_core::{Dataset, Section, glyphs, report};
use probe_engine::{ProbeObserver, run_plan};
use probe_types::{OperationRecord, Thresholds};

use crate::common::{mirror_fetcher, mount_dataset, mount_status, start_mirror};

/// Collects the progress lines the CLI would print.
struct Transcript {
    thresholds: Thresholds,
    lines: Vec<String>,
}

impl ProbeObserver for Transcript {
    fn on_section(&mut self, section: &Section) {
        self.lines.push(report::banner(section.title));
    }

    fn on_start(&mut self, _dataset: Dataset, name: &str) {
        self.lines.push(report::operation_header(name));
    }

    fn on_finish<T>(&mut self, _dataset: Dataset, record: &OperationRecord<T>) {
        self.lines
            .push(report::outcome_line(record, &self.thresholds, &glyphs(false)));
    }
}

#[tokio::test]
async fn progress_transcript_follows_section_order() {
    let server = start_mirror(&[]).await;
    let fetcher = mirror_fetcher(&server);
    let thresholds = Thresholds::default();
    let mut transcript = Transcript {
        thresholds,
        lines: Vec::new(),
    };

    run_plan(&fetcher, &thresholds, &mut transcript).await;

    let text = transcript.lines.join("\n");
    let first = text.find("EXAMPLE 1: Basic Node/Edge Exploration").unwrap();
    let nodes = text.find("Testing: Load nodes CSV (intermodal-217.csv)").unwrap();
    let edges = text.find("EXAMPLE 1 & 2: Load Edges by Mode").unwrap();
    let demand = text.find("Testing: Load demand data (demand.pickle)").unwrap();
    assert!(first < nodes && nodes < edges && edges < demand);
    assert_eq!(text.matches("✓ Success in").count(), 5);
}

#[tokio::test]
async fn mixed_run_renders_every_verdict() {
    let server = start_mirror(&[Dataset::RailwayEdges, Dataset::WaterwayEdges]).await;
    mount_dataset(&server, Dataset::RailwayEdges, Duration::from_secs(5)).await;
    mount_status(&server, Dataset::WaterwayEdges, 500).await;
    let fetcher = mirror_fetcher(&server);
    let thresholds =
        Thresholds::new(Duration::from_millis(800), Duration::from_millis(1500)).unwrap();
    let mut transcript = Transcript {
        thresholds,
        lines: Vec::new(),
    };

    let run = run_plan(&fetcher, &thresholds, &mut transcript).await;

    let progress = transcript.lines.join("\n");
    assert!(progress.contains("⏱️  TIMEOUT after "));
    assert!(progress.contains("Operation timed out after 1.5 seconds"));
    assert!(progress.contains("✗ Failed in"));
    assert!(progress.contains("HTTP 500 Internal Server Error"));

    let ascii = glyphs(true);
    let summary = report::summary(&run, &ascii);
    assert!(summary.contains("~ TIMEOUT"));
    assert!(summary.contains("x ERROR"));
    assert_eq!(summary.matches("+ OK").count(), 3);

    let recommendations = report::recommendations(&run, &thresholds, &ascii);
    assert!(recommendations.contains("   - Load Railway edges: TIMEOUT"));
    assert!(recommendations.contains("   - Load Waterway edges: ERROR"));
    assert!(!recommendations.contains("Load nodes CSV"));
}
