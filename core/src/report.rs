//! Plain-text report rendering.
//!
//! Each function returns the text for one part of the report without a
//! trailing newline; callers print it with `println!`. The layout is fixed:
//! 60-column banners, a 30-column operation column in the summary table,
//! elapsed times with two decimals per operation and one decimal in
//! recommendations and estimates.
use std::time::Duration;

use probe_types::{OperationRecord, Outcome, Thresholds, Verdict};

use crate::catalog::Dataset;
use crate::run::ProbeRun;

const RULE_WIDTH: usize = 60;

/// Status markers used in report lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub ok: &'static str,
    pub warning: &'static str,
    pub timeout: &'static str,
    pub error: &'static str,
}

#[must_use]
pub fn glyphs(ascii_only: bool) -> Glyphs {
    if ascii_only {
        Glyphs {
            ok: "+",
            warning: "!",
            timeout: "~",
            error: "x",
        }
    } else {
        Glyphs {
            ok: "✓",
            warning: "⚠️",
            timeout: "⏱️",
            error: "✗",
        }
    }
}

fn rule(ch: char) -> String {
    ch.to_string().repeat(RULE_WIDTH)
}

fn secs(duration: Duration) -> f64 {
    duration.as_secs_f64()
}

/// Whole seconds when the duration has no fractional part, else one decimal.
fn deadline_label(deadline: Duration) -> String {
    if deadline.subsec_nanos() == 0 {
        deadline.as_secs().to_string()
    } else {
        format!("{:.1}", deadline.as_secs_f64())
    }
}

/// Blank line, then `title` between two rules.
#[must_use]
pub fn banner(title: &str) -> String {
    let rule = rule('=');
    format!("\n{rule}\n{title}\n{rule}")
}

/// Header printed before an operation starts.
#[must_use]
pub fn operation_header(name: &str) -> String {
    banner(&format!("Testing: {name}"))
}

/// Result line(s) printed after an operation finishes.
#[must_use]
pub fn outcome_line<T>(
    record: &OperationRecord<T>,
    thresholds: &Thresholds,
    glyphs: &Glyphs,
) -> String {
    let elapsed = secs(record.elapsed());
    match record.outcome() {
        Outcome::Success(_) => {
            let mut line = format!("{} Success in {elapsed:.2} seconds", glyphs.ok);
            if record.is_slow() {
                line.push_str(&format!(
                    "\n{}  WARNING: Takes longer than {} seconds!",
                    glyphs.warning,
                    deadline_label(thresholds.soft())
                ));
            }
            line
        }
        Outcome::Timeout => format!(
            "{}  TIMEOUT after {elapsed:.2} seconds: Operation timed out after {} seconds",
            glyphs.timeout,
            deadline_label(thresholds.deadline())
        ),
        Outcome::Error(message) => {
            format!("{} Failed in {elapsed:.2} seconds: {message}", glyphs.error)
        }
    }
}

#[must_use]
pub fn verdict_label(verdict: Verdict, glyphs: &Glyphs) -> String {
    match verdict {
        Verdict::Ok => format!("{} OK", glyphs.ok),
        Verdict::Slow => format!("{} SLOW", glyphs.warning),
        Verdict::Timeout => format!("{} TIMEOUT", glyphs.timeout),
        Verdict::Error => format!("{} ERROR", glyphs.error),
    }
}

/// SUMMARY banner and the per-operation table.
#[must_use]
pub fn summary<T>(run: &ProbeRun<T>, glyphs: &Glyphs) -> String {
    let mut out = banner("SUMMARY");
    out.push_str(&format!("\n\n{:<30} {:<12} {}", "Operation", "Time (s)", "Status"));
    out.push('\n');
    out.push_str(&rule('-'));
    for (dataset, record) in run.entries() {
        out.push_str(&format!(
            "\n{:<30} {:>8.2}s    {}",
            dataset.summary_label(),
            secs(record.elapsed()),
            verdict_label(record.verdict(), glyphs)
        ));
    }
    out
}

/// An operation needs UI work when it did not finish cleanly or ran past
/// the soft threshold, whatever its outcome.
fn needs_attention<T>(record: &OperationRecord<T>, thresholds: &Thresholds) -> bool {
    !record.is_success() || thresholds.is_slow(record.elapsed())
}

/// RECOMMENDATIONS FOR UI banner and one advice line per flagged operation.
#[must_use]
pub fn recommendations<T>(
    run: &ProbeRun<T>,
    thresholds: &Thresholds,
    glyphs: &Glyphs,
) -> String {
    let mut out = banner("RECOMMENDATIONS FOR UI");

    let flagged: Vec<(Dataset, &OperationRecord<T>)> = run
        .entries()
        .iter()
        .filter(|(_, record)| needs_attention(record, thresholds))
        .map(|(dataset, record)| (*dataset, record))
        .collect();

    if flagged.is_empty() {
        out.push_str(&format!(
            "\n\n{} All operations complete quickly - minimal UI changes needed!",
            glyphs.ok
        ));
        return out;
    }

    out.push_str(&format!(
        "\n\n{}  The following operations need UI improvements:",
        glyphs.warning
    ));
    for (dataset, record) in flagged {
        let label = dataset.summary_label();
        let advice = match record.outcome() {
            Outcome::Timeout => format!(
                "{label}: TIMEOUT - Add progress spinner + 'This may take a moment...' warning"
            ),
            Outcome::Error(_) => {
                format!("{label}: ERROR - Show an error message instead of an empty result")
            }
            Outcome::Success(_) => format!(
                "{label}: {:.1}s - Add loading indicator",
                secs(record.elapsed())
            ),
        };
        out.push_str(&format!("\n   - {advice}"));
    }
    out
}

/// EXAMPLE-SPECIFIC ESTIMATES banner with per-example load times.
///
/// Examples 4 and 5 load several files, so their totals are only shown when
/// every operation in the run succeeded.
#[must_use]
pub fn estimates<T>(run: &ProbeRun<T>) -> String {
    let nodes = secs(run.elapsed_of(Dataset::Nodes));
    let demand = secs(run.elapsed_of(Dataset::Demand));
    let edges: Vec<f64> = Dataset::EDGES
        .iter()
        .map(|d| secs(run.elapsed_of(*d)))
        .collect();
    let slowest_edges = edges.iter().copied().fold(0.0_f64, f64::max);

    let mut out = banner("EXAMPLE-SPECIFIC ESTIMATES");
    out.push_str(&format!("\n\nExample 1 (Load Nodes): ~{nodes:.1}s"));
    out.push_str(&format!(
        "\nExample 1 (Load Edges - any mode): ~{slowest_edges:.1}s"
    ));
    out.push_str(&format!(
        "\nExample 2 (Find Neighbors): ~{slowest_edges:.1}s (edges only, nodes pre-loaded)"
    ));
    out.push_str(&format!("\nExample 3 (Demand Lookup): ~{demand:.1}s"));

    if run.all_succeeded() {
        let all_edges: f64 = edges.iter().sum();
        let total = nodes + all_edges + demand;
        out.push_str(&format!(
            "\nExample 4 (Dataset Stats): ~{total:.1}s (loads everything)"
        ));
        out.push_str(&format!(
            "\nExample 5 (Mode Comparison): ~{all_edges:.1}s (all edges)"
        ));
    } else {
        out.push_str("\nExample 4 (Dataset Stats): N/A (some operations timed out)");
        out.push_str("\nExample 5 (Mode Comparison): N/A (some operations timed out)");
    }
    out
}
