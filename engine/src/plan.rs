//! The fixed probe sequence.
use std::fmt::Display;

use probe_core::{Dataset, ProbeRun, SECTIONS, Section};
use probe_types::{OperationRecord, Thresholds};
use probe_webfetch::{Fetcher, Payload};

use crate::runner::run_bounded;

/// Receives progress as the plan runs.
///
/// All methods default to doing nothing.
pub trait ProbeObserver {
    fn on_section(&mut self, _section: &Section) {}

    fn on_start(&mut self, _dataset: Dataset, _name: &str) {}

    fn on_finish<T>(&mut self, _dataset: Dataset, _record: &OperationRecord<T>) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ProbeObserver for NoopObserver {}

/// Download and decode every catalog dataset, one at a time.
///
/// Every dataset is attempted even after an earlier timeout or failure.
pub async fn run_plan<O: ProbeObserver>(
    fetcher: &Fetcher,
    thresholds: &Thresholds,
    observer: &mut O,
) -> ProbeRun<Payload> {
    run_plan_with(thresholds, observer, |dataset| {
        fetcher.load(dataset.file_name(), dataset.format())
    })
    .await
}

/// [`run_plan`] with a caller-supplied loader in place of the HTTP fetcher.
pub async fn run_plan_with<T, E, O, L, Fut>(
    thresholds: &Thresholds,
    observer: &mut O,
    mut load: L,
) -> ProbeRun<T>
where
    O: ProbeObserver,
    L: FnMut(Dataset) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut run = ProbeRun::new();

    for section in &SECTIONS {
        tracing::debug!(section = section.title, "Entering section");
        observer.on_section(section);

        for &dataset in section.datasets {
            let name = dataset.title();
            observer.on_start(dataset, &name);

            let record = run_bounded(&name, thresholds, || load(dataset)).await;

            observer.on_finish(dataset, &record);
            run.push(dataset, record);
        }
    }

    tracing::info!(
        operations = run.len(),
        all_succeeded = run.all_succeeded(),
        "Probe plan finished"
    );
    run
}
