use std::time::Duration;

use probe_types::OperationRecord;

use crate::catalog::Dataset;

/// All records from one probe pass, in the order they ran.
#[derive(Debug, Clone)]
pub struct ProbeRun<T> {
    entries: Vec<(Dataset, OperationRecord<T>)>,
}

impl<T> Default for ProbeRun<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> ProbeRun<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, dataset: Dataset, record: OperationRecord<T>) {
        self.entries.push((dataset, record));
    }

    #[must_use]
    pub fn entries(&self) -> &[(Dataset, OperationRecord<T>)] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn record(&self, dataset: Dataset) -> Option<&OperationRecord<T>> {
        self.entries
            .iter()
            .find(|(d, _)| *d == dataset)
            .map(|(_, record)| record)
    }

    /// Elapsed time for `dataset`, zero if it was never measured.
    #[must_use]
    pub fn elapsed_of(&self, dataset: Dataset) -> Duration {
        self.record(dataset)
            .map(OperationRecord::elapsed)
            .unwrap_or_default()
    }

    /// True when every catalog dataset was measured and succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        Dataset::ALL
            .iter()
            .all(|d| self.record(*d).is_some_and(OperationRecord::is_success))
    }
}
