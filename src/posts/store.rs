// Record store: the loaded dataset plus the bounded simulated buffer.
//
// The dataset is fixed after load. The buffer is filled by the simulated
// stream, newest first, and never grows past BUFFER_CAPACITY. Whichever of
// the two is "active" feeds the aggregator and the view selector.

use super::models::PostRecord;

/// Maximum number of simulated records kept in the buffer.
pub const BUFFER_CAPACITY: usize = 50;

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    dataset: Vec<PostRecord>,
    buffer: Vec<PostRecord>,
}

impl RecordStore {
    pub fn new(dataset: Vec<PostRecord>) -> Self {
        Self {
            dataset,
            buffer: Vec::new(),
        }
    }

    /// The full loaded dataset (static + synthetic records).
    pub fn dataset(&self) -> &[PostRecord] {
        &self.dataset
    }

    /// Simulated arrivals, newest first.
    pub fn buffer(&self) -> &[PostRecord] {
        &self.buffer
    }

    /// The active collection: the simulated buffer once it holds anything,
    /// otherwise the dataset.
    pub fn active(&self) -> &[PostRecord] {
        if self.buffer.is_empty() {
            &self.dataset
        } else {
            &self.buffer
        }
    }

    /// Prepend a record to the buffer and drop the oldest beyond capacity.
    pub fn push_front(&mut self, record: PostRecord) {
        self.buffer.insert(0, record);
        self.buffer.truncate(BUFFER_CAPACITY);
    }

    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }
}
