// Simulated stream: one resampled "arrival" per tick.
//
// A tick draws a record uniformly from the dataset, stamps it with the
// current instant and a fresh id, and prepends it to the store's buffer
// (which truncates itself to BUFFER_CAPACITY).

use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::debug;

use crate::posts::models::PostRecord;
use crate::posts::store::RecordStore;

/// Produces simulated arrivals. Holds the id sequence so every record it
/// emits gets a distinct identifier, even within the same millisecond.
#[derive(Debug, Default)]
pub struct SimulatedStream {
    next_seq: u64,
}

impl SimulatedStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the next simulated record without touching any store.
    /// Returns None when the dataset is empty.
    pub fn next_record<R: Rng>(
        &mut self,
        dataset: &[PostRecord],
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Option<PostRecord> {
        let template = dataset.choose(rng)?;
        let mut record = template.clone();
        record.timestamp = now;
        record.id = format!("realtime_{}_{}", now.timestamp_millis(), self.next_seq);
        self.next_seq += 1;
        Some(record)
    }

    /// Run one tick against the store. Returns the new record, if any.
    pub fn tick<R: Rng>(
        &mut self,
        store: &mut RecordStore,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Option<PostRecord> {
        let record = self.next_record(store.dataset(), now, rng)?;
        debug!(id = %record.id, sentiment = %record.sentiment, "Simulated arrival");
        store.push_front(record.clone());
        Some(record)
    }
}
