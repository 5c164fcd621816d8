// Post records: the data model, the in-memory store, and where records
// come from (remote dataset, embedded fallback, synthetic generator).

pub mod loader;
pub mod models;
pub mod store;
pub mod synthetic;

pub use loader::fallback_dataset;
