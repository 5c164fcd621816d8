// sentiwatch: terminal dashboard for sentiment-labeled social media posts
//
// This is the library root. Each module corresponds to one layer of the
// dashboard: records in, simulated stream, aggregation, view selection,
// and output.

pub mod config;
pub mod dashboard;
pub mod metrics;
pub mod output;
pub mod posts;
pub mod stream;
pub mod view;
