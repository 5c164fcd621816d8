// View selection: confidence/category filtering for the feed.

pub mod filter;
