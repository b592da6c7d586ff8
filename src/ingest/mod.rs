//! Ingestion run orchestration
//!
//! One run is a fixed, linear sequence:
//! 1. Validate the environment
//! 2. Load the config document and overlay the environment identifiers
//! 3. Resolve and construct the configured crawler
//! 4. Optionally reset the corpus and wait for it to settle
//! 5. Run the crawl

mod runner;

pub use runner::{run, RunReport, SettlePolicy};
