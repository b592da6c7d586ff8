//! Vectara-Ingest main entry point
//!
//! Everything a run needs comes from the environment (`CONFIG_FILE`, `PROFILE`,
//! `VECTARA_API_KEY`, `VECTARA_CUSTOMER_ID`, `VECTARA_CORPUS_ID`) and the config
//! document it names. The command line only controls log verbosity.

use std::process::ExitCode;
use vectara_ingest::CrawlerRegistry;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // This binary ships no crawlers; connector binaries call `cli::main_with` with their own
    vectara_ingest::cli::main_with(&CrawlerRegistry::default()).await
}
