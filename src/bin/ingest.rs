//! ratesync-ingest
//!
//! 為替レートの取得・整形・アップロード

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;
use log::error;

use ratesync::driver::{IngestArgs, IngestWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = IngestArgs::parse();

    // Validate before any network call
    let config = args.to_config()?;

    // Create workflow with injected dependencies
    let workflow = IngestWorkflow::new(config);

    if let Err(e) = workflow.execute(&args).await {
        error!("Ingestion failed: {:#}", e);
        return Err(e);
    }

    println!("✓ Ingestion complete!");
    Ok(())
}
