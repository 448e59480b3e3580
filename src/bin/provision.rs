//! ratesync-provision
//!
//! BigQuery のデータセット・テーブル作成、ロード、集計

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;
use log::error;

use ratesync::driver::{ProvisionArgs, ProvisionWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = ProvisionArgs::parse();

    // Validate before any client is created
    let config = args.to_config()?;

    // Create workflow with injected dependencies
    let workflow = ProvisionWorkflow::new(config);

    if let Err(e) = workflow.execute(&args).await {
        error!("Provisioning failed: {:#}", e);
        return Err(e);
    }

    println!("✓ Provisioning complete!");
    Ok(())
}
