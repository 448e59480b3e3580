//! BigQuery Job Waiting
//!
//! 非同期ジョブの終了待ちと終了状態の判定

use anyhow::Result;
use log::{debug, error};
use std::time::Duration;
use tokio::time::sleep;

use super::client::BigQueryApi;
use super::models::JobSnapshot;
use crate::domain::errors::PipelineError;

// Polling only observes the job; a failed job is never resubmitted
pub const INITIAL_POLL_DELAY_MS: u64 = 500;
pub const MAX_POLL_DELAY_MS: u64 = 8000;

/// Calculate poll delay with exponential growth, capped
pub fn calculate_poll_delay(attempt: u32, initial_ms: u64, max_ms: u64) -> u64 {
    let factor = 1u64.checked_shl(attempt.min(32)).unwrap_or(u64::MAX);
    std::cmp::min(initial_ms.saturating_mul(factor), max_ms)
}

/// Convert error chain to string including all causes
pub fn error_chain_to_string(e: &anyhow::Error) -> String {
    let mut messages = Vec::new();
    for cause in e.chain() {
        messages.push(cause.to_string());
    }
    messages.join(" | ")
}

/// Polling schedule for job completion
#[derive(Debug, Clone, Copy)]
pub struct JobWaiter {
    initial_delay: Duration,
    max_delay: Duration,
}

impl Default for JobWaiter {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(INITIAL_POLL_DELAY_MS),
            max_delay: Duration::from_millis(MAX_POLL_DELAY_MS),
        }
    }
}

impl JobWaiter {
    pub fn new(initial_delay: Duration, max_delay: Duration) -> Self {
        Self {
            initial_delay,
            max_delay,
        }
    }

    fn delay(&self, attempt: u32) -> Duration {
        Duration::from_millis(calculate_poll_delay(
            attempt,
            self.initial_delay.as_millis() as u64,
            self.max_delay.as_millis() as u64,
        ))
    }

    /// Block until the job is done and surface a failed terminal status as an error
    pub async fn wait<A: BigQueryApi + ?Sized>(
        &self,
        api: &A,
        submitted: JobSnapshot,
    ) -> Result<JobSnapshot> {
        debug!("Running job {}", submitted.job_id);

        let mut snapshot = submitted;
        let mut attempt = 0;

        while !snapshot.is_done() {
            sleep(self.delay(attempt)).await;
            attempt += 1;

            snapshot = api
                .get_job(
                    &snapshot.project_id,
                    &snapshot.job_id,
                    snapshot.location.clone(),
                )
                .await?;
            debug!(
                "Job {} is {:?} (poll #{})",
                snapshot.job_id, snapshot.progress, attempt
            );
        }

        if let Some(message) = &snapshot.error {
            error!(
                "Job completed with error: {} (id: {})",
                message, snapshot.job_id
            );
            return Err(PipelineError::JobFailed {
                job_id: snapshot.job_id.clone(),
                message: message.clone(),
            }
            .into());
        }

        Ok(snapshot)
    }
}
