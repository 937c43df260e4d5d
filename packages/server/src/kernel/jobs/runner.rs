//! Job runner service for processing queued jobs.
//!
//! The `JobRunner` is a background task that polls the queue, dispatches
//! claimed jobs through the registry, and records the outcome. Failures
//! are terminal; the queue never re-runs a failed job.
//!
//! # Example
//!
//! ```ignore
//! let runner = JobRunner::new(job_queue, registry, deps);
//! tokio::spawn(runner.run());
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, error, info, warn};

use super::queue::JobQueue;
use super::registry::SharedJobRegistry;
use crate::kernel::ServerDeps;

/// Configuration for the job runner.
#[derive(Debug, Clone)]
pub struct JobRunnerConfig {
    /// Maximum number of jobs to claim per poll
    pub batch_size: usize,
    /// How long to wait when no jobs are available
    pub poll_interval: Duration,
}

impl Default for JobRunnerConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            poll_interval: Duration::from_secs(2),
        }
    }
}

/// Background service that drains the job queue.
pub struct JobRunner {
    job_queue: Arc<dyn JobQueue>,
    registry: SharedJobRegistry,
    deps: Arc<ServerDeps>,
    config: JobRunnerConfig,
    shutdown: Arc<AtomicBool>,
}

impl JobRunner {
    /// Create a runner with default configuration.
    pub fn new(
        job_queue: Arc<dyn JobQueue>,
        registry: SharedJobRegistry,
        deps: Arc<ServerDeps>,
    ) -> Self {
        Self::with_config(job_queue, registry, deps, JobRunnerConfig::default())
    }

    /// Create a runner with custom configuration.
    pub fn with_config(
        job_queue: Arc<dyn JobQueue>,
        registry: SharedJobRegistry,
        deps: Arc<ServerDeps>,
        config: JobRunnerConfig,
    ) -> Self {
        Self {
            job_queue,
            registry,
            deps,
            config,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle for requesting shutdown from another task.
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        self.shutdown.clone()
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Claim and execute one batch. Returns the number of jobs processed.
    pub async fn tick(&self) -> Result<usize> {
        let jobs = self.job_queue.claim(self.config.batch_size).await?;
        if jobs.is_empty() {
            return Ok(0);
        }

        debug!(count = jobs.len(), "claimed jobs");

        let mut processed = 0;
        for job in &jobs {
            if self.is_shutdown_requested() {
                break;
            }

            debug!(job_id = %job.id, job_type = %job.job_type, article_id = job.article_id, "executing job");

            match self.registry.execute(job, self.deps.clone()).await {
                Ok(()) => {
                    info!(job_id = %job.id, job_type = %job.job_type, "job succeeded");
                    if let Err(e) = self.job_queue.mark_succeeded(job.id).await {
                        error!(job_id = %job.id, error = %e, "failed to mark job as succeeded");
                    }
                }
                Err(e) => {
                    warn!(job_id = %job.id, job_type = %job.job_type, error = %e, "job failed");
                    if let Err(mark_err) = self.job_queue.mark_failed(job.id, &e.to_string()).await
                    {
                        error!(job_id = %job.id, error = %mark_err, "failed to mark job as failed");
                    }
                }
            }

            processed += 1;
        }

        Ok(processed)
    }

    /// Run until shutdown is requested.
    pub async fn run(self) -> Result<()> {
        info!(
            batch_size = self.config.batch_size,
            poll_interval_ms = self.config.poll_interval.as_millis() as u64,
            "job runner starting"
        );

        loop {
            if self.is_shutdown_requested() {
                break;
            }

            match self.tick().await {
                Ok(0) => tokio::time::sleep(self.config.poll_interval).await,
                Ok(_) => {}
                Err(e) => {
                    error!(error = %e, "failed to claim jobs");
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
            }
        }

        info!("job runner stopped");
        Ok(())
    }
}
