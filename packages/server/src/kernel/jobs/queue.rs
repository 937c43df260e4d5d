//! Job queue trait and the in-memory implementation.

use std::sync::RwLock;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use uuid::Uuid;

use super::job::{Job, JobStatus};
use crate::domains::articles::ArticleId;

/// Result of an enqueue, distinguishing dedup hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueResult {
    /// A new job was queued
    Created(Uuid),
    /// A matching job was already pending; nothing was queued
    Duplicate(Uuid),
}

impl EnqueueResult {
    /// The job id, whether created or duplicate.
    pub fn job_id(&self) -> Uuid {
        match self {
            EnqueueResult::Created(id) | EnqueueResult::Duplicate(id) => *id,
        }
    }

    /// True if a new job was queued.
    pub fn is_created(&self) -> bool {
        matches!(self, EnqueueResult::Created(_))
    }
}

/// Deferred-job scheduling as the host exposes it: enqueue keyed by
/// `(job type, article id)` with a pending-job lookup.
///
/// The pending check inside `enqueue` is check-then-act and only
/// best-effort; callers must tolerate the occasional double run (the
/// summary write is last-writer-wins, so the outcome is benign).
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Enqueue a job for immediate execution.
    ///
    /// Returns `Duplicate` without inserting when a job for the same
    /// `(job_type, article_id)` is still pending.
    async fn enqueue(&self, job_type: &str, article_id: ArticleId) -> Result<EnqueueResult>;

    /// Whether a job for `(job_type, article_id)` is still pending.
    async fn has_pending(&self, job_type: &str, article_id: ArticleId) -> Result<bool>;

    /// Claim up to `limit` pending jobs, oldest first, flipping them to
    /// Running.
    async fn claim(&self, limit: usize) -> Result<Vec<Job>>;

    /// Mark a claimed job as succeeded.
    async fn mark_succeeded(&self, job_id: Uuid) -> Result<()>;

    /// Mark a claimed job as failed. Terminal: there are no retries.
    async fn mark_failed(&self, job_id: Uuid, error: &str) -> Result<()>;
}

/// In-memory job queue.
///
/// A Vec keeps insertion order so claims are FIFO.
pub struct MemoryJobQueue {
    jobs: RwLock<Vec<Job>>,
}

impl Default for MemoryJobQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryJobQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(Vec::new()),
        }
    }

    /// Snapshot of all jobs, in insertion order.
    pub fn jobs(&self) -> Vec<Job> {
        self.jobs
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of pending jobs.
    pub fn pending_count(&self) -> usize {
        self.jobs
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|j| j.is_pending())
            .count()
    }

    /// Look up a job by id.
    pub fn job(&self, job_id: Uuid) -> Option<Job> {
        self.jobs
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|j| j.id == job_id)
            .cloned()
    }

    fn set_status(&self, job_id: Uuid, status: JobStatus, error: Option<&str>) -> Result<()> {
        let mut jobs = self.jobs.write().unwrap_or_else(|e| e.into_inner());
        let job = jobs
            .iter_mut()
            .find(|j| j.id == job_id)
            .ok_or_else(|| anyhow!("unknown job: {}", job_id))?;

        job.status = status;
        job.error_message = error.map(|e| e.to_string());
        job.updated_at = chrono::Utc::now();
        Ok(())
    }
}

#[async_trait]
impl JobQueue for MemoryJobQueue {
    async fn enqueue(&self, job_type: &str, article_id: ArticleId) -> Result<EnqueueResult> {
        let mut jobs = self.jobs.write().unwrap_or_else(|e| e.into_inner());

        if let Some(existing) = jobs
            .iter()
            .find(|j| j.is_pending() && j.job_type == job_type && j.article_id == article_id)
        {
            return Ok(EnqueueResult::Duplicate(existing.id));
        }

        let job = Job::immediate(job_type, article_id);
        let id = job.id;
        jobs.push(job);
        Ok(EnqueueResult::Created(id))
    }

    async fn has_pending(&self, job_type: &str, article_id: ArticleId) -> Result<bool> {
        Ok(self
            .jobs
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .any(|j| j.is_pending() && j.job_type == job_type && j.article_id == article_id))
    }

    async fn claim(&self, limit: usize) -> Result<Vec<Job>> {
        let mut jobs = self.jobs.write().unwrap_or_else(|e| e.into_inner());
        let mut claimed = Vec::new();

        for job in jobs.iter_mut() {
            if claimed.len() >= limit {
                break;
            }
            if job.is_pending() {
                job.status = JobStatus::Running;
                job.updated_at = chrono::Utc::now();
                claimed.push(job.clone());
            }
        }

        Ok(claimed)
    }

    async fn mark_succeeded(&self, job_id: Uuid) -> Result<()> {
        self.set_status(job_id, JobStatus::Succeeded, None)
    }

    async fn mark_failed(&self, job_id: Uuid, error: &str) -> Result<()> {
        self.set_status(job_id, JobStatus::Failed, Some(error))
    }
}
