//! Job infrastructure for deferred summary generation.
//!
//! This module provides the kernel-level pieces:
//! - [`Job`] - job model, a `(job type, article id)` pair with status
//! - [`JobQueue`] - enqueue with pending-job dedup, claim, mark outcome
//! - [`MemoryJobQueue`] - in-memory queue implementation
//! - [`JobRegistry`] - maps job type strings to async handlers
//! - [`JobRunner`] - background service that polls and executes jobs
//!
//! # Architecture
//!
//! ```text
//! Publish hook calls queue.enqueue(job_type, article_id)
//!     │
//!     └─► Duplicate if a matching job is still pending
//!
//! JobRunner
//!     │
//!     ├─► Poll queue (claim jobs)
//!     ├─► Dispatch via JobRegistry (job type → handler)
//!     └─► Mark succeeded/failed
//! ```
//!
//! Jobs run at most once: there are no retries, leases, or schedules. A
//! failed job stays failed and a fresh publish enqueues a new one.

mod job;
mod queue;
mod registry;
mod runner;

pub use job::{Job, JobStatus};
pub use queue::{EnqueueResult, JobQueue, MemoryJobQueue};
pub use registry::{JobRegistry, SharedJobRegistry};
pub use runner::{JobRunner, JobRunnerConfig};
