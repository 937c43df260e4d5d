//! Job registry for dispatching claimed jobs.
//!
//! Maps job type strings (e.g., "generate_summary") to async handlers so
//! the [`super::JobRunner`] can execute claimed jobs without knowing the
//! domains they belong to.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use anyhow::{anyhow, Result};

use super::job::Job;
use crate::domains::articles::ArticleId;
use crate::kernel::ServerDeps;

/// Boxed async handler. The article id is the job's whole payload.
type BoxedHandler = Box<
    dyn Fn(ArticleId, Arc<ServerDeps>) -> Pin<Box<dyn Future<Output = Result<()>> + Send>>
        + Send
        + Sync,
>;

/// Registry that maps job type strings to handlers.
///
/// Each domain registers its job types at startup.
///
/// # Example
///
/// ```ignore
/// let mut registry = JobRegistry::new();
/// registry.register(GENERATE_SUMMARY_JOB, |article_id, deps| async move {
///     run_generate_summary(article_id, &deps).await.map(|_| ())
/// });
/// ```
#[derive(Default)]
pub struct JobRegistry {
    handlers: HashMap<&'static str, BoxedHandler>,
}

impl JobRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a job type with its handler.
    pub fn register<F, Fut>(&mut self, job_type: &'static str, handler: F)
    where
        F: Fn(ArticleId, Arc<ServerDeps>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let boxed: BoxedHandler =
            Box::new(move |article_id, deps| Box::pin(handler(article_id, deps)));
        self.handlers.insert(job_type, boxed);
    }

    /// Execute a claimed job using its registered handler.
    pub async fn execute(&self, job: &Job, deps: Arc<ServerDeps>) -> Result<()> {
        let handler = self
            .handlers
            .get(job.job_type.as_str())
            .ok_or_else(|| anyhow!("unknown job type: {}", job.job_type))?;

        handler(job.article_id, deps).await
    }

    /// Check if a job type is registered.
    pub fn is_registered(&self, job_type: &str) -> bool {
        self.handlers.contains_key(job_type)
    }

    /// All registered job types.
    pub fn registered_types(&self) -> Vec<&'static str> {
        self.handlers.keys().copied().collect()
    }
}

/// Thread-safe registry wrapped in Arc.
pub type SharedJobRegistry = Arc<JobRegistry>;
