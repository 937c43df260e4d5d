//! Central dependency container.
//!
//! All host collaborators are trait objects so hooks, job handlers, and the
//! admin surface can run against in-memory fakes in tests.

use std::sync::Arc;

use super::jobs::JobQueue;
use super::traits::{ContentStore, SettingsStore, SummaryStore, Summarizer};

/// Dependencies shared by hooks, job handlers, and the admin surface.
#[derive(Clone)]
pub struct ServerDeps {
    pub content: Arc<dyn ContentStore>,
    pub settings: Arc<dyn SettingsStore>,
    pub summaries: Arc<dyn SummaryStore>,
    pub job_queue: Arc<dyn JobQueue>,
    pub summarizer: Arc<dyn Summarizer>,
}

impl ServerDeps {
    pub fn new(
        content: Arc<dyn ContentStore>,
        settings: Arc<dyn SettingsStore>,
        summaries: Arc<dyn SummaryStore>,
        job_queue: Arc<dyn JobQueue>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            content,
            settings,
            summaries,
            job_queue,
            summarizer,
        }
    }
}
