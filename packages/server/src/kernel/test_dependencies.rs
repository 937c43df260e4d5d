//! Test implementations of kernel dependencies.
//!
//! `TestDeps` wires every trait to its in-memory implementation and keeps
//! concrete handles so tests can seed state and inspect outcomes.

use std::sync::{Arc, RwLock};

use anyhow::Result;
use async_trait::async_trait;

use super::deps::ServerDeps;
use super::jobs::MemoryJobQueue;
use super::stores::{MemoryContentStore, MemorySettingsStore, MemorySummaryStore};
use super::traits::{SettingsStore, Summarizer, API_KEY_SETTING};

/// Summarizer with a canned response and call tracking.
pub struct MockSummarizer {
    response: RwLock<String>,
    calls: RwLock<Vec<String>>,
}

impl Default for MockSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSummarizer {
    /// Create a mock that returns an empty summary.
    pub fn new() -> Self {
        Self {
            response: RwLock::new(String::new()),
            calls: RwLock::new(Vec::new()),
        }
    }

    /// Create a mock with a canned response (builder pattern).
    pub fn with_response(response: impl Into<String>) -> Self {
        let mock = Self::new();
        mock.set_response(response);
        mock
    }

    /// Change the canned response.
    pub fn set_response(&self, response: impl Into<String>) {
        *self.response.write().unwrap() = response.into();
    }

    /// Number of summarize calls made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// The texts passed to summarize, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(&self, text: &str) -> Result<String> {
        self.calls.write().unwrap().push(text.to_string());
        Ok(self.response.read().unwrap().clone())
    }
}

/// In-memory dependency set for tests.
pub struct TestDeps {
    pub content: Arc<MemoryContentStore>,
    pub settings: Arc<MemorySettingsStore>,
    pub summaries: Arc<MemorySummaryStore>,
    pub job_queue: Arc<MemoryJobQueue>,
    pub summarizer: Arc<MockSummarizer>,
    pub deps: Arc<ServerDeps>,
}

impl Default for TestDeps {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDeps {
    /// Build a fresh set with empty stores and a silent summarizer.
    pub fn new() -> Self {
        let content = Arc::new(MemoryContentStore::new());
        let settings = Arc::new(MemorySettingsStore::new());
        let summaries = Arc::new(MemorySummaryStore::new());
        let job_queue = Arc::new(MemoryJobQueue::new());
        let summarizer = Arc::new(MockSummarizer::new());

        let deps = Arc::new(ServerDeps::new(
            content.clone(),
            settings.clone(),
            summaries.clone(),
            job_queue.clone(),
            summarizer.clone(),
        ));

        Self {
            content,
            settings,
            summaries,
            job_queue,
            summarizer,
            deps,
        }
    }

    /// Same, but with a configured API credential.
    pub async fn configured() -> Self {
        let test = Self::new();
        test.settings
            .set(API_KEY_SETTING, "sk-test")
            .await
            .expect("memory settings store never fails");
        test
    }
}
