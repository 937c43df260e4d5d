//! Host-facing store and generation traits.
//!
//! The host CMS owns the article content, the settings store, and the
//! summary metadata; this service only sees them through these
//! abstractions. The in-memory implementations in [`crate::kernel::stores`]
//! back the demo binary and the test suite; a production embedding
//! substitutes host-backed adapters.

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::articles::{Article, ArticleId};

/// Settings key for the API credential.
pub const API_KEY_SETTING: &str = "openai_api_key";

/// Settings key for the advisory word limit.
pub const WORD_LIMIT_SETTING: &str = "summary_word_limit";

/// Word limit used when the setting is absent or unparseable.
pub const DEFAULT_WORD_LIMIT: u32 = 100;

/// Read access to the host's article store.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Load an article by id. Returns None when it no longer exists.
    async fn article(&self, id: ArticleId) -> Result<Option<Article>>;

    /// Published articles, newest first, bounded by `limit`.
    async fn recent_published(&self, limit: usize) -> Result<Vec<Article>>;
}

/// String-typed key/value settings with defaulting reads.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// The configured API credential. Empty means unconfigured.
    async fn api_key(&self) -> Result<String> {
        Ok(self.get(API_KEY_SETTING).await?.unwrap_or_default())
    }

    /// Advisory word limit for generated summaries.
    ///
    /// Falls back to [`DEFAULT_WORD_LIMIT`] when the stored value is
    /// missing, unparseable, or zero.
    async fn word_limit(&self) -> Result<u32> {
        let limit = self
            .get(WORD_LIMIT_SETTING)
            .await?
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_WORD_LIMIT);
        Ok(limit)
    }
}

/// Summary metadata keyed by article id under one fixed key.
#[async_trait]
pub trait SummaryStore: Send + Sync {
    /// Stored summary for an article, if any.
    async fn summary(&self, article_id: ArticleId) -> Result<Option<String>>;

    /// Upsert the summary for an article. Last writer wins.
    async fn store_summary(&self, article_id: ArticleId, text: &str) -> Result<()>;
}

/// Text generation seam.
///
/// An empty return means "no summary produced" - callers treat it as a
/// soft failure and persist nothing.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String>;
}
