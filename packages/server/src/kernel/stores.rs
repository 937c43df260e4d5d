//! In-memory store implementations.
//!
//! Back the demo binary and the test suite. Data is lost on restart; a
//! host-backed adapter replaces these in a real embedding.

use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::Result;
use async_trait::async_trait;

use super::traits::{ContentStore, SettingsStore, SummaryStore};
use crate::domains::articles::{Article, ArticleId, ArticleKind, ArticleStatus};

/// In-memory article store.
pub struct MemoryContentStore {
    articles: RwLock<HashMap<ArticleId, Article>>,
}

impl Default for MemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryContentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            articles: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store pre-seeded with articles.
    pub fn with_articles(articles: Vec<Article>) -> Self {
        let store = Self::new();
        for article in articles {
            store.insert(article);
        }
        store
    }

    /// Insert or replace an article.
    pub fn insert(&self, article: Article) {
        self.articles.write().unwrap().insert(article.id, article);
    }

    /// Number of stored articles.
    pub fn article_count(&self) -> usize {
        self.articles.read().unwrap().len()
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn article(&self, id: ArticleId) -> Result<Option<Article>> {
        Ok(self.articles.read().unwrap().get(&id).cloned())
    }

    async fn recent_published(&self, limit: usize) -> Result<Vec<Article>> {
        let mut published: Vec<Article> = self
            .articles
            .read()
            .unwrap()
            .values()
            .filter(|a| a.kind == ArticleKind::Article && a.status == ArticleStatus::Published)
            .cloned()
            .collect();

        published.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        published.truncate(limit);

        Ok(published)
    }
}

/// In-memory key/value settings store.
pub struct MemorySettingsStore {
    values: RwLock<HashMap<String, String>>,
}

impl Default for MemorySettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySettingsStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// In-memory summary metadata store.
pub struct MemorySummaryStore {
    summaries: RwLock<HashMap<ArticleId, String>>,
}

impl Default for MemorySummaryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySummaryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            summaries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored summaries.
    pub fn summary_count(&self) -> usize {
        self.summaries.read().unwrap().len()
    }
}

#[async_trait]
impl SummaryStore for MemorySummaryStore {
    async fn summary(&self, article_id: ArticleId) -> Result<Option<String>> {
        Ok(self.summaries.read().unwrap().get(&article_id).cloned())
    }

    async fn store_summary(&self, article_id: ArticleId, text: &str) -> Result<()> {
        self.summaries
            .write()
            .unwrap()
            .insert(article_id, text.to_string());
        Ok(())
    }
}
