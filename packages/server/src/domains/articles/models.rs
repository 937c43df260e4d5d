//! Article model.
//!
//! Articles are owned by the host content store; this service only reads
//! them. Ids are the host's opaque integer identifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Host-assigned article identifier.
pub type ArticleId = i64;

/// Content kind. Only [`ArticleKind::Article`] items get summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleKind {
    Article,
    Page,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    Draft,
    Published,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub kind: ArticleKind,
    pub status: ArticleStatus,
    pub title: String,
    /// Rich-text body; stripped of markup before summarization.
    pub body_html: String,
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Create a published article (convenience constructor).
    pub fn published(
        id: ArticleId,
        title: impl Into<String>,
        body_html: impl Into<String>,
        published_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind: ArticleKind::Article,
            status: ArticleStatus::Published,
            title: title.into(),
            body_html: body_html.into(),
            published_at: Some(published_at),
        }
    }

    /// Create a draft article (convenience constructor).
    pub fn draft(id: ArticleId, title: impl Into<String>, body_html: impl Into<String>) -> Self {
        Self {
            id,
            kind: ArticleKind::Article,
            status: ArticleStatus::Draft,
            title: title.into(),
            body_html: body_html.into(),
            published_at: None,
        }
    }

    /// Override the content kind.
    pub fn with_kind(mut self, kind: ArticleKind) -> Self {
        self.kind = kind;
        self
    }
}
