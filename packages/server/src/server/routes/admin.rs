//! Admin JSON endpoints backing the embedded admin page.

use axum::extract::Extension;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domains::articles::ArticleId;
use crate::domains::summaries::jobs::{generate_missing, RECENT_ARTICLES_LIMIT};
use crate::kernel::traits::{
    ContentStore, SettingsStore, SummaryStore, API_KEY_SETTING, WORD_LIMIT_SETTING,
};
use crate::server::app::AppState;
use crate::server::middleware::csrf::CSRF_HEADER;

#[derive(Debug, Serialize)]
pub struct SummaryRow {
    pub article_id: ArticleId,
    pub title: String,
    pub published_at: Option<DateTime<Utc>>,
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct SummariesResponse {
    /// Whether an API credential is configured. When false the page shows
    /// a configuration prompt and no rows are queried.
    pub configured: bool,
    /// One-time token authorizing the bulk action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,
    pub rows: Vec<SummaryRow>,
}

/// Recently published articles that have a stored summary, newest first.
pub async fn list_summaries(
    Extension(state): Extension<AppState>,
) -> Result<Json<SummariesResponse>, StatusCode> {
    let deps = &state.deps;

    let configured = !deps.settings.api_key().await.map_err(internal)?.is_empty();
    if !configured {
        return Ok(Json(SummariesResponse {
            configured: false,
            csrf_token: None,
            rows: Vec::new(),
        }));
    }

    let articles = deps
        .content
        .recent_published(RECENT_ARTICLES_LIMIT)
        .await
        .map_err(internal)?;

    let mut rows = Vec::new();
    for article in articles {
        let Some(summary) = deps.summaries.summary(article.id).await.map_err(internal)? else {
            continue;
        };
        if summary.is_empty() {
            continue;
        }
        rows.push(SummaryRow {
            article_id: article.id,
            title: article.title,
            published_at: article.published_at,
            summary,
        });
    }

    Ok(Json(SummariesResponse {
        configured: true,
        csrf_token: Some(state.csrf.issue()),
        rows,
    }))
}

#[derive(Debug, Serialize)]
pub struct BulkGenerateResponse {
    pub generated: usize,
}

/// Generate summaries for recent published articles lacking one.
///
/// The anti-forgery check is the only hard-fail path on the admin surface:
/// an invalid or missing token rejects the request before any item is
/// touched.
pub async fn bulk_generate(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Result<Json<BulkGenerateResponse>, StatusCode> {
    let token = headers
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if !state.csrf.consume(token) {
        return Err(StatusCode::FORBIDDEN);
    }

    let generated = generate_missing(&state.deps).await.map_err(internal)?;
    Ok(Json(BulkGenerateResponse { generated }))
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub api_key_set: bool,
    pub word_limit: u32,
}

/// Current settings. The credential itself is never echoed back.
pub async fn get_settings(
    Extension(state): Extension<AppState>,
) -> Result<Json<SettingsResponse>, StatusCode> {
    let deps = &state.deps;

    Ok(Json(SettingsResponse {
        api_key_set: !deps.settings.api_key().await.map_err(internal)?.is_empty(),
        word_limit: deps.settings.word_limit().await.map_err(internal)?,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SettingsUpdate {
    pub api_key: Option<String>,
    pub word_limit: Option<u32>,
}

/// Update the credential and/or word limit.
pub async fn update_settings(
    Extension(state): Extension<AppState>,
    Json(update): Json<SettingsUpdate>,
) -> Result<StatusCode, StatusCode> {
    let deps = &state.deps;

    if let Some(limit) = update.word_limit {
        if limit == 0 {
            return Err(StatusCode::UNPROCESSABLE_ENTITY);
        }
        deps.settings
            .set(WORD_LIMIT_SETTING, &limit.to_string())
            .await
            .map_err(internal)?;
    }

    if let Some(api_key) = update.api_key {
        deps.settings
            .set(API_KEY_SETTING, &api_key)
            .await
            .map_err(internal)?;
    }

    Ok(StatusCode::NO_CONTENT)
}

fn internal(e: anyhow::Error) -> StatusCode {
    error!(error = %e, "admin endpoint failed");
    StatusCode::INTERNAL_SERVER_ERROR
}
