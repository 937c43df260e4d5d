//! Host-facing webhook endpoints.

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Deserialize;
use tracing::error;

use crate::domains::articles::hooks::on_published;
use crate::domains::articles::ArticleId;
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct PublishedPayload {
    pub article_id: ArticleId,
}

/// Publish-transition notification from the host.
///
/// Always answers 202 when the hook ran: eligibility misses are silent by
/// contract and never surface to whoever published the article.
pub async fn published_handler(
    Extension(state): Extension<AppState>,
    Json(payload): Json<PublishedPayload>,
) -> StatusCode {
    match on_published(payload.article_id, &state.deps).await {
        Ok(()) => StatusCode::ACCEPTED,
        Err(e) => {
            error!(article_id = payload.article_id, error = %e, "publish hook failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
