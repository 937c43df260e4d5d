//! Application router setup.

use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::middleware::csrf::CsrfTokens;
use crate::server::routes::{admin, health, hooks};
use crate::server::static_files::serve_admin;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
    pub csrf: Arc<CsrfTokens>,
}

/// Build the axum application router.
///
/// The admin page and its JSON endpoints are same-origin by design: the
/// bulk action is authorized by a one-time anti-forgery token issued with
/// the listing, so no permissive CORS is layered on.
pub fn build_app(deps: Arc<ServerDeps>) -> Router {
    let state = AppState {
        deps,
        csrf: Arc::new(CsrfTokens::new()),
    };

    Router::new()
        // Host integration
        .route("/hooks/published", post(hooks::published_handler))
        // Admin JSON API
        .route("/admin/api/summaries", get(admin::list_summaries))
        .route("/admin/api/summaries/generate", post(admin::bulk_generate))
        .route(
            "/admin/api/settings",
            get(admin::get_settings).put(admin::update_settings),
        )
        // Embedded admin page
        .route("/admin", get(serve_admin))
        .route("/admin/*path", get(serve_admin))
        // Health check
        .route("/health", get(health::health_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use chrono::{Duration, Utc};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::domains::articles::Article;
    use crate::domains::summaries::jobs::GENERATE_SUMMARY_JOB;
    use crate::kernel::jobs::JobQueue;
    use crate::kernel::test_dependencies::TestDeps;
    use crate::kernel::traits::SummaryStore;
    use crate::server::middleware::csrf::CSRF_HEADER;

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn health_answers_ok() {
        let test = TestDeps::new();
        let app = build_app(test.deps.clone());

        let (status, body) = get_json(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn publish_webhook_schedules_job() {
        let test = TestDeps::configured().await;
        test.content
            .insert(Article::published(1, "Titel", "tekst", Utc::now()));
        let app = build_app(test.deps.clone());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/hooks/published")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json!({"article_id": 1}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert!(test
            .job_queue
            .has_pending(GENERATE_SUMMARY_JOB, 1)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn listing_prompts_for_configuration_when_unset() {
        let test = TestDeps::new();
        let now = Utc::now();
        test.content.insert(Article::published(1, "Titel", "a", now));
        test.summaries.store_summary(1, "samenvatting").await.unwrap();
        let app = build_app(test.deps.clone());

        let (status, body) = get_json(&app, "/admin/api/summaries").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["configured"], false);
        assert_eq!(body["rows"].as_array().unwrap().len(), 0);
        assert!(body.get("csrf_token").is_none());
    }

    #[tokio::test]
    async fn listing_returns_recent_summarized_rows_newest_first() {
        let test = TestDeps::configured().await;
        let now = Utc::now();
        test.content.insert(Article::published(1, "Oud", "a", now - Duration::days(2)));
        test.content.insert(Article::published(2, "Nieuw", "b", now));
        test.content.insert(Article::published(3, "Kaal", "c", now - Duration::days(1)));
        test.summaries.store_summary(1, "oud nieuws").await.unwrap();
        test.summaries.store_summary(2, "vers nieuws").await.unwrap();
        // Article 3 has no summary and must not appear.
        let app = build_app(test.deps.clone());

        let (status, body) = get_json(&app, "/admin/api/summaries").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["configured"], true);
        assert!(body["csrf_token"].is_string());

        let rows = body["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["article_id"], 2);
        assert_eq!(rows[0]["summary"], "vers nieuws");
        assert_eq!(rows[1]["article_id"], 1);
    }

    #[tokio::test]
    async fn listing_never_exceeds_the_window() {
        let test = TestDeps::configured().await;
        let now = Utc::now();
        for i in 0..30 {
            test.content.insert(Article::published(
                i,
                format!("Artikel {}", i),
                "tekst",
                now - Duration::minutes(i),
            ));
            test.summaries
                .store_summary(i, "samenvatting")
                .await
                .unwrap();
        }
        let app = build_app(test.deps.clone());

        let (_, body) = get_json(&app, "/admin/api/summaries").await;
        assert_eq!(body["rows"].as_array().unwrap().len(), 25);
    }

    #[tokio::test]
    async fn bulk_generate_rejects_bad_token_before_processing() {
        let test = TestDeps::configured().await;
        test.content
            .insert(Article::published(1, "Titel", "tekst", Utc::now()));
        test.summarizer.set_response("samenvatting");
        let app = build_app(test.deps.clone());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/admin/api/summaries/generate")
                    .header(CSRF_HEADER, "forged")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(test.summarizer.call_count(), 0);
        assert!(test.summaries.summary(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn bulk_generate_with_issued_token_fills_missing() {
        let test = TestDeps::configured().await;
        let now = Utc::now();
        test.content.insert(Article::published(1, "Met", "a", now));
        test.content
            .insert(Article::published(2, "Zonder", "b", now - Duration::hours(1)));
        test.summaries.store_summary(1, "bestaande").await.unwrap();
        test.summarizer.set_response("verse samenvatting");
        let app = build_app(test.deps.clone());

        let (_, listing) = get_json(&app, "/admin/api/summaries").await;
        let token = listing["csrf_token"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/admin/api/summaries/generate")
                    .header(CSRF_HEADER, &token)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["generated"], 1);
        assert_eq!(
            test.summaries.summary(1).await.unwrap().as_deref(),
            Some("bestaande")
        );
        assert_eq!(
            test.summaries.summary(2).await.unwrap().as_deref(),
            Some("verse samenvatting")
        );

        // The token was consumed; replaying it is rejected.
        let replay = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/admin/api/summaries/generate")
                    .header(CSRF_HEADER, &token)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(replay.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn settings_roundtrip_without_echoing_the_secret() {
        let test = TestDeps::new();
        let app = build_app(test.deps.clone());

        let (_, before) = get_json(&app, "/admin/api/settings").await;
        assert_eq!(before["api_key_set"], false);
        assert_eq!(before["word_limit"], 100);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/admin/api/settings")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({"api_key": "sk-live", "word_limit": 60}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let (_, after) = get_json(&app, "/admin/api/settings").await;
        assert_eq!(after["api_key_set"], true);
        assert_eq!(after["word_limit"], 60);
        assert!(after.get("api_key").is_none());
    }

    #[tokio::test]
    async fn zero_word_limit_is_rejected() {
        let test = TestDeps::new();
        let app = build_app(test.deps.clone());

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/admin/api/settings")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json!({"word_limit": 0}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn admin_page_is_served() {
        let test = TestDeps::new();
        let app = build_app(test.deps.clone());

        let response = app
            .oneshot(Request::builder().uri("/admin").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("text/html"));
    }
}
