//! Deferred generation job and the bulk backfill path.

use anyhow::Result;
use tracing::{debug, info};

use super::markup::strip_markup;
use crate::domains::articles::ArticleId;
use crate::kernel::jobs::JobRegistry;
use crate::kernel::traits::{ContentStore, SummaryStore, Summarizer};
use crate::kernel::ServerDeps;

/// Job type for deferred summary generation.
pub const GENERATE_SUMMARY_JOB: &str = "generate_summary";

/// How many recent published articles the admin surface operates over.
pub const RECENT_ARTICLES_LIMIT: usize = 25;

/// Register this domain's job handlers.
pub fn register_jobs(registry: &mut JobRegistry) {
    registry.register(GENERATE_SUMMARY_JOB, |article_id, deps| async move {
        run_generate_summary(article_id, &deps).await.map(|_| ())
    });
}

/// Handler for [`GENERATE_SUMMARY_JOB`]: load the article, strip markup,
/// generate, and persist. Returns whether a summary was stored.
///
/// Overwrites any existing summary. A missing article or an empty
/// generation result is a quiet no-op.
pub async fn run_generate_summary(article_id: ArticleId, deps: &ServerDeps) -> Result<bool> {
    let Some(article) = deps.content.article(article_id).await? else {
        debug!(article_id, "article no longer exists, skipping generation");
        return Ok(false);
    };

    let text = strip_markup(&article.body_html);
    let summary = deps.summarizer.summarize(&text).await?;

    if summary.is_empty() {
        debug!(article_id, "no summary produced");
        return Ok(false);
    }

    deps.summaries.store_summary(article_id, &summary).await?;
    info!(article_id, "summary stored");
    Ok(true)
}

/// Generate summaries for the most recent published articles that lack
/// one. Articles that already have a summary are left untouched. Returns
/// the number of summaries stored.
pub async fn generate_missing(deps: &ServerDeps) -> Result<usize> {
    let articles = deps.content.recent_published(RECENT_ARTICLES_LIMIT).await?;

    let mut generated = 0;
    for article in articles {
        if let Some(existing) = deps.summaries.summary(article.id).await? {
            if !existing.is_empty() {
                continue;
            }
        }
        if run_generate_summary(article.id, deps).await? {
            generated += 1;
        }
    }

    info!(generated, "bulk generation finished");
    Ok(generated)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::domains::articles::Article;
    use crate::kernel::test_dependencies::TestDeps;

    #[tokio::test]
    async fn stores_generated_summary() {
        let test = TestDeps::configured().await;
        test.content
            .insert(Article::published(1, "Titel", "<p>Lang artikel</p>", Utc::now()));
        test.summarizer.set_response("Kort nieuws.");

        let stored = run_generate_summary(1, &test.deps).await.unwrap();

        assert!(stored);
        assert_eq!(
            test.summaries.summary(1).await.unwrap().as_deref(),
            Some("Kort nieuws.")
        );
    }

    #[tokio::test]
    async fn summarizer_receives_stripped_body() {
        let test = TestDeps::configured().await;
        test.content.insert(Article::published(
            1,
            "Titel",
            "<p>Hallo <b>wereld</b></p>",
            Utc::now(),
        ));
        test.summarizer.set_response("Samenvatting.");

        run_generate_summary(1, &test.deps).await.unwrap();

        assert_eq!(test.summarizer.calls(), vec!["Hallo wereld".to_string()]);
    }

    #[tokio::test]
    async fn empty_generation_persists_nothing() {
        let test = TestDeps::configured().await;
        test.content
            .insert(Article::published(1, "Titel", "tekst", Utc::now()));

        let stored = run_generate_summary(1, &test.deps).await.unwrap();

        assert!(!stored);
        assert!(test.summaries.summary(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_article_is_a_no_op() {
        let test = TestDeps::configured().await;

        let stored = run_generate_summary(404, &test.deps).await.unwrap();

        assert!(!stored);
        assert_eq!(test.summarizer.call_count(), 0);
    }

    #[tokio::test]
    async fn direct_generation_overwrites() {
        let test = TestDeps::configured().await;
        test.content
            .insert(Article::published(1, "Titel", "tekst", Utc::now()));
        test.summaries.store_summary(1, "oude versie").await.unwrap();
        test.summarizer.set_response("nieuwe versie");

        run_generate_summary(1, &test.deps).await.unwrap();

        assert_eq!(
            test.summaries.summary(1).await.unwrap().as_deref(),
            Some("nieuwe versie")
        );
    }

    #[tokio::test]
    async fn bulk_fills_gaps_without_overwriting() {
        let test = TestDeps::configured().await;
        let now = Utc::now();
        test.content.insert(Article::published(1, "Met", "a", now));
        test.content
            .insert(Article::published(2, "Zonder", "b", now - Duration::hours(1)));
        test.summaries.store_summary(1, "bestaande").await.unwrap();
        test.summarizer.set_response("verse samenvatting");

        let generated = generate_missing(&test.deps).await.unwrap();

        assert_eq!(generated, 1);
        assert_eq!(
            test.summaries.summary(1).await.unwrap().as_deref(),
            Some("bestaande")
        );
        assert_eq!(
            test.summaries.summary(2).await.unwrap().as_deref(),
            Some("verse samenvatting")
        );
    }

    #[tokio::test]
    async fn bulk_only_touches_the_most_recent_window() {
        let test = TestDeps::configured().await;
        let now = Utc::now();
        for i in 0..30 {
            test.content.insert(Article::published(
                i,
                format!("Artikel {}", i),
                "tekst",
                now - Duration::minutes(i),
            ));
        }
        test.summarizer.set_response("samenvatting");

        let generated = generate_missing(&test.deps).await.unwrap();

        assert_eq!(generated, RECENT_ARTICLES_LIMIT);
        // The five oldest fall outside the window and stay untouched.
        for i in 25..30 {
            assert!(test.summaries.summary(i).await.unwrap().is_none());
        }
    }
}
