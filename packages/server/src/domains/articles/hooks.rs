//! Publish-transition hook.
//!
//! Called when the host reports an article moving to published. Decides
//! whether to schedule summary generation; every ineligible branch is a
//! silent no-op so publication is never disturbed.

use anyhow::Result;
use tracing::{debug, info};

use super::models::{ArticleId, ArticleKind};
use crate::domains::summaries::jobs::GENERATE_SUMMARY_JOB;
use crate::kernel::jobs::{EnqueueResult, JobQueue};
use crate::kernel::traits::{ContentStore, SettingsStore};
use crate::kernel::ServerDeps;

/// Schedule summary generation for a just-published article, if eligible.
///
/// Eligibility: the item exists, is of the article kind, an API credential
/// is configured, and no generation job is already pending for this id.
pub async fn on_published(article_id: ArticleId, deps: &ServerDeps) -> Result<()> {
    let Some(article) = deps.content.article(article_id).await? else {
        debug!(article_id, "published item not found, skipping");
        return Ok(());
    };

    if article.kind != ArticleKind::Article {
        debug!(article_id, "not an article, skipping");
        return Ok(());
    }

    if deps.settings.api_key().await?.is_empty() {
        debug!(article_id, "no API credential configured, skipping");
        return Ok(());
    }

    match deps.job_queue.enqueue(GENERATE_SUMMARY_JOB, article_id).await? {
        EnqueueResult::Created(job_id) => {
            info!(article_id, job_id = %job_id, "scheduled summary generation");
        }
        EnqueueResult::Duplicate(job_id) => {
            debug!(article_id, job_id = %job_id, "generation already pending");
        }
    }

    Ok(())
}
