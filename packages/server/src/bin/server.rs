// Main entry point for the speakable summaries service

use std::sync::Arc;

use anyhow::{Context, Result};
use server_core::config::Config;
use server_core::domains::summaries::generator::OpenAiSummarizer;
use server_core::domains::summaries::jobs::register_jobs;
use server_core::kernel::jobs::{JobRegistry, JobRunner, MemoryJobQueue};
use server_core::kernel::stores::{MemoryContentStore, MemorySettingsStore, MemorySummaryStore};
use server_core::kernel::traits::{SettingsStore, API_KEY_SETTING, WORD_LIMIT_SETTING};
use server_core::kernel::ServerDeps;
use server_core::server::build_app;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Speakable Summaries service");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Settings store, optionally seeded from the environment
    let settings = Arc::new(MemorySettingsStore::new());
    if let Some(api_key) = &config.openai_api_key {
        settings.set(API_KEY_SETTING, api_key).await?;
        tracing::info!("API credential seeded from environment");
    }
    if let Some(limit) = config.word_limit {
        settings
            .set(WORD_LIMIT_SETTING, &limit.to_string())
            .await?;
    }

    // Summarizer reads the settings store on every generation attempt
    let mut summarizer = OpenAiSummarizer::new(settings.clone());
    if let Some(base_url) = &config.openai_base_url {
        summarizer = summarizer.with_base_url(base_url.clone());
    }

    let job_queue = Arc::new(MemoryJobQueue::new());

    let deps = Arc::new(ServerDeps::new(
        Arc::new(MemoryContentStore::new()),
        settings,
        Arc::new(MemorySummaryStore::new()),
        job_queue.clone(),
        Arc::new(summarizer),
    ));

    // Register job handlers and spawn the runner
    let mut registry = JobRegistry::new();
    register_jobs(&mut registry);
    let runner = JobRunner::new(job_queue, Arc::new(registry), deps.clone());
    tokio::spawn(async move {
        if let Err(e) = runner.run().await {
            tracing::error!(error = %e, "Job runner exited with error");
        }
    });

    // Build application
    let app = build_app(deps);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Admin page: http://localhost:{}/admin", config.port);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
