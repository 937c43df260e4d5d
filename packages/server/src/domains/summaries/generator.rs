//! Speakable summary generation against the OpenAI chat API.
//!
//! The credential and word limit are read from the settings store on every
//! call, so settings-page changes take effect without a restart. Every
//! failure mode degrades to an empty summary; nothing here surfaces an
//! error to whoever triggered publication.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient};
use tracing::{debug, warn};

use crate::kernel::traits::{SettingsStore, Summarizer};

/// Model used for summary generation.
const MODEL: &str = "gpt-3.5-turbo";

/// Hard cap on completion tokens. The configured word limit is advisory
/// text in the instruction, not an enforced bound; the model does not
/// reliably honor numeric limits expressed in natural language.
const MAX_COMPLETION_TOKENS: u32 = 256;

/// Summarizer backed by the OpenAI chat completions API.
pub struct OpenAiSummarizer {
    settings: Arc<dyn SettingsStore>,
    base_url: Option<String>,
}

impl OpenAiSummarizer {
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self {
            settings,
            base_url: None,
        }
    }

    /// Point at a non-default endpoint (proxy, compatible API).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    fn instruction(word_limit: u32) -> String {
        format!(
            "You are a text writer for a voice over. You summarize articles in \
             speakable format. Use simple language. Use short sentences. Do it \
             all in Dutch. Don't use English words. Keep the summary under {} words.",
            word_limit
        )
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(&self, text: &str) -> Result<String> {
        let api_key = self.settings.api_key().await?;
        if api_key.is_empty() {
            debug!("no API credential configured, skipping generation");
            return Ok(String::new());
        }

        let word_limit = self.settings.word_limit().await?;

        let mut client = OpenAIClient::new(api_key);
        if let Some(url) = &self.base_url {
            client = client.with_base_url(url.clone());
        }

        let request = ChatRequest::new(MODEL)
            .message(Message::system(Self::instruction(word_limit)))
            .message(Message::user(text))
            .max_tokens(MAX_COMPLETION_TOKENS);

        match client.chat_completion(request).await {
            Ok(response) => Ok(response.content.trim().to_string()),
            Err(e) => {
                warn!(error = %e, "summary generation failed");
                Ok(String::new())
            }
        }
    }
}
