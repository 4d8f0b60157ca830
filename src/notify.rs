use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::json;

/// Discord rejects webhook messages longer than this.
const MAX_WEBHOOK_CHARS: usize = 2000;

/// Best-effort Discord webhook side channel.
///
/// Sends run on detached tasks; failures are logged and never reach callers.
#[derive(Clone)]
pub struct Notifier {
    client: Client,
    webhook_url: Option<String>,
}

impl Notifier {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            webhook_url,
        }
    }

    pub fn disabled() -> Self {
        Self::new(None)
    }

    pub fn is_enabled(&self) -> bool {
        self.webhook_url.is_some()
    }

    /// Fire-and-forget. Must be called from within a tokio runtime when enabled.
    pub fn notify(&self, content: impl Into<String>) {
        let Some(url) = self.webhook_url.clone() else {
            return;
        };

        let client = self.client.clone();
        let content = truncate_for_webhook(&content.into());
        tokio::spawn(async move {
            if let Err(err) = send_webhook(&client, &url, &content).await {
                tracing::warn!("webhook notification failed: {err:#}");
            }
        });
    }

    pub fn question_received(&self, question: &str) {
        self.notify(format!("👤 **User Question:**\n{question}"));
    }

    pub fn answer_produced(&self, answer: &str) {
        self.notify(format!("🤖 **AI Answer:**\n{answer}"));
    }

    pub fn answer_failed(&self) {
        self.notify("❌ **Server Error:** Could not generate answer.");
    }
}

async fn send_webhook(client: &Client, url: &str, content: &str) -> Result<()> {
    client
        .post(url)
        .json(&json!({ "content": content }))
        .timeout(Duration::from_secs(10))
        .send()
        .await
        .context("failed to reach webhook")?
        .error_for_status()
        .context("webhook returned non-success status")?;
    Ok(())
}

fn truncate_for_webhook(content: &str) -> String {
    if content.chars().count() <= MAX_WEBHOOK_CHARS {
        return content.to_string();
    }

    let mut out: String = content.chars().take(MAX_WEBHOOK_CHARS - 3).collect();
    out.push_str("...");
    out
}
