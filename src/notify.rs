//! Moderator webhook notifications.
//!
//! New applications are announced to a configured webhook as a rich embed,
//! the same shape Discord-compatible webhooks accept. Delivery is best
//! effort: the submission itself never fails because the webhook did.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use serde_json::json;
use tracing::{debug, info};

use crate::config::WebhookConfig;

#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    http_client: reqwest::Client,
    url: Option<String>,
}

impl WebhookNotifier {
    pub fn new(config: &WebhookConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("access-gate/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        match &config.url {
            Some(_) => info!("Moderator webhook notifications enabled"),
            None => info!("No webhook URL configured, notifications disabled"),
        }

        Self {
            http_client,
            url: config.url.clone(),
        }
    }

    /// Announce a new application to the moderators.
    pub async fn notify_new_request(&self, userid: u64, github_link: &str) -> Result<()> {
        let Some(url) = &self.url else {
            debug!(userid, "Skipping webhook notification (no URL configured)");
            return Ok(());
        };

        let payload = json!({
            "embeds": [{
                "title": "New application to join",
                "description": format!("User: <@{userid}>"),
                "timestamp": Utc::now().to_rfc3339(),
                "fields": [
                    { "name": "User ID", "value": format!("```{userid}```") },
                    { "name": "Github Link:", "value": github_link },
                    { "name": "Status", "value": "```PENDING```" },
                ],
            }],
        });

        let response = self
            .http_client
            .post(url)
            .json(&payload)
            .send()
            .await
            .context("Failed to send webhook notification")?;

        if !response.status().is_success() {
            bail!("Webhook answered {}", response.status());
        }

        debug!(userid, "Webhook notification delivered");
        Ok(())
    }
}
