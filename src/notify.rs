use crate::error::{LabopsError, Result};
use reqwest::blocking::Client;
use serde_json::json;
use url::Url;

const BOT_USERNAME: &str = "Homelab Bot";
const BOT_AVATAR_URL: &str = "https://cdn.discordapp.com/attachments/123456789/bot-avatar.png";

/// Discord webhook client with a fixed bot identity.
pub struct DiscordNotifier {
    client: Client,
    webhook_url: String,
}

impl DiscordNotifier {
    pub fn new(webhook_url: &str) -> Result<Self> {
        validate_webhook_url(webhook_url)?;

        let client = Client::builder()
            .user_agent("labops")
            .build()
            .map_err(|e| LabopsError::Notification(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            webhook_url: webhook_url.to_string(),
        })
    }

    /// POST the message as JSON; any non-2xx response is an error.
    pub fn post(&self, content: &str) -> Result<()> {
        let payload = json!({
            "content": content,
            "username": BOT_USERNAME,
            "avatar_url": BOT_AVATAR_URL,
        });

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .map_err(|e| {
                LabopsError::Notification(format!("Failed to send Discord notification: {e}"))
            })?;

        if !response.status().is_success() {
            return Err(LabopsError::Notification(format!(
                "Discord webhook returned HTTP {}",
                response.status()
            )));
        }

        Ok(())
    }
}

fn validate_webhook_url(url: &str) -> Result<()> {
    let parsed =
        Url::parse(url).map_err(|_| LabopsError::Config(format!("Invalid webhook URL: {url}")))?;

    match parsed.scheme() {
        "https" | "http" => Ok(()),
        scheme => Err(LabopsError::Config(format!(
            "Unsupported webhook scheme: {scheme}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_https_webhook() {
        assert!(validate_webhook_url("https://discord.com/api/webhooks/1/abc").is_ok());
    }

    #[test]
    fn rejects_invalid_scheme() {
        let err = validate_webhook_url("ftp://discord.example/hook").unwrap_err();
        assert!(matches!(err, LabopsError::Config(_)));
    }

    #[test]
    fn rejects_unparseable_url() {
        assert!(DiscordNotifier::new("not a url").is_err());
    }
}
