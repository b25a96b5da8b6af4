//! Telegram delivery
//!
//! Sending is best effort: failures are logged and reported as `false`,
//! never raised, so a flaky chat API cannot stop the poll loop.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

/// Delivers a text message to the bot's single recipient
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send `text`; returns whether delivery was confirmed
    async fn send(&self, text: &str) -> bool;
}

/// Telegram Bot API client bound to one chat
pub struct TelegramNotifier {
    client: Client,
    api_url: String,
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(api_url: impl Into<String>, token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            token: token.into(),
            chat_id: chat_id.into(),
        }
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_url.trim_end_matches('/'), self.token)
    }

    fn build_body(&self, text: &str) -> Value {
        json!({
            "chat_id": self.chat_id,
            "text": text
        })
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> bool {
        let response = match self
            .client
            .post(self.send_message_url())
            .json(&self.build_body(text))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                // reqwest errors embed the URL, which carries the token
                log::error!("Failed to send Telegram message: {}", e.without_url());
                return false;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            log::error!("Telegram API error {}: {}", status, error_body);
            return false;
        }

        match response.json::<Value>().await {
            Ok(body) if body["ok"].as_bool() == Some(false) => {
                log::error!("Telegram rejected message: {}", body["description"]);
                false
            }
            Ok(_) => {
                log::debug!("Message delivered to chat {}: {}", self.chat_id, text);
                true
            }
            Err(e) => {
                log::error!("Failed to parse Telegram response: {}", e.without_url());
                false
            }
        }
    }
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("api_url", &self.api_url)
            .field("chat_id", &self.chat_id)
            .finish()
    }
}
