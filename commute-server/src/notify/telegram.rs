//! Telegram Bot API transport.

use serde::{Deserialize, Serialize};

use crate::config::{ChatId, TelegramSection};

use super::{Notifier, NotifyError};

/// Base URL of the Telegram Bot API.
pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";

const TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a ChatId,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends messages to one chat through a bot.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    http: reqwest::Client,
    base_url: String,
    bot_token: String,
    chat_id: ChatId,
}

impl TelegramNotifier {
    pub fn new(section: &TelegramSection) -> Result<Self, NotifyError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: TELEGRAM_API_URL.to_string(),
            bot_token: section.bot_token.clone(),
            chat_id: section.chat_id.clone(),
        })
    }

    /// Point at a different API host (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.base_url, self.bot_token)
    }
}

impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        let response = self
            .http
            .post(self.send_message_url())
            .json(&SendMessage {
                chat_id: &self.chat_id,
                text: message,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let parsed: Option<ApiResponse> = serde_json::from_str(&body).ok();

        match parsed {
            Some(ApiResponse { ok: true, .. }) if status.is_success() => Ok(()),
            Some(ApiResponse { description, .. }) => Err(NotifyError::Rejected {
                status: status.as_u16(),
                description: description.unwrap_or_else(|| "no description".to_string()),
            }),
            None => Err(NotifyError::Rejected {
                status: status.as_u16(),
                description: body.chars().take(200).collect(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(chat_id: ChatId) -> TelegramSection {
        TelegramSection {
            bot_token: "123:abc".into(),
            chat_id,
        }
    }

    #[test]
    fn send_message_url() {
        let notifier = TelegramNotifier::new(&section(ChatId::Id(42))).unwrap();
        assert_eq!(
            notifier.send_message_url(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );

        let notifier = notifier.with_base_url("http://localhost:8081/");
        assert_eq!(
            notifier.send_message_url(),
            "http://localhost:8081/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn request_body_shape() {
        let numeric = ChatId::Id(-1001);
        let body = serde_json::to_value(SendMessage {
            chat_id: &numeric,
            text: "hi",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"chat_id": -1001, "text": "hi"}));

        let channel = ChatId::Name("@commute".into());
        let body = serde_json::to_value(SendMessage {
            chat_id: &channel,
            text: "hi",
        })
        .unwrap();
        assert_eq!(body["chat_id"], "@commute");
    }

    #[tokio::test]
    async fn unreachable_api_is_an_http_error() {
        let notifier = TelegramNotifier::new(&section(ChatId::Id(42)))
            .unwrap()
            .with_base_url("http://127.0.0.1:9");

        let result = notifier.notify("LEAVE NOW!").await;
        assert!(matches!(result, Err(NotifyError::Http(_))));
    }

    #[tokio::test]
    async fn absent_notifier_succeeds() {
        let notifier: Option<TelegramNotifier> = None;
        assert!(notifier.notify("LEAVE NOW!").await.is_ok());
    }
}
