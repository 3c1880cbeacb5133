//! Outbound "leave now" notifications.

mod telegram;

use std::future::Future;

pub use telegram::{TELEGRAM_API_URL, TelegramNotifier};

/// Errors from a notification transport.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("notification rejected ({status}): {description}")]
    Rejected { status: u16, description: String },
}

/// Delivers one-line messages to the user.
pub trait Notifier {
    fn notify(&self, message: &str) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// An absent notifier accepts every message.
impl<N: Notifier + Sync> Notifier for Option<N> {
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        match self {
            Some(notifier) => notifier.notify(message).await,
            None => Ok(()),
        }
    }
}
