//! Best-effort e-mail notification for newly stored leads.
//!
//! The notifier never fails its caller: missing configuration yields
//! [`NotificationOutcome::Skipped`], a transport error yields
//! [`NotificationOutcome::Failed`], and nothing is retried.

mod resend;
pub mod template;

use std::fmt;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;

use super::domain::Lead;

pub use resend::ResendTransport;
pub use template::RenderedEmail;

pub const DEFAULT_FROM: &str = "SCAR Landing Page <noreply@scarsafety.com>";
pub const DEFAULT_COMPANY_NAME: &str = "SCAR Safety Management";

pub const SKIP_MISSING_API_KEY: &str = "API key not configured";
pub const SKIP_MISSING_RECIPIENT: &str = "Recipient email not configured";

/// Settings injected into the notifier at construction.
#[derive(Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    pub api_key: Option<String>,
    pub recipient: Option<String>,
    pub from: String,
    pub company_name: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            recipient: None,
            from: DEFAULT_FROM.to_string(),
            company_name: DEFAULT_COMPANY_NAME.to_string(),
        }
    }
}

impl fmt::Debug for NotificationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("recipient", &self.recipient)
            .field("from", &self.from)
            .field("company_name", &self.company_name)
            .finish()
    }
}

/// Message handed to the outbound transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Outbound e-mail provider.
#[async_trait]
pub trait EmailTransport: Send + Sync {
    async fn send(&self, api_key: &str, email: &OutboundEmail) -> Result<(), TransportError>;
}

/// Result of a single notification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    Skipped { reason: String },
    Sent,
    Failed { error: String },
}

impl NotificationOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Skipped { .. } => "skipped",
            Self::Sent => "sent",
            Self::Failed { .. } => "failed",
        }
    }
}

pub struct LeadNotifier<T> {
    config: NotificationConfig,
    transport: T,
}

impl<T> LeadNotifier<T>
where
    T: EmailTransport,
{
    pub fn new(config: NotificationConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Render and send the lead summary to the configured recipient.
    pub async fn dispatch(&self, lead: &Lead) -> NotificationOutcome {
        let Some(api_key) = configured_value(self.config.api_key.as_deref()) else {
            return NotificationOutcome::Skipped {
                reason: SKIP_MISSING_API_KEY.to_string(),
            };
        };
        let Some(recipient) = configured_value(self.config.recipient.as_deref()) else {
            return NotificationOutcome::Skipped {
                reason: SKIP_MISSING_RECIPIENT.to_string(),
            };
        };

        let rendered = template::render(lead, &self.config.company_name, Utc::now());
        let email = OutboundEmail {
            from: self.config.from.clone(),
            to: vec![recipient.to_string()],
            subject: rendered.subject,
            html: rendered.html,
            text: rendered.text,
        };

        match self.transport.send(api_key, &email).await {
            Ok(()) => {
                tracing::debug!(%recipient, lead.name = lead.name(), "lead notification accepted");
                NotificationOutcome::Sent
            }
            Err(err) => NotificationOutcome::Failed {
                error: err.to_string(),
            },
        }
    }
}

fn configured_value(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}
