use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::{EmailTransport, OutboundEmail, TransportError};

/// Sends notifications through the Resend `POST /emails` API.
pub struct ResendTransport {
    client: Client,
    endpoint: String,
}

impl ResendTransport {
    pub fn new(client: Client, api_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/emails", api_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl EmailTransport for ResendTransport {
    async fn send(&self, api_key: &str, email: &OutboundEmail) -> Result<(), TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(email)
            .send()
            .await
            .map_err(|err| TransportError(format!("email provider unreachable: {err}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.bytes().await.unwrap_or_default();
        Err(map_status_error(status, body.as_ref()))
    }
}

#[derive(Debug, Deserialize)]
struct ResendErrorBody {
    message: Option<String>,
}

fn map_status_error(status: StatusCode, body: &[u8]) -> TransportError {
    match serde_json::from_slice::<ResendErrorBody>(body)
        .ok()
        .and_then(|decoded| decoded.message)
    {
        Some(message) => TransportError(format!(
            "email provider rejected message ({status}): {message}"
        )),
        None => TransportError(format!("email provider rejected message ({status})")),
    }
}
