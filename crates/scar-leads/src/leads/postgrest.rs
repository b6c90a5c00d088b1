//! Reqwest-backed adapter writing leads into a hosted PostgREST `leads` table.
//!
//! The adapter owns transport details only: headers, status mapping, and
//! decoding the backend's error payload into a [`StoreError`].

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::domain::Lead;
use super::store::{LeadStore, StoreError};

const LEADS_TABLE_PATH: &str = "rest/v1/leads";

pub struct PostgrestLeadStore {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl PostgrestLeadStore {
    /// `base_url` is the project URL, e.g. `https://abc.supabase.co`.
    pub fn new(client: Client, base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: format!("{}/{LEADS_TABLE_PATH}", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LeadStore for PostgrestLeadStore {
    async fn insert(&self, lead: &Lead) -> Result<(), StoreError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("apikey", self.api_key.as_str())
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(lead)
            .send()
            .await
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        Err(map_status_error(status, body.as_ref()))
    }
}

#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    message: Option<String>,
}

fn map_status_error(status: StatusCode, body: &[u8]) -> StoreError {
    let message = serde_json::from_slice::<PostgrestErrorBody>(body)
        .ok()
        .and_then(|decoded| decoded.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("storage request failed with status {status}"));
    StoreError::Rejected(message)
}
