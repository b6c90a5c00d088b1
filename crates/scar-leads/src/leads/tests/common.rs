use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::leads::domain::{Lead, LeadSubmission};
use crate::leads::notify::{
    EmailTransport, LeadNotifier, NotificationConfig, OutboundEmail, TransportError,
};
use crate::leads::service::LeadIntakeService;
use crate::leads::store::{InMemoryLeadStore, LeadStore, StoreError};

pub(super) fn submission(name: &str, email: &str) -> LeadSubmission {
    LeadSubmission {
        name: Some(name.to_string()),
        email: Some(email.to_string()),
        organization: None,
        message: None,
    }
}

pub(super) fn jo_smith() -> LeadSubmission {
    submission("Jo Smith", "jo@example.com")
}

pub(super) fn email_configured() -> NotificationConfig {
    NotificationConfig {
        api_key: Some("re_test".to_string()),
        recipient: Some("sales@scarsafety.com".to_string()),
        ..NotificationConfig::default()
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryTransport {
    sent: Arc<Mutex<Vec<OutboundEmail>>>,
    attempts: Arc<AtomicUsize>,
    fail_with: Option<String>,
}

impl MemoryTransport {
    pub(super) fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub(super) fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().expect("transport mutex poisoned").clone()
    }

    pub(super) fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmailTransport for MemoryTransport {
    async fn send(&self, _api_key: &str, email: &OutboundEmail) -> Result<(), TransportError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.fail_with {
            return Err(TransportError(message.clone()));
        }
        self.sent
            .lock()
            .expect("transport mutex poisoned")
            .push(email.clone());
        Ok(())
    }
}

/// Store that refuses every write with a fixed backend message.
#[derive(Default)]
pub(super) struct RejectingStore {
    pub(super) attempts: AtomicUsize,
}

pub(super) const REJECTING_STORE_MESSAGE: &str =
    "new row violates row-level security policy for table \"leads\"";

#[async_trait]
impl LeadStore for RejectingStore {
    async fn insert(&self, _lead: &Lead) -> Result<(), StoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Rejected(REJECTING_STORE_MESSAGE.to_string()))
    }
}

pub(super) fn build_service(
    config: NotificationConfig,
    transport: MemoryTransport,
) -> (
    LeadIntakeService<InMemoryLeadStore, MemoryTransport>,
    InMemoryLeadStore,
) {
    let store = InMemoryLeadStore::default();
    let service = LeadIntakeService::new(
        Arc::new(store.clone()),
        LeadNotifier::new(config, transport),
    );
    (service, store)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
