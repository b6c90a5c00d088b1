use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use scar_leads::config::StorageConfig;
use scar_leads::leads::{InMemoryLeadStore, Lead, LeadStore, PostgrestLeadStore, StoreError};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Storage backend picked from configuration at startup.
pub(crate) enum ConfiguredLeadStore {
    Postgrest(PostgrestLeadStore),
    InMemory(InMemoryLeadStore),
}

impl ConfiguredLeadStore {
    pub(crate) fn from_config(client: reqwest::Client, storage: Option<&StorageConfig>) -> Self {
        match storage {
            Some(storage) => Self::Postgrest(PostgrestLeadStore::new(
                client,
                &storage.url,
                storage.api_key.clone(),
            )),
            None => Self::InMemory(InMemoryLeadStore::default()),
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Postgrest(_) => "postgrest",
            Self::InMemory(_) => "in-memory",
        }
    }
}

#[async_trait]
impl LeadStore for ConfiguredLeadStore {
    async fn insert(&self, lead: &Lead) -> Result<(), StoreError> {
        match self {
            Self::Postgrest(store) => store.insert(lead).await,
            Self::InMemory(store) => store.insert(lead).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scar_leads::leads::{validate, LeadSubmission};

    #[test]
    fn picks_backend_from_storage_config() {
        let client = reqwest::Client::new();
        let storage = StorageConfig {
            url: "https://db.example.test".to_string(),
            api_key: "anon".to_string(),
        };

        assert_eq!(
            ConfiguredLeadStore::from_config(client.clone(), Some(&storage)).label(),
            "postgrest"
        );
        assert_eq!(
            ConfiguredLeadStore::from_config(client, None).label(),
            "in-memory"
        );
    }

    #[tokio::test]
    async fn in_memory_backend_keeps_leads() {
        let store = ConfiguredLeadStore::from_config(reqwest::Client::new(), None);
        let lead = validate(LeadSubmission {
            name: Some("Jo Smith".to_string()),
            email: Some("jo@example.com".to_string()),
            ..LeadSubmission::default()
        })
        .expect("valid lead");

        store.insert(&lead).await.expect("stored");

        match store {
            ConfiguredLeadStore::InMemory(inner) => assert_eq!(inner.leads(), vec![lead]),
            ConfiguredLeadStore::Postgrest(_) => panic!("expected in-memory backend"),
        }
    }
}
