use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::domain::Lead;

/// Insert-only storage for accepted leads.
#[async_trait]
pub trait LeadStore: Send + Sync {
    async fn insert(&self, lead: &Lead) -> Result<(), StoreError>;
}

/// Storage failures. The display text is exactly what callers see in the `error` field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The storage backend refused the write; carries its message verbatim.
    #[error("{0}")]
    Rejected(String),
    /// The backend could not be reached; carries the transport's message verbatim.
    #[error("{0}")]
    Unavailable(String),
}

/// Append-only in-process store for local development and tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryLeadStore {
    leads: Arc<Mutex<Vec<Lead>>>,
}

impl InMemoryLeadStore {
    pub fn leads(&self) -> Vec<Lead> {
        match self.leads.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.leads().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LeadStore for InMemoryLeadStore {
    async fn insert(&self, lead: &Lead) -> Result<(), StoreError> {
        let mut guard = self
            .leads
            .lock()
            .map_err(|_| StoreError::Unavailable("in-memory store poisoned".to_string()))?;
        guard.push(lead.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leads::domain::LeadSubmission;
    use crate::leads::validation::validate;

    #[tokio::test]
    async fn duplicate_inserts_are_kept_independently() {
        let store = InMemoryLeadStore::default();
        let lead = validate(LeadSubmission {
            name: Some("Jo Smith".to_string()),
            email: Some("jo@example.com".to_string()),
            ..LeadSubmission::default()
        })
        .expect("valid lead");

        store.insert(&lead).await.expect("first insert");
        store.insert(&lead).await.expect("second insert");

        assert_eq!(store.len(), 2);
        assert_eq!(store.leads(), vec![lead.clone(), lead]);
    }

    #[test]
    fn rejected_errors_display_the_backend_message() {
        let err = StoreError::Rejected("duplicate key value violates constraint".to_string());
        assert_eq!(err.to_string(), "duplicate key value violates constraint");
    }

    #[test]
    fn unavailable_errors_display_the_transport_message() {
        let err = StoreError::Unavailable("error sending request for url".to_string());
        assert_eq!(err.to_string(), "error sending request for url");
    }
}
