use std::sync::Arc;

use tracing::{error, info, warn};

use super::domain::{Lead, LeadSubmission};
use super::notify::{EmailTransport, LeadNotifier, NotificationOutcome};
use super::store::{LeadStore, StoreError};
use super::validation::{validate, ValidationError};

/// Service composing validation, storage, and the best-effort notifier.
pub struct LeadIntakeService<S, T> {
    store: Arc<S>,
    notifier: LeadNotifier<T>,
}

/// What happened to an accepted lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeReceipt {
    pub lead: Lead,
    pub notification: NotificationOutcome,
}

/// Error raised by the intake service. Only these reach the caller.
#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl<S, T> LeadIntakeService<S, T>
where
    S: LeadStore + 'static,
    T: EmailTransport + 'static,
{
    pub fn new(store: Arc<S>, notifier: LeadNotifier<T>) -> Self {
        Self { store, notifier }
    }

    /// Validate, persist, then notify. Storage success alone decides the result.
    pub async fn submit(
        &self,
        submission: LeadSubmission,
    ) -> Result<IntakeReceipt, LeadServiceError> {
        let lead = validate(submission).inspect_err(|err| {
            info!(error = %err, "lead submission rejected");
        })?;

        self.store.insert(&lead).await.inspect_err(|err| {
            error!(error = %err, "failed to store lead");
        })?;

        let notification = self.notifier.dispatch(&lead).await;
        match &notification {
            NotificationOutcome::Skipped { reason } => {
                warn!(%reason, "lead notification skipped");
            }
            NotificationOutcome::Failed { error } => {
                error!(%error, "lead notification failed");
            }
            NotificationOutcome::Sent => {
                info!(lead.name = lead.name(), "lead notification sent");
            }
        }

        Ok(IntakeReceipt { lead, notification })
    }
}
