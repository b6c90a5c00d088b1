//! Lead capture pipeline: form → validation → storage → notification → response.

pub mod domain;
pub mod form;
pub mod notify;
pub mod postgrest;
pub mod router;
pub mod service;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{Lead, LeadResponse, LeadSubmission};
pub use form::{
    EndpointError, FormError, FormField, FormState, HttpLeadEndpoint, LeadEndpoint, LeadFields,
    LeadForm, FAILURE_MESSAGE, SUCCESS_MESSAGE,
};
pub use notify::{
    EmailTransport, LeadNotifier, NotificationConfig, NotificationOutcome, OutboundEmail,
    ResendTransport, TransportError,
};
pub use postgrest::PostgrestLeadStore;
pub use router::lead_router;
pub use service::{IntakeReceipt, LeadIntakeService, LeadServiceError};
pub use store::{InMemoryLeadStore, LeadStore, StoreError};
pub use validation::{validate, ValidationError};
