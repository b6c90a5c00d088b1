//! Client side of the lead pipeline: the early-access form and its HTTP client.
//!
//! The form only checks that required fields are present; the endpoint is the
//! single authority on whether a submission is acceptable.

use async_trait::async_trait;
use reqwest::Client;

use super::domain::{LeadResponse, LeadSubmission};

pub const SUCCESS_MESSAGE: &str = "Thank you! We'll be in touch soon.";
pub const FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Lifecycle of a single form instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Organization,
    Message,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Organization => "organization",
            Self::Message => "message",
        }
    }
}

/// Values typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadFields {
    pub name: String,
    pub email: String,
    pub organization: String,
    pub message: String,
}

impl LeadFields {
    fn slot(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Organization => &mut self.organization,
            FormField::Message => &mut self.message,
        }
    }

    /// Required fields that are still blank.
    pub fn missing_required(&self) -> Vec<FormField> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push(FormField::Name);
        }
        if self.email.trim().is_empty() {
            missing.push(FormField::Email);
        }
        missing
    }

    pub fn to_submission(&self) -> LeadSubmission {
        let optional = |value: &str| (!value.is_empty()).then(|| value.to_string());
        LeadSubmission {
            name: Some(self.name.clone()),
            email: Some(self.email.clone()),
            organization: optional(&self.organization),
            message: optional(&self.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("a submission is already in flight")]
    InFlight,
    #[error("{} is required", .0.label())]
    MissingField(FormField),
}

#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    #[error("lead endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Where the form posts its payload.
#[async_trait]
pub trait LeadEndpoint: Send + Sync {
    async fn post(&self, submission: &LeadSubmission) -> Result<LeadResponse, EndpointError>;
}

/// Posts JSON to the lead handler and decodes `{ok, error}` whatever the status.
pub struct HttpLeadEndpoint {
    client: Client,
    url: String,
}

impl HttpLeadEndpoint {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl LeadEndpoint for HttpLeadEndpoint {
    async fn post(&self, submission: &LeadSubmission) -> Result<LeadResponse, EndpointError> {
        let response = self.client.post(&self.url).json(submission).send().await?;
        Ok(response.json::<LeadResponse>().await?)
    }
}

#[derive(Debug, Default)]
pub struct LeadForm {
    fields: LeadFields,
    state: FormState,
}

impl LeadForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &LeadFields {
        &self.fields
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn can_submit(&self) -> bool {
        self.state != FormState::Submitting
    }

    /// Update one field. A resolved form returns to idle on the next edit.
    pub fn edit(&mut self, field: FormField, value: impl Into<String>) {
        *self.fields.slot(field) = value.into();
        if matches!(self.state, FormState::Succeeded | FormState::Failed) {
            self.state = FormState::Idle;
        }
    }

    /// Move to `Submitting` and hand back the payload to send.
    pub fn begin_submit(&mut self) -> Result<LeadSubmission, FormError> {
        if self.state == FormState::Submitting {
            return Err(FormError::InFlight);
        }
        if let Some(field) = self.fields.missing_required().into_iter().next() {
            return Err(FormError::MissingField(field));
        }

        self.state = FormState::Submitting;
        Ok(self.fields.to_submission())
    }

    /// Apply the endpoint's answer to an in-flight submission.
    pub fn resolve(&mut self, outcome: Result<LeadResponse, EndpointError>) -> FormState {
        if self.state != FormState::Submitting {
            return self.state;
        }

        self.state = match outcome {
            Ok(LeadResponse { ok: true, .. }) => {
                self.fields = LeadFields::default();
                FormState::Succeeded
            }
            Ok(LeadResponse { ok: false, error }) => {
                tracing::debug!(?error, "lead endpoint rejected submission");
                FormState::Failed
            }
            Err(err) => {
                tracing::debug!(error = %err, "lead endpoint unreachable");
                FormState::Failed
            }
        };
        self.state
    }

    /// Run one full submit cycle against `endpoint`.
    pub async fn submit<E>(&mut self, endpoint: &E) -> Result<FormState, FormError>
    where
        E: LeadEndpoint + ?Sized,
    {
        let submission = self.begin_submit()?;
        let outcome = endpoint.post(&submission).await;
        Ok(self.resolve(outcome))
    }

    pub fn status_message(&self) -> Option<&'static str> {
        match self.state {
            FormState::Succeeded => Some(SUCCESS_MESSAGE),
            FormState::Failed => Some(FAILURE_MESSAGE),
            FormState::Idle | FormState::Submitting => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct ScriptedEndpoint {
        response: LeadResponse,
        seen: Mutex<Vec<LeadSubmission>>,
    }

    impl ScriptedEndpoint {
        fn answering(response: LeadResponse) -> Self {
            Self {
                response,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LeadEndpoint for ScriptedEndpoint {
        async fn post(&self, submission: &LeadSubmission) -> Result<LeadResponse, EndpointError> {
            self.seen
                .lock()
                .expect("endpoint mutex poisoned")
                .push(submission.clone());
            Ok(self.response.clone())
        }
    }

    fn filled_form() -> LeadForm {
        let mut form = LeadForm::new();
        form.edit(FormField::Name, "Jo Smith");
        form.edit(FormField::Email, "jo@example.com");
        form
    }

    #[tokio::test]
    async fn success_clears_fields() {
        let endpoint = ScriptedEndpoint::answering(LeadResponse::accepted());
        let mut form = filled_form();
        form.edit(FormField::Organization, "Acme Mining");

        let state = form.submit(&endpoint).await.expect("submits");

        assert_eq!(state, FormState::Succeeded);
        assert_eq!(form.fields(), &LeadFields::default());
        assert_eq!(form.status_message(), Some(SUCCESS_MESSAGE));
        let seen = endpoint.seen.lock().expect("mutex");
        assert_eq!(seen[0].organization.as_deref(), Some("Acme Mining"));
        assert_eq!(seen[0].message, None);
    }

    #[tokio::test]
    async fn rejection_preserves_fields() {
        let endpoint = ScriptedEndpoint::answering(LeadResponse::rejected("name too short"));
        let mut form = filled_form();
        let before = form.fields().clone();

        let state = form.submit(&endpoint).await.expect("submits");

        assert_eq!(state, FormState::Failed);
        assert_eq!(form.fields(), &before);
        assert_eq!(form.status_message(), Some(FAILURE_MESSAGE));
    }

    #[test]
    fn resubmission_is_refused_while_in_flight() {
        let mut form = filled_form();
        form.begin_submit().expect("first submit");

        assert!(!form.can_submit());
        assert_eq!(form.begin_submit(), Err(FormError::InFlight));
        assert_eq!(form.state(), FormState::Submitting);
    }

    #[test]
    fn blank_required_fields_block_submission() {
        let mut form = LeadForm::new();
        form.edit(FormField::Email, "jo@example.com");

        assert_eq!(
            form.begin_submit(),
            Err(FormError::MissingField(FormField::Name))
        );
        assert_eq!(form.state(), FormState::Idle);
    }

    #[test]
    fn presence_hint_does_not_check_email_syntax() {
        let mut form = LeadForm::new();
        form.edit(FormField::Name, "J");
        form.edit(FormField::Email, "not-an-email");

        let submission = form.begin_submit().expect("presence is enough");
        assert_eq!(submission.name.as_deref(), Some("J"));
    }

    #[test]
    fn editing_after_resolution_returns_to_idle() {
        let mut form = filled_form();
        form.begin_submit().expect("submits");
        form.resolve(Ok(LeadResponse::rejected("storage offline")));
        assert_eq!(form.state(), FormState::Failed);

        form.edit(FormField::Name, "Jo Smyth");

        assert_eq!(form.state(), FormState::Idle);
        assert_eq!(form.status_message(), None);
    }

    #[test]
    fn resolve_without_submission_is_ignored() {
        let mut form = filled_form();
        assert_eq!(form.resolve(Ok(LeadResponse::accepted())), FormState::Idle);
        assert_eq!(form.fields().name, "Jo Smith");
    }
}
