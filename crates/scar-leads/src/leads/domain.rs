use serde::{Deserialize, Serialize};

/// Raw payload posted by the landing page form.
///
/// Every field is optional at this layer so that missing values surface as
/// validation errors rather than deserialization failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSubmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A validated contact request, shaped like a row of the `leads` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lead {
    name: String,
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl Lead {
    /// Only the validator builds leads; blank optionals collapse to `None`.
    pub(crate) fn new(
        name: String,
        email: String,
        organization: Option<String>,
        message: Option<String>,
    ) -> Self {
        Self {
            name,
            email,
            organization: organization.filter(|value| !value.is_empty()),
            message: message.filter(|value| !value.is_empty()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Body returned by the lead endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LeadResponse {
    pub fn accepted() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(message.into()),
        }
    }
}
