use super::domain::{Lead, LeadSubmission};

pub const MIN_NAME_CHARS: usize = 2;
pub const MAX_MESSAGE_CHARS: usize = 1000;

/// Reasons a submission is turned away before it reaches storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name is required")]
    MissingName,
    #[error("name must contain at least 2 characters")]
    NameTooShort,
    #[error("email is required")]
    MissingEmail,
    #[error("email must be a valid email address")]
    InvalidEmail,
    #[error("message must contain at most 1000 characters")]
    MessageTooLong,
}

/// Checks a submission against the intake rules, in order: name, email, message.
pub fn validate(submission: LeadSubmission) -> Result<Lead, ValidationError> {
    let LeadSubmission {
        name,
        email,
        organization,
        message,
    } = submission;

    let name = name.ok_or(ValidationError::MissingName)?;
    if text_len(&name) < MIN_NAME_CHARS {
        return Err(ValidationError::NameTooShort);
    }

    let email = email.ok_or(ValidationError::MissingEmail)?;
    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }

    if let Some(message) = &message {
        if text_len(message) > MAX_MESSAGE_CHARS {
            return Err(ValidationError::MessageTooLong);
        }
    }

    Ok(Lead::new(name, email, organization, message))
}

/// Length in UTF-16 code units, matching how browser-side validators count.
fn text_len(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Practical address grammar: `local@label.label.tld`.
///
/// The local part allows ASCII alphanumerics plus `_ ' + - .`, may not start
/// with a dot and must end on something other than `.` or `'`. Each domain
/// label starts with an alphanumeric and continues with alphanumerics or
/// hyphens; the final label is two or more ASCII letters. Consecutive dots are
/// rejected anywhere in the address.
pub fn is_valid_email(candidate: &str) -> bool {
    if candidate.contains("..") {
        return false;
    }

    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };

    valid_local_part(local) && valid_domain(domain)
}

fn valid_local_part(local: &str) -> bool {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '\'' | '+' | '-' | '.');

    match local.chars().last() {
        Some(last) if last.is_ascii_alphanumeric() || matches!(last, '_' | '+' | '-') => {}
        _ => return false,
    }

    !local.starts_with('.') && local.chars().all(allowed)
}

fn valid_domain(domain: &str) -> bool {
    let Some((labels, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic());
    tld_ok && labels.split('.').all(valid_label)
}

fn valid_label(label: &str) -> bool {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
        }
        _ => false,
    }
}
