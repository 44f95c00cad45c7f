use chrono::{DateTime, Utc};
use nutype::nutype;

use crate::macros::id;

id!(FormSubmissionId);

/// A contact form submission as it is stored.
///
/// Submissions are never modified after they have been written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub id: FormSubmissionId,
    pub name: SubmissionName,
    pub email: SubmissionEmail,
    pub subject: Option<SubmissionSubject>,
    pub message: SubmissionMessage,
    /// Time at which the submission was written, taken from the server clock.
    pub timestamp: DateTime<Utc>,
}

/// A validated contact form submission that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmissionCandidate {
    pub name: SubmissionName,
    pub email: SubmissionEmail,
    pub subject: Option<SubmissionSubject>,
    pub message: SubmissionMessage,
}

impl FormSubmission {
    pub fn new(
        id: FormSubmissionId,
        candidate: FormSubmissionCandidate,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let FormSubmissionCandidate {
            name,
            email,
            subject,
            message,
        } = candidate;

        Self {
            id,
            name,
            email,
            subject,
            message,
            timestamp,
        }
    }
}

#[nutype(
    sanitize(trim),
    validate(
        len_char_min = SubmissionName::MIN_LEN,
        len_char_max = SubmissionName::MAX_LEN
    ),
    derive(Debug, Clone, PartialEq, Eq, Deref, TryFrom, Serialize, Deserialize)
)]
pub struct SubmissionName(String);

impl SubmissionName {
    pub const MIN_LEN: usize = 2;
    pub const MAX_LEN: usize = 100;
}

#[nutype(
    sanitize(trim),
    validate(predicate = is_valid_email),
    derive(Debug, Clone, PartialEq, Eq, Deref, TryFrom, Serialize, Deserialize)
)]
pub struct SubmissionEmail(String);

#[nutype(
    sanitize(trim),
    validate(len_char_max = SubmissionSubject::MAX_LEN),
    derive(Debug, Clone, PartialEq, Eq, Deref, TryFrom, Serialize, Deserialize)
)]
pub struct SubmissionSubject(String);

impl SubmissionSubject {
    pub const MAX_LEN: usize = 200;
}

#[nutype(
    sanitize(trim),
    validate(
        len_char_min = SubmissionMessage::MIN_LEN,
        len_char_max = SubmissionMessage::MAX_LEN
    ),
    derive(Debug, Clone, PartialEq, Eq, Deref, TryFrom, Serialize, Deserialize)
)]
pub struct SubmissionMessage(String);

impl SubmissionMessage {
    pub const MIN_LEN: usize = 10;
    pub const MAX_LEN: usize = 1000;
}

/// Checks for an address of the form `local@domain.tld`.
///
/// On top of the syntax check of [`lettre::Address`], the domain must consist
/// of at least two labels made of letters, digits and hyphens, the last of
/// which is alphabetic. This rules out `user@localhost`, domain literals and
/// quoted local parts.
pub fn is_valid_email(address: &str) -> bool {
    let Ok(address) = address.parse::<lettre::Address>() else {
        return false;
    };
    if address.user().is_empty() || address.user().starts_with('"') {
        return false;
    }

    let labels = address.domain().split('.').collect::<Vec<_>>();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty() && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
        })
        && labels
            .last()
            .is_some_and(|tld| tld.len() >= 2 && tld.bytes().all(|b| b.is_ascii_alphabetic()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email() {
        for (input, expected) in [
            ("jo@example.com", true),
            ("jo.lee+contact@mail.example.co.uk", true),
            ("jo@example", false),
            ("jo@localhost", false),
            ("jo@example.c", false),
            ("jo@example.123", false),
            ("jo@.com", false),
            ("jo@example..com", false),
            ("@example.com", false),
            ("jo example.com", false),
            ("jo@exa mple.com", false),
            ("Jo Lee <jo@example.com>", false),
            ("\"jo lee\"@example.com", false),
            ("\"jo\"@example.com", false),
            ("", false),
        ] {
            assert_eq!(is_valid_email(input), expected, "{input:?}");
        }
    }

    #[test]
    fn name_is_trimmed() {
        let name = SubmissionName::try_new("  Jo Lee \n").unwrap();
        assert_eq!(name.into_inner(), "Jo Lee");
    }

    #[test]
    fn name_length_is_checked_after_trimming() {
        assert!(SubmissionName::try_new("  J  ").is_err());
        assert!(SubmissionName::try_new(" Jo ").is_ok());
    }

    #[test]
    fn length_counts_characters() {
        let name = "ü".repeat(SubmissionName::MAX_LEN);
        assert!(SubmissionName::try_new(name).is_ok());
    }

    #[test]
    fn subject_may_be_empty() {
        let subject = SubmissionSubject::try_new("   ").unwrap();
        assert_eq!(subject.into_inner(), "");
    }

    #[test]
    fn new_submission() {
        let candidate = FormSubmissionCandidate {
            name: "Jo Lee".try_into().unwrap(),
            email: "jo@example.com".try_into().unwrap(),
            subject: None,
            message: "Hello, this is a test message.".try_into().unwrap(),
        };
        let id = FormSubmissionId::from(uuid::Uuid::nil());
        let timestamp = DateTime::UNIX_EPOCH;

        let submission = FormSubmission::new(id, candidate.clone(), timestamp);

        assert_eq!(submission.id, id);
        assert_eq!(submission.name, candidate.name);
        assert_eq!(submission.subject, None);
        assert_eq!(submission.timestamp, timestamp);
    }
}
