use agency_core_submission_contracts::validate::SubmissionValidateService;
use agency_di::Build;
use agency_models::{
    submission::{
        FormSubmissionCandidate, SubmissionEmail, SubmissionMessage, SubmissionName,
        SubmissionSubject,
    },
    violation::{Violation, ViolationKind, Violations},
};
use serde_json::{Map, Value};

const NAME: &str = "name";
const EMAIL: &str = "email";
const SUBJECT: &str = "subject";
const MESSAGE: &str = "message";

const FIELDS: [&str; 4] = [NAME, EMAIL, SUBJECT, MESSAGE];

#[derive(Debug, Clone, Copy, Default, Build)]
pub struct SubmissionValidateServiceImpl;

impl SubmissionValidateService for SubmissionValidateServiceImpl {
    fn validate(&self, data: &Value) -> Result<FormSubmissionCandidate, Violations> {
        let Some(object) = data.as_object() else {
            return Err(Violation::new("value", ViolationKind::NotAnObject).into());
        };

        let mut violations = Vec::new();

        let name = collect(&mut violations, NAME, name(object));
        let email = collect(&mut violations, EMAIL, email(object));
        let subject = collect(&mut violations, SUBJECT, subject(object));
        let message = collect(&mut violations, MESSAGE, message(object));

        violations.extend(
            object
                .keys()
                .filter(|key| !FIELDS.contains(&key.as_str()))
                .map(|key| Violation::new(key.as_str(), ViolationKind::NotAllowed)),
        );

        let candidate = name.zip(email).zip(subject).zip(message).map(
            |(((name, email), subject), message)| FormSubmissionCandidate {
                name,
                email,
                subject,
                message,
            },
        );

        match (candidate, Violations::new(violations)) {
            (Some(candidate), None) => Ok(candidate),
            (_, Some(violations)) => Err(violations),
            (None, None) => unreachable!("every rejected field records a violation"),
        }
    }
}

fn collect<T>(
    violations: &mut Vec<Violation>,
    field: &str,
    result: Result<T, ViolationKind>,
) -> Option<T> {
    result
        .map_err(|kind| violations.push(Violation::new(field, kind)))
        .ok()
}

fn name(object: &Map<String, Value>) -> Result<SubmissionName, ViolationKind> {
    let value = required_text(object, NAME)?;
    SubmissionName::try_new(value).map_err(|_| {
        length_violation(value, SubmissionName::MIN_LEN, SubmissionName::MAX_LEN)
    })
}

fn email(object: &Map<String, Value>) -> Result<SubmissionEmail, ViolationKind> {
    let value = required_text(object, EMAIL)?;
    SubmissionEmail::try_new(value).map_err(|_| ViolationKind::InvalidEmail)
}

fn subject(object: &Map<String, Value>) -> Result<Option<SubmissionSubject>, ViolationKind> {
    text(object, SUBJECT)?
        .map(|value| {
            SubmissionSubject::try_new(value).map_err(|_| ViolationKind::TooLong {
                max: SubmissionSubject::MAX_LEN,
            })
        })
        .transpose()
}

fn message(object: &Map<String, Value>) -> Result<SubmissionMessage, ViolationKind> {
    let value = required_text(object, MESSAGE)?;
    SubmissionMessage::try_new(value).map_err(|_| {
        length_violation(
            value,
            SubmissionMessage::MIN_LEN,
            SubmissionMessage::MAX_LEN,
        )
    })
}

/// Returns `None` if the key is absent.
fn text<'a>(object: &'a Map<String, Value>, key: &str) -> Result<Option<&'a str>, ViolationKind> {
    match object.get(key) {
        None => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.as_str())),
        Some(_) => Err(ViolationKind::NotAString),
    }
}

/// Returns the trimmed value of a key that must be present and non-blank.
fn required_text<'a>(object: &'a Map<String, Value>, key: &str) -> Result<&'a str, ViolationKind> {
    let value = text(object, key)?.ok_or(ViolationKind::Required)?.trim();
    if value.is_empty() {
        return Err(ViolationKind::Empty);
    }
    Ok(value)
}

fn length_violation(value: &str, min: usize, max: usize) -> ViolationKind {
    if value.chars().count() < min {
        ViolationKind::TooShort { min }
    } else {
        ViolationKind::TooLong { max }
    }
}
