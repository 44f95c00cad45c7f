use agency_models::{submission::FormSubmissionCandidate, violation::Violations};
use serde_json::Value;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SubmissionValidateService: Send + Sync + 'static {
    /// Check untrusted form data against the submission schema.
    ///
    /// All rules are evaluated, so on failure every violation is reported in
    /// the order in which the rules are declared.
    fn validate(&self, data: &Value) -> Result<FormSubmissionCandidate, Violations>;
}

#[cfg(feature = "mock")]
impl MockSubmissionValidateService {
    pub fn with_validate(
        mut self,
        data: Value,
        result: Result<FormSubmissionCandidate, Violations>,
    ) -> Self {
        self.expect_validate()
            .once()
            .with(mockall::predicate::eq(data))
            .return_once(|_| result);
        self
    }
}
