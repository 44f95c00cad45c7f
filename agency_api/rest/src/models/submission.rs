use agency_models::submission::FormSubmissionId;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSubmitResponse {
    pub success: bool,
    pub message: &'static str,
    /// Identifier the store assigned to the new submission
    pub submission_id: FormSubmissionId,
}

impl ApiSubmitResponse {
    pub fn new(submission_id: FormSubmissionId) -> Self {
        Self {
            success: true,
            message: "Form submitted successfully",
            submission_id,
        }
    }
}
