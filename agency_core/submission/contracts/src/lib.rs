use std::future::Future;

use agency_models::{
    pagination::PaginationSlice,
    submission::{FormSubmission, FormSubmissionId},
    violation::Violations,
};
use serde_json::Value;
use thiserror::Error;

pub mod validate;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SubmissionFeatureService: Send + Sync + 'static {
    /// Validate the raw form data and store it as a new submission.
    ///
    /// Nothing is written unless validation succeeds. The timestamp of the
    /// new submission is taken from the server clock, its id is assigned by
    /// the store.
    fn submit(
        &self,
        data: Value,
    ) -> impl Future<Output = Result<FormSubmissionId, SubmissionSubmitError>> + Send;

    /// Return the submission with the given id.
    fn get(
        &self,
        submission_id: FormSubmissionId,
    ) -> impl Future<Output = anyhow::Result<Option<FormSubmission>>> + Send;

    /// Return a page of submissions, newest first.
    fn list(
        &self,
        slice: PaginationSlice,
    ) -> impl Future<Output = anyhow::Result<Vec<FormSubmission>>> + Send;
}

#[derive(Debug, Error)]
pub enum SubmissionSubmitError {
    #[error("Invalid submission: {0}")]
    Invalid(Violations),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockSubmissionFeatureService {
    pub fn with_submit(
        mut self,
        data: Value,
        result: Result<FormSubmissionId, SubmissionSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(data))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_get(
        mut self,
        submission_id: FormSubmissionId,
        result: Option<FormSubmission>,
    ) -> Self {
        self.expect_get()
            .once()
            .with(mockall::predicate::eq(submission_id))
            .return_once(|_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_list(mut self, slice: PaginationSlice, result: Vec<FormSubmission>) -> Self {
        self.expect_list()
            .once()
            .with(mockall::predicate::eq(slice))
            .return_once(|_| Box::pin(std::future::ready(Ok(result))));
        self
    }
}
