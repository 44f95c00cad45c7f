use std::future::Future;

use agency_models::{
    pagination::PaginationSlice,
    submission::{FormSubmission, FormSubmissionCandidate, FormSubmissionId},
};
use chrono::{DateTime, Utc};

/// Storage for contact form submissions.
///
/// There is deliberately no way to update or delete a submission.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SubmissionRepository<Txn: Send + Sync + 'static>: Send + Sync + 'static {
    /// Store a new submission and return the id the store assigned to it.
    fn create(
        &self,
        txn: &mut Txn,
        candidate: &FormSubmissionCandidate,
        timestamp: DateTime<Utc>,
    ) -> impl Future<Output = anyhow::Result<FormSubmissionId>> + Send;

    /// Return the submission with the given id.
    fn get(
        &self,
        txn: &mut Txn,
        submission_id: FormSubmissionId,
    ) -> impl Future<Output = anyhow::Result<Option<FormSubmission>>> + Send;

    /// Return a page of submissions, newest first.
    fn list(
        &self,
        txn: &mut Txn,
        slice: PaginationSlice,
    ) -> impl Future<Output = anyhow::Result<Vec<FormSubmission>>> + Send;
}

#[cfg(feature = "mock")]
impl<Txn: Send + Sync + 'static> MockSubmissionRepository<Txn> {
    pub fn with_create(
        mut self,
        candidate: FormSubmissionCandidate,
        timestamp: DateTime<Utc>,
        result: anyhow::Result<FormSubmissionId>,
    ) -> Self {
        self.expect_create()
            .once()
            .with(
                mockall::predicate::always(),
                mockall::predicate::eq(candidate),
                mockall::predicate::eq(timestamp),
            )
            .return_once(|_, _, _| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_get(
        mut self,
        submission_id: FormSubmissionId,
        result: Option<FormSubmission>,
    ) -> Self {
        self.expect_get()
            .once()
            .with(
                mockall::predicate::always(),
                mockall::predicate::eq(submission_id),
            )
            .return_once(|_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_list(mut self, slice: PaginationSlice, result: Vec<FormSubmission>) -> Self {
        self.expect_list()
            .once()
            .with(mockall::predicate::always(), mockall::predicate::eq(slice))
            .return_once(|_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }
}
