use agency_core_submission_contracts::{
    validate::SubmissionValidateService, SubmissionFeatureService, SubmissionSubmitError,
};
use agency_di::Build;
use agency_models::{
    pagination::PaginationSlice,
    submission::{FormSubmission, FormSubmissionId},
};
use agency_persistence_contracts::{submission::SubmissionRepository, Database, Transaction};
use agency_shared_contracts::time::TimeService;
use agency_utils::trace_instrument;
use anyhow::Context;
use serde_json::Value;
use tracing::info;

pub mod validate;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Build)]
#[cfg_attr(test, derive(Default))]
pub struct SubmissionFeatureServiceImpl<Db, Time, SubmissionValidate, SubmissionRepo> {
    db: Db,
    time: Time,
    submission_validate: SubmissionValidate,
    submission_repo: SubmissionRepo,
}

impl<Db, Time, SubmissionValidate, SubmissionRepo> SubmissionFeatureService
    for SubmissionFeatureServiceImpl<Db, Time, SubmissionValidate, SubmissionRepo>
where
    Db: Database,
    Time: TimeService,
    SubmissionValidate: SubmissionValidateService,
    SubmissionRepo: SubmissionRepository<Db::Transaction>,
{
    #[trace_instrument(skip(self, data))]
    async fn submit(&self, data: Value) -> Result<FormSubmissionId, SubmissionSubmitError> {
        let candidate = self
            .submission_validate
            .validate(&data)
            .map_err(SubmissionSubmitError::Invalid)?;

        let mut txn = self.db.begin_transaction().await?;

        let timestamp = self.time.now();
        let submission_id = self
            .submission_repo
            .create(&mut txn, &candidate, timestamp)
            .await
            .context("Failed to create submission in database")?;

        txn.commit().await?;

        info!(%submission_id, "Stored new submission");

        Ok(submission_id)
    }

    #[trace_instrument(skip(self))]
    async fn get(&self, submission_id: FormSubmissionId) -> anyhow::Result<Option<FormSubmission>> {
        let mut txn = self.db.begin_transaction().await?;

        self.submission_repo
            .get(&mut txn, submission_id)
            .await
            .context("Failed to get submission from database")
    }

    #[trace_instrument(skip(self))]
    async fn list(&self, slice: PaginationSlice) -> anyhow::Result<Vec<FormSubmission>> {
        let mut txn = self.db.begin_transaction().await?;

        self.submission_repo
            .list(&mut txn, slice)
            .await
            .context("Failed to get submissions from database")
    }
}
