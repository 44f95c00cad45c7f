use agency_di::Build;
use agency_models::{
    pagination::PaginationSlice,
    submission::{FormSubmission, FormSubmissionCandidate, FormSubmissionId},
};
use agency_persistence_contracts::submission::SubmissionRepository;
use bb8_postgres::tokio_postgres::Row;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{arg_indices, columns, PostgresTransaction};

#[derive(Debug, Clone, Copy, Default, Build)]
pub struct PostgresSubmissionRepository;

columns!(submission as "s": "id", "name", "email", "subject", "message", "timestamp");
columns!(submission_insert as "s": "name", "email", "subject", "message", "timestamp");

impl SubmissionRepository<PostgresTransaction> for PostgresSubmissionRepository {
    async fn create(
        &self,
        txn: &mut PostgresTransaction,
        candidate: &FormSubmissionCandidate,
        timestamp: DateTime<Utc>,
    ) -> anyhow::Result<FormSubmissionId> {
        txn.txn()?
            .query_one(
                &format!(
                    "insert into form_submissions ({SUBMISSION_INSERT_COL_NAMES}) values ({}) \
                     returning id",
                    arg_indices(1..=SUBMISSION_INSERT_CNT)
                ),
                &[
                    &candidate.name.as_str(),
                    &candidate.email.as_str(),
                    &candidate.subject.as_ref().map(|x| x.as_str()),
                    &candidate.message.as_str(),
                    &timestamp,
                ],
            )
            .await
            .map(|row| row.get::<_, Uuid>(0).into())
            .map_err(Into::into)
    }

    async fn get(
        &self,
        txn: &mut PostgresTransaction,
        submission_id: FormSubmissionId,
    ) -> anyhow::Result<Option<FormSubmission>> {
        txn.txn()?
            .query_opt(
                &format!("select {SUBMISSION_COLS} from form_submissions s where id=$1"),
                &[&*submission_id],
            )
            .await
            .map_err(Into::into)
            .and_then(|row| row.map(|row| decode_submission(&row, &mut 0)).transpose())
    }

    async fn list(
        &self,
        txn: &mut PostgresTransaction,
        PaginationSlice { limit, offset }: PaginationSlice,
    ) -> anyhow::Result<Vec<FormSubmission>> {
        txn.txn()?
            .query(
                &format!(
                    "select {SUBMISSION_COLS} from form_submissions s order by timestamp desc, id \
                     limit $1 offset $2"
                ),
                &[&(*limit as i64), &(offset as i64)],
            )
            .await
            .map_err(Into::into)
            .and_then(|rows| {
                rows.into_iter()
                    .map(|row| decode_submission(&row, &mut 0))
                    .collect()
            })
    }
}

fn decode_submission(row: &Row, offset: &mut usize) -> anyhow::Result<FormSubmission> {
    let mut idx = || {
        *offset += 1;
        *offset - 1
    };

    Ok(FormSubmission {
        id: row.get::<_, Uuid>(idx()).into(),
        name: row.get::<_, String>(idx()).try_into()?,
        email: row.get::<_, String>(idx()).try_into()?,
        subject: row
            .get::<_, Option<String>>(idx())
            .map(TryInto::try_into)
            .transpose()?,
        message: row.get::<_, String>(idx()).try_into()?,
        timestamp: row.get(idx()),
    })
}
