use std::cmp::Reverse;

use agency_di::Build;
use agency_models::{
    pagination::PaginationSlice,
    submission::{FormSubmission, FormSubmissionCandidate, FormSubmissionId},
};
use agency_persistence_contracts::submission::SubmissionRepository;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::MemoryTransaction;

#[derive(Debug, Clone, Copy, Default, Build)]
pub struct MemorySubmissionRepository;

impl SubmissionRepository<MemoryTransaction> for MemorySubmissionRepository {
    async fn create(
        &self,
        txn: &mut MemoryTransaction,
        candidate: &FormSubmissionCandidate,
        timestamp: DateTime<Utc>,
    ) -> anyhow::Result<FormSubmissionId> {
        txn.ensure_available()?;

        let id = FormSubmissionId::from(Uuid::new_v4());
        txn.pending
            .push(FormSubmission::new(id, candidate.clone(), timestamp));
        Ok(id)
    }

    async fn get(
        &self,
        txn: &mut MemoryTransaction,
        submission_id: FormSubmissionId,
    ) -> anyhow::Result<Option<FormSubmission>> {
        txn.ensure_available()?;

        Ok(txn.visible().into_iter().find(|s| s.id == submission_id))
    }

    async fn list(
        &self,
        txn: &mut MemoryTransaction,
        PaginationSlice { limit, offset }: PaginationSlice,
    ) -> anyhow::Result<Vec<FormSubmission>> {
        txn.ensure_available()?;

        let mut submissions = txn.visible();
        submissions.sort_by_key(|s| (Reverse(s.timestamp), s.id));
        Ok(submissions
            .into_iter()
            .skip(offset.try_into().unwrap_or(usize::MAX))
            .take(*limit as usize)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use agency_demo::{submission::ALICE, UUID1};
    use agency_persistence_contracts::{Database, Transaction};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::MemoryDatabase;

    const REPO: MemorySubmissionRepository = MemorySubmissionRepository;

    fn make_slice(limit: u64, offset: u64) -> PaginationSlice {
        PaginationSlice {
            limit: limit.try_into().unwrap(),
            offset,
        }
    }

    async fn setup() -> (MemoryDatabase, Vec<FormSubmission>) {
        let db = MemoryDatabase::new();
        let mut txn = db.begin_transaction().await.unwrap();
        let submissions = agency_demo::create(&mut txn, REPO).await.unwrap();
        txn.commit().await.unwrap();
        (db, submissions)
    }

    #[tokio::test]
    async fn get() {
        let (db, submissions) = setup().await;
        let mut txn = db.begin_transaction().await.unwrap();

        for submission in &submissions {
            let result = REPO.get(&mut txn, submission.id).await.unwrap().unwrap();
            assert_eq!(&result, submission);
        }

        let result = REPO.get(&mut txn, UUID1.into()).await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn list() {
        let (db, mut submissions) = setup().await;
        let mut txn = db.begin_transaction().await.unwrap();

        submissions.sort_by_key(|s| Reverse(s.timestamp));

        let result = REPO.list(&mut txn, make_slice(100, 0)).await.unwrap();
        assert_eq!(result, submissions);

        let result = REPO.list(&mut txn, make_slice(1, 1)).await.unwrap();
        assert_eq!(result, submissions[1..2]);

        let result = REPO.list(&mut txn, make_slice(10, 3)).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn create_assigns_distinct_ids() {
        // Arrange
        let db = MemoryDatabase::new();
        let mut txn = db.begin_transaction().await.unwrap();

        // Act
        let a = REPO
            .create(&mut txn, &ALICE.candidate, ALICE.timestamp)
            .await
            .unwrap();
        let b = REPO
            .create(&mut txn, &ALICE.candidate, ALICE.timestamp)
            .await
            .unwrap();
        txn.commit().await.unwrap();

        // Assert
        assert_ne!(a, b);
        let stored = db.submissions();
        assert_eq!(stored.len(), 2);
        assert_eq!(
            stored[0],
            FormSubmission::new(a, ALICE.candidate.clone(), ALICE.timestamp)
        );
    }

    #[tokio::test]
    async fn pending_writes_are_visible_in_own_transaction() {
        let db = MemoryDatabase::new();
        let mut txn = db.begin_transaction().await.unwrap();
        let id = REPO
            .create(&mut txn, &ALICE.candidate, ALICE.timestamp)
            .await
            .unwrap();

        let mut other = db.begin_transaction().await.unwrap();
        assert_eq!(REPO.get(&mut other, id).await.unwrap(), None);
        assert!(REPO.get(&mut txn, id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn create_unavailable() {
        let db = MemoryDatabase::new();
        let mut txn = db.begin_transaction().await.unwrap();
        db.set_unavailable(true);

        let result = REPO
            .create(&mut txn, &ALICE.candidate, ALICE.timestamp)
            .await;

        assert!(result.is_err());
    }
}
