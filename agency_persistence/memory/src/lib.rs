//! An in-process store with the same transactional behavior as the postgres
//! backend. Nothing is written to disk.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use agency_models::submission::FormSubmission;
use agency_persistence_contracts::{Database, Transaction};
use anyhow::anyhow;
use parking_lot::RwLock;
use tracing::trace;

pub mod submission;

#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    state: Arc<State>,
}

#[derive(Debug, Default)]
struct State {
    submissions: RwLock<Vec<FormSubmission>>,
    unavailable: AtomicBool,
}

impl State {
    fn ensure_available(&self) -> anyhow::Result<()> {
        if self.unavailable.load(Ordering::Acquire) {
            return Err(anyhow!("Store is unavailable"));
        }
        Ok(())
    }
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every operation on the store and on its open transactions
    /// fails.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.unavailable.store(unavailable, Ordering::Release);
    }

    /// Returns a snapshot of all committed submissions in insertion order.
    pub fn submissions(&self) -> Vec<FormSubmission> {
        self.state.submissions.read().clone()
    }
}

impl Database for MemoryDatabase {
    type Transaction = MemoryTransaction;

    async fn begin_transaction(&self) -> anyhow::Result<Self::Transaction> {
        trace!("begin transaction");
        self.state.ensure_available()?;

        Ok(MemoryTransaction {
            state: Arc::clone(&self.state),
            pending: Vec::new(),
        })
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.state.ensure_available()
    }
}

/// Writes made through this transaction are buffered and only applied to the
/// store on commit.
#[derive(Debug)]
pub struct MemoryTransaction {
    state: Arc<State>,
    pending: Vec<FormSubmission>,
}

impl MemoryTransaction {
    fn ensure_available(&self) -> anyhow::Result<()> {
        self.state.ensure_available()
    }

    /// Committed submissions followed by the ones pending in this
    /// transaction.
    fn visible(&self) -> Vec<FormSubmission> {
        let committed = self.state.submissions.read();
        committed.iter().chain(&self.pending).cloned().collect()
    }
}

impl Transaction for MemoryTransaction {
    async fn commit(self) -> anyhow::Result<()> {
        trace!(pending = self.pending.len(), "commit transaction");
        self.ensure_available()?;

        self.state.submissions.write().extend(self.pending);
        Ok(())
    }

    async fn rollback(self) -> anyhow::Result<()> {
        trace!(pending = self.pending.len(), "rollback transaction");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use agency_demo::submission::ALICE;
    use agency_persistence_contracts::submission::SubmissionRepository;

    use super::*;
    use crate::submission::MemorySubmissionRepository;

    #[tokio::test]
    async fn commit_makes_writes_visible() {
        // Arrange
        let db = MemoryDatabase::new();
        let mut txn = db.begin_transaction().await.unwrap();
        MemorySubmissionRepository
            .create(&mut txn, &ALICE.candidate, ALICE.timestamp)
            .await
            .unwrap();
        assert!(db.submissions().is_empty());

        // Act
        txn.commit().await.unwrap();

        // Assert
        assert_eq!(db.submissions().len(), 1);
    }

    #[tokio::test]
    async fn rollback_discards_writes() {
        // Arrange
        let db = MemoryDatabase::new();
        let mut txn = db.begin_transaction().await.unwrap();
        MemorySubmissionRepository
            .create(&mut txn, &ALICE.candidate, ALICE.timestamp)
            .await
            .unwrap();

        // Act
        txn.rollback().await.unwrap();

        // Assert
        assert!(db.submissions().is_empty());
    }

    #[tokio::test]
    async fn dropped_transaction_discards_writes() {
        let db = MemoryDatabase::new();
        let mut txn = db.begin_transaction().await.unwrap();
        MemorySubmissionRepository
            .create(&mut txn, &ALICE.candidate, ALICE.timestamp)
            .await
            .unwrap();

        drop(txn);

        assert!(db.submissions().is_empty());
    }

    #[tokio::test]
    async fn unavailable() {
        // Arrange
        let db = MemoryDatabase::new();
        let mut txn = db.begin_transaction().await.unwrap();
        MemorySubmissionRepository
            .create(&mut txn, &ALICE.candidate, ALICE.timestamp)
            .await
            .unwrap();
        db.set_unavailable(true);

        // Act
        let ping = db.ping().await;
        let begin = db.begin_transaction().await;
        let commit = txn.commit().await;

        // Assert
        assert!(ping.is_err());
        assert!(begin.is_err());
        assert!(commit.is_err());
        assert!(db.submissions().is_empty());

        db.set_unavailable(false);
        assert!(db.ping().await.is_ok());
    }
}
