use std::future::Future;

pub mod submission;

/// Handle to the backing store.
#[cfg_attr(feature = "mock", mockall::automock(type Transaction = MockTransaction;))]
pub trait Database: Send + Sync + 'static {
    type Transaction: Transaction;

    /// Starts a new transaction which can be used to interact with the
    /// database.
    ///
    /// Changes become visible only after explicitly invoking
    /// [`Transaction::commit()`]. A transaction that is dropped without being
    /// committed leaves no trace in the store.
    fn begin_transaction(&self) -> impl Future<Output = anyhow::Result<Self::Transaction>> + Send;

    /// Verify the connection to the database.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait Transaction: Send + Sync + 'static {
    /// Persists any changes made to the database using this transaction.
    fn commit(self) -> impl Future<Output = anyhow::Result<()>> + Send;
    /// Explicitly discards any changes made to the database using this
    /// transaction.
    fn rollback(self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockDatabase {
    /// Expects exactly one transaction to be started. If `expect_commit` is
    /// set, the transaction also expects to be committed successfully.
    pub fn build(expect_commit: bool) -> Self {
        let mut txn = MockTransaction::new();
        if expect_commit {
            txn.expect_commit()
                .once()
                .return_once(|| Box::pin(std::future::ready(Ok(()))));
        }

        Self::new().with_begin_transaction(Ok(txn))
    }

    /// Expects exactly one transaction to be started and to fail on commit.
    pub fn build_failing_commit() -> Self {
        let mut txn = MockTransaction::new();
        txn.expect_commit()
            .once()
            .return_once(|| Box::pin(std::future::ready(Err(anyhow::anyhow!("commit failed")))));

        Self::new().with_begin_transaction(Ok(txn))
    }

    pub fn with_begin_transaction(mut self, result: anyhow::Result<MockTransaction>) -> Self {
        self.expect_begin_transaction()
            .once()
            .return_once(|| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_ping(mut self, result: anyhow::Result<()>) -> Self {
        self.expect_ping()
            .once()
            .return_once(|| Box::pin(std::future::ready(result)));
        self
    }
}
