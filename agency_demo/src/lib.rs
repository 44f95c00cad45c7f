use agency_models::submission::FormSubmission;
use agency_persistence_contracts::submission::SubmissionRepository;
use uuid::{uuid, Uuid};

pub mod submission;

pub const UUID1: Uuid = uuid!("eb1cd87a-4475-4d68-a2c2-0216bdaac8f7");

/// Store all demo submissions and return them with the ids assigned by the
/// repository, in insertion order.
pub async fn create<Txn: Send + Sync + 'static>(
    txn: &mut Txn,
    submission: impl SubmissionRepository<Txn>,
) -> anyhow::Result<Vec<FormSubmission>> {
    submission::create(txn, submission).await
}
