use agency_demo::{submission::ALICE, UUID1};
use agency_models::submission::FormSubmission;
use agency_persistence_contracts::{submission::SubmissionRepository, Database, Transaction};
use agency_persistence_postgres::submission::PostgresSubmissionRepository;
use chrono::TimeDelta;
use pretty_assertions::assert_eq;

use crate::{common::setup, make_slice};

const REPO: PostgresSubmissionRepository = PostgresSubmissionRepository;

#[tokio::test]
#[ignore = "requires a running postgres database"]
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
#[ignore = "requires a running postgres database"]
async fn list() {
    let (db, mut submissions) = setup().await;
    let mut txn = db.begin_transaction().await.unwrap();

    submissions.sort_by_key(|s| std::cmp::Reverse(s.timestamp));

    let result = REPO.list(&mut txn, make_slice(100, 0)).await.unwrap();
    assert_eq!(result, submissions);

    let result = REPO.list(&mut txn, make_slice(1, 1)).await.unwrap();
    assert_eq!(result, submissions[1..2]);

    let result = REPO.list(&mut txn, make_slice(10, 3)).await.unwrap();
    assert!(result.is_empty());
}

#[tokio::test]
#[ignore = "requires a running postgres database"]
async fn create() {
    let (db, submissions) = setup().await;
    let timestamp = ALICE.timestamp + TimeDelta::days(7);

    let mut txn = db.begin_transaction().await.unwrap();
    let id = REPO
        .create(&mut txn, &ALICE.candidate, timestamp)
        .await
        .unwrap();
    txn.commit().await.unwrap();

    assert!(submissions.iter().all(|s| s.id != id));

    let mut txn = db.begin_transaction().await.unwrap();
    let result = REPO.get(&mut txn, id).await.unwrap().unwrap();
    assert_eq!(
        result,
        FormSubmission::new(id, ALICE.candidate.clone(), timestamp)
    );
}

#[tokio::test]
#[ignore = "requires a running postgres database"]
async fn create_rollback() {
    let (db, _) = setup().await;

    let mut txn = db.begin_transaction().await.unwrap();
    let id = REPO
        .create(&mut txn, &ALICE.candidate, ALICE.timestamp)
        .await
        .unwrap();
    txn.rollback().await.unwrap();

    let mut txn = db.begin_transaction().await.unwrap();
    let result = REPO.get(&mut txn, id).await.unwrap();
    assert_eq!(result, None);
}
