use agency_core_submission_contracts::SubmissionFeatureService;
use agency_demo::submission::{ALICE, BOB};
use agency_models::{
    pagination::{PaginationLimit, PaginationSlice},
    submission::FormSubmission,
};
use agency_persistence_contracts::{submission::MockSubmissionRepository, MockDatabase};
use uuid::uuid;

use crate::{tests::Sut, SubmissionFeatureServiceImpl};

#[tokio::test]
async fn ok() {
    // Arrange
    let slice = PaginationSlice {
        limit: PaginationLimit::try_new(2).unwrap(),
        offset: 1,
    };
    let expected = vec![
        FormSubmission::new(
            uuid!("6f1dd2a4-8e5b-4a4c-9a9e-1b1b4fd2a0b3").into(),
            BOB.candidate.clone(),
            BOB.timestamp,
        ),
        FormSubmission::new(
            uuid!("0c9c1f4e-2a37-4f0d-8a4e-43b0b63e7d51").into(),
            ALICE.candidate.clone(),
            ALICE.timestamp,
        ),
    ];

    let db = MockDatabase::build(false);

    let submission_repo = MockSubmissionRepository::new().with_list(slice, expected.clone());

    let sut = SubmissionFeatureServiceImpl {
        db,
        submission_repo,
        ..Sut::default()
    };

    // Act
    let result = sut.list(slice).await;

    // Assert
    assert_eq!(result.unwrap(), expected);
}
