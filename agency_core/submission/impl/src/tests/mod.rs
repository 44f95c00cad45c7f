use agency_core_submission_contracts::validate::MockSubmissionValidateService;
use agency_persistence_contracts::{
    submission::MockSubmissionRepository, MockDatabase, MockTransaction,
};
use agency_shared_contracts::time::MockTimeService;

use crate::SubmissionFeatureServiceImpl;

mod list;

type Sut = SubmissionFeatureServiceImpl<
    MockDatabase,
    MockTimeService,
    MockSubmissionValidateService,
    MockSubmissionRepository<MockTransaction>,
>;
