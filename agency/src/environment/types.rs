use agency_core_health_impl::HealthFeatureServiceImpl;
use agency_core_submission_impl::{
    validate::SubmissionValidateServiceImpl, SubmissionFeatureServiceImpl,
};
use agency_persistence_postgres::{submission::PostgresSubmissionRepository, PostgresDatabase};
use agency_shared_impl::time::TimeServiceImpl;

// API
pub type RestServer = agency_api_rest::RestServer<HealthFeature, SubmissionFeature>;

// Persistence
pub type Database = PostgresDatabase;

// Shared
pub type Time = TimeServiceImpl;

// Repositories
pub type SubmissionRepo = PostgresSubmissionRepository;

// Core
pub type HealthFeature = HealthFeatureServiceImpl<Time, Database>;

pub type SubmissionFeature =
    SubmissionFeatureServiceImpl<Database, Time, SubmissionValidate, SubmissionRepo>;
pub type SubmissionValidate = SubmissionValidateServiceImpl;
