use std::sync::LazyLock;

use agency_models::submission::{FormSubmission, FormSubmissionCandidate};
use agency_persistence_contracts::submission::SubmissionRepository;
use chrono::{DateTime, TimeDelta, Utc};

pub struct DemoSubmission {
    pub candidate: FormSubmissionCandidate,
    pub timestamp: DateTime<Utc>,
}

pub static ALL_SUBMISSIONS: LazyLock<Vec<&DemoSubmission>> =
    LazyLock::new(|| vec![&ALICE, &BOB, &CAROL]);

pub static ALICE: LazyLock<DemoSubmission> = LazyLock::new(|| DemoSubmission {
    candidate: FormSubmissionCandidate {
        name: "Alice Doe".try_into().unwrap(),
        email: "alice@example.com".try_into().unwrap(),
        subject: Some("Project inquiry".try_into().unwrap()),
        message: "We would like to talk about a new website for our bakery.".try_into().unwrap(),
    },
    timestamp: DateTime::from_timestamp(1730505600, 0).unwrap(),
});

pub static BOB: LazyLock<DemoSubmission> = LazyLock::new(|| DemoSubmission {
    candidate: FormSubmissionCandidate {
        name: "Bob".try_into().unwrap(),
        email: "bob@mail.example.org".try_into().unwrap(),
        subject: None,
        message: "Do you also offer maintenance contracts?".try_into().unwrap(),
    },
    timestamp: ALICE.timestamp + TimeDelta::seconds(1337),
});

pub static CAROL: LazyLock<DemoSubmission> = LazyLock::new(|| DemoSubmission {
    candidate: FormSubmissionCandidate {
        name: "Carol Smith".try_into().unwrap(),
        email: "carol.smith+agency@example.co.uk".try_into().unwrap(),
        subject: Some("".try_into().unwrap()),
        message: "Please send me your price list.".try_into().unwrap(),
    },
    timestamp: ALICE.timestamp + TimeDelta::days(2),
});

pub async fn create<Txn: Send + Sync + 'static>(
    txn: &mut Txn,
    repo: impl SubmissionRepository<Txn>,
) -> anyhow::Result<Vec<FormSubmission>> {
    let mut out = Vec::with_capacity(ALL_SUBMISSIONS.len());
    for &submission in &*ALL_SUBMISSIONS {
        let id = repo
            .create(txn, &submission.candidate, submission.timestamp)
            .await?;
        out.push(FormSubmission::new(
            id,
            submission.candidate.clone(),
            submission.timestamp,
        ));
    }
    Ok(out)
}
