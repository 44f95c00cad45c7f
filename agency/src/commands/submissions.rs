use agency_config::Config;
use agency_core_submission_contracts::SubmissionFeatureService;
use agency_di::Provide;
use agency_models::{
    pagination::{PaginationLimit, PaginationSlice},
    submission::FormSubmission,
};
use anyhow::{bail, Context};
use clap::Subcommand;
use uuid::Uuid;

use crate::{
    database,
    environment::{types::SubmissionFeature, ConfigProvider, Provider},
};

#[derive(Debug, Subcommand)]
pub enum SubmissionsCommand {
    /// List stored submissions, newest first
    #[command(aliases(["ls", "l"]))]
    List {
        /// Maximum number of submissions to show
        #[arg(short, long, default_value_t = 20)]
        limit: u64,
        /// Number of submissions to skip
        #[arg(short, long, default_value_t = 0)]
        offset: u64,
    },
    /// Show a single submission including its message
    #[command(aliases(["s"]))]
    Show { id: Uuid },
}

impl SubmissionsCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let database = database::connect(&config.database).await?;
        let config_provider = ConfigProvider::new(&config);
        let mut provider = Provider::new(config_provider, database);
        let submission: SubmissionFeature = provider.provide();

        match self {
            Self::List { limit, offset } => list(submission, limit, offset).await,
            Self::Show { id } => show(submission, id).await,
        }
    }
}

async fn list(
    submission: impl SubmissionFeatureService,
    limit: u64,
    offset: u64,
) -> anyhow::Result<()> {
    let limit = PaginationLimit::try_new(limit)
        .with_context(|| format!("The limit must not exceed {}", PaginationLimit::MAX))?;

    let submissions = submission.list(PaginationSlice { limit, offset }).await?;
    if submissions.is_empty() {
        println!("No submissions found.");
    }
    for submission in submissions {
        println!("{}", summary(&submission));
    }

    Ok(())
}

async fn show(submission: impl SubmissionFeatureService, id: Uuid) -> anyhow::Result<()> {
    let Some(submission) = submission.get(id.into()).await? else {
        bail!("Submission {id} does not exist");
    };

    println!("id:        {}", submission.id);
    println!("timestamp: {}", submission.timestamp.to_rfc3339());
    println!("name:      {}", *submission.name);
    println!("email:     {}", *submission.email);
    if let Some(subject) = &submission.subject {
        println!("subject:   {}", **subject);
    }
    println!();
    println!("{}", *submission.message);

    Ok(())
}

fn summary(submission: &FormSubmission) -> String {
    let mut out = format!(
        "{} {} {} <{}>",
        submission.id,
        submission.timestamp.to_rfc3339(),
        *submission.name,
        *submission.email
    );
    if let Some(subject) = submission.subject.as_ref().filter(|s| !s.is_empty()) {
        out.push_str(&format!(": {}", **subject));
    }
    out
}
