//! Synthesize a year of backdated commits.

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use rand::Rng;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::calendar::{Days, random_moment, weekday_index};
use crate::git::{self, VersionControl};
use crate::marker::{self, MARKER_FILE, Marker};
use crate::params::RunParameters;

/// Message used for every generated commit.
pub const COMMIT_MESSAGE: &str = "Random activity";

/// Fixed settings for a synthesis run.
#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    /// Message for every generated commit
    pub message: String,

    /// File rewritten and staged before each commit
    pub marker_path: PathBuf,
}

impl SynthesisConfig {
    /// Default settings for the repository rooted at `root`.
    pub fn in_repo(root: &Path) -> Self {
        Self {
            message: COMMIT_MESSAGE.to_string(),
            marker_path: root.join(MARKER_FILE),
        }
    }
}

/// A commit to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSpec {
    /// Author and committer date
    pub timestamp: DateTime<FixedOffset>,

    pub message: String,
}

/// What happened to one commit attempt.
#[derive(Debug)]
pub struct CommitOutcome {
    pub spec: CommitSpec,

    /// Short hash of the created commit, or why it was not created
    pub result: Result<String, EmitError>,
}

/// A day that received no commits because of its weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedDay {
    pub date: NaiveDate,
    pub weekday: u32,
}

/// Everything a run did, in the order it did it.
#[derive(Debug)]
pub struct RunReport {
    /// Days traversed, skipped ones included
    pub days_visited: usize,

    pub skipped: Vec<SkippedDay>,

    pub commits: Vec<CommitOutcome>,

    /// Result of the final push
    pub push: Result<(), git::Error>,
}

impl RunReport {
    pub fn attempted(&self) -> usize {
        self.commits.len()
    }

    pub fn succeeded(&self) -> usize {
        self.commits.iter().filter(|c| c.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.commits.iter().filter(|c| c.result.is_err()).count()
    }

    /// Commit attempts whose timestamp falls on `date`.
    pub fn attempts_on(&self, date: NaiveDate) -> usize {
        self.commits
            .iter()
            .filter(|c| c.spec.timestamp.date_naive() == date)
            .count()
    }
}

/// Fill `params.target_year` with commits, then push.
///
/// Individual commit failures and a failed push are recorded in the
/// returned report; they never stop the run.
pub async fn synthesize<V, Tz, R>(
    vcs: &V,
    params: &RunParameters,
    config: &SynthesisConfig,
    tz: &Tz,
    rng: &mut R,
) -> Result<RunReport, Error>
where
    V: VersionControl,
    Tz: TimeZone,
    R: Rng + ?Sized,
{
    let days = Days::of_year(params.target_year).ok_or(Error::UnsupportedYear {
        year: params.target_year,
    })?;

    info!(
        "Generating \"{}\" random commits for {}",
        params.density, params.target_year
    );
    let report = synthesize_days(vcs, days, params, config, tz, rng).await;
    info!(
        "Finished generating \"{}\" random commits for {}.",
        params.density, params.target_year
    );

    Ok(report)
}

/// Traverse `days` in order, committing on every day whose weekday is not
/// skipped, then push once.
pub async fn synthesize_days<V, Tz, R>(
    vcs: &V,
    days: Days,
    params: &RunParameters,
    config: &SynthesisConfig,
    tz: &Tz,
    rng: &mut R,
) -> RunReport
where
    V: VersionControl,
    Tz: TimeZone,
    R: Rng + ?Sized,
{
    let mut days_visited = 0;
    let mut skipped = Vec::new();
    let mut commits = Vec::new();

    for date in days {
        days_visited += 1;

        let weekday = weekday_index(date);
        if params.skips(weekday) {
            info!(
                "Skipping commits for {} (Day of week: {})",
                date.format("%Y-%m-%d"),
                weekday
            );
            skipped.push(SkippedDay { date, weekday });
            continue;
        }

        let count = params.density.sample(rng);
        for _ in 0..count {
            let spec = CommitSpec {
                timestamp: random_moment(tz, date, rng),
                message: config.message.clone(),
            };
            let result = emit_commit(vcs, config, &spec).await;
            commits.push(CommitOutcome { spec, result });
        }
    }

    info!("Pushing all generated commits to remote...");
    let push = vcs.push().await;
    match &push {
        Ok(()) => info!("All commits pushed successfully."),
        Err(e) => error!(error = %e, "Error pushing commits"),
    }

    RunReport {
        days_visited,
        skipped,
        commits,
        push,
    }
}

/// Create one commit, logging the outcome.
async fn emit_commit<V: VersionControl>(
    vcs: &V,
    config: &SynthesisConfig,
    spec: &CommitSpec,
) -> Result<String, EmitError> {
    let date = spec.timestamp.to_rfc3339();
    debug!("Attempting to commit: \"{}\" on {}", spec.message, date);

    let result = write_and_commit(vcs, config, spec).await;
    match &result {
        Ok(hash) => info!(%hash, "Successfully committed: \"{}\" on {}", spec.message, date),
        Err(e) => error!(
            error = %e,
            "Error processing commit \"{}\" on {}", spec.message, date
        ),
    }
    result
}

/// Rewrite the marker, stage it and commit at the requested timestamp.
async fn write_and_commit<V: VersionControl>(
    vcs: &V,
    config: &SynthesisConfig,
    spec: &CommitSpec,
) -> Result<String, EmitError> {
    Marker::new(&spec.timestamp).write(&config.marker_path).await?;
    vcs.stage_file(&config.marker_path).await?;
    Ok(vcs.commit(&spec.message, &spec.timestamp).await?)
}

/// Why a single commit was not created.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error(transparent)]
    Marker(#[from] marker::Error),

    #[error(transparent)]
    Git(#[from] git::Error),
}

/// Errors that stop a run before it starts.
#[derive(Debug, Error)]
pub enum Error {
    #[error("year {year} cannot be represented")]
    UnsupportedYear { year: i32 },
}
