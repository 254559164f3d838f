//! End-to-end runs against real git repositories.

use std::path::Path;
use std::process::Command;

use backdate::{
    DensityLevel, Days, Git, GitError, RunParameters, SynthesisConfig, synthesize_days,
};
use chrono::{NaiveDate, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {}: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn init_repo(dir: &Path) {
    git(dir, &["init", "--quiet"]);
    git(dir, &["config", "user.name", "Test"]);
    git(dir, &["config", "user.email", "test@example.com"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
}

fn params(density: DensityLevel, skipped: &[u32]) -> RunParameters {
    RunParameters {
        target_year: 2023,
        density,
        skipped_weekdays: skipped.iter().copied().collect(),
    }
}

fn week() -> Days {
    Days::between(
        NaiveDate::from_ymd_opt(2023, 3, 6).unwrap(),
        NaiveDate::from_ymd_opt(2023, 3, 12).unwrap(),
    )
}

#[tokio::test]
async fn commits_carry_generated_dates_and_reach_the_remote() {
    if !git_available() {
        return;
    }
    let tmp = tempfile::tempdir().unwrap();
    let remote = tmp.path().join("remote.git");
    let work = tmp.path().join("work");
    std::fs::create_dir_all(&remote).unwrap();
    std::fs::create_dir_all(&work).unwrap();

    git(&remote, &["init", "--quiet", "--bare"]);
    init_repo(&work);
    git(&work, &["remote", "add", "origin", remote.to_str().unwrap()]);
    git(&work, &["commit", "--quiet", "--allow-empty", "-m", "init"]);
    git(&work, &["push", "--quiet", "-u", "origin", "HEAD"]);

    let repo = Git::discover(&work).await.unwrap();
    let config = SynthesisConfig::in_repo(repo.root());
    let mut rng = StdRng::seed_from_u64(2023);

    // Sunday and Saturday stay empty.
    let report = synthesize_days(
        &repo,
        week(),
        &params(DensityLevel::High, &[0, 6]),
        &config,
        &Utc,
        &mut rng,
    )
    .await;

    assert_eq!(report.days_visited, 7);
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(report.failed(), 0);
    assert!(report.attempted() >= 5 * 3);
    assert!(report.push.is_ok());

    let log = git(&work, &["log", "--reverse", "--format=%aI %cI %s"]);
    let generated: Vec<&str> = log.lines().skip(1).collect();
    assert_eq!(generated.len(), report.attempted());
    for (line, outcome) in generated.iter().zip(&report.commits) {
        let stamp = outcome.spec.timestamp.to_rfc3339();
        assert_eq!(*line, format!("{stamp} {stamp} Random activity"));
    }

    let hashes = git(&work, &["log", "--reverse", "--format=%H"]);
    for (full, outcome) in hashes.lines().skip(1).zip(&report.commits) {
        let short = outcome.result.as_ref().unwrap();
        assert!(short.len() >= 7 && full.starts_with(short.as_str()), "{short} vs {full}");
    }

    let marker = std::fs::read_to_string(work.join("data.json")).unwrap();
    let last = report.commits.last().unwrap().spec.timestamp.to_rfc3339();
    assert_eq!(marker, format!("{{\"date\":\"{last}\"}}\n"));

    let branch = git(&work, &["rev-parse", "--abbrev-ref", "HEAD"]);
    assert_eq!(
        git(&remote, &["rev-parse", &branch]),
        git(&work, &["rev-parse", "HEAD"])
    );
}

#[tokio::test]
async fn push_without_remote_fails_but_commits_remain() {
    if !git_available() {
        return;
    }
    let tmp = tempfile::tempdir().unwrap();
    init_repo(tmp.path());

    let repo = Git::discover(tmp.path()).await.unwrap();
    let config = SynthesisConfig::in_repo(repo.root());
    let mut rng = StdRng::seed_from_u64(7);

    let report = synthesize_days(
        &repo,
        week(),
        &params(DensityLevel::Medium, &[]),
        &config,
        &Utc,
        &mut rng,
    )
    .await;

    assert!(matches!(report.push, Err(GitError::Push { .. })));
    assert_eq!(report.failed(), 0);
    let count: usize = git(tmp.path(), &["rev-list", "--count", "HEAD"]).parse().unwrap();
    assert_eq!(count, report.succeeded());
}

#[tokio::test]
async fn discovery_outside_a_repository_fails() {
    if !git_available() {
        return;
    }
    let tmp = tempfile::tempdir().unwrap();
    let result = Git::discover(tmp.path()).await;
    assert!(matches!(result, Err(GitError::NotARepo(_))));
}
