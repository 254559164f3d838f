use anyhow::Context;
use chrono::{Datelike, Local};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "backdate", version)]
#[command(about = "Fill a year of git history with backdated commits")]
struct Cli {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("{e:#}");
    }

    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to read working directory")?;
    let git = backdate::Git::discover(&cwd).await?;

    let params = backdate::collect_parameters(backdate::Terminal::stdio(), Local::now().year())
        .await
        .context("failed to read run parameters")?;

    let config = backdate::SynthesisConfig::in_repo(git.root());
    let mut rng = StdRng::from_os_rng();
    let report = backdate::synthesize(&git, &params, &config, &Local, &mut rng).await?;

    tracing::info!(
        days = report.days_visited,
        skipped = report.skipped.len(),
        attempted = report.attempted(),
        succeeded = report.succeeded(),
        failed = report.failed(),
        pushed = report.push.is_ok(),
        "Git history generation process complete"
    );

    Ok(())
}
