//! Interactive collection of run parameters.
//!
//! The questions are asked through a [`Prompter`], so the retry loops can
//! be driven by scripted answers in tests.

use std::io;

use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout,
};
use tracing::warn;

use crate::params::{
    EARLIEST_YEAR, RunParameters, parse_density, parse_skipped_weekdays, parse_year,
};

pub const YEAR_PROMPT: &str = "Enter the target year for random commits (e.g., 2024): ";

pub const DENSITY_PROMPT: &str = "Choose commit density level (low, medium, high): ";

pub const SKIP_PROMPT: &str = "Enter days of the week to skip (0=Sun, 1=Mon,..., 6=Sat, \
    comma-separated, e.g., '0,6' for weekends, or leave empty for no skips): ";

/// A source of answers from the operator.
#[allow(async_fn_in_trait)]
pub trait Prompter {
    /// Show `question` and return the operator's answer line.
    async fn ask(&mut self, question: &str) -> io::Result<String>;

    /// Show a line of information.
    async fn tell(&mut self, line: &str) -> io::Result<()>;
}

/// Line-oriented prompter over a reader and a writer.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl Terminal<BufReader<Stdin>, Stdout> {
    /// Prompt on stdout, read answers from stdin.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> Terminal<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R, W> Prompter for Terminal<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    async fn ask(&mut self, question: &str) -> io::Result<String> {
        self.output.write_all(question.as_bytes()).await?;
        self.output.flush().await?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before all questions were answered",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    async fn tell(&mut self, line: &str) -> io::Result<()> {
        self.output.write_all(line.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await
    }
}

/// Ask for year, density and skipped weekdays, re-asking until the year
/// and density are valid.
///
/// The prompter is consumed; input is released once all answers are in.
pub async fn collect_parameters<P: Prompter>(
    mut prompter: P,
    current_year: i32,
) -> io::Result<RunParameters> {
    prompter.tell("\n--- Git History Generation Options ---").await?;

    let target_year = loop {
        let answer = prompter.ask(YEAR_PROMPT).await?;
        match parse_year(&answer, current_year) {
            Ok(year) => break year,
            Err(e) => warn!(
                reason = %e,
                "Invalid year entered. Please enter a year between {} and {}.",
                EARLIEST_YEAR,
                current_year
            ),
        }
    };

    let density = loop {
        let answer = prompter.ask(DENSITY_PROMPT).await?;
        match parse_density(&answer) {
            Ok(density) => break density,
            Err(e) => warn!(
                reason = %e,
                "Invalid level. Please choose 'low', 'medium', or 'high'."
            ),
        }
    };

    let skipped_weekdays = parse_skipped_weekdays(&prompter.ask(SKIP_PROMPT).await?);

    Ok(RunParameters {
        target_year,
        density,
        skipped_weekdays,
    })
}
