//! Backdate: fill a year of git history with generated commits.
//!
//! Backdate asks for a target year, a commit density and the weekdays to
//! leave empty, then walks every day of that year creating commits at random
//! times, and finally pushes the result.
//!
//! # Architecture
//!
//! - **Params**: Run parameters and validation of operator input
//! - **Prompt**: Ask for the parameters, retrying until they are valid
//! - **Synthesize**: Traverse the year and create the commits
//! - **Git**: The version-control operations synthesis relies on

mod calendar;
mod density;
mod git;
mod marker;
mod params;
mod prompt;
mod synthesize;

pub use calendar::{Days, random_moment, weekday_index};
pub use density::DensityLevel;
pub use git::{Error as GitError, Git, VersionControl};
pub use marker::{MARKER_FILE, Marker};
pub use params::{
    EARLIEST_YEAR, RunParameters, ValidationError, leading_int, parse_density,
    parse_skipped_weekdays, parse_year,
};
pub use prompt::{Prompter, Terminal, collect_parameters};
pub use synthesize::{
    COMMIT_MESSAGE, CommitOutcome, CommitSpec, EmitError, RunReport, SkippedDay, SynthesisConfig,
    synthesize, synthesize_days,
};
