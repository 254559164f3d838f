//! Commit density levels and the per-day commit count sampler.

use std::fmt;
use std::ops::RangeInclusive;

use rand::Rng;

/// How busy a generated day looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DensityLevel {
    Low,
    Medium,
    High,
}

impl DensityLevel {
    /// Every level, in increasing order of activity.
    pub const ALL: [DensityLevel; 3] = [
        DensityLevel::Low,
        DensityLevel::Medium,
        DensityLevel::High,
    ];

    /// The inclusive range of commits generated on an active day.
    pub fn commits_per_day(self) -> RangeInclusive<u32> {
        match self {
            DensityLevel::Low => 0..=2,
            DensityLevel::Medium => 1..=5,
            DensityLevel::High => 3..=10,
        }
    }

    /// Draw the number of commits for one day.
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> u32 {
        rng.random_range(self.commits_per_day())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DensityLevel::Low => "low",
            DensityLevel::Medium => "medium",
            DensityLevel::High => "high",
        }
    }
}

impl fmt::Display for DensityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
