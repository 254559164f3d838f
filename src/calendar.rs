//! Calendar traversal and random times of day.

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta,
    TimeZone,
};
use rand::Rng;

/// Iterator over consecutive calendar days, both ends inclusive.
#[derive(Debug, Clone)]
pub struct Days {
    next: Option<NaiveDate>,
    last: NaiveDate,
}

impl Days {
    /// Every day from `first` through `last`. Empty if `first > last`.
    pub fn between(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            next: (first <= last).then_some(first),
            last,
        }
    }

    /// January 1 through December 31 of `year`.
    ///
    /// Returns `None` for years chrono cannot represent.
    pub fn of_year(year: i32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let last = NaiveDate::from_ymd_opt(year, 12, 31)?;
        Some(Self::between(first, last))
    }
}

impl Iterator for Days {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let day = self.next?;
        self.next = day.succ_opt().filter(|d| *d <= self.last);
        Some(day)
    }
}

/// Day of week as 0 (Sunday) through 6 (Saturday).
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Independently drawn hour, minute and second.
pub fn random_time_of_day<R: Rng + ?Sized>(rng: &mut R) -> NaiveTime {
    let hour = rng.random_range(0..=23);
    let minute = rng.random_range(0..=59);
    let second = rng.random_range(0..=59);
    NaiveTime::from_hms_opt(hour, minute, second).unwrap_or_default()
}

/// Attach the offset `tz` uses at the wall-clock time `naive`.
///
/// The wall-clock time is kept as is. Inside a DST gap, where the local
/// time never occurs, the offset in effect at that instant in UTC is used.
pub fn localize<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<FixedOffset> {
    let offset = tz
        .offset_from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| tz.offset_from_utc_datetime(&naive))
        .fix();
    let utc = naive - TimeDelta::seconds(offset.local_minus_utc().into());
    DateTime::from_naive_utc_and_offset(utc, offset)
}

/// A random moment on `day` in the time zone `tz`.
pub fn random_moment<Tz, R>(tz: &Tz, day: NaiveDate, rng: &mut R) -> DateTime<FixedOffset>
where
    Tz: TimeZone,
    R: Rng + ?Sized,
{
    localize(tz, day.and_time(random_time_of_day(rng)))
}
