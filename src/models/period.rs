//! Time buckets for spend aggregation
//!
//! Two bucket shapes exist: a calendar [`Month`] (the budget period and the
//! monthly trend key) and a [`SpendingWeek`] (the Sunday-based week around a
//! reference date used by the weekly chart).

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month in a specific year
///
/// Keys monthly buckets, so June 2023 and June 2024 are distinct. The month
/// number is validated once at construction; a `Month` in hand is always in
/// range 1-12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Create a month, rejecting month numbers outside 1-12
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The month containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current calendar month
    pub fn current() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Chart label, e.g. "Jun 2024"
    pub fn label(&self) -> String {
        // First of the month always exists for a validated month
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(self.year, 1, 1).expect("January exists"));
        first.format("%b %Y").to_string()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// The Sunday-based week containing a reference date
///
/// Covers exactly seven days, Sunday through Saturday, both endpoints
/// inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpendingWeek {
    start: NaiveDate,
}

/// Day labels in bucket order, Sunday first
pub const DAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

impl SpendingWeek {
    /// The week containing the given reference date
    pub fn containing(reference: NaiveDate) -> Self {
        let offset = reference.weekday().num_days_from_sunday();
        Self {
            start: reference - Duration::days(i64::from(offset)),
        }
    }

    /// The Sunday this week starts on
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// The Saturday this week ends on (inclusive)
    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(6)
    }

    /// Check if a date falls within this week, endpoints inclusive
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start() && date <= self.end()
    }

    /// Bucket index for a date: 0 = Sunday through 6 = Saturday,
    /// `None` for dates outside the week
    pub fn day_index(&self, date: NaiveDate) -> Option<usize> {
        if !self.contains(date) {
            return None;
        }
        Some((date - self.start).num_days() as usize)
    }
}

impl fmt::Display for SpendingWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start().format("%Y-%m-%d"),
            self.end().format("%Y-%m-%d")
        )
    }
}

/// Error type for period construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    InvalidMonth(u32),
}

impl fmt::Display for PeriodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for PeriodError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_validation() {
        assert!(Month::new(2024, 6).is_ok());
        assert!(Month::new(2024, 12).is_ok());
        assert_eq!(Month::new(2024, 0), Err(PeriodError::InvalidMonth(0)));
        assert_eq!(Month::new(2024, 13), Err(PeriodError::InvalidMonth(13)));
    }

    #[test]
    fn test_month_contains() {
        let june = Month::new(2024, 6).unwrap();
        assert!(june.contains(date(2024, 6, 1)));
        assert!(june.contains(date(2024, 6, 30)));
        assert!(!june.contains(date(2024, 7, 1)));
        assert!(!june.contains(date(2023, 6, 15)));
    }

    #[test]
    fn test_month_label_distinct_across_years() {
        let a = Month::new(2023, 6).unwrap();
        let b = Month::new(2024, 6).unwrap();
        assert_eq!(a.label(), "Jun 2023");
        assert_eq!(b.label(), "Jun 2024");
        assert_ne!(a, b);
    }

    #[test]
    fn test_month_ordering_is_chronological() {
        let dec_2023 = Month::new(2023, 12).unwrap();
        let jan_2024 = Month::new(2024, 1).unwrap();
        let jun_2024 = Month::new(2024, 6).unwrap();
        assert!(dec_2023 < jan_2024);
        assert!(jan_2024 < jun_2024);
    }

    #[test]
    fn test_month_display() {
        assert_eq!(format!("{}", Month::new(2024, 6).unwrap()), "2024-06");
    }

    #[test]
    fn test_week_containing_midweek_date() {
        // 2024-06-05 is a Wednesday; the week runs Sun 2024-06-02 to Sat 2024-06-08
        let week = SpendingWeek::containing(date(2024, 6, 5));
        assert_eq!(week.start(), date(2024, 6, 2));
        assert_eq!(week.end(), date(2024, 6, 8));
    }

    #[test]
    fn test_week_containing_sunday_starts_there() {
        let week = SpendingWeek::containing(date(2024, 6, 2));
        assert_eq!(week.start(), date(2024, 6, 2));
    }

    #[test]
    fn test_week_boundaries_inclusive() {
        let week = SpendingWeek::containing(date(2024, 6, 5));
        assert!(week.contains(date(2024, 6, 2)));
        assert!(week.contains(date(2024, 6, 8)));
        assert!(!week.contains(date(2024, 6, 1)));
        assert!(!week.contains(date(2024, 6, 9)));
    }

    #[test]
    fn test_day_index() {
        let week = SpendingWeek::containing(date(2024, 6, 5));
        assert_eq!(week.day_index(date(2024, 6, 2)), Some(0)); // Sunday
        assert_eq!(week.day_index(date(2024, 6, 5)), Some(3)); // Wednesday
        assert_eq!(week.day_index(date(2024, 6, 8)), Some(6)); // Saturday
        assert_eq!(week.day_index(date(2024, 6, 9)), None);
    }

    #[test]
    fn test_serialization() {
        let month = Month::new(2024, 6).unwrap();
        let json = serde_json::to_string(&month).unwrap();
        let deserialized: Month = serde_json::from_str(&json).unwrap();
        assert_eq!(month, deserialized);
    }
}
