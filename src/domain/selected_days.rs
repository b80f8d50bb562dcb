use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A committed range of calendar days, both ends inclusive.
///
/// Constructed only through [`SelectedDays::new`] or [`SelectedDays::single`],
/// so `start_day <= end_day` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedDays {
    start_day: NaiveDate,
    end_day: NaiveDate,
}

impl SelectedDays {
    /// Returns `None` when `end_day` falls before `start_day`.
    pub fn new(start_day: NaiveDate, end_day: NaiveDate) -> Option<Self> {
        (start_day <= end_day).then_some(Self { start_day, end_day })
    }

    pub fn single(date: NaiveDate) -> Self {
        Self {
            start_day: date,
            end_day: date,
        }
    }

    pub fn start_day(&self) -> NaiveDate {
        self.start_day
    }

    pub fn end_day(&self) -> NaiveDate {
        self.end_day
    }

    /// Number of days covered, counting both ends.
    pub fn len_days(&self) -> i64 {
        (self.end_day - self.start_day).num_days() + 1
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end_day;
        self.start_day.iter_days().take_while(move |date| *date <= end)
    }
}

impl fmt::Display for SelectedDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start_day.format("%Y-%m-%d"),
            self.end_day.format("%Y-%m-%d")
        )
    }
}

impl FromStr for SelectedDays {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (start, end) = s
            .split_once("..")
            .with_context(|| format!("Expected START..END, got '{}'", s))?;

        let start = NaiveDate::parse_from_str(start.trim(), "%Y-%m-%d")
            .with_context(|| format!("Invalid start day '{}'", start))?;
        let end = NaiveDate::parse_from_str(end.trim(), "%Y-%m-%d")
            .with_context(|| format!("Invalid end day '{}'", end))?;

        match Self::new(start, end) {
            Some(days) => Ok(days),
            None => bail!("Range {}..{} ends before it starts", start, end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        assert!(SelectedDays::new(ymd(2026, 10, 9), ymd(2026, 10, 5)).is_none());
        assert!(SelectedDays::new(ymd(2026, 10, 5), ymd(2026, 10, 5)).is_some());
    }

    #[test]
    fn test_days_cover_both_ends() {
        let range = SelectedDays::new(ymd(2026, 10, 30), ymd(2026, 11, 2)).unwrap();
        let days: Vec<_> = range.days().collect();

        assert_eq!(range.len_days(), 4);
        assert_eq!(days.first(), Some(&ymd(2026, 10, 30)));
        assert_eq!(days.last(), Some(&ymd(2026, 11, 2)));
        assert_eq!(days.len(), 4);
    }

    #[test]
    fn test_parse_and_display() {
        let range: SelectedDays = "2026-10-05..2026-10-09".parse().unwrap();
        assert_eq!(range.start_day(), ymd(2026, 10, 5));
        assert_eq!(range.end_day(), ymd(2026, 10, 9));
        assert_eq!(range.to_string(), "2026-10-05..2026-10-09");

        assert!("2026-10-09..2026-10-05".parse::<SelectedDays>().is_err());
        assert!("2026-10-09".parse::<SelectedDays>().is_err());
    }

    #[test]
    fn test_json_uses_camel_case_fields() {
        let range = SelectedDays::single(ymd(2026, 10, 5));
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(json, r#"{"startDay":"2026-10-05","endDay":"2026-10-05"}"#);
    }
}
