use anyhow::{Result, bail};
use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::domain::SelectedDays;

/// Which weekday opens each row of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StartOfWeek {
    Mon,
    #[default]
    Sun,
}

impl StartOfWeek {
    pub fn weekday(self) -> Weekday {
        match self {
            StartOfWeek::Mon => Weekday::Mon,
            StartOfWeek::Sun => Weekday::Sun,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            StartOfWeek::Mon => StartOfWeek::Sun,
            StartOfWeek::Sun => StartOfWeek::Mon,
        }
    }

    /// Column headers in display order.
    pub fn day_labels(self) -> [&'static str; 7] {
        match self {
            StartOfWeek::Mon => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
            StartOfWeek::Sun => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
        }
    }

    // Position of the 1st in the raw offset walk; Sunday rows start one step later.
    fn shift(self) -> i64 {
        match self {
            StartOfWeek::Mon => 0,
            StartOfWeek::Sun => 1,
        }
    }
}

impl fmt::Display for StartOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartOfWeek::Mon => write!(f, "mon"),
            StartOfWeek::Sun => write!(f, "sun"),
        }
    }
}

impl FromStr for StartOfWeek {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mon" | "monday" => Ok(StartOfWeek::Mon),
            "sun" | "sunday" => Ok(StartOfWeek::Sun),
            other => bail!("Unknown start of week '{}', expected 'mon' or 'sun'", other),
        }
    }
}

/// How many trailing rows a grid carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GridShape {
    /// Just enough whole weeks to cover the month.
    #[default]
    Compact,
    /// Always six weeks (42 days), so the layout never jumps between months.
    SixWeeks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// Belongs to the previous or next month.
    pub offset: bool,
}

impl CalendarDay {
    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

/// The days shown for one month, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarGrid {
    reference_month: NaiveDate,
    start_of_week: StartOfWeek,
    shape: GridShape,
    days: Vec<CalendarDay>,
}

impl CalendarGrid {
    pub fn generate(reference_month: NaiveDate, start_of_week: StartOfWeek) -> Self {
        Self::generate_with_shape(reference_month, start_of_week, GridShape::Compact)
    }

    /// Months outside [`is_supported_month`] are clamped to the nearest
    /// supported one.
    pub fn generate_with_shape(
        reference_month: NaiveDate,
        start_of_week: StartOfWeek,
        shape: GridShape,
    ) -> Self {
        let first = clamp_to_supported(reference_month);
        Self::layout(first, start_of_week, shape).unwrap_or_else(|| {
            log::warn!("Cannot lay out {}", first.format("%Y-%m"));
            Self {
                reference_month: first,
                start_of_week,
                shape,
                days: Vec::new(),
            }
        })
    }

    fn layout(first: NaiveDate, start_of_week: StartOfWeek, shape: GridShape) -> Option<Self> {
        let last = last_of_month(first);

        // Weekday of the previous month's last day, Sunday = 0.
        let previous_last = first.weekday().pred().num_days_from_sunday() as i64;

        // A Sunday row for a month that opens on Sunday must start on the 1st;
        // the raw offset would back up a whole extra week.
        let offset = if start_of_week == StartOfWeek::Sun && previous_last == 6 {
            1
        } else {
            -previous_last
        };

        let first_shown = first.checked_add_signed(Duration::days(offset - start_of_week.shift()))?;
        let covered = (last - first_shown).num_days() + 1;
        let weeks = match shape {
            GridShape::Compact => (covered + 6) / 7,
            GridShape::SixWeeks => ((covered + 6) / 7).max(6),
        };
        let len = usize::try_from(weeks * 7).ok()?;

        let days: Vec<CalendarDay> = first_shown
            .iter_days()
            .take(len)
            .map(|date| CalendarDay {
                date,
                offset: !same_month(date, first),
            })
            .collect();

        (days.len() == len).then_some(Self {
            reference_month: first,
            start_of_week,
            shape,
            days,
        })
    }

    /// First day of the month this grid displays.
    pub fn reference_month(&self) -> NaiveDate {
        self.reference_month
    }

    pub fn start_of_week(&self) -> StartOfWeek {
        self.start_of_week
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CalendarDay> {
        self.days.get(index)
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDay]> {
        self.days.chunks(7)
    }

    pub fn in_reference_month(&self, date: NaiveDate) -> bool {
        same_month(date, self.reference_month)
    }

    /// Only days of the displayed month can become range boundaries.
    pub fn is_selectable(&self, index: usize) -> bool {
        self.get(index).is_some_and(|day| !day.offset)
    }

    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        let first = self.days.first()?.date;
        let index = usize::try_from((date - first).num_days()).ok()?;
        (index < self.days.len()).then_some(index)
    }

    /// Resolves a pair of indices into dates, refusing inverted pairs.
    pub fn selected_days(&self, start: usize, end: usize) -> Option<SelectedDays> {
        let start_day = self.get(start)?.date;
        let end_day = self.get(end)?.date;
        SelectedDays::new(start_day, end_day)
    }
}

/// Longest reach of a grid around the 1st: one week back, six weeks forward.
const GRID_REACH_BEFORE: i64 = 7;
const GRID_REACH_AFTER: i64 = 42;

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Whether every day a grid for this month may show is representable.
pub fn is_supported_month(date: NaiveDate) -> bool {
    let first = first_of_month(date);
    first
        .checked_sub_signed(Duration::days(GRID_REACH_BEFORE))
        .is_some()
        && first
            .checked_add_signed(Duration::days(GRID_REACH_AFTER))
            .is_some()
}

pub fn earliest_supported_month() -> NaiveDate {
    let first = first_of_month(NaiveDate::MIN);
    std::iter::successors(Some(first), |month| month.checked_add_months(Months::new(1)))
        .find(|month| is_supported_month(*month))
        .unwrap_or(first)
}

pub fn latest_supported_month() -> NaiveDate {
    let first = first_of_month(NaiveDate::MAX);
    std::iter::successors(Some(first), |month| month.checked_sub_months(Months::new(1)))
        .find(|month| is_supported_month(*month))
        .unwrap_or(first)
}

fn clamp_to_supported(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    if is_supported_month(first) {
        first
    } else if first < earliest_supported_month() {
        earliest_supported_month()
    } else {
        latest_supported_month()
    }
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// `None` once the adjacent month cannot be laid out.
pub fn next_month(date: NaiveDate) -> Option<NaiveDate> {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .filter(|month| is_supported_month(*month))
}

pub fn previous_month(date: NaiveDate) -> Option<NaiveDate> {
    first_of_month(date)
        .checked_sub_months(Months::new(1))
        .filter(|month| is_supported_month(*month))
}
