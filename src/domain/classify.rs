use serde::Serialize;
use std::fmt;

use crate::domain::{CalendarGrid, SelectionState};

/// How a single day should be painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayClass {
    Offset,
    Day,
    Start,
    End,
    Selected,
}

impl DayClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayClass::Offset => "offset",
            DayClass::Day => "day",
            DayClass::Start => "start",
            DayClass::End => "end",
            DayClass::Selected => "selected",
        }
    }

    /// Start, end or in between.
    pub fn is_highlighted(&self) -> bool {
        matches!(self, DayClass::Start | DayClass::End | DayClass::Selected)
    }
}

impl fmt::Display for DayClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies one grid position against the current selection.
///
/// Total over every input: positions past the end of the grid are reported
/// as `Offset`, and days outside the displayed month stay `Offset` even when
/// a boundary lands on them.
pub fn classify(grid: &CalendarGrid, state: &SelectionState, index: usize) -> DayClass {
    let Some(day) = grid.get(index) else {
        return DayClass::Offset;
    };

    if !grid.in_reference_month(day.date) {
        return DayClass::Offset;
    }

    let Some((lower, upper)) = state.bounds() else {
        return DayClass::Day;
    };

    if index == lower {
        return DayClass::Start;
    }

    if index == upper && upper != lower {
        return DayClass::End;
    }

    if lower < index && index < upper {
        let ordered = match (grid.get(lower), grid.get(upper)) {
            (Some(start), Some(end)) => start.date < day.date && day.date < end.date,
            _ => false,
        };
        if ordered {
            return DayClass::Selected;
        }
    }

    DayClass::Day
}

pub fn classify_all(grid: &CalendarGrid, state: &SelectionState) -> Vec<DayClass> {
    (0..grid.len())
        .map(|index| classify(grid, state, index))
        .collect()
}
