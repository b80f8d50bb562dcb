use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::domain::{CalendarGrid, DayClass, SelectedDays, classify_all};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Click,
    Hover,
}

/// A pointer event on the day at `index` of the current grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayInteraction {
    pub kind: InteractionKind,
    pub index: usize,
}

impl DayInteraction {
    pub fn click(index: usize) -> Self {
        Self {
            kind: InteractionKind::Click,
            index,
        }
    }

    pub fn hover(index: usize) -> Self {
        Self {
            kind: InteractionKind::Hover,
            index,
        }
    }
}

impl fmt::Display for DayInteraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            InteractionKind::Click => write!(f, "click:{}", self.index),
            InteractionKind::Hover => write!(f, "hover:{}", self.index),
        }
    }
}

/// Accepts `click:5`, `hover:10`, or the short forms `c5` and `h10`.
impl FromStr for DayInteraction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_lowercase();
        let (kind, index) = match s.split_once(':') {
            Some((kind, index)) => (kind.to_string(), index.to_string()),
            None => {
                let split = s.find(|c: char| c.is_ascii_digit()).unwrap_or(s.len());
                (s[..split].to_string(), s[split..].to_string())
            }
        };

        let kind = match kind.as_str() {
            "c" | "click" => InteractionKind::Click,
            "h" | "hover" => InteractionKind::Hover,
            other => bail!("Unknown interaction '{}', expected click or hover", other),
        };
        let index = index
            .parse()
            .with_context(|| format!("Invalid day index in '{}'", s))?;

        Ok(Self { kind, index })
    }
}

/// The only mutable value the engine owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SelectionState {
    #[default]
    Idle,
    AnchorChosen {
        anchor: usize,
    },
    /// Hovering at or past the anchor; `candidate` is not committed yet.
    Previewing {
        anchor: usize,
        candidate: usize,
    },
    Committed {
        start: usize,
        end: usize,
    },
}

impl SelectionState {
    /// Lower and upper index of whatever is currently highlighted.
    pub fn bounds(&self) -> Option<(usize, usize)> {
        match *self {
            SelectionState::Idle => None,
            SelectionState::AnchorChosen { anchor } => Some((anchor, anchor)),
            SelectionState::Previewing { anchor, candidate } => Some((anchor, candidate)),
            SelectionState::Committed { start, end } => Some((start, end)),
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, SelectionState::Committed { .. })
    }
}

/// What processing one interaction did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// State untouched.
    Ignored,
    Updated,
    /// Previous highlight discarded and a new anchor placed.
    Restarted,
    Committed(SelectedDays),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineOutput {
    pub outcome: Outcome,
    pub state: SelectionState,
    pub classes: Vec<DayClass>,
}

impl EngineOutput {
    pub fn committed(&self) -> Option<SelectedDays> {
        match self.outcome {
            Outcome::Committed(days) => Some(days),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Stay,
    Move(SelectionState),
    /// Drop the attempt and treat the index as a fresh first click.
    Restart(usize),
    Commit { start: usize, end: usize },
}

fn reduce(state: SelectionState, interaction: DayInteraction) -> Step {
    use InteractionKind::{Click, Hover};
    use SelectionState::*;

    let i = interaction.index;
    match (state, interaction.kind) {
        (Idle, Click) => Step::Move(AnchorChosen { anchor: i }),
        (Idle, Hover) => Step::Stay,

        (AnchorChosen { anchor } | Previewing { anchor, .. }, _) if i < anchor => Step::Restart(i),
        (AnchorChosen { anchor } | Previewing { anchor, .. }, Hover) => Step::Move(Previewing {
            anchor,
            candidate: i,
        }),
        (AnchorChosen { anchor } | Previewing { anchor, .. }, Click) => Step::Commit {
            start: anchor,
            end: i,
        },

        (Committed { .. }, Click) => Step::Restart(i),
        (Committed { .. }, Hover) => Step::Stay,
    }
}

/// Turns click and hover events over one grid into a committed range.
#[derive(Debug, Clone)]
pub struct SelectionEngine {
    grid: CalendarGrid,
    state: SelectionState,
}

impl SelectionEngine {
    pub fn new(grid: CalendarGrid) -> Self {
        Self {
            grid,
            state: SelectionState::Idle,
        }
    }

    pub fn grid(&self) -> &CalendarGrid {
        &self.grid
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn classes(&self) -> Vec<DayClass> {
        classify_all(&self.grid, &self.state)
    }

    /// Replaces the grid wholesale; any selection in progress is discarded.
    pub fn load_grid(&mut self, grid: CalendarGrid) {
        self.grid = grid;
        self.reset();
    }

    pub fn reset(&mut self) {
        if self.state != SelectionState::Idle {
            log::debug!("Selection reset from {:?}", self.state);
        }
        self.state = SelectionState::Idle;
    }

    /// Puts the engine straight into `Committed` for a range of this grid.
    ///
    /// Returns false, leaving state untouched, unless both ends are in the grid.
    pub fn restore(&mut self, days: &SelectedDays) -> bool {
        match (
            self.grid.index_of(days.start_day()),
            self.grid.index_of(days.end_day()),
        ) {
            (Some(start), Some(end)) => {
                self.state = SelectionState::Committed { start, end };
                true
            }
            _ => false,
        }
    }

    pub fn on_day_interaction(&mut self, interaction: DayInteraction) -> EngineOutput {
        if interaction.index >= self.grid.len() {
            log::debug!(
                "Ignoring {} outside a grid of {} days",
                interaction,
                self.grid.len()
            );
            return self.output(Outcome::Ignored);
        }

        let outcome = match reduce(self.state, interaction) {
            Step::Stay => Outcome::Ignored,
            Step::Move(next) => {
                self.state = next;
                Outcome::Updated
            }
            Step::Restart(anchor) => {
                self.state = SelectionState::AnchorChosen { anchor };
                Outcome::Restarted
            }
            Step::Commit { start, end } => self.commit(start, end),
        };

        if outcome != Outcome::Ignored {
            log::debug!("{} -> {:?}", interaction, self.state);
        }

        self.output(outcome)
    }

    // Indices that cannot form a range clear the selection instead.
    fn commit(&mut self, start: usize, end: usize) -> Outcome {
        match self.grid.selected_days(start, end) {
            Some(days) => {
                self.state = SelectionState::Committed { start, end };
                log::info!("Committed {}", days);
                Outcome::Committed(days)
            }
            None => {
                log::warn!("Cannot resolve indices {}..{}, resetting", start, end);
                self.state = SelectionState::Idle;
                Outcome::Updated
            }
        }
    }

    fn output(&self, outcome: Outcome) -> EngineOutput {
        EngineOutput {
            outcome,
            state: self.state,
            classes: self.classes(),
        }
    }
}
