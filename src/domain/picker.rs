use crate::domain::{
    CalendarGrid, DayClass, DayInteraction, EngineOutput, GridShape, Outcome, SelectedDays,
    SelectionEngine, SelectionState, StartOfWeek, is_supported_month, next_month, previous_month,
};
use crate::infrastructure::{HookRegistry, SelectionContext};
use chrono::{Local, NaiveDate};

/// Front-end facing controller: owns the displayed month, its grid, the
/// selection engine and the hooks that hear about commits.
#[derive(Debug)]
pub struct DatePicker {
    engine: SelectionEngine,
    shape: GridShape,
    hooks: HookRegistry,
    last_committed: Option<SelectedDays>,
}

impl DatePicker {
    pub fn new(reference_month: NaiveDate, start_of_week: StartOfWeek, shape: GridShape) -> Self {
        Self::with_hooks(reference_month, start_of_week, shape, HookRegistry::new())
    }

    pub fn with_hooks(
        reference_month: NaiveDate,
        start_of_week: StartOfWeek,
        shape: GridShape,
        hooks: HookRegistry,
    ) -> Self {
        let grid = CalendarGrid::generate_with_shape(reference_month, start_of_week, shape);
        Self {
            engine: SelectionEngine::new(grid),
            shape,
            hooks,
            last_committed: None,
        }
    }

    pub fn grid(&self) -> &CalendarGrid {
        self.engine.grid()
    }

    pub fn reference_month(&self) -> NaiveDate {
        self.grid().reference_month()
    }

    pub fn start_of_week(&self) -> StartOfWeek {
        self.grid().start_of_week()
    }

    pub fn state(&self) -> SelectionState {
        self.engine.state()
    }

    pub fn classes(&self) -> Vec<DayClass> {
        self.engine.classes()
    }

    /// Most recent range committed through this picker, across month changes.
    pub fn last_committed(&self) -> Option<SelectedDays> {
        self.last_committed
    }

    /// Feeds one pointer event to the engine.
    ///
    /// Events on days outside the displayed month never reach the engine.
    pub fn interact(&mut self, interaction: DayInteraction) -> EngineOutput {
        if !self.grid().is_selectable(interaction.index) {
            log::debug!("Filtered {} on a non-selectable day", interaction);
            return EngineOutput {
                outcome: Outcome::Ignored,
                state: self.state(),
                classes: self.classes(),
            };
        }

        let output = self.engine.on_day_interaction(interaction);

        if let (Outcome::Committed(days), SelectionState::Committed { start, end }) =
            (output.outcome, output.state)
        {
            self.last_committed = Some(days);

            let context = SelectionContext {
                reference_month: self.reference_month(),
                start_of_week: self.start_of_week(),
                start_index: start,
                end_index: end,
                committed_at: Local::now(),
            };
            self.hooks.execute_commit_hooks(&context, &days);
        }

        output
    }

    /// Explicit cancellation; drops whatever is highlighted.
    pub fn cancel(&mut self) {
        self.engine.reset();
    }

    pub fn next_month(&mut self) {
        match next_month(self.reference_month()) {
            Some(month) => {
                self.go_to(month);
            }
            None => log::warn!("No month after {}", self.reference_month()),
        }
    }

    pub fn previous_month(&mut self) {
        match previous_month(self.reference_month()) {
            Some(month) => {
                self.go_to(month);
            }
            None => log::warn!("No month before {}", self.reference_month()),
        }
    }

    /// Shows the month containing `month`; refuses months the calendar
    /// cannot lay out and keeps the current view.
    pub fn go_to(&mut self, month: NaiveDate) -> bool {
        if !is_supported_month(month) {
            log::warn!("Cannot show {}", month.format("%Y-%m"));
            return false;
        }
        self.regenerate(month, self.start_of_week());
        true
    }

    pub fn set_start_of_week(&mut self, start_of_week: StartOfWeek) {
        self.regenerate(self.reference_month(), start_of_week);
    }

    /// Shows `days` as the committed range without running hooks.
    ///
    /// Every day of the range must be a day of the displayed month.
    pub fn preselect(&mut self, days: &SelectedDays) -> bool {
        let grid = self.grid();
        let selectable = |date| grid.index_of(date).is_some_and(|i| grid.is_selectable(i));
        if !days.days().all(selectable) {
            return false;
        }
        self.engine.restore(days)
    }

    fn regenerate(&mut self, month: NaiveDate, start_of_week: StartOfWeek) {
        let grid = CalendarGrid::generate_with_shape(month, start_of_week, self.shape);
        log::debug!(
            "Showing {} ({} days, weeks start {})",
            grid.reference_month().format("%Y-%m"),
            grid.len(),
            start_of_week
        );
        self.engine.load_grid(grid);
    }
}
