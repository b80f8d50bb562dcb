use crate::application::{Config, MonthView, MonthViewResult, TextRenderer, Theme};
use crate::domain::{
    DatePicker, DayClass, DayInteraction, GridShape, Outcome, SelectedDays, SelectionState,
    StartOfWeek,
};
use crate::infrastructure::{HookRegistry, SelectionLoggerHook};
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::Serialize;

/// Command-line choices that override the configuration.
#[derive(Debug, Clone, Default)]
pub struct PickerOptions {
    pub month: Option<NaiveDate>,
    pub start_of_week: Option<StartOfWeek>,
    pub six_weeks: bool,
}

#[derive(Debug, Serialize)]
pub struct DayReport {
    pub index: usize,
    pub date: NaiveDate,
    pub class: DayClass,
}

#[derive(Debug, Serialize)]
pub struct GridReport {
    pub reference_month: NaiveDate,
    pub start_of_week: StartOfWeek,
    pub shape: GridShape,
    pub state: SelectionState,
    pub days: Vec<DayReport>,
}

impl GridReport {
    pub fn from_picker(picker: &DatePicker) -> Self {
        let grid = picker.grid();
        let days = grid
            .days()
            .iter()
            .zip(picker.classes())
            .enumerate()
            .map(|(index, (day, class))| DayReport {
                index,
                date: day.date,
                class,
            })
            .collect();

        Self {
            reference_month: grid.reference_month(),
            start_of_week: grid.start_of_week(),
            shape: grid.shape(),
            state: picker.state(),
            days,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReplayStep {
    pub interaction: DayInteraction,
    pub outcome: Outcome,
    pub state: SelectionState,
}

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<ReplayStep>,
    pub committed: Vec<SelectedDays>,
    pub grid: GridReport,
}

pub struct PickerApp {
    config: Config,
}

impl PickerApp {
    pub fn new() -> Result<Self> {
        let config = Config::from_env().context("Failed to read configuration")?;
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn default_hooks() -> HookRegistry {
        let mut hook_registry = HookRegistry::new();
        hook_registry.register_default(SelectionLoggerHook);
        hook_registry
    }

    pub fn build_picker(&self, options: &PickerOptions) -> DatePicker {
        let month = options
            .month
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let start_of_week = options.start_of_week.unwrap_or(self.config.start_of_week);
        let shape = if options.six_weeks {
            GridShape::SixWeeks
        } else {
            self.config.grid_shape
        };

        DatePicker::with_hooks(month, start_of_week, shape, Self::default_hooks())
    }

    fn renderer(&self, color: bool) -> TextRenderer {
        TextRenderer::new(Theme::by_name(&self.config.theme), color)
    }

    /// Runs the interactive month view until the user accepts a range or quits.
    pub fn run_pick(&self, options: &PickerOptions) -> Result<Option<SelectedDays>> {
        let mut picker = self.build_picker(options);
        let theme = Theme::by_name(&self.config.theme);

        let result = {
            let mut month_view =
                MonthView::new(&mut picker, theme).context("Failed to start the month view")?;
            month_view.run()?
        }; // month_view is dropped here, restoring the terminal

        match result {
            MonthViewResult::Accepted(days) => Ok(Some(days)),
            MonthViewResult::Exited => Ok(None),
        }
    }

    pub fn grid_report(
        &self,
        options: &PickerOptions,
        range: Option<SelectedDays>,
        json: bool,
        color: bool,
    ) -> Result<String> {
        let mut picker = self.build_picker(options);

        if let Some(range) = range {
            if !picker.preselect(&range) {
                bail!(
                    "Range {} is not within {}",
                    range,
                    picker.reference_month().format("%B %Y")
                );
            }
        }

        if json {
            return serde_json::to_string_pretty(&GridReport::from_picker(&picker))
                .context("Failed to serialize grid");
        }

        Ok(self
            .renderer(color)
            .render_grid(picker.grid(), &picker.classes()))
    }

    pub fn replay(
        &self,
        options: &PickerOptions,
        events: &[DayInteraction],
        json: bool,
    ) -> Result<String> {
        let mut picker = self.build_picker(options);
        let mut steps = Vec::with_capacity(events.len());
        let mut committed = Vec::new();

        for &interaction in events {
            let output = picker.interact(interaction);
            if let Some(days) = output.committed() {
                committed.push(days);
            }
            steps.push(ReplayStep {
                interaction,
                outcome: output.outcome,
                state: output.state,
            });
        }

        let report = ReplayReport {
            steps,
            committed,
            grid: GridReport::from_picker(&picker),
        };

        if json {
            return serde_json::to_string_pretty(&report).context("Failed to serialize replay");
        }

        let mut lines: Vec<String> = report
            .steps
            .iter()
            .map(|step| format!("{} -> {}", step.interaction, describe_outcome(&step.outcome)))
            .collect();
        lines.push(String::new());
        lines.push(TextRenderer::plain().render_grid(picker.grid(), &picker.classes()));

        Ok(lines.join("\n"))
    }
}

fn describe_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Ignored => "ignored".to_string(),
        Outcome::Updated => "updated".to_string(),
        Outcome::Restarted => "restarted".to_string(),
        Outcome::Committed(days) => format!("committed {}", days),
    }
}
