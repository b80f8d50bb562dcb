use crate::domain::SelectedDays;
use crate::infrastructure::{SelectionContext, SelectionHook};
use anyhow::Result;

/// Records every committed range through the `log` facade
pub struct SelectionLoggerHook;

impl SelectionHook for SelectionLoggerHook {
    fn on_selection_committed(&self, context: &SelectionContext, days: &SelectedDays) -> Result<()> {
        log::info!(
            "[{}] Selected {} ({} days) - Month: {} - Indices: {}..{} - Week starts: {}",
            context.committed_at.format("%Y-%m-%d %H:%M:%S"),
            days,
            days.len_days(),
            context.reference_month.format("%Y-%m"),
            context.start_index,
            context.end_index,
            context.start_of_week
        );

        Ok(())
    }

    fn name(&self) -> &str {
        "Selection Logger"
    }
}
