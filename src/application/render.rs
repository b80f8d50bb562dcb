use crate::application::tui::{ColorPair, Theme};
use crate::domain::{CalendarDay, CalendarGrid, DayClass};

/// Renders a grid and its classifications as plain lines of text.
pub struct TextRenderer {
    theme: Theme,
    color: bool,
}

impl TextRenderer {
    pub fn new(theme: Theme, color: bool) -> Self {
        Self { theme, color }
    }

    pub fn plain() -> Self {
        Self::new(Theme::default(), false)
    }

    /// Four columns per day: `[dd` start, `dd]` end, `=dd=` in range, `(dd)` offset.
    pub fn cell(day: &CalendarDay, class: DayClass) -> String {
        let n = day.day();
        match class {
            DayClass::Offset => format!("({:>2})", n),
            DayClass::Day => format!(" {:>2} ", n),
            DayClass::Start => format!("[{:>2} ", n),
            DayClass::End => format!(" {:>2}]", n),
            DayClass::Selected => format!("={:>2}=", n),
        }
    }

    pub fn render_grid(&self, grid: &CalendarGrid, classes: &[DayClass]) -> String {
        let mut lines = Vec::new();

        let title = grid.reference_month().format("%B %Y").to_string();
        lines.push(self.paint(&format!("{:^34}", title), |t| &t.colors.title, true));

        let header = grid
            .start_of_week()
            .day_labels()
            .iter()
            .map(|label| format!("{:^4}", label))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(self.paint(&header, |t| &t.colors.header, false));

        for (week_index, week) in grid.weeks().enumerate() {
            let cells = week
                .iter()
                .enumerate()
                .map(|(column, day)| {
                    let class = classes
                        .get(week_index * 7 + column)
                        .copied()
                        .unwrap_or(DayClass::Day);
                    let text = Self::cell(day, class);
                    if self.color {
                        self.theme.pair_for(class).paint(&text, false)
                    } else {
                        text
                    }
                })
                .collect::<Vec<_>>();
            lines.push(cells.join(" "));
        }

        lines.join("\n")
    }

    fn paint<F>(&self, text: &str, pick: F, bold: bool) -> String
    where
        F: Fn(&Theme) -> &ColorPair,
    {
        if !self.color {
            return text.to_string();
        }
        pick(&self.theme).paint(text, bold)
    }
}
