use super::theme::Theme;
use crate::domain::{
    CalendarGrid, DatePicker, DayClass, DayInteraction, InteractionKind, SelectedDays,
    SelectionState,
};
use chrono::{Local, NaiveDate};
use crossterm::ExecutableCommand;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind, poll,
};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::tty::IsTty;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use std::io::{self, Stdout, stdout};

pub const CELL_WIDTH: u16 = 6;
pub const CELL_HEIGHT: u16 = 2;

const TITLE_HEIGHT: u16 = 2;
const HEADER_HEIGHT: u16 = 1;
const STATUS_HEIGHT: u16 = 2;
const HELP_HEIGHT: u16 = 3;

#[derive(Debug, Clone)]
pub enum MonthViewResult {
    /// User quit without accepting a range (q, ctrl+c, escape while idle)
    Exited,
    /// User accepted the committed range (pressed Enter)
    Accepted(SelectedDays),
}

/// Screen position of the day cells, used both to draw and to hit-test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub x: u16,
    pub y: u16,
    pub weeks: u16,
}

impl GridGeometry {
    pub fn width() -> u16 {
        CELL_WIDTH * 7
    }

    pub fn height(&self) -> u16 {
        CELL_HEIGHT * self.weeks
    }

    pub fn cell_rect(&self, index: usize) -> Rect {
        let column = (index % 7) as u16;
        let row = (index / 7) as u16;
        Rect {
            x: self.x + column * CELL_WIDTH,
            y: self.y + row * CELL_HEIGHT,
            width: CELL_WIDTH,
            height: CELL_HEIGHT,
        }
    }

    /// Day index under a terminal position, if any.
    pub fn index_at(&self, column: u16, row: u16, len: usize) -> Option<usize> {
        if column < self.x || row < self.y {
            return None;
        }
        let col = (column - self.x) / CELL_WIDTH;
        let week = (row - self.y) / CELL_HEIGHT;
        if col >= 7 || week >= self.weeks {
            return None;
        }
        let index = week as usize * 7 + col as usize;
        (index < len).then_some(index)
    }
}

/// Turns raw mouse events into day interactions.
///
/// Hovers fire only when the pointer enters a new cell, like `mouseenter`.
#[derive(Debug, Default)]
pub struct PointerTracker {
    hovered: Option<usize>,
}

impl PointerTracker {
    pub fn translate(&mut self, kind: MouseEventKind, index: Option<usize>) -> Option<DayInteraction> {
        match kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.hovered = index;
                index.map(DayInteraction::click)
            }
            MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
                if index == self.hovered {
                    return None;
                }
                self.hovered = index;
                index.map(DayInteraction::hover)
            }
            _ => None,
        }
    }

    pub fn forget(&mut self) {
        self.hovered = None;
    }
}

/// One-line description of where the selection stands.
pub fn status_line(grid: &CalendarGrid, state: SelectionState) -> String {
    let describe = |lower: usize, upper: usize| {
        grid.selected_days(lower, upper)
            .map(|days| match days.len_days() {
                1 => format!("{} (1 day)", days),
                n => format!("{} ({} days)", days, n),
            })
            .unwrap_or_else(|| "?".to_string())
    };

    match state {
        SelectionState::Idle => "Click a day to start a range".to_string(),
        SelectionState::AnchorChosen { anchor } => match grid.get(anchor) {
            Some(day) => format!("From {}, click or hover a later day", day.date),
            None => "Click a later day".to_string(),
        },
        SelectionState::Previewing { anchor, candidate } => {
            format!("{}, click to commit", describe(anchor, candidate))
        }
        SelectionState::Committed { start, end } => {
            format!("Selected {}, Enter to accept", describe(start, end))
        }
    }
}

pub struct MonthView<'a> {
    /// Picker driven by this view
    picker: &'a mut DatePicker,
    /// Terminal instance
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Where the day cells were last drawn
    geometry: Option<GridGeometry>,
    pointer: PointerTracker,
    /// Whether we should exit
    should_exit: bool,
    /// Range the user accepted with Enter
    accepted: Option<SelectedDays>,
    /// Whether to show help text
    show_help: bool,
    /// Theme for styling
    theme: Theme,
}

impl<'a> MonthView<'a> {
    pub fn new(picker: &'a mut DatePicker, theme: Theme) -> io::Result<Self> {
        // First check if we're in a proper terminal
        if !IsTty::is_tty(&std::io::stdout()) {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "Not running in a TTY, cannot initialize terminal interface",
            ));
        }

        enable_raw_mode()
            .map_err(|e| io::Error::other(format!("Failed to enable raw mode: {}", e)))?;

        stdout()
            .execute(EnterAlternateScreen)
            .and_then(|out| out.execute(EnableMouseCapture).map(|_| ()))
            .map_err(|e| {
                let _ = disable_raw_mode(); // Clean up on failure
                let _ = stdout().execute(LeaveAlternateScreen);
                io::Error::other(format!("Failed to enter alternate screen: {}", e))
            })?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend).map_err(|e| {
            let _ = disable_raw_mode();
            let _ = stdout().execute(DisableMouseCapture);
            let _ = stdout().execute(LeaveAlternateScreen);
            io::Error::other(format!("Failed to create terminal: {}", e))
        })?;

        Ok(Self {
            picker,
            terminal,
            geometry: None,
            pointer: PointerTracker::default(),
            should_exit: false,
            accepted: None,
            show_help: false,
            theme,
        })
    }

    /// Calculate centered area with both horizontal and vertical centering
    fn calculate_centered_area(available: Rect, needed_width: u16, needed_height: u16) -> Rect {
        let width = std::cmp::min(available.width, needed_width);
        let height = std::cmp::min(available.height, needed_height);

        let left_margin = available.width.saturating_sub(width) / 2;
        let top_margin = available.height.saturating_sub(height) / 2;

        Rect {
            x: available.x + left_margin,
            y: available.y + top_margin,
            width,
            height,
        }
    }

    /// Style for one day cell
    fn day_style(class: DayClass, date: NaiveDate, today: NaiveDate, theme: &Theme) -> Style {
        if class == DayClass::Day && date == today {
            theme
                .colors
                .today
                .style()
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            theme.style_for(class)
        }
    }

    fn header_line(grid: &CalendarGrid, theme: &Theme) -> Line<'static> {
        let spans: Vec<Span> = grid
            .start_of_week()
            .day_labels()
            .iter()
            .map(|label| {
                let pair = if matches!(*label, "Sat" | "Sun") {
                    &theme.colors.weekend
                } else {
                    &theme.colors.header
                };
                Span::styled(
                    format!("{:^width$}", label, width = CELL_WIDTH as usize),
                    pair.style(),
                )
            })
            .collect();
        Line::from(spans)
    }

    fn help_text(theme: &Theme) -> Paragraph<'static> {
        let help_text = vec![
            Line::from(Span::styled(
                "Click=Start/End • Move=Preview • ←→/hl=Month • t=Today",
                theme.colors.help_text.style(),
            )),
            Line::from(Span::styled(
                "s=Week start • Esc=Cancel • Enter=Accept • ?=Help • q=Quit",
                theme.colors.help_text.style(),
            )),
        ];

        Paragraph::new(help_text).alignment(Alignment::Center)
    }

    /// Handle keyboard input
    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match (key.code, key.modifiers) {
            // Exit
            (KeyCode::Char('q'), _) => {
                self.should_exit = true;
            }

            // Ctrl+C and Ctrl+D
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
                self.should_exit = true;
            }

            // Escape cancels a selection in progress, otherwise quits
            (KeyCode::Esc, _) => {
                if self.picker.state() == SelectionState::Idle {
                    self.should_exit = true;
                } else {
                    self.picker.cancel();
                }
            }

            // Month navigation
            (KeyCode::Left, _) | (KeyCode::Char('h'), _) => {
                self.picker.previous_month();
                self.pointer.forget();
            }
            (KeyCode::Right, _) | (KeyCode::Char('l'), _) => {
                self.picker.next_month();
                self.pointer.forget();
            }
            (KeyCode::Char('t'), _) => {
                self.picker.go_to(Local::now().date_naive());
                self.pointer.forget();
            }
            (KeyCode::Char('s'), _) => {
                let toggled = self.picker.start_of_week().toggled();
                self.picker.set_start_of_week(toggled);
                self.pointer.forget();
            }

            // Enter accepts a committed range
            (KeyCode::Enter, _) => {
                if let SelectionState::Committed { start, end } = self.picker.state() {
                    self.accepted = self.picker.grid().selected_days(start, end);
                    self.should_exit = self.accepted.is_some();
                }
            }

            // Toggle help
            (KeyCode::Char('?'), _) => {
                self.show_help = !self.show_help;
            }

            _ => {}
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let index = self.geometry.and_then(|geometry| {
            geometry.index_at(mouse.column, mouse.row, self.picker.grid().len())
        });

        if let Some(interaction) = self.pointer.translate(mouse.kind, index) {
            let output = self.picker.interact(interaction);
            if interaction.kind == InteractionKind::Click {
                log::debug!("{} -> {:?}", interaction, output.outcome);
            }
        }
    }

    /// Run the month view TUI loop
    pub fn run(&mut self) -> io::Result<MonthViewResult> {
        loop {
            // Check for exit condition before drawing
            if self.should_exit {
                break;
            }

            // Capture the state we need for drawing
            let grid = self.picker.grid().clone();
            let classes = self.picker.classes();
            let status = status_line(&grid, self.picker.state());
            let show_help = self.show_help;
            let today = Local::now().date_naive();
            let theme = &self.theme;
            let mut drawn_geometry = None;

            self.terminal.draw(|frame| {
                let size = frame.area();

                let weeks = grid.len().div_ceil(7) as u16;
                let grid_height = CELL_HEIGHT * weeks;
                let total_height = if show_help {
                    TITLE_HEIGHT + HEADER_HEIGHT + grid_height + STATUS_HEIGHT + HELP_HEIGHT
                } else {
                    TITLE_HEIGHT + HEADER_HEIGHT + grid_height + STATUS_HEIGHT
                };

                // Calculate centered area for the entire UI
                let area =
                    Self::calculate_centered_area(size, GridGeometry::width(), total_height);

                let title = Paragraph::new(Line::from(Span::styled(
                    grid.reference_month().format("%B %Y").to_string(),
                    theme.colors.title.style().add_modifier(Modifier::BOLD),
                )))
                .alignment(Alignment::Center);
                frame.render_widget(title, Rect { height: 1, ..area });

                let header_area = Rect {
                    y: area.y + TITLE_HEIGHT,
                    height: HEADER_HEIGHT,
                    ..area
                };
                frame.render_widget(Paragraph::new(Self::header_line(&grid, theme)), header_area);

                let geometry = GridGeometry {
                    x: area.x,
                    y: header_area.y + HEADER_HEIGHT,
                    weeks,
                };

                for (index, day) in grid.days().iter().enumerate() {
                    let rect = geometry.cell_rect(index).intersection(size);
                    if rect.is_empty() {
                        continue;
                    }
                    let class = classes.get(index).copied().unwrap_or(DayClass::Offset);
                    let cell = Paragraph::new(format!(
                        "{:^width$}",
                        day.day(),
                        width = CELL_WIDTH as usize
                    ))
                    .style(Self::day_style(class, day.date, today, theme));
                    frame.render_widget(cell, rect);
                }

                let status_area = Rect {
                    y: geometry.y + geometry.height() + 1,
                    height: 1,
                    ..area
                }
                .intersection(size);
                let status_widget = Paragraph::new(Line::from(Span::styled(
                    status.clone(),
                    theme.colors.status_text.style(),
                )))
                .alignment(Alignment::Center);
                frame.render_widget(status_widget, status_area);

                if show_help {
                    let help_area = Rect {
                        y: status_area.y + STATUS_HEIGHT,
                        height: HELP_HEIGHT,
                        ..area
                    }
                    .intersection(size);
                    frame.render_widget(Self::help_text(theme), help_area);
                }

                drawn_geometry = Some(geometry);
            })?;

            self.geometry = drawn_geometry;

            // Handle events with timeout to prevent blocking indefinitely
            if !poll(std::time::Duration::from_millis(100))? {
                continue;
            }

            match event::read()? {
                Event::Key(key) => self.handle_key_event(key),
                Event::Mouse(mouse) => self.handle_mouse_event(mouse),
                // Resize and focus changes just trigger a redraw
                _ => continue,
            }
        }

        // Ensure proper cleanup before returning
        self.cleanup()?;

        Ok(match self.accepted {
            Some(days) => MonthViewResult::Accepted(days),
            None => MonthViewResult::Exited,
        })
    }

    /// Explicit cleanup method
    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        self.terminal.backend_mut().execute(DisableMouseCapture)?;
        self.terminal.backend_mut().execute(LeaveAlternateScreen)?;
        Ok(())
    }
}

impl<'a> Drop for MonthView<'a> {
    fn drop(&mut self) {
        // Fallback cleanup if explicit cleanup wasn't called
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StartOfWeek;

    fn october() -> CalendarGrid {
        CalendarGrid::generate(NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(), StartOfWeek::Sun)
    }

    #[test]
    fn test_hit_testing_matches_cell_rects() {
        let geometry = GridGeometry { x: 10, y: 5, weeks: 5 };

        for index in [0, 6, 7, 20, 34] {
            let rect = geometry.cell_rect(index);
            assert_eq!(geometry.index_at(rect.x, rect.y, 35), Some(index));
            assert_eq!(
                geometry.index_at(rect.x + CELL_WIDTH - 1, rect.y + CELL_HEIGHT - 1, 35),
                Some(index)
            );
        }

        assert_eq!(geometry.index_at(9, 5, 35), None);
        assert_eq!(geometry.index_at(10, 4, 35), None);
        assert_eq!(geometry.index_at(10 + GridGeometry::width(), 5, 35), None);
        assert_eq!(geometry.index_at(10, 5 + geometry.height(), 35), None);
        // Last row shorter than a week
        assert_eq!(geometry.index_at(10 + CELL_WIDTH * 6, 5 + CELL_HEIGHT * 4, 30), None);
    }

    #[test]
    fn test_pointer_hover_fires_on_cell_entry_only() {
        let mut pointer = PointerTracker::default();

        assert_eq!(
            pointer.translate(MouseEventKind::Moved, Some(4)),
            Some(DayInteraction::hover(4))
        );
        assert_eq!(pointer.translate(MouseEventKind::Moved, Some(4)), None);
        assert_eq!(pointer.translate(MouseEventKind::Moved, None), None);
        assert_eq!(
            pointer.translate(MouseEventKind::Drag(MouseButton::Left), Some(4)),
            Some(DayInteraction::hover(4))
        );
        assert_eq!(
            pointer.translate(MouseEventKind::Down(MouseButton::Left), Some(4)),
            Some(DayInteraction::click(4))
        );
        assert_eq!(pointer.translate(MouseEventKind::Moved, Some(4)), None);
        assert_eq!(
            pointer.translate(MouseEventKind::Down(MouseButton::Right), Some(9)),
            None
        );
        assert_eq!(pointer.translate(MouseEventKind::ScrollDown, Some(9)), None);
    }

    #[test]
    fn test_status_line_follows_state() {
        let grid = october();

        assert_eq!(
            status_line(&grid, SelectionState::Idle),
            "Click a day to start a range"
        );
        assert_eq!(
            status_line(&grid, SelectionState::AnchorChosen { anchor: 5 }),
            "From 2026-10-02, click or hover a later day"
        );
        assert_eq!(
            status_line(&grid, SelectionState::Previewing { anchor: 5, candidate: 7 }),
            "2026-10-02..2026-10-04 (3 days), click to commit"
        );
        assert_eq!(
            status_line(&grid, SelectionState::Committed { start: 5, end: 5 }),
            "Selected 2026-10-02..2026-10-02 (1 day), Enter to accept"
        );
    }

    #[test]
    fn test_centered_area_is_clamped() {
        let available = Rect::new(0, 0, 20, 10);
        let area = MonthView::calculate_centered_area(available, 42, 4);
        assert_eq!(area, Rect::new(0, 3, 20, 4));
    }
}
