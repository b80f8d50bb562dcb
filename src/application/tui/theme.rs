use crate::domain::DayClass;
use crossterm::style::{Color as CrosstermColor, Stylize};
use ratatui::style::{Color as RatatuiColor, Modifier, Style as RatatuiStyle};

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Day classes
    pub day: ColorPair,
    pub offset: ColorPair,
    pub start: ColorPair,
    pub end: ColorPair,
    pub selected: ColorPair,
    pub today: ColorPair,

    // UI elements
    pub header: ColorPair,
    pub weekend: ColorPair,
    pub title: ColorPair,

    // Text
    pub status_text: ColorPair,
    pub help_text: ColorPair,
}

#[derive(Debug, Clone)]
pub struct ColorPair {
    pub fg: CrosstermColor,
    pub bg: Option<CrosstermColor>,
}

impl ColorPair {
    pub fn new(fg: CrosstermColor) -> Self {
        Self { fg, bg: None }
    }

    pub fn with_bg(fg: CrosstermColor, bg: CrosstermColor) -> Self {
        Self { fg, bg: Some(bg) }
    }

    /// Style for ratatui widgets
    pub fn style(&self) -> RatatuiStyle {
        let style = RatatuiStyle::default().fg(RatatuiColor::from(self.fg));
        match self.bg {
            Some(bg) => style.bg(RatatuiColor::from(bg)),
            None => style,
        }
    }

    /// Escape-coded text for plain terminal output
    pub fn paint(&self, text: &str, bold: bool) -> String {
        let mut styled = text.with(self.fg);
        if bold {
            styled = styled.bold();
        }
        if let Some(bg) = self.bg {
            styled = styled.on(bg);
        }
        styled.to_string()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            colors: ThemeColors {
                day: ColorPair::new(CrosstermColor::White),
                offset: ColorPair::new(CrosstermColor::DarkGrey),
                start: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::Blue),
                end: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::Blue),
                selected: ColorPair::with_bg(
                    CrosstermColor::White,
                    CrosstermColor::Rgb { r: 30, g: 50, b: 90 },
                ),
                today: ColorPair::new(CrosstermColor::Yellow),

                header: ColorPair::new(CrosstermColor::DarkCyan),
                weekend: ColorPair::new(CrosstermColor::Rgb { r: 150, g: 150, b: 150 }),
                title: ColorPair::new(CrosstermColor::Green),

                status_text: ColorPair::new(CrosstermColor::White),
                help_text: ColorPair::new(CrosstermColor::DarkCyan),
            },
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            colors: ThemeColors {
                day: ColorPair::new(CrosstermColor::Black),
                offset: ColorPair::new(CrosstermColor::Grey),
                start: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::DarkBlue),
                end: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::DarkBlue),
                selected: ColorPair::with_bg(
                    CrosstermColor::Black,
                    CrosstermColor::Rgb { r: 200, g: 215, b: 240 },
                ),
                today: ColorPair::new(CrosstermColor::DarkYellow),

                header: ColorPair::new(CrosstermColor::DarkBlue),
                weekend: ColorPair::new(CrosstermColor::DarkGrey),
                title: ColorPair::new(CrosstermColor::DarkGreen),

                status_text: ColorPair::new(CrosstermColor::Black),
                help_text: ColorPair::new(CrosstermColor::DarkBlue),
            },
        }
    }

    pub fn minimal() -> Self {
        Self {
            name: "Minimal".to_string(),
            colors: ThemeColors {
                day: ColorPair::new(CrosstermColor::White),
                offset: ColorPair::new(CrosstermColor::DarkGrey),
                start: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::White),
                end: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::White),
                selected: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::DarkGrey),
                today: ColorPair::new(CrosstermColor::White),

                header: ColorPair::new(CrosstermColor::White),
                weekend: ColorPair::new(CrosstermColor::Grey),
                title: ColorPair::new(CrosstermColor::White),

                status_text: ColorPair::new(CrosstermColor::White),
                help_text: ColorPair::new(CrosstermColor::Grey),
            },
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "minimal" => Self::minimal(),
            _ => Self::dark(), // default
        }
    }

    pub fn available_themes() -> Vec<String> {
        vec!["dark".to_string(), "light".to_string(), "minimal".to_string()]
    }

    pub fn pair_for(&self, class: DayClass) -> &ColorPair {
        match class {
            DayClass::Offset => &self.colors.offset,
            DayClass::Day => &self.colors.day,
            DayClass::Start => &self.colors.start,
            DayClass::End => &self.colors.end,
            DayClass::Selected => &self.colors.selected,
        }
    }

    pub fn style_for(&self, class: DayClass) -> RatatuiStyle {
        match class {
            DayClass::Start | DayClass::End => self
                .pair_for(class)
                .style()
                .add_modifier(Modifier::BOLD),
            _ => self.pair_for(class).style(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name_falls_back_to_dark() {
        assert_eq!(Theme::by_name("LIGHT").name, "Light");
        assert_eq!(Theme::by_name("solarized").name, "Dark");
        assert_eq!(Theme::available_themes().len(), 3);
    }

    #[test]
    fn test_boundaries_are_bold() {
        let theme = Theme::dark();
        let style = theme.style_for(DayClass::Start);
        assert!(style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(style.bg, Some(RatatuiColor::LightBlue));

        let style = theme.style_for(DayClass::Offset);
        assert_eq!(style.fg, Some(RatatuiColor::DarkGray));
        assert!(!style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_paint_keeps_text_and_marks_bold() {
        let pair = ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::Blue);
        let bold = pair.paint("12", true);
        let regular = pair.paint("12", false);

        assert!(bold.contains("12"));
        assert!(regular.contains("12"));
        assert_ne!(bold, regular);
    }
}
