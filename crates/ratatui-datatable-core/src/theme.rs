use ratatui::style::Modifier;
use ratatui::style::Style;

/// Base styles the table widget patches its own options onto.
#[derive(Clone, Debug)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    pub accent: Style,
    pub header: Style,
    pub sort_indicator: Style,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default(),
            text_muted: Style::default().dark_gray(),
            accent: Style::default().cyan(),
            header: Style::default().add_modifier(Modifier::BOLD),
            sort_indicator: Style::default().yellow(),
        }
    }
}
