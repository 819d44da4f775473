//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::config::ThemeMode;

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Pass/fail colors
    pub passing: Color,
    pub failing: Color,
    pub passing_row_bg: Color,

    // Chart colors
    pub curve: Color,
    pub voldoende_line: Color,
    pub axis: Color,

    // Table colors
    pub row_alt_bg: Color,
    pub header_style: Style,
    pub row_selected: Style,

    // Sidebar
    pub field_selected: Style,
    pub field_label: Color,
    pub field_value: Color,

    // General colors
    pub muted: Color,
    pub title_color: Color,
    pub border: Color,
    pub border_focused: Color,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            passing: Color::Green,
            failing: Color::Red,
            passing_row_bg: Color::Indexed(22),
            curve: Color::Cyan,
            voldoende_line: Color::Yellow,
            axis: Color::Gray,
            row_alt_bg: Color::Indexed(235),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            field_selected: Style::new().fg(Color::Cyan).bold().reversed(),
            field_label: Color::Gray,
            field_value: Color::White,
            muted: Color::Gray,
            title_color: Color::Cyan,
            border: Color::Indexed(238),
            border_focused: Color::Cyan,
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
        }
    }

    pub fn light() -> Self {
        Self {
            passing: Color::Rgb(0, 110, 40),
            failing: Color::Rgb(170, 20, 20),
            passing_row_bg: Color::Rgb(220, 245, 225),
            curve: Color::Blue,
            voldoende_line: Color::Rgb(180, 110, 0),
            axis: Color::DarkGray,
            row_alt_bg: Color::Indexed(254),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            field_selected: Style::new().fg(Color::Blue).bold().reversed(),
            field_label: Color::DarkGray,
            field_value: Color::Black,
            muted: Color::DarkGray,
            title_color: Color::Blue,
            border: Color::Indexed(250),
            border_focused: Color::Blue,
            status_bar_bg: Color::Indexed(253),
            status_key_color: Color::Blue,
            flash_success: Color::Rgb(0, 110, 40),
            flash_error: Color::Rgb(170, 20, 20),
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
        }
    }

    /// Color for a rounded grade
    pub fn grade_color(&self, is_passing: bool) -> Color {
        if is_passing {
            self.passing
        } else {
            self.failing
        }
    }
}

/// Pick the palette for `mode`. Auto asks the terminal for its background
/// luma and falls back to dark when the terminal doesn't answer.
pub fn resolve_theme(mode: ThemeMode) -> ThemeColors {
    match mode {
        ThemeMode::Dark => ThemeColors::dark(),
        ThemeMode::Light => ThemeColors::light(),
        ThemeMode::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => ThemeColors::light(),
            Ok(_) => ThemeColors::dark(),
            Err(e) => {
                tracing::debug!("terminal background detection failed: {}", e);
                ThemeColors::dark()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_modes() {
        assert_eq!(resolve_theme(ThemeMode::Dark).curve, Color::Cyan);
        assert_eq!(resolve_theme(ThemeMode::Light).curve, Color::Blue);
    }

    #[test]
    fn test_grade_color() {
        let theme = ThemeColors::dark();
        assert_eq!(theme.grade_color(true), Color::Green);
        assert_eq!(theme.grade_color(false), Color::Red);
    }
}
