use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::{
    Axis, Block, Cell, Chart, Clear, Dataset, GraphType, Paragraph, Row, Table, Wrap,
};

use crate::grading::{format_grade, ConfigField, GradingMethod};
use crate::tui::app::{App, Focus, InputMode};

const SIDEBAR_WIDTH: u16 = 34;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 12 || area.width < 60 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Body(fill) + Status(1)
    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    let body = Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Fill(1)])
        .split(rows[1]);

    // Main column: Lookup(3) + Chart + Table
    let main = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ])
    .split(body[1]);

    render_title(frame, rows[0], app);
    render_sidebar(frame, body[0], app);
    render_lookup(frame, main[0], app);
    render_chart(frame, main[1], app);
    render_table(frame, main[2], app);
    render_status_bar(frame, rows[2], app);

    if app.input_mode == InputMode::Help {
        render_help_popup(frame, app);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let left = "Cijfers";
    let subtitle = "  Bereken cijfers voor een toets.";

    let mut spans = vec![
        Span::styled(left, Style::default().fg(theme.title_color).bold()),
        Span::styled(subtitle, Style::default().fg(theme.muted)),
    ];

    // Active method on the right
    let method_text = match GradingMethod::parse(&app.config().method) {
        Ok(m) => m.display_name().to_string(),
        Err(_) => format!("onbekende methode '{}'", app.config().method),
    };
    let padding_len = (area.width as usize)
        .saturating_sub(left.len() + subtitle.chars().count() + method_text.chars().count());
    spans.push(Span::raw(" ".repeat(padding_len)));
    spans.push(Span::styled(method_text, Style::default().fg(theme.title_color)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn focused_block<'a>(title: String, focused: bool, app: &App) -> Block<'a> {
    let color = if focused {
        app.theme.border_focused
    } else {
        app.theme.border
    };
    Block::bordered()
        .title(title)
        .border_style(Style::default().fg(color))
}

fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = focused_block(
        " Instellingen ".to_string(),
        app.focus == Focus::Sidebar && app.input_mode != InputMode::Lookup,
        app,
    );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let fields = app.visible_fields();
    let selected = app.current_field();
    let mut lines = Vec::new();

    for field in &fields {
        let is_selected = *field == selected && app.focus == Focus::Sidebar;
        let editing = is_selected && app.input_mode == InputMode::EditField;

        let value = if editing {
            format!("{}|", app.edit_input)
        } else {
            field.display_value(app.config())
        };

        let label_style = if is_selected {
            theme.field_selected
        } else {
            Style::default().fg(theme.field_label)
        };
        let arrows = if is_selected && !editing { " ◂▸" } else { "" };

        lines.push(Line::from(Span::styled(
            format!(" {} ", field.label()),
            label_style,
        )));
        lines.push(Line::from(vec![
            Span::raw("   "),
            Span::styled(value, Style::default().fg(theme.field_value).bold()),
            Span::styled(arrows, Style::default().fg(theme.muted)),
        ]));
        if *field == ConfigField::Method {
            if let Ok(method) = GradingMethod::parse(&app.config().method) {
                lines.push(Line::from(Span::styled(
                    format!("   {}", method.description()),
                    Style::default().fg(theme.muted).italic(),
                )));
            }
        }
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn render_lookup(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let active = app.input_mode == InputMode::Lookup;
    let block = focused_block(" Snel opzoeken ".to_string(), active, app);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let input = if active {
        format!("{}|", app.lookup_input)
    } else if app.lookup_input.is_empty() {
        format!("Voer score in (0-{})", app.config().total_points)
    } else {
        app.lookup_input.clone()
    };
    let input_style = if app.lookup_input.is_empty() && !active {
        Style::default().fg(theme.muted)
    } else {
        Style::default().bold()
    };

    let mut spans = vec![
        Span::styled("Score: ", Style::default().fg(theme.muted)),
        Span::styled(input, input_style),
        Span::styled("  →  ", Style::default().fg(theme.muted)),
    ];

    match app.lookup() {
        Some(result) => {
            let color = theme.grade_color(result.is_passing);
            let verdict = if result.is_passing {
                "Voldoende"
            } else {
                "Onvoldoende"
            };
            spans.push(Span::styled(
                format!("Cijfer {}", format_grade(result.rounded_grade, app.config().rounding)),
                Style::default().fg(color).bold(),
            ));
            spans.push(Span::styled(
                format!("  {} ", verdict),
                Style::default().fg(color),
            ));
            spans.push(Span::styled(
                format!("(onafgerond {:.2})", result.raw_grade),
                Style::default().fg(theme.muted),
            ));
        }
        None => spans.push(Span::styled("—", Style::default().fg(theme.muted))),
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn render_chart(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = focused_block(" Cijfercurve ".to_string(), false, app);

    if let Some(ref error) = app.engine_error {
        let msg = Paragraph::new(error.as_str())
            .style(Style::default().fg(theme.flash_error))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(msg, area);
        return;
    }

    let config = app.config();
    let total = config.total_points.max(f64::MIN_POSITIVE);
    let voldoende_line = [(0.0, config.voldoende), (total, config.voldoende)];

    let datasets = vec![
        Dataset::default()
            .name(format!("Voldoende {}", config.voldoende))
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.voldoende_line))
            .data(&voldoende_line),
        Dataset::default()
            .name("Cijfer")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.curve))
            .data(&app.series),
    ];

    let axis_style = Style::default().fg(theme.axis);
    let x_axis = Axis::default()
        .title("Punten")
        .style(axis_style)
        .bounds([0.0, total])
        .labels(vec![
            "0".to_string(),
            format!("{}", total / 2.0),
            format!("{}", total),
        ]);
    let y_axis = Axis::default()
        .title("Cijfer")
        .style(axis_style)
        .bounds([1.0, 10.0])
        .labels(y_axis_labels(config.voldoende));

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(chart, area);
}

/// Grade axis labels: bottom of the scale, the pass mark, top of the scale.
fn y_axis_labels(voldoende: f64) -> Vec<String> {
    vec!["1".to_string(), format!("{}", voldoende), "10".to_string()]
}

fn render_table(frame: &mut Frame, area: Rect, app: &mut App) {
    let theme = app.theme.clone();
    let rounding = app.config().rounding;
    let summary = app.summary;

    let title = format!(
        " Cijfertabel · {} scores • {} voldoende • {} onvoldoende ",
        summary.total, summary.passing, summary.failing
    );
    let block = focused_block(title, app.focus == Focus::Table, app);

    if app.table.is_empty() {
        let empty_msg = Paragraph::new("Geen scores")
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty_msg, area);
        return;
    }

    let rows: Vec<Row> = app
        .table
        .iter()
        .enumerate()
        .map(|(idx, result)| {
            let row_style = if result.is_passing {
                Style::default().bg(theme.passing_row_bg)
            } else if idx % 2 == 1 {
                Style::default().bg(theme.row_alt_bg)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(format!("{:>8}", result.punten)),
                Cell::from(format!("{:>8}", result.fouten)).style(Style::default().fg(theme.muted)),
                Cell::from(format!("{:>8}", format_grade(result.cijfer_rounded, rounding)))
                    .style(Style::default().fg(theme.grade_color(result.is_passing)).bold()),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec![
                format!("{:>8}", "Punten"),
                format!("{:>8}", "Fouten"),
                format!("{:>8}", "Cijfer"),
            ])
            .style(theme.header_style)
            .bottom_margin(1),
        )
        .block(block)
        .row_highlight_style(theme.row_selected);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Failed") || msg.starts_with("Error") {
            theme.flash_error
        } else {
            theme.flash_success
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints: Vec<(&str, &str)> = match app.input_mode {
            InputMode::EditField => vec![("Enter", ":save "), ("Esc", ":cancel")],
            InputMode::Lookup => vec![("0-9", ":score "), ("Enter/Esc", ":done")],
            InputMode::Help => vec![("any key", ":close")],
            InputMode::Normal => match app.focus {
                Focus::Sidebar => vec![
                    ("j/k", ":field "),
                    ("h/l", ":adjust "),
                    ("Enter", ":edit "),
                    ("/", ":lookup "),
                    ("e", ":export "),
                    ("Tab", ":table "),
                    ("?", ":help "),
                    ("q", ":quit"),
                ],
                Focus::Table => vec![
                    ("j/k", ":scroll "),
                    ("/", ":lookup "),
                    ("e", ":export "),
                    ("Tab", ":settings "),
                    ("?", ":help "),
                    ("q", ":quit"),
                ],
            },
        };

        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(theme.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let popup_area = centered_rect_fixed(52, 17, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Span::styled(" Keyboard Shortcuts ", theme.popup_title))
        .border_style(Style::default().fg(theme.popup_border));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(theme.status_key_color).bold();
    let entries = [
        ("j / Down      ", "Next field / row"),
        ("k / Up        ", "Previous field / row"),
        ("l / Right / + ", "Increase field by one step"),
        ("h / Left / -  ", "Decrease field by one step"),
        ("Enter         ", "Type a value for the field"),
        ("Tab           ", "Switch settings / table"),
        ("/             ", "Look up a single score"),
        ("e             ", "Export table as TSV"),
        ("r             ", "Reset to default settings"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];

    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| Line::from(vec![Span::styled(*key, key_style), Span::raw(*desc)]))
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        format!("Export path: {}", app.export_path.display()),
        Style::default().fg(theme.muted),
    )));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines).wrap(Wrap { trim: false }), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ConfigCell;
    use crate::tui::theme::ThemeColors;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(app: &mut App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn test_app(dir: &tempfile::TempDir) -> App {
        let cell = ConfigCell::load(dir.path().join("state.json"));
        App::new(cell, ThemeColors::dark(), dir.path().join("export.tsv"))
    }

    #[test]
    fn test_draw_main_screen() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        let screen = render(&mut app, 120, 40);

        assert!(screen.contains("Cijfers"));
        assert!(screen.contains("Instellingen"));
        assert!(screen.contains("Totaal punten"));
        assert!(screen.contains("51 scores • 26 voldoende • 25 onvoldoende"));
        assert!(screen.contains("Snel opzoeken"));
    }

    #[test]
    fn test_draw_lookup_result() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.lookup_input = "25".to_string();
        let screen = render(&mut app, 120, 40);

        assert!(screen.contains("Cijfer 5.5"));
        assert!(screen.contains("Voldoende"));
    }

    #[test]
    fn test_draw_too_small() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        let screen = render(&mut app, 40, 8);
        assert!(screen.contains("Terminal too small"));
    }

    #[test]
    fn test_y_axis_labels_follow_voldoende() {
        assert_eq!(y_axis_labels(5.5), vec!["1", "5.5", "10"]);
        assert_eq!(y_axis_labels(6.0), vec!["1", "6", "10"]);
        assert_eq!(y_axis_labels(6.5), vec!["1", "6.5", "10"]);
    }

    #[test]
    fn test_draw_engine_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.cell.update(|c| c.method = "z-score".to_string()).unwrap();
        app.recompute();
        let screen = render(&mut app, 120, 40);

        assert!(screen.contains("unknown grading method"));
    }
}
