use crate::grading::{
    compute_grade, generate_chart_series, generate_grade_table, round_to_nearest, summarize,
    table_to_delimited_text, ConfigField, GradeResult, GradingConfig, GradingMethod,
    TableSummary,
};
use crate::store::ConfigCell;
use crate::tui::theme::ThemeColors;
use ratatui::widgets::TableState;
use std::path::PathBuf;
use std::time::Instant;

const FLASH_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Table,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    EditField,
    Lookup,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookupResult {
    pub raw_grade: f64,
    pub rounded_grade: f64,
    pub is_passing: bool,
}

pub struct App {
    pub cell: ConfigCell,
    pub table: Vec<GradeResult>,
    pub summary: TableSummary,
    pub series: Vec<(f64, f64)>,
    pub engine_error: Option<String>,
    pub focus: Focus,
    pub input_mode: InputMode,
    pub selected_field: usize,
    pub edit_input: String,
    pub lookup_input: String,
    pub table_state: TableState,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub theme: ThemeColors,
    pub export_path: PathBuf,
}

impl App {
    pub fn new(cell: ConfigCell, theme: ThemeColors, export_path: PathBuf) -> Self {
        let mut app = Self {
            cell,
            table: Vec::new(),
            summary: summarize(&[]),
            series: Vec::new(),
            engine_error: None,
            focus: Focus::Sidebar,
            input_mode: InputMode::Normal,
            selected_field: 0,
            edit_input: String::new(),
            lookup_input: String::new(),
            table_state: TableState::default(),
            flash_message: None,
            should_quit: false,
            theme,
            export_path,
        };
        app.recompute();
        app
    }

    pub fn config(&self) -> &GradingConfig {
        self.cell.get()
    }

    /// Regenerate table, summary and curve from the current configuration.
    pub fn recompute(&mut self) {
        let config = self.cell.get();
        let table = generate_grade_table(config);
        let series = generate_chart_series(config);

        match (table, series) {
            (Ok(table), Ok(series)) => {
                self.summary = summarize(&table);
                self.table = table;
                self.series = series.iter().map(|p| (p.punten, p.cijfer)).collect();
                self.engine_error = None;
            }
            (Err(e), _) | (_, Err(e)) => {
                self.table.clear();
                self.series.clear();
                self.summary = summarize(&[]);
                self.engine_error = Some(e.to_string());
            }
        }

        match self.table_state.selected() {
            Some(i) if i >= self.table.len() => {
                self.table_state
                    .select(self.table.len().checked_sub(1));
            }
            None if !self.table.is_empty() => self.table_state.select(Some(0)),
            _ => {}
        }
    }

    /// Sidebar fields: shared settings plus the active method's parameter.
    pub fn visible_fields(&self) -> Vec<ConfigField> {
        let mut fields = vec![
            ConfigField::TotalPoints,
            ConfigField::Voldoende,
            ConfigField::Method,
        ];
        if let Ok(method) = GradingMethod::parse(&self.config().method) {
            fields.push(ConfigField::for_method(method));
        }
        fields.push(ConfigField::Rounding);
        fields
    }

    pub fn current_field(&self) -> ConfigField {
        let fields = self.visible_fields();
        fields[self.selected_field.min(fields.len() - 1)]
    }

    pub fn next_field(&mut self) {
        let len = self.visible_fields().len();
        self.selected_field = (self.selected_field + 1) % len;
    }

    pub fn previous_field(&mut self) {
        let len = self.visible_fields().len();
        self.selected_field = (self.selected_field + len - 1) % len;
    }

    /// Apply a configuration change through the cell (saved on change).
    fn apply_change<F>(&mut self, f: F)
    where
        F: FnOnce(&mut GradingConfig),
    {
        match self.cell.update(f) {
            Ok(true) => self.recompute(),
            Ok(false) => {}
            Err(e) => {
                self.recompute();
                self.show_flash(format!("Failed to save configuration: {}", e));
            }
        }
        let len = self.visible_fields().len();
        self.selected_field = self.selected_field.min(len - 1);
    }

    pub fn adjust_selected(&mut self, direction: i32) {
        let field = self.current_field();
        self.apply_change(|config| field.adjust(config, direction));
    }

    pub fn start_edit(&mut self) {
        let field = self.current_field();
        self.edit_input = match field {
            ConfigField::Method => self.config().method.clone(),
            ConfigField::Rounding => format!("{}", self.config().rounding),
            _ => field
                .display_value(self.config())
                .trim_end_matches('%')
                .to_string(),
        };
        self.input_mode = InputMode::EditField;
    }

    pub fn confirm_edit(&mut self) {
        let field = self.current_field();
        let input = std::mem::take(&mut self.edit_input);
        self.input_mode = InputMode::Normal;

        match self.cell.try_update(|config| field.set_from_str(config, &input)) {
            Ok(true) => {
                self.recompute();
                let msg = format!("Saved: {} = {}", field.label(), field.display_value(self.config()));
                self.show_flash(msg);
            }
            Ok(false) => {}
            Err(e) => {
                self.recompute();
                self.show_flash(format!("Error: {}", e));
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.input_mode = InputMode::Normal;
        self.edit_input.clear();
    }

    pub fn start_lookup(&mut self) {
        self.input_mode = InputMode::Lookup;
    }

    pub fn finish_lookup(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Grade for the score typed into the lookup box, if it is a number
    /// between 0 and the total.
    pub fn lookup(&self) -> Option<LookupResult> {
        let config = self.config();
        let score: f64 = self.lookup_input.trim().parse().ok()?;
        if !(0.0..=config.total_points).contains(&score) {
            return None;
        }
        let raw_grade = compute_grade(score, config).ok()?;
        let rounded_grade = round_to_nearest(raw_grade, config.rounding);
        Some(LookupResult {
            raw_grade,
            rounded_grade,
            is_passing: rounded_grade >= config.voldoende,
        })
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Sidebar => Focus::Table,
            Focus::Table => Focus::Sidebar,
        };
    }

    pub fn next_row(&mut self) {
        if self.table.is_empty() {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < self.table.len() => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        if self.table.is_empty() {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => self.table.len() - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    pub fn export_table(&mut self) {
        if self.table.is_empty() {
            self.show_flash("Error: nothing to export".to_string());
            return;
        }
        let text = table_to_delimited_text(&self.table, self.config());
        match crate::output::write_export(&self.export_path, &text) {
            Ok(()) => self.show_flash(format!("Exported: {}", self.export_path.display())),
            Err(e) => self.show_flash(format!("Failed to export: {}", e)),
        }
    }

    pub fn reset_config(&mut self) {
        match self.cell.reset() {
            Ok(()) => self.show_flash("Reset to default settings".to_string()),
            Err(e) => self.show_flash(format!("Failed to save configuration: {}", e)),
        }
        self.selected_field = 0;
        self.recompute();
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app(dir: &tempfile::TempDir) -> App {
        let cell = ConfigCell::load(dir.path().join("state.json"));
        App::new(cell, ThemeColors::dark(), dir.path().join("export.tsv"))
    }

    #[test]
    fn test_new_app_computes_table() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&dir);

        assert_eq!(app.table.len(), 51);
        assert_eq!(app.series.len(), 101);
        assert_eq!(app.summary.passing, 26);
        assert_eq!(app.table_state.selected(), Some(0));
        assert!(app.engine_error.is_none());
    }

    #[test]
    fn test_visible_fields_follow_method() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);

        assert_eq!(app.visible_fields()[3], ConfigField::NTerm);
        app.selected_field = 2; // Method
        app.adjust_selected(1);
        assert_eq!(app.config().method, "percentage");
        assert_eq!(app.visible_fields()[3], ConfigField::PassPercentage);
    }

    #[test]
    fn test_adjust_saves_and_recomputes() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);

        app.selected_field = 0; // Total points
        app.adjust_selected(-1);
        assert_eq!(app.config().total_points, 49.5);
        assert_eq!(app.table.len(), 100);
        assert!(dir.path().join("state.json").exists());
    }

    #[test]
    fn test_edit_field() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);

        app.selected_field = 1; // Voldoende
        app.start_edit();
        assert_eq!(app.edit_input, "5.5");
        app.edit_input = "6".to_string();
        app.confirm_edit();

        assert_eq!(app.config().voldoende, 6.0);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_invalid_edit_shows_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);

        app.selected_field = 0;
        app.start_edit();
        app.edit_input = "veel".to_string();
        app.confirm_edit();

        assert_eq!(app.config().total_points, 50.0);
        let (msg, _) = app.flash_message.clone().unwrap();
        assert!(msg.starts_with("Error"));
    }

    #[test]
    fn test_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);

        app.lookup_input = "25".to_string();
        let result = app.lookup().unwrap();
        assert_eq!(result.raw_grade, 5.5);
        assert!(result.is_passing);

        app.lookup_input = "51".to_string();
        assert!(app.lookup().is_none());
        app.lookup_input = "-1".to_string();
        assert!(app.lookup().is_none());
        app.lookup_input = "abc".to_string();
        assert!(app.lookup().is_none());
        app.lookup_input.clear();
        assert!(app.lookup().is_none());
    }

    #[test]
    fn test_unknown_method_sets_engine_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);

        app.apply_change(|c| c.method = "z-score".to_string());
        assert!(app.table.is_empty());
        assert!(app.engine_error.as_deref().unwrap().contains("z-score"));
        // Method field still reachable to fix it
        assert_eq!(app.visible_fields().len(), 4);
    }

    #[test]
    fn test_row_navigation_wraps() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);

        app.previous_row();
        assert_eq!(app.table_state.selected(), Some(50));
        app.next_row();
        assert_eq!(app.table_state.selected(), Some(0));
    }

    #[test]
    fn test_export_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);

        app.export_table();
        let written = std::fs::read_to_string(dir.path().join("export.tsv")).unwrap();
        assert!(written.starts_with("Punten\tFouten\tCijfer\n50\t0\t10.0"));
    }

    #[test]
    fn test_reset_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);

        app.apply_change(|c| c.total_points = 20.0);
        app.reset_config();
        assert_eq!(app.config(), &GradingConfig::default());
        assert_eq!(app.table.len(), 51);
    }
}
