use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::grading::{
    format_grade, ChartPoint, ConfigField, GradeResult, GradingConfig, GradingMethod,
    TableSummary,
};

/// Width of one table column group: "punten  fouten  cijfer"
const PUNTEN_WIDTH: usize = 6;
const FOUTEN_WIDTH: usize = 6;
const CIJFER_WIDTH: usize = 6;
const GROUP_GAP: &str = "    ";

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

fn group_width() -> usize {
    PUNTEN_WIDTH + FOUTEN_WIDTH + CIJFER_WIDTH + 4
}

/// Number of side-by-side column groups that fit in `width`.
fn groups_for_width(width: Option<usize>, rows: usize) -> usize {
    let Some(width) = width else {
        // No terminal (pipe): one plain column
        return 1;
    };
    let per_group = group_width() + GROUP_GAP.len();
    let fit = ((width + GROUP_GAP.len()) / per_group).max(1);
    // Don't spread short tables thinner than ~10 rows per column
    fit.min(rows.div_ceil(10)).max(1)
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

fn format_cell(result: &GradeResult, config: &GradingConfig, use_colors: bool) -> String {
    let punten = format!("{:>width$}", format_number(result.punten), width = PUNTEN_WIDTH);
    let fouten = format!("{:>width$}", format_number(result.fouten), width = FOUTEN_WIDTH);
    let cijfer = format!(
        "{:>width$}",
        format_grade(result.cijfer_rounded, config.rounding),
        width = CIJFER_WIDTH
    );

    if use_colors {
        let cijfer = if result.is_passing {
            cijfer.green().bold().to_string()
        } else {
            cijfer.red().to_string()
        };
        format!("{}  {}  {}", punten, fouten.dimmed(), cijfer)
    } else {
        format!("{}  {}  {}", punten, fouten, cijfer)
    }
}

fn format_header(use_colors: bool) -> String {
    let header = format!(
        "{:>pw$}  {:>fw$}  {:>cw$}",
        "Punten",
        "Fouten",
        "Cijfer",
        pw = PUNTEN_WIDTH,
        fw = FOUTEN_WIDTH,
        cw = CIJFER_WIDTH
    );
    if use_colors {
        header.bold().to_string()
    } else {
        header
    }
}

/// Format the grade table. Wide terminals get several column groups side by
/// side, filled top to bottom.
pub fn format_grade_table(results: &[GradeResult], config: &GradingConfig, use_colors: bool) -> String {
    format_grade_table_with_width(results, config, use_colors, get_terminal_width())
}

fn format_grade_table_with_width(
    results: &[GradeResult],
    config: &GradingConfig,
    use_colors: bool,
    width: Option<usize>,
) -> String {
    if results.is_empty() {
        return "No scores to show.".to_string();
    }

    let groups = groups_for_width(width, results.len());
    let rows = results.len().div_ceil(groups);

    let mut lines = Vec::with_capacity(rows + 1);
    lines.push(
        (0..groups)
            .map(|_| format_header(use_colors))
            .collect::<Vec<_>>()
            .join(GROUP_GAP),
    );

    for row in 0..rows {
        let cells: Vec<String> = (0..groups)
            .filter_map(|group| results.get(group * rows + row))
            .map(|r| format_cell(r, config, use_colors))
            .collect();
        lines.push(cells.join(GROUP_GAP));
    }

    lines.join("\n")
}

/// "51 scores • 26 voldoende • 25 onvoldoende"
pub fn format_summary(summary: &TableSummary, use_colors: bool) -> String {
    if use_colors {
        format!(
            "{} scores • {} voldoende • {} onvoldoende",
            summary.total,
            summary.passing.green(),
            summary.failing.red()
        )
    } else {
        format!(
            "{} scores • {} voldoende • {} onvoldoende",
            summary.total, summary.passing, summary.failing
        )
    }
}

/// Result line for a single lookup.
pub fn format_lookup(
    score: f64,
    raw_grade: f64,
    config: &GradingConfig,
    use_colors: bool,
) -> String {
    let rounded = crate::grading::round_to_nearest(raw_grade, config.rounding);
    let passing = rounded >= config.voldoende;
    let grade_str = format_grade(rounded, config.rounding);
    let verdict = if passing { "voldoende" } else { "onvoldoende" };

    if use_colors {
        let grade_colored = if passing {
            grade_str.green().bold().to_string()
        } else {
            grade_str.red().bold().to_string()
        };
        let verdict_colored = if passing {
            verdict.green().to_string()
        } else {
            verdict.red().to_string()
        };
        format!(
            "{} punten → cijfer {} ({}, onafgerond {:.2})",
            format_number(score),
            grade_colored,
            verdict_colored,
            raw_grade
        )
    } else {
        format!(
            "{} punten → cijfer {} ({}, onafgerond {:.2})",
            format_number(score),
            grade_str,
            verdict,
            raw_grade
        )
    }
}

/// Chart samples as "score<TAB>grade" lines.
pub fn format_chart_series(points: &[ChartPoint]) -> String {
    points
        .iter()
        .map(|p| format!("{}\t{}", p.punten, p.cijfer))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Multi-line view of the configuration. The active method's parameter is
/// marked; the other method parameters are shown dimmed.
pub fn format_config(config: &GradingConfig, use_colors: bool) -> String {
    let method = GradingMethod::parse(&config.method).ok();
    let active_param = method.map(ConfigField::for_method);

    let mut lines = Vec::new();

    match method {
        Some(m) => {
            let title = format!("{} ({})", m.display_name(), m.as_str());
            if use_colors {
                lines.push(title.bold().to_string());
                lines.push(m.description().dimmed().to_string());
            } else {
                lines.push(title);
                lines.push(m.description().to_string());
            }
        }
        None => lines.push(format!("Unknown method '{}'", config.method)),
    }
    lines.push(String::new());

    for field in ConfigField::ALL {
        let value = match field {
            ConfigField::Method => config.method.clone(),
            _ => field.display_value(config),
        };
        let line = format!("  {:<16} {}", field.key(), value);
        let is_inactive = field.is_method_parameter() && Some(field) != active_param;

        if use_colors && is_inactive {
            lines.push(line.dimmed().to_string());
        } else if Some(field) == active_param {
            lines.push(format!("{}  *", line));
        } else {
            lines.push(line);
        }
    }

    lines.join("\n")
}
