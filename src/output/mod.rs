pub mod export;
pub mod formatter;

pub use export::{write_export, EXPORT_FILE_NAME};
pub use formatter::{
    format_chart_series, format_config, format_grade_table, format_lookup, format_summary,
    should_use_colors,
};
