pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod fields;
pub mod method;
pub mod rounding;
pub mod validation;

pub use config::*;
pub use engine::{
    compute_grade, generate_chart_series, generate_grade_table, summarize, ChartPoint,
    GradeResult, TableSummary,
};
pub use error::GradingError;
pub use export::table_to_delimited_text;
pub use fields::ConfigField;
pub use method::{Formula, GradingMethod};
pub use rounding::{format_grade, round_to_nearest};
pub use validation::validate_config;
