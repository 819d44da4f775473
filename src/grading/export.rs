use super::config::GradingConfig;
use super::engine::GradeResult;
use super::rounding::to_fixed;

const HEADER: &str = "Punten\tFouten\tCijfer";

/// Decimals used for the grade column of an export.
fn export_decimals(rounding: f64) -> usize {
    if rounding < 1.0 {
        if rounding == 0.01 {
            2
        } else {
            1
        }
    } else {
        0
    }
}

/// Tab-separated table for pasting into a spreadsheet.
/// Header row first, one row per result, no trailing newline.
pub fn table_to_delimited_text(results: &[GradeResult], config: &GradingConfig) -> String {
    let decimals = export_decimals(config.rounding);

    std::iter::once(HEADER.to_string())
        .chain(results.iter().map(|r| {
            format!(
                "{}\t{}\t{}",
                r.punten,
                r.fouten,
                to_fixed(r.cijfer_rounded, decimals)
            )
        }))
        .collect::<Vec<_>>()
        .join("\n")
}
