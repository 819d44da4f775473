use super::config::{GradingConfig, MAX_TOTAL_POINTS};
use super::error::{GradingError, Result};
use super::method::Formula;
use super::rounding::{clamp_grade, round2, round_to_nearest};

/// Minimum number of chart intervals, so small totals still draw a smooth curve.
const MIN_CHART_STEPS: f64 = 100.0;

/// One row of the grade table.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeResult {
    pub punten: f64,         // Score achieved
    pub fouten: f64,         // total - punten
    pub cijfer: f64,         // Clamped, unrounded grade
    pub cijfer_rounded: f64, // Grade at the configured rounding
    pub is_passing: bool,    // cijfer_rounded >= voldoende
}

/// One sample of the grade curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub punten: f64,
    pub cijfer: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSummary {
    pub total: usize,
    pub passing: usize,
    pub failing: usize,
}

/// Grade for a single score, clamped to [1, 10].
///
/// Scores outside 0..=total_points are allowed and simply extrapolate before
/// the clamp; only NaN and infinite scores are rejected.
pub fn compute_grade(score: f64, config: &GradingConfig) -> Result<f64> {
    if !score.is_finite() {
        return Err(GradingError::InvalidScore(score));
    }
    let formula = Formula::from_config(config)?;
    Ok(grade_with(&formula, score, config.total_points))
}

fn grade_with(formula: &Formula, score: f64, total: f64) -> f64 {
    clamp_grade(formula.apply(score, total))
}

/// Totals a table or chart can be built for. Negative, non-finite and
/// oversized totals yield no rows.
fn is_generatable_total(total: f64) -> bool {
    (0.0..=MAX_TOTAL_POINTS).contains(&total)
}

/// Table step: half points when the total has a fractional part.
fn table_step(total: f64) -> f64 {
    if total.fract() != 0.0 {
        0.5
    } else {
        1.0
    }
}

/// Every score from total_points down to 0 with its grade.
pub fn generate_grade_table(config: &GradingConfig) -> Result<Vec<GradeResult>> {
    let formula = Formula::from_config(config)?;
    let total = config.total_points;

    if !is_generatable_total(total) {
        return Ok(Vec::new());
    }

    let step = table_step(total);
    let count = (total / step).floor() as usize + 1;

    let results = (0..count)
        .map(|i| {
            let punten = total - i as f64 * step;
            let cijfer = grade_with(&formula, punten, total);
            let cijfer_rounded = round_to_nearest(cijfer, config.rounding);
            GradeResult {
                punten,
                fouten: total - punten,
                cijfer,
                cijfer_rounded,
                is_passing: cijfer_rounded >= config.voldoende,
            }
        })
        .collect();

    Ok(results)
}

/// Evenly spaced samples of the grade curve from 0 to total_points inclusive,
/// rounded to two decimals for display.
pub fn generate_chart_series(config: &GradingConfig) -> Result<Vec<ChartPoint>> {
    let formula = Formula::from_config(config)?;
    let total = config.total_points;

    if !is_generatable_total(total) {
        return Ok(Vec::new());
    }

    let steps = MIN_CHART_STEPS.max((total * 2.0).ceil()) as usize;

    let points = (0..=steps)
        .map(|i| {
            let punten = (i as f64 / steps as f64) * total;
            let cijfer = grade_with(&formula, punten, total);
            ChartPoint {
                punten: round2(punten),
                cijfer: round2(cijfer),
            }
        })
        .collect();

    Ok(points)
}

/// Pass/fail counts for a table.
pub fn summarize(results: &[GradeResult]) -> TableSummary {
    let passing = results.iter().filter(|r| r.is_passing).count();
    TableSummary {
        total: results.len(),
        passing,
        failing: results.len() - passing,
    }
}
