use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use cijfer::grading::{
    compute_grade, generate_chart_series, generate_grade_table, summarize,
    table_to_delimited_text, validate_config, ConfigField, GradingConfig, GradingError,
};
use cijfer::store::ConfigCell;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Print the grade table (default if no subcommand)
    Table,
    /// Look up the grade for a single score
    Lookup {
        /// Score to look up
        #[arg(allow_negative_numbers = true)]
        score: f64,
        /// Allow scores outside 0..total points
        #[arg(long)]
        what_if: bool,
    },
    /// Print the grade curve as score<TAB>grade lines
    Chart,
    /// Export the grade table as tab-separated text
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the current grading configuration
    Show,
    /// Change configuration fields, e.g. `set method=goed goedKFactor=4`
    Set {
        /// KEY=VALUE pairs
        #[arg(required = true)]
        assignments: Vec<String>,
    },
    /// Restore the default configuration
    Reset,
    /// Validate the current configuration
    Check,
    /// Open the interactive screen
    Tui,
}

#[derive(Parser, Debug)]
#[command(name = "cijfer")]
#[command(about = "Exam score to grade conversion", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to settings file (defaults to ~/.config/cijfer/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Path to the saved grading configuration (JSON)
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Disable coloured output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn exit_with(code: i32, msg: impl std::fmt::Display) -> ! {
    eprintln!("{}", msg);
    std::process::exit(code);
}

/// Engine failures are configuration errors (unknown method, bad score).
fn engine_failure(e: GradingError) -> ! {
    exit_with(EXIT_CONFIG, format!("Config error: {}", e))
}

fn warn_on_invalid(config: &GradingConfig) {
    if let Err(errors) = validate_config(config) {
        for error in errors {
            tracing::warn!("{}", error);
        }
    }
}

/// Apply all KEY=VALUE pairs to a copy of `config`; nothing is applied when
/// any pair is invalid.
fn apply_assignments(
    config: &GradingConfig,
    assignments: &[String],
) -> anyhow::Result<GradingConfig> {
    let mut next = config.clone();
    for assignment in assignments {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("expected KEY=VALUE, got '{}'", assignment))?;
        let field = ConfigField::parse(key)?;
        field.set_from_str(&mut next, value)?;
    }
    Ok(next)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    cijfer::logging::init_logging(cli.verbose);
    let command = cli.command.unwrap_or(Commands::Table);
    let start_time = Instant::now();

    // Load settings
    let config_path = cli.config.map(PathBuf::from);
    let app_config = match cijfer::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => exit_with(EXIT_CONFIG, format!("Config error: {:#}", e)),
    };

    let state_path = match cli.state.or_else(|| app_config.state_path.clone()) {
        Some(p) => p,
        None => match cijfer::store::get_state_path() {
            Ok(p) => p,
            Err(e) => exit_with(EXIT_IO, format!("Storage error: {:#}", e)),
        },
    };

    let use_colors = !cli.no_color
        && app_config
            .color
            .unwrap_or_else(cijfer::output::should_use_colors);

    let mut cell = ConfigCell::load(state_path);
    tracing::debug!(path = %cell.path().display(), method = %cell.get().method, "loaded grading configuration");

    // Route based on subcommand
    match command {
        Commands::Table => {
            let config = cell.get();
            warn_on_invalid(config);
            let results = generate_grade_table(config).unwrap_or_else(|e| engine_failure(e));

            println!(
                "{}",
                cijfer::output::format_grade_table(&results, config, use_colors)
            );
            println!();
            println!(
                "{}",
                cijfer::output::format_summary(&summarize(&results), use_colors)
            );

            tracing::debug!(rows = results.len(), elapsed = ?start_time.elapsed(), "table generated");
        }
        Commands::Lookup { score, what_if } => {
            let config = cell.get();
            warn_on_invalid(config);

            if !what_if && score.is_finite() && !(0.0..=config.total_points).contains(&score) {
                exit_with(
                    EXIT_CONFIG,
                    format!(
                        "Score {} is outside 0..{}. Use --what-if to grade it anyway.",
                        score, config.total_points
                    ),
                );
            }

            let raw = compute_grade(score, config).unwrap_or_else(|e| engine_failure(e));
            println!(
                "{}",
                cijfer::output::format_lookup(score, raw, config, use_colors)
            );
        }
        Commands::Chart => {
            let config = cell.get();
            warn_on_invalid(config);
            let points = generate_chart_series(config).unwrap_or_else(|e| engine_failure(e));
            println!("{}", cijfer::output::format_chart_series(&points));
        }
        Commands::Export { output } => {
            let config = cell.get();
            warn_on_invalid(config);
            let results = generate_grade_table(config).unwrap_or_else(|e| engine_failure(e));
            let text = table_to_delimited_text(&results, config);

            match output {
                Some(path) => {
                    if let Err(e) = cijfer::output::write_export(&path, &text) {
                        exit_with(EXIT_IO, format!("Export failed: {:#}", e));
                    }
                    eprintln!("Exported {} rows to {}", results.len(), path.display());
                }
                None => println!("{}", text),
            }
        }
        Commands::Show => {
            println!("{}", cijfer::output::format_config(cell.get(), use_colors));
        }
        Commands::Set { assignments } => {
            let next = match apply_assignments(cell.get(), &assignments) {
                Ok(c) => c,
                Err(e) => exit_with(EXIT_CONFIG, format!("Invalid value: {:#}", e)),
            };

            match cell.update(|config| *config = next) {
                Ok(true) => {
                    println!("{}", cijfer::output::format_config(cell.get(), use_colors));
                }
                Ok(false) => println!("No changes."),
                Err(e) => exit_with(EXIT_IO, format!("Failed to save configuration: {:#}", e)),
            }
            warn_on_invalid(cell.get());
        }
        Commands::Reset => {
            if let Err(e) = cell.reset() {
                exit_with(EXIT_IO, format!("Failed to save configuration: {:#}", e));
            }
            println!("Reset to default settings.");
        }
        Commands::Check => match validate_config(cell.get()) {
            Ok(()) => println!("Configuration OK"),
            Err(errors) => {
                eprintln!("Configuration errors:");
                for error in errors {
                    eprintln!("  - {}", error);
                }
                std::process::exit(EXIT_CONFIG);
            }
        },
        Commands::Tui => {
            let theme = cijfer::tui::resolve_theme(app_config.theme.unwrap_or_default());
            let export_path = std::env::current_dir()
                .map(|dir| dir.join(cijfer::output::EXPORT_FILE_NAME))
                .unwrap_or_else(|_| PathBuf::from(cijfer::output::EXPORT_FILE_NAME));

            let app = cijfer::tui::App::new(cell, theme, export_path);
            if let Err(e) = cijfer::tui::run_tui(app).await {
                exit_with(EXIT_IO, format!("TUI error: {:#}", e));
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
