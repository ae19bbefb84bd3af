use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use rota_core::{
    table, AssignmentRequest, AssignmentResult, LayoutPreset, Planner, PlannerConfig,
    ReportTable, TableLayout,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rota")]
#[command(about = "Hybrid Work Rota - Assign remote days and office seats per department", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign remote days and office locations
    Assign {
        /// Roster file (CSV or XLSX, or an assignment request in YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (CSV, XLSX or JSON); CSV is printed when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Planner config file (YAML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for reproducible assignments
        #[arg(long)]
        seed: Option<u64>,

        /// Column names and markers of the CSV tables
        #[arg(short, long, default_value_t = LayoutPreset::English)]
        layout: LayoutPreset,
    },

    /// Write an empty roster table with the expected headers
    Template {
        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,

        #[arg(short, long, default_value_t = LayoutPreset::English)]
        layout: LayoutPreset,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Assign {
            input,
            output,
            config,
            seed,
            layout,
        } => {
            assign_command(input, output, config, seed, layout.layout())?;
        }
        Commands::Template { output, layout } => {
            template_command(output, layout.layout())?;
        }
    }

    Ok(())
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
}

fn is_yaml(path: &Path) -> bool {
    matches!(extension(path).as_deref(), Some("yaml") | Some("yml"))
}

fn load_request(input: &Path, layout: &TableLayout) -> Result<AssignmentRequest> {
    let format = extension(input);
    debug!(input = %input.display(), format = ?format, "loading roster");

    match format.as_deref() {
        Some("csv") => table::read_request_from_path(input, layout)
            .with_context(|| format!("failed to read roster {}", input.display())),
        Some("xlsx") => table::read_request_xlsx_from_path(input, layout)
            .with_context(|| format!("failed to read workbook {}", input.display())),
        _ => {
            let content = std::fs::read_to_string(input)?;
            let request = if is_yaml(input) {
                serde_yaml::from_str(&content)?
            } else {
                serde_json::from_str(&content)?
            };
            Ok(request)
        }
    }
}

fn load_config(path: &Path) -> Result<PlannerConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = if is_yaml(path) {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    Ok(config)
}

fn assign_command(
    input: PathBuf,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    seed: Option<u64>,
    layout: TableLayout,
) -> Result<()> {
    eprintln!("{}", "🔍 Loading roster...".bright_blue());

    let mut request = load_request(&input, &layout)?;
    if let Some(config_path) = config {
        request.config = load_config(&config_path)?;
    }
    if seed.is_some() {
        request.config.seed = seed;
    }

    eprintln!(
        "  {} employees",
        request.employees.len().to_string().bright_white().bold()
    );
    eprintln!(
        "  Seat limits: {} at location A, {} at location B",
        request.config.capacity.location_a.to_string().bright_white(),
        request.config.capacity.location_b.to_string().bright_white()
    );
    eprintln!();

    eprintln!("{}", "🚀 Assigning...".bright_blue());

    let planner = Planner::new(request)?;
    let result = planner.plan()?;

    eprintln!();
    eprintln!("{}", "✅ Assignment complete!".bright_green().bold());
    eprintln!();

    print_summary(&result);

    let report = ReportTable::build(&result, &layout);
    match output {
        Some(output_path) => {
            match extension(&output_path).as_deref() {
                Some("xlsx") => std::fs::write(&output_path, report.to_xlsx(&layout.sheet_name)?)?,
                Some("json") => {
                    std::fs::write(&output_path, serde_json::to_string_pretty(&result)?)?
                }
                _ => report.write_csv(std::fs::File::create(&output_path)?)?,
            }
            info!(output = %output_path.display(), "result written");
            eprintln!(
                "💾 Saved result to {}",
                output_path.display().to_string().bright_white()
            );
        }
        None => report.write_csv(std::io::stdout().lock())?,
    }

    Ok(())
}

fn print_summary(result: &AssignmentResult) {
    eprintln!("{}", "📊 Results:".bright_yellow().bold());
    eprintln!("  Departments:");
    for plan in &result.departments {
        let line = format!(
            "    • {}: {} employees, {} remote per day ({:.1}%)",
            plan.department, plan.headcount, plan.remote_per_day, plan.remote_percent
        );
        if plan.fallback {
            eprintln!("{}", line.yellow());
        } else {
            eprintln!("{}", line);
        }
    }
    eprintln!();

    eprintln!("  Daily totals (A / B / remote):");
    for totals in &result.daily {
        eprintln!(
            "    • {:<9} {:>3} / {:>3} / {:>3}",
            format!("{:?}", totals.day),
            totals.location_a,
            totals.location_b,
            totals.remote
        );
    }

    if result.unseated_days > 0 {
        eprintln!();
        eprintln!(
            "  {} on-site days could not be seated",
            result.unseated_days.to_string().bright_red().bold()
        );
    }

    if let Some(seed) = result.seed {
        eprintln!("  Seed: {}", seed.to_string().bright_white());
    }

    if !result.warnings.is_empty() {
        eprintln!();
        eprintln!("{}", "⚠️  Warnings:".bright_yellow().bold());
        for warning in &result.warnings {
            eprintln!("    • {}", warning.yellow());
        }
    }

    eprintln!();
}

fn template_command(output: PathBuf, layout: TableLayout) -> Result<()> {
    table::write_template(std::fs::File::create(&output)?, &layout)?;

    eprintln!(
        "{} Saved roster template to {}",
        "✅".bright_green(),
        output.display().to_string().bright_white()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_request_reads_exported_workbook() {
        let layout = TableLayout::english();
        let roster = "\
department,employee,location_a,location_b,mon,tue,wed,thu,fri
Sales,kim,1,1,,,,,
Sales,lee,2,0,,,,,
Ops,park,0,1,,,,,
";
        let request = table::read_request(roster.as_bytes(), &layout).unwrap();
        let result = Planner::new(request).unwrap().plan().unwrap();
        let workbook = ReportTable::build(&result, &layout)
            .to_xlsx(&layout.sheet_name)
            .unwrap();

        let path = std::env::temp_dir().join(format!("rota-cli-{}.xlsx", std::process::id()));
        std::fs::write(&path, workbook).unwrap();
        let reloaded = load_request(&path, &layout);
        std::fs::remove_file(&path).unwrap();

        let reloaded = reloaded.unwrap();
        assert_eq!(reloaded.employees.len(), 3);
        let names: Vec<&str> = reloaded
            .employees
            .iter()
            .map(|employee| employee.employee.as_str())
            .collect();
        assert_eq!(names, ["park", "kim", "lee"]);
    }
}
