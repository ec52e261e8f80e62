mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::cells::CellArgs;
use commands::scenario::ScenarioArgs;

/// Statutory corporate-tax worksheet calculations
#[derive(Parser)]
#[command(
    name = "taxsheet",
    version,
    about = "Statutory corporate-tax worksheet calculations",
    long_about = "A CLI for the corporate-tax worksheet engine. Applies a \
                  scenario of cell writes (file, stdin, or inline), re-runs \
                  the full statutory formula pipeline after each write, and \
                  reports the resulting figures."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the 17-figure tax summary for a scenario
    Results(ScenarioArgs),
    /// Read a single worksheet cell after applying a scenario
    Cell(CellArgs),
    /// Dump every worksheet cell after applying a scenario
    Cells(ScenarioArgs),
    /// Run the canned workbook sample and print the summary
    Demo,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Results(args) => commands::scenario::run_results(args),
        Commands::Cell(args) => commands::cells::run_cell(args),
        Commands::Cells(args) => commands::cells::run_cells(args),
        Commands::Demo => commands::scenario::run_demo(),
        Commands::Version => {
            println!("taxsheet {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
