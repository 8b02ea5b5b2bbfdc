mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::analysis::{AnalyzeArgs, ValidateArgs};
use commands::disposition::DispositionArgs;
use commands::financing::{ScheduleArgs, SizeLoanArgs};
use commands::fixtures::FixtureArgs;
use commands::income::NoiArgs;

/// Real-estate investment proforma calculations
#[derive(Parser)]
#[command(
    name = "proforma",
    version,
    about = "Real-estate investment proforma calculations",
    long_about = "A CLI for running real-estate investment proformas with decimal \
                  precision. Supports loan sizing (cash / LTV / DSCR), amortization \
                  schedules, NOI waterfalls, hold-period cash flow projections, and \
                  after-tax disposition analysis."
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
    /// Run the full proforma: validation, financing, cash flows, disposition
    Analyze(AnalyzeArgs),
    /// Check an assumptions record without running it
    Validate(ValidateArgs),
    /// Size the loan under the selected financing strategy
    SizeLoan(SizeLoanArgs),
    /// Print the period-by-period amortization schedule
    Schedule(ScheduleArgs),
    /// Income and expense waterfall (gross income down to NOI)
    Noi(NoiArgs),
    /// Sale proceeds and taxes at the end of the hold
    Disposition(DispositionArgs),
    /// Print a canned assumptions fixture (pipe into other commands)
    Fixture(FixtureArgs),
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
        Commands::Analyze(args) => commands::analysis::run_analyze(args),
        Commands::Validate(args) => commands::analysis::run_validate(args),
        Commands::SizeLoan(args) => commands::financing::run_size_loan(args),
        Commands::Schedule(args) => commands::financing::run_schedule(args),
        Commands::Noi(args) => commands::income::run_noi(args),
        Commands::Disposition(args) => commands::disposition::run_disposition(args),
        Commands::Fixture(args) => commands::fixtures::run_fixture(args),
        Commands::Version => {
            println!("proforma {}", env!("CARGO_PKG_VERSION"));
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
