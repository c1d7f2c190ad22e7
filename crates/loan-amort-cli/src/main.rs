mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::amortization::{EmiArgs, OutstandingArgs, PrepayArgs, ScheduleArgs};
use commands::analysis::AnalyzeArgs;

/// Loan amortisation calculations with decimal precision
#[derive(Parser)]
#[command(
    name = "emi",
    version,
    about = "Loan amortisation calculations with decimal precision",
    long_about = "A CLI for loan amortisation math: equal monthly instalments, \
                  outstanding principal at any point in the term, revised EMI after \
                  a one-time lump-sum prepayment, full month-by-month schedules, and \
                  a combined analysis of one loan request."
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
    /// Calculate the equal monthly instalment for a loan
    Emi(EmiArgs),
    /// Outstanding principal after a number of payments
    Outstanding(OutstandingArgs),
    /// Revised EMI after a one-time lump-sum prepayment
    Prepay(PrepayArgs),
    /// Month-by-month amortisation schedule
    Schedule(ScheduleArgs),
    /// Analyse one full loan request (downpayment, loan, optional prepayment)
    Analyze(AnalyzeArgs),
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
        Commands::Emi(args) => commands::amortization::run_emi(args),
        Commands::Outstanding(args) => commands::amortization::run_outstanding(args),
        Commands::Prepay(args) => commands::amortization::run_prepay(args),
        Commands::Schedule(args) => commands::amortization::run_schedule(args),
        Commands::Analyze(args) => commands::analysis::run_analyze(args),
        Commands::Version => {
            println!("emi {}", env!("CARGO_PKG_VERSION"));
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
