use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_amort_core::analysis::{self, LoanRequest};

use crate::input;

/// Arguments for a full loan analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Total loan amount before the downpayment
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Upfront payment deducted from the loan amount
    #[arg(long, default_value = "0")]
    pub downpayment: Decimal,

    /// Annual interest rate as a percentage (e.g. 8.5 for 8.5% p.a.)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan tenure in years
    #[arg(long)]
    pub tenure: Option<Decimal>,

    /// Optional one-time prepayment amount
    #[arg(long)]
    pub lump_sum: Option<Decimal>,

    /// Optional completed loan year for the prepayment
    #[arg(long)]
    pub at_year: Option<u32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: LoanRequest = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LoanRequest {
            downpayment: args.downpayment,
            loan_amount: args
                .loan_amount
                .ok_or("--loan-amount is required (or provide --input)")?,
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            tenure_years: args
                .tenure
                .ok_or("--tenure is required (or provide --input)")?,
            lump_sum: args.lump_sum,
            at_year: args.at_year,
        }
    };

    let result = analysis::analyze_loan(&request)?;
    Ok(serde_json::to_value(result)?)
}
