use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_amort_core::emi::{self, EmiInput};
use loan_amort_core::outstanding::{self, OutstandingInput};
use loan_amort_core::prepayment::{self, LumpSumInput};
use loan_amort_core::schedule::{self, ScheduleInput};

use crate::input;

/// Arguments for EMI calculation
#[derive(Args)]
pub struct EmiArgs {
    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a percentage (e.g. 8.5 for 8.5% p.a.)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan tenure in years
    #[arg(long)]
    pub tenure: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for outstanding-principal calculation
#[derive(Args)]
pub struct OutstandingArgs {
    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a percentage
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan tenure in years
    #[arg(long)]
    pub tenure: Option<Decimal>,

    /// Months already paid (may be fractional)
    #[arg(long)]
    pub paid_months: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for lump-sum prepayment
#[derive(Args)]
pub struct PrepayArgs {
    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a percentage
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan tenure in years
    #[arg(long)]
    pub tenure: Option<Decimal>,

    /// One-time prepayment amount
    #[arg(long)]
    pub lump_sum: Option<Decimal>,

    /// Completed loan year at which the lump sum lands
    #[arg(long)]
    pub at_year: Option<u32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the amortisation schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a percentage
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

    /// Date of the first instalment (YYYY-MM-DD); rows carry dates when set
    #[arg(long)]
    pub first_payment_date: Option<NaiveDate>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let emi_input: EmiInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        EmiInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            tenure_years: args
                .tenure
                .ok_or("--tenure is required (or provide --input)")?,
        }
    };

    let result = emi::calculate_emi(&emi_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_outstanding(args: OutstandingArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let outstanding_input: OutstandingInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        OutstandingInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            tenure_years: args
                .tenure
                .ok_or("--tenure is required (or provide --input)")?,
            paid_months: args
                .paid_months
                .ok_or("--paid-months is required (or provide --input)")?,
        }
    };

    let result = outstanding::calculate_outstanding(&outstanding_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_prepay(args: PrepayArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let lump_input: LumpSumInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LumpSumInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            tenure_years: args
                .tenure
                .ok_or("--tenure is required (or provide --input)")?,
            lump_sum: args
                .lump_sum
                .ok_or("--lump-sum is required (or provide --input)")?,
            at_year: args
                .at_year
                .ok_or("--at-year is required (or provide --input)")?,
        }
    };

    let result = prepayment::apply_lump_sum(&lump_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule_input: ScheduleInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ScheduleInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            tenure_years: args
                .tenure
                .ok_or("--tenure is required (or provide --input)")?,
            lump_sum: args.lump_sum,
            at_year: args.at_year,
            first_payment_date: args.first_payment_date,
        }
    };

    let result = schedule::build_schedule(&schedule_input)?;
    Ok(serde_json::to_value(result)?)
}
