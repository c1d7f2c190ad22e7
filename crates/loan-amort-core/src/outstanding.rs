//! Outstanding principal after a number of level payments.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::annuity;
use crate::error::LoanAmortError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate, Years};
use crate::LoanAmortResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Outstanding principal input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutstandingInput {
    /// Amount borrowed.
    pub principal: Money,
    /// Annual rate as a percentage (e.g., 8.5 for 8.5% p.a.).
    pub annual_rate_percent: Rate,
    /// Loan tenure in years.
    pub tenure_years: Years,
    /// Months already paid. May be fractional (mid-month valuation).
    pub paid_months: Decimal,
}

/// Outstanding principal output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutstandingOutput {
    /// Remaining unpaid principal.
    pub outstanding_principal: Money,
    /// Whole months in the term.
    pub total_months: u32,
    /// Share of the term already behind the borrower.
    pub paid_fraction: Decimal,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Remaining principal after `paid_months` of EMI payments, from the
/// closed-form annuity balance formula.
pub fn calculate_outstanding(
    input: &OutstandingInput,
) -> LoanAmortResult<ComputationOutput<OutstandingOutput>> {
    let start = Instant::now();

    let (output, warnings) = compute_outstanding(input)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Closed-Form Annuity Balance",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn compute_outstanding(
    input: &OutstandingInput,
) -> LoanAmortResult<(OutstandingOutput, Vec<String>)> {
    let warnings: Vec<String> = Vec::new();
    validate_outstanding(input)?;

    let rate = annuity::monthly_rate(input.annual_rate_percent)?;
    let total_months = annuity::term_months(input.tenure_years)?;

    if input.paid_months > Decimal::from(total_months) {
        return Err(LoanAmortError::InvalidInput {
            field: "paid_months".into(),
            reason: format!("Cannot exceed the {total_months}-month term"),
        });
    }

    let outstanding_principal =
        annuity::outstanding_balance(input.principal, rate, total_months, input.paid_months)?;

    Ok((
        OutstandingOutput {
            outstanding_principal,
            total_months,
            paid_fraction: input.paid_months / Decimal::from(total_months),
        },
        warnings,
    ))
}

fn validate_outstanding(input: &OutstandingInput) -> LoanAmortResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(LoanAmortError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if input.paid_months < Decimal::ZERO {
        return Err(LoanAmortError::InvalidInput {
            field: "paid_months".into(),
            reason: "Paid months must be non-negative".into(),
        });
    }
    Ok(())
}
