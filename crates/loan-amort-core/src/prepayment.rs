//! One-time lump-sum prepayment and the revised instalment it produces.
//!
//! The lender keeps the original tenure and nominal rate; the lump sum
//! only reduces principal, and the remaining term is re-amortised.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::annuity;
use crate::error::LoanAmortError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate, Years};
use crate::LoanAmortResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Lump-sum prepayment input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LumpSumInput {
    /// Amount borrowed.
    pub principal: Money,
    /// Annual rate as a percentage (e.g., 8.5 for 8.5% p.a.).
    pub annual_rate_percent: Rate,
    /// Loan tenure in years.
    pub tenure_years: Years,
    /// One-time extra payment applied to outstanding principal.
    pub lump_sum: Money,
    /// Completed year of the loan at which the lump sum lands
    /// (1 ≤ at_year < tenure_years).
    pub at_year: u32,
}

/// What the lump sum did to the loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LumpSumOutcome {
    /// The lump sum covered the entire outstanding balance.
    Discharged {
        /// Amount by which the lump sum exceeded the balance.
        surplus: Money,
    },
    /// The remaining balance was re-amortised over the remaining term.
    Revised {
        /// New level instalment for the remaining months.
        revised_emi: Money,
        /// Months left after the prepayment date.
        remaining_months: u32,
        /// Outstanding balance net of the lump sum.
        new_principal: Money,
        /// Old-plan remaining outlay minus lump sum plus revised outlay.
        total_savings: Money,
    },
}

/// Lump-sum prepayment output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LumpSumOutput {
    /// Balance immediately before the lump sum was applied.
    pub outstanding_before: Money,
    /// Months already paid at the prepayment date.
    pub paid_months: u32,
    pub outcome: LumpSumOutcome,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Apply a one-time lump-sum prepayment at the end of `at_year` and
/// re-amortise the remaining balance over the remaining term.
pub fn apply_lump_sum(input: &LumpSumInput) -> LoanAmortResult<ComputationOutput<LumpSumOutput>> {
    let start = Instant::now();

    let (output, warnings) = compute_lump_sum(input)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Lump-Sum Re-Amortisation",
        input,
        warnings,
        elapsed,
        output,
    ))
}

pub(crate) fn compute_lump_sum(
    input: &LumpSumInput,
) -> LoanAmortResult<(LumpSumOutput, Vec<String>)> {
    let mut warnings: Vec<String> = Vec::new();
    validate_lump_sum(input)?;

    let rate = annuity::monthly_rate(input.annual_rate_percent)?;
    let total_months = annuity::term_months(input.tenure_years)?;

    let paid_months = input.at_year * 12;
    let remaining_months = total_months.saturating_sub(paid_months);
    if remaining_months == 0 {
        return Err(LoanAmortError::InvalidInput {
            field: "at_year".into(),
            reason: "Prepayment date leaves no remaining term".into(),
        });
    }

    let outstanding_before = annuity::outstanding_balance(
        input.principal,
        rate,
        total_months,
        Decimal::from(paid_months),
    )?;

    if input.lump_sum >= outstanding_before {
        return Ok((
            LumpSumOutput {
                outstanding_before,
                paid_months,
                outcome: LumpSumOutcome::Discharged {
                    surplus: input.lump_sum - outstanding_before,
                },
            },
            warnings,
        ));
    }

    let new_principal = outstanding_before - input.lump_sum;
    let revised_emi = annuity::level_payment(new_principal, rate, remaining_months)?;

    // Savings against staying on the original instalment for the rest of
    // the term, counted from the prepayment date.
    let original_emi = annuity::level_payment(input.principal, rate, total_months)?;
    let remaining = Decimal::from(remaining_months);
    let total_savings =
        original_emi * remaining - (input.lump_sum + revised_emi * remaining);

    if input.lump_sum < outstanding_before * dec!(0.01) {
        warnings.push(format!(
            "Lump sum {} is under 1% of the outstanding balance; the revision is negligible",
            input.lump_sum
        ));
    }

    Ok((
        LumpSumOutput {
            outstanding_before,
            paid_months,
            outcome: LumpSumOutcome::Revised {
                revised_emi,
                remaining_months,
                new_principal,
                total_savings,
            },
        },
        warnings,
    ))
}

fn validate_lump_sum(input: &LumpSumInput) -> LoanAmortResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(LoanAmortError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if input.lump_sum <= Decimal::ZERO {
        return Err(LoanAmortError::InvalidInput {
            field: "lump_sum".into(),
            reason: "Lump sum must be positive".into(),
        });
    }
    if input.at_year < 1 {
        return Err(LoanAmortError::InvalidInput {
            field: "at_year".into(),
            reason: "Prepayment year must be at least 1".into(),
        });
    }
    if Decimal::from(input.at_year) >= input.tenure_years {
        return Err(LoanAmortError::InvalidInput {
            field: "at_year".into(),
            reason: "Prepayment year must fall within the loan tenure".into(),
        });
    }
    Ok(())
}
