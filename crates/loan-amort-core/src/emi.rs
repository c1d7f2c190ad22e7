//! Equal Monthly Instalment (EMI) calculation.
//!
//! Standard reducing-balance amortisation of a fixed-rate loan over a
//! fixed term. All math in `rust_decimal::Decimal`.

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

/// EMI calculation input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiInput {
    /// Amount borrowed.
    pub principal: Money,
    /// Annual rate as a percentage (e.g., 8.5 for 8.5% p.a.).
    pub annual_rate_percent: Rate,
    /// Loan tenure in years. May be fractional; truncated to whole months.
    pub tenure_years: Years,
}

/// EMI calculation output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiOutput {
    /// Level monthly instalment.
    pub monthly_emi: Money,
    /// Monthly decimal rate used in the amortisation.
    pub monthly_rate: Rate,
    /// Whole months in the term.
    pub total_months: u32,
    /// Total paid over the full term: `monthly_emi × total_months`.
    pub total_payment: Money,
    /// Interest share of the total: `total_payment − principal`.
    pub total_interest: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Calculate the level monthly instalment for a loan.
pub fn calculate_emi(input: &EmiInput) -> LoanAmortResult<ComputationOutput<EmiOutput>> {
    let start = Instant::now();

    let (output, warnings) = compute_emi(input)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Reducing-Balance EMI",
        input,
        warnings,
        elapsed,
        output,
    ))
}

pub(crate) fn compute_emi(input: &EmiInput) -> LoanAmortResult<(EmiOutput, Vec<String>)> {
    let mut warnings: Vec<String> = Vec::new();
    validate_emi(input)?;

    let rate = annuity::monthly_rate(input.annual_rate_percent)?;
    let total_months = annuity::term_months(input.tenure_years)?;

    if rate.is_zero() {
        warnings.push("Zero interest rate: instalment is straight-line principal repayment".into());
    }

    let monthly_emi = annuity::level_payment(input.principal, rate, total_months)?;
    let total_payment = monthly_emi * Decimal::from(total_months);
    let total_interest = total_payment - input.principal;

    Ok((
        EmiOutput {
            monthly_emi,
            monthly_rate: rate,
            total_months,
            total_payment,
            total_interest,
        },
        warnings,
    ))
}

fn validate_emi(input: &EmiInput) -> LoanAmortResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(LoanAmortError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const TOL: Decimal = dec!(0.01);

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tol,
            "{}: expected ~{}, got {} (diff = {})",
            msg,
            expected,
            actual,
            diff
        );
    }

    fn standard_input() -> EmiInput {
        EmiInput {
            principal: dec!(900_000),
            annual_rate_percent: dec!(8.5),
            tenure_years: dec!(20),
        }
    }

    #[test]
    fn test_emi_reference_loan() {
        let out = calculate_emi(&standard_input()).unwrap().result;
        assert_close(out.monthly_emi, dec!(7810.41), TOL, "20y 8.5% EMI");
        assert_eq!(out.total_months, 240);
    }

    #[test]
    fn test_emi_totals_invariant() {
        let out = calculate_emi(&standard_input()).unwrap().result;
        assert_eq!(
            out.total_payment,
            out.monthly_emi * Decimal::from(out.total_months)
        );
        assert_eq!(out.total_interest, out.total_payment - dec!(900_000));
        assert!(out.total_interest > Decimal::ZERO);
    }

    #[test]
    fn test_emi_zero_rate_warns_and_is_linear() {
        let input = EmiInput {
            principal: dec!(120_000),
            annual_rate_percent: dec!(0),
            tenure_years: dec!(10),
        };
        let out = calculate_emi(&input).unwrap();
        assert_eq!(out.result.monthly_emi, dec!(1000));
        assert_eq!(out.result.total_interest, dec!(0));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_emi_rejects_non_positive_principal() {
        let mut input = standard_input();
        input.principal = dec!(0);
        assert!(calculate_emi(&input).is_err());
    }

    #[test]
    fn test_emi_rejects_negative_rate() {
        let mut input = standard_input();
        input.annual_rate_percent = dec!(-2);
        assert!(calculate_emi(&input).is_err());
    }

    #[test]
    fn test_emi_rejects_zero_tenure() {
        let mut input = standard_input();
        input.tenure_years = dec!(0);
        assert!(calculate_emi(&input).is_err());
    }

    #[test]
    fn test_emi_fractional_tenure_truncates() {
        let input = EmiInput {
            principal: dec!(100_000),
            annual_rate_percent: dec!(7.25),
            tenure_years: dec!(7.5),
        };
        let out = calculate_emi(&input).unwrap().result;
        assert_eq!(out.total_months, 90);
        assert_close(out.monthly_emi, dec!(1443.71), TOL, "7.5y EMI");
    }
}
