//! Single request/response boundary for presentation layers.
//!
//! A UI collects one typed request, calls [`analyze_loan`] once, and
//! renders the typed result; the engine is never driven through widget
//! state. Prepayment input that does not apply is skipped, not an error.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::emi::{self, EmiInput};
use crate::error::LoanAmortError;
use crate::prepayment::{self, LumpSumInput, LumpSumOutcome};
use crate::types::{with_metadata, ComputationOutput, Money, Rate, Years};
use crate::LoanAmortResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// One calculation request, as collected by a presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanRequest {
    /// Upfront payment deducted from the loan amount.
    #[serde(default)]
    pub downpayment: Money,
    /// Total loan amount before the downpayment.
    pub loan_amount: Money,
    /// Annual rate as a percentage (e.g., 8.5 for 8.5% p.a.).
    pub annual_rate_percent: Rate,
    /// Loan tenure in years.
    pub tenure_years: Years,
    /// Optional one-time prepayment amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lump_sum: Option<Money>,
    /// Optional completed year at which the prepayment lands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_year: Option<u32>,
}

/// Prepayment block of the analysis, present only when applicable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepaymentAnalysis {
    pub lump_sum: Money,
    pub at_year: u32,
    /// Balance immediately before the lump sum was applied.
    pub outstanding_before: Money,
    pub outcome: LumpSumOutcome,
}

/// Full amortisation figures for one loan request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAnalysis {
    /// Principal after the downpayment.
    pub principal: Money,
    pub monthly_emi: Money,
    pub total_months: u32,
    pub total_payment: Money,
    pub total_interest: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prepayment: Option<PrepaymentAnalysis>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Analyse one loan request end to end.
pub fn analyze_loan(request: &LoanRequest) -> LoanAmortResult<ComputationOutput<LoanAnalysis>> {
    let start = Instant::now();

    let mut warnings: Vec<String> = Vec::new();

    if request.downpayment < Decimal::ZERO {
        return Err(LoanAmortError::InvalidInput {
            field: "downpayment".into(),
            reason: "Downpayment must be non-negative".into(),
        });
    }

    let principal = request.loan_amount - request.downpayment;
    if principal <= Decimal::ZERO {
        return Err(LoanAmortError::FinancialImpossibility(
            "No loan remains after the downpayment".into(),
        ));
    }

    let emi_input = EmiInput {
        principal,
        annual_rate_percent: request.annual_rate_percent,
        tenure_years: request.tenure_years,
    };
    let (emi_out, emi_warnings) = emi::compute_emi(&emi_input)?;
    warnings.extend(emi_warnings);

    let prepayment = match prepayment_if_applicable(request, principal, emi_out.total_months) {
        Applicability::Applies(input) => {
            let (lump_out, lump_warnings) = prepayment::compute_lump_sum(&input)?;
            warnings.extend(lump_warnings);
            Some(PrepaymentAnalysis {
                lump_sum: input.lump_sum,
                at_year: input.at_year,
                outstanding_before: lump_out.outstanding_before,
                outcome: lump_out.outcome,
            })
        }
        Applicability::Skipped(reason) => {
            warnings.push(format!("Prepayment skipped: {reason}"));
            None
        }
        Applicability::NotRequested => None,
    };

    let analysis = LoanAnalysis {
        principal,
        monthly_emi: emi_out.monthly_emi,
        total_months: emi_out.total_months,
        total_payment: emi_out.total_payment,
        total_interest: emi_out.total_interest,
        prepayment,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Loan Amortisation Analysis",
        request,
        warnings,
        elapsed,
        analysis,
    ))
}

enum Applicability {
    Applies(LumpSumInput),
    Skipped(String),
    NotRequested,
}

/// The original applicability rule: a prepayment takes effect only when
/// `lump_sum > 0` and `1 ≤ at_year < tenure_years`, and the prepayment
/// date must leave at least one month of term.
fn prepayment_if_applicable(
    request: &LoanRequest,
    principal: Money,
    total_months: u32,
) -> Applicability {
    let (lump_sum, at_year) = match (request.lump_sum, request.at_year) {
        (Some(l), Some(y)) => (l, y),
        (Some(l), None) if l > Decimal::ZERO => {
            return Applicability::Skipped("no prepayment year given".into());
        }
        _ => return Applicability::NotRequested,
    };

    if lump_sum <= Decimal::ZERO {
        return Applicability::Skipped("lump sum is not positive".into());
    }
    if at_year < 1 || Decimal::from(at_year) >= request.tenure_years {
        return Applicability::Skipped(format!(
            "year {at_year} is outside the loan tenure"
        ));
    }
    if at_year * 12 >= total_months {
        return Applicability::Skipped(format!(
            "year {at_year} leaves no remaining term"
        ));
    }

    Applicability::Applies(LumpSumInput {
        principal,
        annual_rate_percent: request.annual_rate_percent,
        tenure_years: request.tenure_years,
        lump_sum,
        at_year,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const TOL: Decimal = dec!(0.01);

    fn standard_request() -> LoanRequest {
        LoanRequest {
            downpayment: dec!(100_000),
            loan_amount: dec!(1_000_000),
            annual_rate_percent: dec!(8.5),
            tenure_years: dec!(20),
            lump_sum: None,
            at_year: None,
        }
    }

    #[test]
    fn test_analysis_nets_downpayment() {
        let out = analyze_loan(&standard_request()).unwrap().result;
        assert_eq!(out.principal, dec!(900_000));
        assert!((out.monthly_emi - dec!(7810.41)).abs() < TOL);
        assert!(out.prepayment.is_none());
    }

    #[test]
    fn test_analysis_rejects_downpayment_swallowing_loan() {
        let mut request = standard_request();
        request.downpayment = dec!(1_000_000);
        let err = analyze_loan(&request).unwrap_err();
        assert!(matches!(err, LoanAmortError::FinancialImpossibility(_)));
    }

    #[test]
    fn test_analysis_includes_applicable_prepayment() {
        let mut request = standard_request();
        request.lump_sum = Some(dec!(200_000));
        request.at_year = Some(5);
        let out = analyze_loan(&request).unwrap().result;
        let prepayment = out.prepayment.expect("prepayment should apply");
        match prepayment.outcome {
            LumpSumOutcome::Revised { remaining_months, .. } => {
                assert_eq!(remaining_months, 180)
            }
            LumpSumOutcome::Discharged { .. } => panic!("expected Revised outcome"),
        }
    }

    #[test]
    fn test_analysis_skips_out_of_window_prepayment() {
        let mut request = standard_request();
        request.lump_sum = Some(dec!(200_000));
        request.at_year = Some(20);
        let out = analyze_loan(&request).unwrap();
        assert!(out.result.prepayment.is_none());
        assert!(out.warnings.iter().any(|w| w.contains("Prepayment skipped")));
    }

    #[test]
    fn test_analysis_skips_zero_lump_sum() {
        let mut request = standard_request();
        request.lump_sum = Some(dec!(0));
        request.at_year = Some(5);
        let out = analyze_loan(&request).unwrap();
        assert!(out.result.prepayment.is_none());
    }

    #[test]
    fn test_analysis_discharging_lump_sum() {
        let request = LoanRequest {
            downpayment: dec!(0),
            loan_amount: dec!(500_000),
            annual_rate_percent: dec!(9),
            tenure_years: dec!(15),
            lump_sum: Some(dec!(500_000)),
            at_year: Some(1),
        };
        let out = analyze_loan(&request).unwrap().result;
        let prepayment = out.prepayment.expect("prepayment should apply");
        assert!(matches!(
            prepayment.outcome,
            LumpSumOutcome::Discharged { .. }
        ));
    }
}
