use loan_amort_core::emi::{self, EmiInput};
use loan_amort_core::outstanding::{self, OutstandingInput};
use loan_amort_core::prepayment::{self, LumpSumInput, LumpSumOutcome};
use loan_amort_core::LoanAmortError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const TOL: Decimal = dec!(0.01);

// ===========================================================================
// EMI tests
// ===========================================================================

fn reference_loan() -> EmiInput {
    // The 20-year benchmark loan: 900k at 8.5% p.a.
    EmiInput {
        principal: dec!(900_000),
        annual_rate_percent: dec!(8.5),
        tenure_years: dec!(20),
    }
}

#[test]
fn test_emi_matches_reference_formula() {
    let out = emi::calculate_emi(&reference_loan()).unwrap().result;
    // 900000 × r × (1+r)^240 / ((1+r)^240 − 1) with r = 0.085/12 ≈ 7810.41
    assert!((out.monthly_emi - dec!(7810.41)).abs() < TOL);
}

#[test]
fn test_emi_round_trip_invariants() {
    let out = emi::calculate_emi(&reference_loan()).unwrap().result;
    assert_eq!(
        out.total_payment,
        out.monthly_emi * Decimal::from(out.total_months)
    );
    assert_eq!(out.total_interest, out.total_payment - dec!(900_000));
}

#[test]
fn test_emi_fifteen_year_scenario() {
    // 500k at 9% over 15y: EMI ≈ 5071.33, interest positive, total > principal
    let input = EmiInput {
        principal: dec!(500_000),
        annual_rate_percent: dec!(9),
        tenure_years: dec!(15),
    };
    let out = emi::calculate_emi(&input).unwrap().result;
    assert!((out.monthly_emi - dec!(5071.33)).abs() < TOL);
    assert!(out.total_interest > Decimal::ZERO);
    assert!(out.total_payment > dec!(500_000));
}

#[test]
fn test_emi_domain_errors_are_structured() {
    let mut input = reference_loan();
    input.annual_rate_percent = dec!(-0.5);
    match emi::calculate_emi(&input).unwrap_err() {
        LoanAmortError::InvalidInput { field, .. } => {
            assert_eq!(field, "annual_rate_percent")
        }
        other => panic!("expected InvalidInput, got {other:?}"),
    }

    let mut input = reference_loan();
    input.tenure_years = dec!(-3);
    assert!(emi::calculate_emi(&input).is_err());
}

// ===========================================================================
// Outstanding principal tests
// ===========================================================================

fn outstanding_at(paid_months: Decimal) -> Decimal {
    let input = OutstandingInput {
        principal: dec!(500_000),
        annual_rate_percent: dec!(9),
        tenure_years: dec!(15),
        paid_months,
    };
    outstanding::calculate_outstanding(&input)
        .unwrap()
        .result
        .outstanding_principal
}

#[test]
fn test_outstanding_boundary_values() {
    assert!((outstanding_at(dec!(0)) - dec!(500_000)).abs() < TOL);
    assert!(outstanding_at(dec!(180)).abs() < TOL);
}

#[test]
fn test_outstanding_monotone_decrease_over_term() {
    let mut prev = outstanding_at(dec!(0));
    for paid in 1..=180u32 {
        let current = outstanding_at(Decimal::from(paid));
        assert!(current < prev, "balance rose at month {paid}");
        prev = current;
    }
}

#[test]
fn test_outstanding_handles_fractional_months() {
    let whole = outstanding_at(dec!(90));
    let frac = outstanding_at(dec!(90.5));
    let next = outstanding_at(dec!(91));
    assert!(next < frac && frac < whole);
}

// ===========================================================================
// Lump-sum prepayment tests
// ===========================================================================

#[test]
fn test_lump_sum_covering_balance_discharges() {
    // Balance after 12 payments ≈ 483,473.31, so 500k clears the loan
    let input = LumpSumInput {
        principal: dec!(500_000),
        annual_rate_percent: dec!(9),
        tenure_years: dec!(15),
        lump_sum: dec!(500_000),
        at_year: 1,
    };
    let out = prepayment::apply_lump_sum(&input).unwrap().result;
    assert!((out.outstanding_before - dec!(483_473.31)).abs() < TOL);
    assert!(matches!(out.outcome, LumpSumOutcome::Discharged { .. }));
}

#[test]
fn test_lump_sum_below_balance_revises() {
    let input = LumpSumInput {
        principal: dec!(900_000),
        annual_rate_percent: dec!(8.5),
        tenure_years: dec!(20),
        lump_sum: dec!(200_000),
        at_year: 5,
    };
    let out = prepayment::apply_lump_sum(&input).unwrap().result;
    match out.outcome {
        LumpSumOutcome::Revised {
            revised_emi,
            remaining_months,
            new_principal,
            total_savings,
        } => {
            assert_eq!(remaining_months, 180);
            assert!((revised_emi - dec!(5840.93)).abs() < TOL);
            assert!((new_principal - dec!(593_144.65)).abs() < TOL);
            // Re-amortising a smaller balance at the same rate must save money
            assert!(total_savings > Decimal::ZERO);
        }
        LumpSumOutcome::Discharged { .. } => panic!("expected Revised outcome"),
    }
}

#[test]
fn test_revised_emi_is_consistent_with_base_formula() {
    // Re-amortising the untouched balance over the remaining term at the
    // same rate must reproduce the original instalment; a lump sum can
    // only pull the instalment below it.
    let base = emi::calculate_emi(&reference_loan()).unwrap().result;
    let input = LumpSumInput {
        principal: dec!(900_000),
        annual_rate_percent: dec!(8.5),
        tenure_years: dec!(20),
        lump_sum: dec!(200_000),
        at_year: 5,
    };
    let out = prepayment::apply_lump_sum(&input).unwrap().result;
    match out.outcome {
        LumpSumOutcome::Revised { revised_emi, .. } => {
            assert!(revised_emi < base.monthly_emi);
        }
        LumpSumOutcome::Discharged { .. } => panic!("expected Revised outcome"),
    }
}

#[test]
fn test_prepayment_outside_tenure_is_rejected() {
    let input = LumpSumInput {
        principal: dec!(900_000),
        annual_rate_percent: dec!(8.5),
        tenure_years: dec!(20),
        lump_sum: dec!(200_000),
        at_year: 20,
    };
    assert!(prepayment::apply_lump_sum(&input).is_err());
}
