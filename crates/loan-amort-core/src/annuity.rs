//! Closed-form annuity math shared by every amortisation operation.
//!
//! All functions are pure and operate on `rust_decimal::Decimal`. Rates
//! arrive as annual percentages (the lender quote) and are converted to
//! monthly decimals here; tenures arrive in years and are truncated to
//! whole months.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

use crate::error::LoanAmortError;
use crate::types::{Money, Rate, Years};
use crate::LoanAmortResult;

/// Convert an annual percentage rate to a monthly decimal rate.
pub fn monthly_rate(annual_rate_percent: Rate) -> LoanAmortResult<Rate> {
    if annual_rate_percent < Decimal::ZERO {
        return Err(LoanAmortError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Annual rate must be non-negative".into(),
        });
    }
    Ok(annual_rate_percent / dec!(100) / dec!(12))
}

/// Whole months in a tenure expressed in years, truncated toward zero.
pub fn term_months(tenure_years: Years) -> LoanAmortResult<u32> {
    if tenure_years <= Decimal::ZERO {
        return Err(LoanAmortError::InvalidInput {
            field: "tenure_years".into(),
            reason: "Tenure must be positive".into(),
        });
    }

    let months = (tenure_years * dec!(12)).trunc();
    match months.to_u32() {
        Some(m) if m >= 1 => Ok(m),
        _ => Err(LoanAmortError::InvalidInput {
            field: "tenure_years".into(),
            reason: "Tenure must cover at least one whole month".into(),
        }),
    }
}

/// Compound growth factor `(1 + rate)^periods`. Periods may be fractional.
pub fn compound_factor(rate: Rate, periods: Decimal) -> Decimal {
    (Decimal::ONE + rate).powd(periods)
}

/// Level monthly payment amortising `principal` over `total_months` at
/// `rate` per month (the reducing-balance EMI formula).
///
/// A zero rate degenerates the annuity factor, so it is special-cased to
/// straight-line repayment.
pub fn level_payment(
    principal: Money,
    rate: Rate,
    total_months: u32,
) -> LoanAmortResult<Money> {
    if total_months == 0 {
        return Err(LoanAmortError::InvalidInput {
            field: "total_months".into(),
            reason: "Term must be at least one month".into(),
        });
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(total_months));
    }

    let factor = compound_factor(rate, Decimal::from(total_months));
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return Err(LoanAmortError::DivisionByZero {
            context: "EMI annuity factor".into(),
        });
    }

    Ok(principal * rate * factor / denominator)
}

/// Remaining principal after `paid_months` level payments, from the
/// closed-form annuity balance: `P × (f − f_paid) / (f − 1)` where
/// `f = (1+r)^n`. `paid_months` may be fractional.
///
/// Zero-rate loans repay linearly, so the balance declines linearly.
pub fn outstanding_balance(
    principal: Money,
    rate: Rate,
    total_months: u32,
    paid_months: Decimal,
) -> LoanAmortResult<Money> {
    if total_months == 0 {
        return Err(LoanAmortError::InvalidInput {
            field: "total_months".into(),
            reason: "Term must be at least one month".into(),
        });
    }

    let total = Decimal::from(total_months);

    if rate.is_zero() {
        return Ok(principal * (total - paid_months) / total);
    }

    let factor = compound_factor(rate, total);
    let paid_factor = compound_factor(rate, paid_months);
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return Err(LoanAmortError::DivisionByZero {
            context: "outstanding balance annuity factor".into(),
        });
    }

    Ok(principal * (factor - paid_factor) / denominator)
}
