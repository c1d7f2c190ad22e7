//! Month-by-month amortisation schedule.
//!
//! Feeds charting frontends: outstanding balance per month plus the
//! principal/interest split of every instalment, each closing balance
//! taken from the closed-form annuity formula rather than accumulated
//! rounding. Optionally dated from a first-payment date and adjusted for
//! an applicable lump-sum prepayment.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::annuity;
use crate::emi::{self, EmiInput};
use crate::types::{with_metadata, ComputationOutput, Money, Rate, Years};
use crate::LoanAmortResult;

/// Balance below which the loan is considered fully paid.
const BALANCE_EPSILON: Decimal = dec!(0.01);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Amortisation schedule input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    /// Amount borrowed.
    pub principal: Money,
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
    /// Date of the first instalment; rows carry dates when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment_date: Option<NaiveDate>,
}

/// One instalment row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Instalment number, 1-based.
    pub month: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Level instalment due this month.
    pub payment: Money,
    /// Interest share: opening balance × monthly rate.
    pub interest_component: Money,
    /// Principal share: payment − interest.
    pub principal_component: Money,
    /// Lump-sum prepayment landing this month, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_payment: Option<Money>,
    /// Closed-form outstanding balance after this instalment.
    pub closing_balance: Money,
    pub cumulative_interest: Money,
}

/// Amortisation schedule output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub rows: Vec<ScheduleRow>,
    /// Months actually scheduled (shorter than the term when a lump sum
    /// discharges the loan early).
    pub months_scheduled: u32,
    /// Sum of instalments and any lump sum.
    pub total_paid: Money,
    pub total_interest: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the full amortisation schedule for a loan.
pub fn build_schedule(input: &ScheduleInput) -> LoanAmortResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();

    let (output, warnings) = compute_schedule(input)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Closed-Form Amortisation Schedule",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn compute_schedule(input: &ScheduleInput) -> LoanAmortResult<(ScheduleOutput, Vec<String>)> {
    let emi_input = EmiInput {
        principal: input.principal,
        annual_rate_percent: input.annual_rate_percent,
        tenure_years: input.tenure_years,
    };
    let (emi_out, mut warnings) = emi::compute_emi(&emi_input)?;

    let rate = emi_out.monthly_rate;
    let total_months = emi_out.total_months;

    let lump = applicable_lump(input, total_months, &mut warnings);

    let mut rows: Vec<ScheduleRow> = Vec::with_capacity(total_months as usize);
    let mut opening = input.principal;
    let mut payment = emi_out.monthly_emi;
    let mut cumulative_interest = Decimal::ZERO;
    let mut total_paid = Decimal::ZERO;

    // Re-amortisation state after the lump month: the sub-loan the
    // remaining term is priced on.
    let mut segment: Option<(Money, u32, u32)> = None;

    for month in 1..=total_months {
        let payment_due = payment;
        let interest = opening * rate;
        let principal_component = payment_due - interest;
        cumulative_interest += interest;
        total_paid += payment_due;

        let mut closing = match segment {
            None => annuity::outstanding_balance(
                input.principal,
                rate,
                total_months,
                Decimal::from(month),
            )?,
            Some((sub_principal, lump_month, remaining)) => annuity::outstanding_balance(
                sub_principal,
                rate,
                remaining,
                Decimal::from(month - lump_month),
            )?,
        };
        if closing < Decimal::ZERO {
            closing = Decimal::ZERO;
        }

        let mut extra_payment = None;
        if let Some((lump_sum, at_month)) = lump {
            if month == at_month {
                extra_payment = Some(lump_sum);
                total_paid += lump_sum;
                if lump_sum >= closing {
                    closing = Decimal::ZERO;
                } else {
                    closing -= lump_sum;
                    let remaining = total_months - month;
                    payment = annuity::level_payment(closing, rate, remaining)?;
                    segment = Some((closing, month, remaining));
                }
            }
        }

        rows.push(ScheduleRow {
            month,
            date: payment_date(input.first_payment_date, month),
            payment: payment_due,
            interest_component: interest,
            principal_component,
            extra_payment,
            closing_balance: closing,
            cumulative_interest,
        });

        if closing < BALANCE_EPSILON && month < total_months {
            warnings.push(format!("Loan fully repaid at month {month}"));
            break;
        }

        opening = closing;
    }

    let months_scheduled = rows.len() as u32;
    Ok((
        ScheduleOutput {
            rows,
            months_scheduled,
            total_paid,
            total_interest: cumulative_interest,
        },
        warnings,
    ))
}

/// Same applicability rule as the analysis boundary; an out-of-window
/// prepayment is dropped from the schedule with a warning.
fn applicable_lump(
    input: &ScheduleInput,
    total_months: u32,
    warnings: &mut Vec<String>,
) -> Option<(Money, u32)> {
    let (lump_sum, at_year) = match (input.lump_sum, input.at_year) {
        (Some(l), Some(y)) => (l, y),
        _ => return None,
    };

    let at_month = at_year * 12;
    if lump_sum <= Decimal::ZERO
        || at_year < 1
        || Decimal::from(at_year) >= input.tenure_years
        || at_month >= total_months
    {
        warnings.push(format!(
            "Prepayment skipped: {lump_sum} at year {at_year} is not applicable"
        ));
        return None;
    }

    Some((lump_sum, at_month))
}

fn payment_date(first: Option<NaiveDate>, month: u32) -> Option<NaiveDate> {
    first.and_then(|d| d.checked_add_months(Months::new(month - 1)))
}
