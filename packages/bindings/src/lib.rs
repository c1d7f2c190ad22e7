use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortisation engine
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_emi(input_json: String) -> NapiResult<String> {
    let input: loan_amort_core::emi::EmiInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_amort_core::emi::calculate_emi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_outstanding(input_json: String) -> NapiResult<String> {
    let input: loan_amort_core::outstanding::OutstandingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        loan_amort_core::outstanding::calculate_outstanding(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn apply_lump_sum(input_json: String) -> NapiResult<String> {
    let input: loan_amort_core::prepayment::LumpSumInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_amort_core::prepayment::apply_lump_sum(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Presentation boundary
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_loan(input_json: String) -> NapiResult<String> {
    let request: loan_amort_core::analysis::LoanRequest =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_amort_core::analysis::analyze_loan(&request).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn build_schedule(input_json: String) -> NapiResult<String> {
    let input: loan_amort_core::schedule::ScheduleInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_amort_core::schedule::build_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
