use napi::Result as NapiResult;
use napi_derive::napi;

use proforma_core::assumptions::PropertyAssumptions;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_assumptions(input_json: &str) -> NapiResult<PropertyAssumptions> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Proforma engine
// ---------------------------------------------------------------------------

/// Full proforma run: validation, loan sizing, cash flows, disposition,
/// return summary. Validation failures come back inside the result, not as
/// a thrown error, so the UI can render the "please fix" list.
#[napi]
pub fn run_proforma(input_json: String) -> NapiResult<String> {
    let assumptions = parse_assumptions(&input_json)?;
    let output = proforma_core::analysis::run_proforma(&assumptions);
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Loan sizing only — the reactive "recompute loan amount on dependency
/// change" path. Returns the sized loan and its annual debt service.
#[napi]
pub fn size_loan(input_json: String) -> NapiResult<String> {
    let assumptions = parse_assumptions(&input_json)?;
    let loan_amount = proforma_core::financing::size_loan(&assumptions);
    let annual_debt_service =
        proforma_core::financing::annual_debt_service(&assumptions, loan_amount);
    serde_json::to_string(&serde_json::json!({
        "loan_amount": loan_amount,
        "annual_debt_service": annual_debt_service,
    }))
    .map_err(to_napi_error)
}

/// Validation messages for an assumptions record; an empty list means the
/// record is ready to run.
#[napi]
pub fn validate_assumptions(input_json: String) -> NapiResult<String> {
    let assumptions = parse_assumptions(&input_json)?;
    let errors = proforma_core::validation::validate_assumptions(&assumptions);
    serde_json::to_string(&errors).map_err(to_napi_error)
}

/// Period-by-period amortization schedule for the sized loan.
#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let assumptions = parse_assumptions(&input_json)?;
    let loan_amount = proforma_core::financing::size_loan(&assumptions);
    let schedule = proforma_core::financing::amortization_schedule(&assumptions, loan_amount);
    serde_json::to_string(&schedule).map_err(to_napi_error)
}
