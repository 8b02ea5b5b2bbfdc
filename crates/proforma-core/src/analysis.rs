use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::assumptions::{DispositionPricing, PropertyAssumptions};
use crate::cashflow::{self, AnnualCashflow};
use crate::disposition::{self, SaleProceeds};
use crate::financing;
use crate::income;
use crate::time_value;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::validation;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Summary return metrics over the full hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnSummary {
    pub year1_noi: Money,
    /// Year-1 NOI / annual debt service; zero for all-cash deals
    pub year1_dscr: Decimal,
    /// Year-1 cash flow before tax / initial equity
    pub cash_on_cash_year1: Rate,
    /// (Σ cash flows + after-tax sale proceeds) / initial equity
    pub equity_multiple: Decimal,
    /// IRR on equity over the hold; None when the solver does not converge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levered_irr: Option<Rate>,
    pub average_cash_flow: Money,
}

/// Complete proforma run output.
///
/// When `validation_errors` is non-empty the numeric fields are all zero /
/// empty — the run is blocked, never a panic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProformaOutput {
    pub validation_errors: Vec<String>,
    pub loan_amount: Money,
    pub loan_costs: Money,
    pub acquisition_costs: Money,
    /// Purchase price + acquisition costs + loan costs − loan amount
    pub initial_equity: Money,
    pub cashflows: Vec<AnnualCashflow>,
    pub sale: SaleProceeds,
    pub returns: ReturnSummary,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Run the full proforma: validation, loan sizing, annual cash flows,
/// disposition, and summary return metrics.
///
/// Infallible and deterministic: malformed-but-structurally-valid input
/// yields a populated `validation_errors` list and zeroed outputs, and
/// identical input always yields identical output.
pub fn run_proforma(assumptions: &PropertyAssumptions) -> ComputationOutput<ProformaOutput> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let validation_errors = validation::validate_assumptions(assumptions);
    if !validation_errors.is_empty() {
        let output = ProformaOutput {
            validation_errors,
            ..ProformaOutput::default()
        };
        let elapsed = start.elapsed().as_micros() as u64;
        return with_metadata(METHODOLOGY, assumptions, warnings, elapsed, output);
    }

    // --- Capital stack ---
    let loan_amount = financing::size_loan(assumptions);
    let loan_costs = financing::loan_cost_amount(assumptions, loan_amount);
    let acquisition_costs = assumptions.acquisition_cost_amount();
    let initial_equity =
        assumptions.purchase_price + acquisition_costs + loan_costs - loan_amount;

    // --- Projection and disposition ---
    let cashflows = cashflow::project_cashflows(assumptions);
    let final_year = assumptions.hold_period_years.saturating_sub(1) as usize;
    let final_year_noi = income::compute_noi(assumptions, final_year);
    let sale = disposition::compute_sale_proceeds(assumptions, final_year_noi);

    let returns = summarize_returns(
        assumptions,
        initial_equity,
        &cashflows,
        &sale,
        &mut warnings,
    );

    collect_warnings(assumptions, loan_amount, &returns, &cashflows, &mut warnings);

    let output = ProformaOutput {
        validation_errors: Vec::new(),
        loan_amount,
        loan_costs,
        acquisition_costs,
        initial_equity,
        cashflows,
        sale,
        returns,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(METHODOLOGY, assumptions, warnings, elapsed, output)
}

const METHODOLOGY: &str = "Real Estate Investment Proforma";

// ---------------------------------------------------------------------------
// Return metrics
// ---------------------------------------------------------------------------

fn summarize_returns(
    assumptions: &PropertyAssumptions,
    initial_equity: Money,
    cashflows: &[AnnualCashflow],
    sale: &SaleProceeds,
    warnings: &mut Vec<String>,
) -> ReturnSummary {
    let year1_noi = income::compute_noi(assumptions, 0);
    let year1 = cashflows.first();

    let year1_dscr = match year1 {
        Some(cf) if cf.debt_service > Decimal::ZERO => year1_noi / cf.debt_service,
        _ => Decimal::ZERO,
    };

    let cash_on_cash_year1 = match year1 {
        Some(cf) if initial_equity > Decimal::ZERO => cf.cash_flow_before_tax / initial_equity,
        _ => Decimal::ZERO,
    };

    let total_cash_flow: Money = cashflows.iter().map(|cf| cf.cash_flow_before_tax).sum();
    let average_cash_flow = if cashflows.is_empty() {
        Decimal::ZERO
    } else {
        total_cash_flow / Decimal::from(cashflows.len() as u32)
    };

    let equity_multiple = if initial_equity > Decimal::ZERO {
        (total_cash_flow + sale.after_tax_proceeds) / initial_equity
    } else {
        Decimal::ZERO
    };

    let levered_irr = levered_irr(initial_equity, cashflows, sale, warnings);

    ReturnSummary {
        year1_noi,
        year1_dscr,
        cash_on_cash_year1,
        equity_multiple,
        levered_irr,
        average_cash_flow,
    }
}

/// Equity cash flow series: −equity at close, annual CFBT, sale proceeds
/// added to the final year.
fn levered_irr(
    initial_equity: Money,
    cashflows: &[AnnualCashflow],
    sale: &SaleProceeds,
    warnings: &mut Vec<String>,
) -> Option<Rate> {
    if initial_equity <= Decimal::ZERO || cashflows.is_empty() {
        return None;
    }

    let mut equity_flows = Vec::with_capacity(cashflows.len() + 1);
    equity_flows.push(-initial_equity);
    for (i, cf) in cashflows.iter().enumerate() {
        if i == cashflows.len() - 1 {
            equity_flows.push(cf.cash_flow_before_tax + sale.after_tax_proceeds);
        } else {
            equity_flows.push(cf.cash_flow_before_tax);
        }
    }

    match time_value::irr(&equity_flows, dec!(0.10)) {
        Ok(rate) => Some(rate),
        Err(e) => {
            warnings.push(format!("Levered IRR did not converge: {e}"));
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Soft warnings
// ---------------------------------------------------------------------------

fn collect_warnings(
    assumptions: &PropertyAssumptions,
    loan_amount: Money,
    returns: &ReturnSummary,
    cashflows: &[AnnualCashflow],
    warnings: &mut Vec<String>,
) {
    if assumptions.purchase_price > Decimal::ZERO {
        let ltv = loan_amount / assumptions.purchase_price;
        if ltv > dec!(0.80) {
            warnings.push(format!(
                "LTV of {:.1}% exceeds 80% — high leverage",
                ltv * dec!(100)
            ));
        }
    }

    if returns.year1_dscr > Decimal::ZERO && returns.year1_dscr < dec!(1.2) {
        warnings.push(format!(
            "Year-1 DSCR of {:.2} is below 1.20x — lender covenant risk",
            returns.year1_dscr
        ));
    }

    if assumptions.disposition_price_basis == DispositionPricing::CapRate {
        let cap = assumptions.disposition_cap_rate;
        if cap > Decimal::ZERO && cap < dec!(0.03) {
            warnings.push(format!(
                "Disposition cap rate {cap} is below 3% — unusually low, verify market data"
            ));
        }
        if cap > dec!(0.12) {
            warnings.push(format!(
                "Disposition cap rate {cap} exceeds 12% — unusually high, may indicate elevated risk"
            ));
        }
    }

    if assumptions.vacancy_rate_in(0) > dec!(0.15) {
        warnings.push(format!(
            "Vacancy rate {:.1}% exceeds 15% — above typical market norms",
            assumptions.vacancy_rate_in(0) * dec!(100)
        ));
    }

    for cf in cashflows {
        if cf.cash_flow_before_tax < Decimal::ZERO {
            warnings.push(format!(
                "Year {} cash flow before tax is negative",
                cf.year
            ));
        }
    }
}
