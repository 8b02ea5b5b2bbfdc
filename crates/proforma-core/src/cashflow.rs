use serde::{Deserialize, Serialize};

use crate::assumptions::PropertyAssumptions;
use crate::financing;
use crate::income;
use crate::types::Money;

/// One year of the projection, NOI through after-financing cash flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnualCashflow {
    /// 1-based display year
    pub year: u32,
    pub noi: Money,
    pub debt_service: Money,
    pub cash_flow_before_tax: Money,
}

/// Project annual cash flows across the hold period. Pure: the sized loan,
/// debt service, and every year's NOI derive solely from the assumptions
/// snapshot, so identical input yields identical output.
///
/// Debt service is constant across years — fixed-rate amortization, no rate
/// resets or variable schedules.
pub fn project_cashflows(assumptions: &PropertyAssumptions) -> Vec<AnnualCashflow> {
    let loan_amount = financing::size_loan(assumptions);
    let debt_service = financing::annual_debt_service(assumptions, loan_amount);

    (0..assumptions.hold_period_years)
        .map(|year| {
            let noi = income::compute_noi(assumptions, year as usize);
            AnnualCashflow {
                year: year + 1,
                noi,
                debt_service,
                cash_flow_before_tax: noi - debt_service,
            }
        })
        .collect()
}
