use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assumptions::{CostBasis, FinancingType, PropertyAssumptions};
use crate::income;
use crate::types::{Money, Rate};

/// Write-back threshold for the derived loan amount: deltas at or below one
/// unit of currency are ignored to keep floating-point-scale jitter from
/// oscillating the cache.
pub const LOAN_REFRESH_THRESHOLD: Money = Decimal::ONE;

// ---------------------------------------------------------------------------
// Loan sizing
// ---------------------------------------------------------------------------

/// Size the loan from the selected financing strategy. Pure and idempotent.
///
/// - `Cash`: zero.
/// - `Ltv`: target LTV% of purchase price.
/// - `Dscr`: the principal whose annual debt service equals
///   year-1 NOI / target DSCR, from the present-value-of-annuity formula
///   `L = pmt × (1 − (1+r)^−n) / r`, with a straight-line branch
///   (`L = pmt × n`) when the periodic rate is zero.
///
/// When the `Dscr` preconditions do not hold (year-1 NOI, target DSCR,
/// amortization period, or payment frequency not positive, or a negative
/// rate), the previously cached `loan_amount` is returned unchanged — a
/// stale-value fallback, not an error.
pub fn size_loan(assumptions: &PropertyAssumptions) -> Money {
    match assumptions.financing_type {
        FinancingType::Cash => Decimal::ZERO,
        FinancingType::Ltv => assumptions.target_ltv / dec!(100) * assumptions.purchase_price,
        FinancingType::Dscr => size_loan_from_dscr(assumptions),
    }
}

fn size_loan_from_dscr(a: &PropertyAssumptions) -> Money {
    let year1_noi = income::compute_noi(a, 0);

    let preconditions_hold = year1_noi > Decimal::ZERO
        && a.target_dscr > Decimal::ZERO
        && a.amortization_years > 0
        && a.payments_per_year > 0
        && a.interest_rate >= Decimal::ZERO;

    if !preconditions_hold {
        return a.loan_amount;
    }

    let payments_per_year = Decimal::from(a.payments_per_year);
    let max_annual_debt_service = year1_noi / a.target_dscr;
    let max_periodic_payment = max_annual_debt_service / payments_per_year;

    let periods = a.amortization_years * a.payments_per_year;
    let periodic_rate = a.interest_rate / payments_per_year;

    if periodic_rate.is_zero() {
        // pmt × n, collapsed to annual service × years to stay exact
        return max_annual_debt_service * Decimal::from(a.amortization_years);
    }

    // L = pmt × (1 − (1+r)^−n) / r
    let compound = compound_factor(periodic_rate, periods);
    let annuity_factor = (Decimal::ONE - Decimal::ONE / compound) / periodic_rate;
    max_periodic_payment * annuity_factor
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

/// Level payment for an amortizing loan: `P × r(1+r)^n / ((1+r)^n − 1)`.
/// Zero periodic rate degrades to straight-line `P / n`; zero periods
/// degrades to zero rather than dividing.
pub fn periodic_payment(principal: Money, periodic_rate: Rate, periods: u32) -> Money {
    if periods == 0 || principal <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    if periodic_rate <= Decimal::ZERO {
        return principal / Decimal::from(periods);
    }

    let compound = compound_factor(periodic_rate, periods);
    principal * periodic_rate * compound / (compound - Decimal::ONE)
}

/// Total debt service per year: periodic payment × payment frequency.
/// Constant across the hold under fixed-rate amortization.
pub fn annual_debt_service(assumptions: &PropertyAssumptions, loan_amount: Money) -> Money {
    if assumptions.payments_per_year == 0 {
        return Decimal::ZERO;
    }
    let periodic_rate = assumptions.interest_rate / Decimal::from(assumptions.payments_per_year);
    let periods = assumptions.amortization_years * assumptions.payments_per_year;
    periodic_payment(loan_amount, periodic_rate, periods) * Decimal::from(assumptions.payments_per_year)
}

/// Outstanding balance after a number of whole years of scheduled payments.
/// Tracks the schedule period by period, clamping at zero; straight-line
/// when the rate is zero.
pub fn loan_balance_after_years(
    assumptions: &PropertyAssumptions,
    loan_amount: Money,
    years: u32,
) -> Money {
    if loan_amount <= Decimal::ZERO || assumptions.payments_per_year == 0 {
        return Decimal::ZERO.max(loan_amount);
    }

    let total_periods = assumptions.amortization_years * assumptions.payments_per_year;
    let elapsed = (years * assumptions.payments_per_year).min(total_periods);
    if total_periods == 0 {
        return loan_amount;
    }

    let periodic_rate = assumptions.interest_rate / Decimal::from(assumptions.payments_per_year);

    if periodic_rate <= Decimal::ZERO {
        let repaid = loan_amount * Decimal::from(elapsed) / Decimal::from(total_periods);
        return (loan_amount - repaid).max(Decimal::ZERO);
    }

    let payment = periodic_payment(loan_amount, periodic_rate, total_periods);
    let mut balance = loan_amount;
    for _ in 0..elapsed {
        let interest = balance * periodic_rate;
        balance -= payment - interest;
        if balance <= Decimal::ZERO {
            return Decimal::ZERO;
        }
    }
    balance
}

/// One row of the level-payment amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationPeriod {
    /// 1-based payment number
    pub period: u32,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    /// Balance remaining after this payment
    pub balance: Money,
}

/// Full period-by-period schedule for a loan under the record's financing
/// terms. The final payment is trimmed so the balance lands exactly on zero.
pub fn amortization_schedule(
    assumptions: &PropertyAssumptions,
    loan_amount: Money,
) -> Vec<AmortizationPeriod> {
    if loan_amount <= Decimal::ZERO || assumptions.payments_per_year == 0 {
        return Vec::new();
    }

    let total_periods = assumptions.amortization_years * assumptions.payments_per_year;
    if total_periods == 0 {
        return Vec::new();
    }

    let periodic_rate = assumptions.interest_rate / Decimal::from(assumptions.payments_per_year);
    let level_payment = periodic_payment(loan_amount, periodic_rate, total_periods);

    let mut schedule = Vec::with_capacity(total_periods as usize);
    let mut balance = loan_amount;

    for period in 1..=total_periods {
        let interest = if periodic_rate > Decimal::ZERO {
            balance * periodic_rate
        } else {
            Decimal::ZERO
        };
        let principal = (level_payment - interest).min(balance);
        balance -= principal;

        schedule.push(AmortizationPeriod {
            period,
            payment: interest + principal,
            interest,
            principal,
            balance,
        });

        if balance.is_zero() {
            break;
        }
    }

    schedule
}

// ---------------------------------------------------------------------------
// Costs
// ---------------------------------------------------------------------------

/// Loan costs resolved to dollars (percent of loan, or absolute).
pub fn loan_cost_amount(assumptions: &PropertyAssumptions, loan_amount: Money) -> Money {
    match assumptions.loan_cost_basis {
        CostBasis::Percentage => loan_amount * assumptions.loan_costs / dec!(100),
        CostBasis::Dollar => assumptions.loan_costs,
    }
}

// ---------------------------------------------------------------------------
// Derived-cache refresh
// ---------------------------------------------------------------------------

/// The fields loan sizing depends on, as an equality-comparable key. A
/// caller that memoizes the sized loan recomputes when this key changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanSizingInputs {
    pub financing_type: FinancingType,
    pub purchase_price: Money,
    pub target_ltv: Decimal,
    pub target_dscr: Decimal,
    pub interest_rate: Rate,
    pub amortization_years: u32,
    pub payments_per_year: u32,
    pub rental_income_year1: Money,
    pub other_income_year1: Money,
    pub vacancy_rate_year1: Rate,
    pub operating_expense_year1: Decimal,
    pub operating_expense_basis: CostBasis,
    pub year1_noi: Money,
}

impl LoanSizingInputs {
    pub fn of(a: &PropertyAssumptions) -> Self {
        LoanSizingInputs {
            financing_type: a.financing_type,
            purchase_price: a.purchase_price,
            target_ltv: a.target_ltv,
            target_dscr: a.target_dscr,
            interest_rate: a.interest_rate,
            amortization_years: a.amortization_years,
            payments_per_year: a.payments_per_year,
            rental_income_year1: a.rental_income_in(0),
            other_income_year1: a.other_income_in(0),
            vacancy_rate_year1: a.vacancy_rate_in(0),
            operating_expense_year1: a.operating_expense_in(0),
            operating_expense_basis: a.operating_expense_basis,
            year1_noi: a.year1_noi,
        }
    }
}

/// Re-derive the cached `loan_amount` from the current inputs, writing back
/// only when the delta exceeds [`LOAN_REFRESH_THRESHOLD`]. Returns whether
/// the cache was updated. This is the explicit form of the interactive
/// system's recompute-on-dependency-change behavior.
pub fn refresh_loan_amount(assumptions: &mut PropertyAssumptions) -> bool {
    let sized = size_loan(assumptions);
    if (sized - assumptions.loan_amount).abs() > LOAN_REFRESH_THRESHOLD {
        assumptions.loan_amount = sized;
        true
    } else {
        false
    }
}

fn compound_factor(periodic_rate: Rate, periods: u32) -> Decimal {
    let mut compound = Decimal::ONE;
    let one_plus_r = Decimal::ONE + periodic_rate;
    for _ in 0..periods {
        compound *= one_plus_r;
    }
    compound
}
