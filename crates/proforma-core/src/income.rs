use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assumptions::{CostBasis, PropertyAssumptions};
use crate::types::Money;

/// One year of the income and expense waterfall, gross income down to NOI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeYear {
    pub potential_rental_income: Money,
    pub other_income: Money,
    /// Vacancy applies to rental income only, never to other income
    pub vacancy_loss: Money,
    pub effective_gross_income: Money,
    pub operating_expenses: Money,
    /// Rounded to 2 decimal places (banker's rounding)
    pub noi: Money,
}

/// Compute the full waterfall for one year (0-based, year 0 = first year of
/// the hold). Pure and order-independent: every year is computed on its own.
///
/// When the detailed income arrays are unpopulated, NOI falls back to the
/// legacy flat path: `year1_noi` compounded by `noi_growth_rate`. The
/// breakdown lines are zero in that case since no decomposition exists.
pub fn compute_income_year(assumptions: &PropertyAssumptions, year: usize) -> IncomeYear {
    if !assumptions.uses_detailed_income() {
        return IncomeYear {
            noi: legacy_noi(assumptions, year),
            ..IncomeYear::default()
        };
    }

    let rental = assumptions.rental_income_in(year);
    let other = assumptions.other_income_in(year);
    let vacancy_loss = rental * assumptions.vacancy_rate_in(year);
    let effective_gross_income = rental + other - vacancy_loss;

    let expense_entry = assumptions.operating_expense_in(year);
    let operating_expenses = match assumptions.operating_expense_basis {
        CostBasis::Percentage => effective_gross_income * expense_entry / dec!(100),
        CostBasis::Dollar => expense_entry,
    };

    IncomeYear {
        potential_rental_income: rental,
        other_income: other,
        vacancy_loss,
        effective_gross_income,
        operating_expenses,
        noi: (effective_gross_income - operating_expenses).round_dp(2),
    }
}

/// Net operating income for one year. See [`compute_income_year`].
pub fn compute_noi(assumptions: &PropertyAssumptions, year: usize) -> Money {
    compute_income_year(assumptions, year).noi
}

/// Legacy path: year1_noi grown at noi_growth_rate, compounded annually.
fn legacy_noi(assumptions: &PropertyAssumptions, year: usize) -> Money {
    let mut noi = assumptions.year1_noi;
    let growth = Decimal::ONE + assumptions.noi_growth_rate;
    for _ in 0..year {
        noi *= growth;
    }
    noi.round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn detailed_assumptions() -> PropertyAssumptions {
        PropertyAssumptions {
            purchase_price: dec!(1000000),
            hold_period_years: 5,
            potential_rental_income: vec![dec!(100000); 5],
            vacancy_rates: vec![dec!(0.05); 5],
            operating_expenses: vec![dec!(30); 5],
            ..Default::default()
        }
    }

    #[test]
    fn test_noi_waterfall_percentage_expenses() {
        // 100000 rent, 5% vacancy, 30% of EGI expenses:
        // vacancy 5000, EGI 95000, opex 28500, NOI 66500
        let a = detailed_assumptions();
        let year = compute_income_year(&a, 0);
        assert_eq!(year.vacancy_loss, dec!(5000));
        assert_eq!(year.effective_gross_income, dec!(95000));
        assert_eq!(year.operating_expenses, dec!(28500));
        assert_eq!(year.noi, dec!(66500.00));
    }

    #[test]
    fn test_noi_waterfall_dollar_expenses() {
        let mut a = detailed_assumptions();
        a.operating_expense_basis = CostBasis::Dollar;
        a.operating_expenses = vec![dec!(28500); 5];
        assert_eq!(compute_noi(&a, 0), dec!(66500.00));
    }

    #[test]
    fn test_vacancy_excludes_other_income() {
        let mut a = detailed_assumptions();
        let base = compute_income_year(&a, 0);

        a.other_income = vec![dec!(50000); 5];
        let with_other = compute_income_year(&a, 0);

        // Vacancy loss must not move when other income changes
        assert_eq!(with_other.vacancy_loss, base.vacancy_loss);
        assert_eq!(
            with_other.effective_gross_income,
            base.effective_gross_income + dec!(50000)
        );
    }

    #[test]
    fn test_missing_entries_default_to_zero() {
        let a = detailed_assumptions();
        // Year 7 is past every populated array
        let year = compute_income_year(&a, 7);
        assert_eq!(year.noi, Decimal::ZERO);
    }

    #[test]
    fn test_legacy_flat_path() {
        let a = PropertyAssumptions {
            year1_noi: dec!(66500),
            noi_growth_rate: dec!(0.03),
            ..Default::default()
        };
        assert_eq!(compute_noi(&a, 0), dec!(66500.00));
        assert_eq!(compute_noi(&a, 1), dec!(68495.00));
        // 66500 * 1.03^2 = 70549.85
        assert_eq!(compute_noi(&a, 2), dec!(70549.85));
    }

    #[test]
    fn test_detailed_arrays_take_precedence() {
        let mut a = detailed_assumptions();
        a.year1_noi = dec!(999999);
        assert_eq!(compute_noi(&a, 0), dec!(66500.00));
    }
}
