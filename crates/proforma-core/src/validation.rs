use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::assumptions::{DispositionPricing, FinancingType, PropertyAssumptions};

/// Default upper bound on the hold period. One product surface caps this at
/// 10 and another at 30; the cap is parameterized so either surface can pass
/// its own via [`validate_assumptions_with_cap`].
pub const DEFAULT_HOLD_PERIOD_CAP: u32 = 30;

const VALID_PAYMENT_FREQUENCIES: [u32; 4] = [1, 2, 4, 12];

/// Check an assumptions record for completeness and consistency before a
/// run. Returns human-readable messages; empty means valid. Never panics —
/// the caller uses a non-empty list to block computation.
pub fn validate_assumptions(assumptions: &PropertyAssumptions) -> Vec<String> {
    validate_assumptions_with_cap(assumptions, DEFAULT_HOLD_PERIOD_CAP)
}

/// [`validate_assumptions`] with an explicit hold-period cap.
pub fn validate_assumptions_with_cap(
    assumptions: &PropertyAssumptions,
    hold_period_cap: u32,
) -> Vec<String> {
    let mut errors: Vec<String> = Vec::new();
    let a = assumptions;

    if a.purchase_price <= Decimal::ZERO {
        errors.push("Purchase price must be greater than zero".into());
    }

    if a.hold_period_years == 0 {
        errors.push("Hold period must be at least 1 year".into());
    } else if a.hold_period_years > hold_period_cap {
        errors.push(format!(
            "Hold period of {} years exceeds the {} year maximum",
            a.hold_period_years, hold_period_cap
        ));
    }

    if a.land_percentage + a.improvements_percentage != dec!(100) {
        errors.push(format!(
            "Land ({}%) and improvements ({}%) percentages must sum to 100",
            a.land_percentage, a.improvements_percentage
        ));
    }

    if a.acquisition_month < 1 || a.acquisition_month > 12 {
        errors.push(format!(
            "Acquisition month must be between 1 and 12, got {}",
            a.acquisition_month
        ));
    }

    for (year, rate) in a.vacancy_rates.iter().enumerate() {
        if *rate < Decimal::ZERO || *rate > Decimal::ONE {
            errors.push(format!(
                "Vacancy rate for year {} must be between 0 and 1, got {rate}",
                year + 1
            ));
        }
    }

    for (year, income) in a.potential_rental_income.iter().enumerate() {
        if *income < Decimal::ZERO {
            errors.push(format!("Rental income for year {} is negative", year + 1));
        }
    }

    for (year, income) in a.other_income.iter().enumerate() {
        if *income < Decimal::ZERO {
            errors.push(format!("Other income for year {} is negative", year + 1));
        }
    }

    for (year, expense) in a.operating_expenses.iter().enumerate() {
        if *expense < Decimal::ZERO {
            errors.push(format!(
                "Operating expenses for year {} are negative",
                year + 1
            ));
        }
    }

    validate_financing(a, &mut errors);
    validate_disposition(a, &mut errors);

    for (label, rate) in [
        ("Ordinary income tax rate", a.ordinary_income_tax_rate),
        ("Capital gains tax rate", a.capital_gains_tax_rate),
        ("Depreciation recapture rate", a.depreciation_recapture_rate),
    ] {
        if rate < Decimal::ZERO || rate >= Decimal::ONE {
            errors.push(format!("{label} must be a fraction between 0 and 1, got {rate}"));
        }
    }

    errors
}

fn validate_financing(a: &PropertyAssumptions, errors: &mut Vec<String>) {
    match a.financing_type {
        FinancingType::Cash => {}
        FinancingType::Ltv => {
            if a.target_ltv <= Decimal::ZERO {
                errors.push("LTV financing selected but target LTV is not set".into());
            } else if a.target_ltv > dec!(100) {
                errors.push(format!(
                    "Target LTV of {}% exceeds 100% of purchase price",
                    a.target_ltv
                ));
            }
        }
        FinancingType::Dscr => {
            if a.target_dscr <= Decimal::ZERO {
                errors.push("DSCR financing selected but target DSCR is not set".into());
            }
            if a.amortization_years == 0 {
                errors.push("DSCR financing requires an amortization period".into());
            }
            if a.interest_rate < Decimal::ZERO {
                errors.push(format!(
                    "Interest rate cannot be negative, got {}",
                    a.interest_rate
                ));
            }
        }
    }

    if a.financing_type != FinancingType::Cash
        && !VALID_PAYMENT_FREQUENCIES.contains(&a.payments_per_year)
    {
        errors.push(format!(
            "Payments per year must be 1, 2, 4, or 12, got {}",
            a.payments_per_year
        ));
    }
}

fn validate_disposition(a: &PropertyAssumptions, errors: &mut Vec<String>) {
    match a.disposition_price_basis {
        DispositionPricing::Dollar => {
            if a.disposition_price < Decimal::ZERO {
                errors.push("Disposition price cannot be negative".into());
            }
        }
        DispositionPricing::CapRate => {
            // A zero cap rate degrades to an "undetermined" sale price at
            // run time; name it here so the caller can surface it up front.
            if a.disposition_cap_rate <= Decimal::ZERO {
                errors.push(
                    "Cap-rate disposition selected but disposition cap rate is not set".into(),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn valid_assumptions() -> PropertyAssumptions {
        PropertyAssumptions {
            purchase_price: dec!(1000000),
            hold_period_years: 5,
            potential_rental_income: vec![dec!(100000); 5],
            vacancy_rates: vec![dec!(0.05); 5],
            operating_expenses: vec![dec!(30); 5],
            disposition_cap_rate: dec!(0.06),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_record_passes() {
        assert!(validate_assumptions(&valid_assumptions()).is_empty());
    }

    #[test]
    fn test_zero_purchase_price_rejected() {
        let mut a = valid_assumptions();
        a.purchase_price = Decimal::ZERO;
        let errors = validate_assumptions(&a);
        assert!(errors.iter().any(|e| e.contains("Purchase price")));
    }

    #[test]
    fn test_zero_hold_period_rejected() {
        let mut a = valid_assumptions();
        a.hold_period_years = 0;
        assert!(!validate_assumptions(&a).is_empty());
    }

    #[test]
    fn test_hold_period_cap_is_parameterized() {
        let mut a = valid_assumptions();
        a.hold_period_years = 12;
        assert!(validate_assumptions(&a).is_empty());
        let errors = validate_assumptions_with_cap(&a, 10);
        assert!(errors.iter().any(|e| e.contains("10 year maximum")));
    }

    #[test]
    fn test_ltv_without_target_rejected() {
        let mut a = valid_assumptions();
        a.financing_type = FinancingType::Ltv;
        a.target_ltv = Decimal::ZERO;
        let errors = validate_assumptions(&a);
        assert!(errors.iter().any(|e| e.contains("target LTV")));
    }

    #[test]
    fn test_dscr_without_amortization_rejected() {
        let mut a = valid_assumptions();
        a.financing_type = FinancingType::Dscr;
        a.target_dscr = dec!(1.25);
        a.amortization_years = 0;
        let errors = validate_assumptions(&a);
        assert!(errors.iter().any(|e| e.contains("amortization")));
    }

    #[test]
    fn test_land_improvement_split_must_sum_to_100() {
        let mut a = valid_assumptions();
        a.land_percentage = dec!(30);
        a.improvements_percentage = dec!(80);
        let errors = validate_assumptions(&a);
        assert!(errors.iter().any(|e| e.contains("sum to 100")));
    }

    #[test]
    fn test_vacancy_rate_out_of_range_rejected() {
        let mut a = valid_assumptions();
        a.vacancy_rates[2] = dec!(1.5);
        let errors = validate_assumptions(&a);
        assert!(errors.iter().any(|e| e.contains("year 3")));
    }

    #[test]
    fn test_zero_cap_rate_named() {
        let mut a = valid_assumptions();
        a.disposition_cap_rate = Decimal::ZERO;
        let errors = validate_assumptions(&a);
        assert!(errors.iter().any(|e| e.contains("cap rate")));
    }
}
