use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use proforma_core::analysis::run_proforma;
use proforma_core::assumptions::{
    CostBasis, DispositionPricing, FinancingType, PropertyAssumptions,
};
use proforma_core::cashflow::project_cashflows;
use proforma_core::disposition::compute_sale_proceeds;
use proforma_core::financing::{
    amortization_schedule, annual_debt_service, periodic_payment, size_loan,
};
use proforma_core::income::{compute_income_year, compute_noi};
use proforma_core::validation::validate_assumptions;

/// Stabilized small multifamily: $1M purchase, 75% LTV, 5-year hold,
/// cap-rate exit.
fn stabilized_multifamily() -> PropertyAssumptions {
    PropertyAssumptions {
        purchase_price: dec!(1000000),
        acquisition_costs: dec!(2),
        hold_period_years: 5,
        potential_rental_income: vec![
            dec!(100000),
            dec!(103000),
            dec!(106090),
            dec!(109272.70),
            dec!(112550.88),
        ],
        vacancy_rates: vec![dec!(0.05); 5],
        operating_expenses: vec![dec!(30); 5],
        financing_type: FinancingType::Ltv,
        target_ltv: dec!(75),
        interest_rate: dec!(0.065),
        amortization_years: 30,
        loan_term_years: 30,
        payments_per_year: 12,
        disposition_price_basis: DispositionPricing::CapRate,
        disposition_cap_rate: dec!(0.06),
        cost_of_sale_percentage: dec!(0.06),
        capital_gains_tax_rate: dec!(0.20),
        depreciation_recapture_rate: dec!(0.25),
        ..Default::default()
    }
}

// ===========================================================================
// Determinism
// ===========================================================================

#[test]
fn test_repeated_runs_are_identical() {
    let a = stabilized_multifamily();
    let runs: Vec<_> = (0..3).map(|_| run_proforma(&a)).collect();
    assert_eq!(runs[0].result, runs[1].result);
    assert_eq!(runs[1].result, runs[2].result);
    assert_eq!(project_cashflows(&a), project_cashflows(&a));
}

// ===========================================================================
// NOI waterfall
// ===========================================================================

#[test]
fn test_noi_waterfall_reference_case() {
    // rentalIncome=100000, otherIncome=0, vacancy=5%, opex=30% of EGI
    let a = stabilized_multifamily();
    let year = compute_income_year(&a, 0);

    assert_eq!(year.vacancy_loss, dec!(5000));
    assert_eq!(year.effective_gross_income, dec!(95000));
    assert_eq!(year.operating_expenses, dec!(28500));
    assert_eq!(year.noi, dec!(66500.00));
}

#[test]
fn test_vacancy_scope_excludes_other_income() {
    let mut a = stabilized_multifamily();
    let without = compute_income_year(&a, 0).vacancy_loss;

    a.other_income = vec![dec!(25000); 5];
    let with = compute_income_year(&a, 0).vacancy_loss;

    assert_eq!(with, without);
}

// ===========================================================================
// Amortization
// ===========================================================================

#[test]
fn test_amortization_reference_payment() {
    // $500k, 6.5%, 30y, monthly => ~$3,160.34
    let payment = periodic_payment(dec!(500000), dec!(0.065) / dec!(12), 360);
    assert!(
        (payment - dec!(3160.34)).abs() < dec!(0.01),
        "payment {payment} outside ±0.01 of reference"
    );
}

#[test]
fn test_amortization_round_trip_exhausts_principal() {
    let mut a = stabilized_multifamily();
    a.interest_rate = dec!(0.065);
    a.amortization_years = 30;

    let schedule = amortization_schedule(&a, dec!(500000));
    assert_eq!(schedule.len(), 360);

    let total_principal: Decimal = schedule.iter().map(|p| p.principal).sum();
    assert!(
        (total_principal - dec!(500000)).abs() < dec!(0.01),
        "principal portions sum to {total_principal}"
    );
    assert!(schedule.last().unwrap().balance < dec!(0.01));
}

#[test]
fn test_zero_rate_payment_exact() {
    let payment = periodic_payment(dec!(360000), Decimal::ZERO, 360);
    assert_eq!(payment, dec!(1000));
}

// ===========================================================================
// DSCR loan sizing
// ===========================================================================

#[test]
fn test_dscr_inversion_hits_target() {
    for target in [dec!(1.10), dec!(1.25), dec!(1.50)] {
        let mut a = stabilized_multifamily();
        a.financing_type = FinancingType::Dscr;
        a.target_dscr = target;

        let loan = size_loan(&a);
        let debt_service = annual_debt_service(&a, loan);
        let achieved = compute_noi(&a, 0) / debt_service;

        assert!(
            (achieved - target).abs() < dec!(0.000001),
            "target {target}: achieved {achieved}"
        );
    }
}

#[test]
fn test_dscr_zero_rate_straight_line_fallback() {
    let mut a = stabilized_multifamily();
    a.financing_type = FinancingType::Dscr;
    a.target_dscr = dec!(1.25);
    a.interest_rate = Decimal::ZERO;

    // 66500 / 1.25 = 53200 annual; straight-line over 30 years
    assert_eq!(size_loan(&a), dec!(1596000));
}

#[test]
fn test_dscr_quarterly_payment_frequency() {
    let mut a = stabilized_multifamily();
    a.financing_type = FinancingType::Dscr;
    a.target_dscr = dec!(1.25);
    a.payments_per_year = 4;

    let loan = size_loan(&a);
    let achieved = compute_noi(&a, 0) / annual_debt_service(&a, loan);
    assert!((achieved - dec!(1.25)).abs() < dec!(0.000001));
}

// ===========================================================================
// Disposition
// ===========================================================================

#[test]
fn test_cap_rate_sale_price_reference() {
    let mut a = stabilized_multifamily();
    a.disposition_cap_rate = dec!(0.05);
    a.cost_of_sale_percentage = Decimal::ZERO;

    let proceeds = compute_sale_proceeds(&a, dec!(500000));
    assert_eq!(proceeds.sale_price, Some(dec!(10000000)));
}

#[test]
fn test_zero_cap_rate_undetermined_not_infinite() {
    let mut a = stabilized_multifamily();
    a.disposition_cap_rate = Decimal::ZERO;

    let proceeds = compute_sale_proceeds(&a, dec!(500000));
    assert_eq!(proceeds.sale_price, None);
    assert_eq!(proceeds.after_tax_proceeds, Decimal::ZERO);
}

#[test]
fn test_sale_taxes_split_by_gain_layer() {
    let mut a = stabilized_multifamily();
    a.disposition_price_basis = DispositionPricing::Dollar;
    a.disposition_price = dec!(1500000);
    a.cost_of_sale_basis = CostBasis::Dollar;
    a.cost_of_sale_amount = dec!(90000);
    a.financing_type = FinancingType::Cash;

    let proceeds = compute_sale_proceeds(&a, dec!(66500));

    let accumulated = proceeds.accumulated_depreciation;
    assert!(accumulated > Decimal::ZERO);
    assert_eq!(
        proceeds.adjusted_basis,
        dec!(1020000) - accumulated
    );
    assert_eq!(
        proceeds.total_gain,
        dec!(1500000) - dec!(90000) - proceeds.adjusted_basis
    );
    // Gain exceeds accumulated depreciation here, so recapture is capped at
    // the accumulated amount and the remainder is capital gains.
    assert_eq!(
        proceeds.depreciation_recapture_tax,
        accumulated * dec!(0.25)
    );
    assert_eq!(
        proceeds.capital_gains_tax,
        (proceeds.total_gain - accumulated) * dec!(0.20)
    );
}

// ===========================================================================
// Validation gating
// ===========================================================================

#[test]
fn test_zero_purchase_price_blocks_run() {
    let mut a = stabilized_multifamily();
    a.purchase_price = Decimal::ZERO;

    let errors = validate_assumptions(&a);
    assert!(!errors.is_empty());

    let result = run_proforma(&a);
    assert!(!result.result.validation_errors.is_empty());
    assert!(result.result.cashflows.is_empty());
    assert_eq!(result.result.initial_equity, Decimal::ZERO);
}

#[test]
fn test_valid_fixture_passes_validation() {
    assert_eq!(validate_assumptions(&stabilized_multifamily()), Vec::<String>::new());
}

// ===========================================================================
// End-to-end JSON boundary
// ===========================================================================

#[test]
fn test_assumptions_and_output_round_trip_json() {
    let a = stabilized_multifamily();
    let json = serde_json::to_string(&a).unwrap();
    let back: PropertyAssumptions = serde_json::from_str(&json).unwrap();

    // The record itself round-trips, and the engine agrees on both copies
    assert_eq!(run_proforma(&a).result, run_proforma(&back).result);

    let output_json = serde_json::to_string(&run_proforma(&a)).unwrap();
    assert!(output_json.contains("methodology"));
}

#[test]
fn test_legacy_flat_noi_path_end_to_end() {
    let a = PropertyAssumptions {
        purchase_price: dec!(1000000),
        hold_period_years: 3,
        year1_noi: dec!(66500),
        noi_growth_rate: dec!(0.03),
        disposition_cap_rate: dec!(0.06),
        ..Default::default()
    };

    let flows = project_cashflows(&a);
    assert_eq!(flows[0].noi, dec!(66500.00));
    assert_eq!(flows[1].noi, dec!(68495.00));
    assert_eq!(flows[2].noi, dec!(70549.85));
}
