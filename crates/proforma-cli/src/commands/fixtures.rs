use clap::Args;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use proforma_core::assumptions::{
    CostBasis, DispositionPricing, FinancingType, PropertyAssumptions, PropertyType,
};

/// Arguments for printing canned assumptions fixtures
#[derive(Args)]
pub struct FixtureArgs {
    /// Fixture name; omit to list the available fixtures
    pub name: Option<String>,
}

pub fn run_fixture(args: FixtureArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let name = match args.name {
        Some(name) => name,
        None => {
            return Ok(json!({
                "fixtures": FIXTURE_NAMES,
                "usage": "proforma fixture <name> | proforma analyze",
            }))
        }
    };

    let assumptions = match name.as_str() {
        "stabilized-multifamily" => stabilized_multifamily(),
        "value-add-office" => value_add_office(),
        "all-cash-retail" => all_cash_retail(),
        other => {
            return Err(format!(
                "Unknown fixture '{other}'. Available: {}",
                FIXTURE_NAMES.join(", ")
            )
            .into())
        }
    };

    Ok(serde_json::to_value(assumptions)?)
}

const FIXTURE_NAMES: [&str; 3] = [
    "stabilized-multifamily",
    "value-add-office",
    "all-cash-retail",
];

/// $1M 10-unit building, 75% LTV, flat 3% rent growth, cap-rate exit.
fn stabilized_multifamily() -> PropertyAssumptions {
    PropertyAssumptions {
        purchase_price: dec!(1000000),
        acquisition_costs: dec!(2),
        property_type: PropertyType::Residential,
        land_percentage: dec!(20),
        improvements_percentage: dec!(80),
        acquisition_month: 1,
        hold_period_years: 5,
        potential_rental_income: vec![
            dec!(100000),
            dec!(103000),
            dec!(106090),
            dec!(109272.70),
            dec!(112550.88),
        ],
        other_income: vec![dec!(6000); 5],
        vacancy_rates: vec![dec!(0.05); 5],
        operating_expenses: vec![dec!(35); 5],
        operating_expense_basis: CostBasis::Percentage,
        financing_type: FinancingType::Ltv,
        target_ltv: dec!(75),
        interest_rate: dec!(0.065),
        amortization_years: 30,
        loan_term_years: 30,
        payments_per_year: 12,
        loan_costs: dec!(1),
        disposition_price_basis: DispositionPricing::CapRate,
        disposition_cap_rate: dec!(0.055),
        cost_of_sale_basis: CostBasis::Percentage,
        cost_of_sale_percentage: dec!(0.06),
        ordinary_income_tax_rate: dec!(0.32),
        capital_gains_tax_rate: dec!(0.20),
        depreciation_recapture_rate: dec!(0.25),
        ..Default::default()
    }
}

/// Suburban office reposition: DSCR-sized debt, dollar expenses that step
/// down as the asset stabilizes, 7-year hold.
fn value_add_office() -> PropertyAssumptions {
    PropertyAssumptions {
        purchase_price: dec!(4250000),
        acquisition_costs: dec!(110000),
        acquisition_cost_basis: CostBasis::Dollar,
        property_type: PropertyType::Commercial,
        land_percentage: dec!(25),
        improvements_percentage: dec!(75),
        acquisition_month: 7,
        hold_period_years: 7,
        potential_rental_income: vec![
            dec!(420000),
            dec!(455000),
            dec!(510000),
            dec!(525300),
            dec!(541059),
            dec!(557290.77),
            dec!(574009.49),
        ],
        other_income: vec![dec!(18000); 7],
        vacancy_rates: vec![
            dec!(0.18),
            dec!(0.12),
            dec!(0.08),
            dec!(0.07),
            dec!(0.07),
            dec!(0.07),
            dec!(0.07),
        ],
        operating_expenses: vec![
            dec!(182000),
            dec!(176000),
            dec!(171000),
            dec!(174420),
            dec!(177908.40),
            dec!(181466.57),
            dec!(185095.90),
        ],
        operating_expense_basis: CostBasis::Dollar,
        financing_type: FinancingType::Dscr,
        target_dscr: dec!(1.25),
        interest_rate: dec!(0.0575),
        amortization_years: 25,
        loan_term_years: 10,
        payments_per_year: 12,
        loan_costs: dec!(1.5),
        disposition_price_basis: DispositionPricing::CapRate,
        disposition_cap_rate: dec!(0.0675),
        cost_of_sale_basis: CostBasis::Percentage,
        cost_of_sale_percentage: dec!(0.04),
        ordinary_income_tax_rate: dec!(0.35),
        capital_gains_tax_rate: dec!(0.20),
        depreciation_recapture_rate: dec!(0.25),
        ..Default::default()
    }
}

/// Single-tenant retail bought for cash with a negotiated exit price.
fn all_cash_retail() -> PropertyAssumptions {
    PropertyAssumptions {
        purchase_price: dec!(1850000),
        acquisition_costs: dec!(1.5),
        property_type: PropertyType::Commercial,
        land_percentage: dec!(30),
        improvements_percentage: dec!(70),
        acquisition_month: 3,
        hold_period_years: 10,
        potential_rental_income: vec![dec!(148000); 10],
        vacancy_rates: vec![dec!(0.03); 10],
        operating_expenses: vec![dec!(12); 10],
        operating_expense_basis: CostBasis::Percentage,
        financing_type: FinancingType::Cash,
        disposition_price_basis: DispositionPricing::Dollar,
        disposition_price: dec!(2300000),
        cost_of_sale_basis: CostBasis::Dollar,
        cost_of_sale_amount: dec!(69000),
        ordinary_income_tax_rate: dec!(0.32),
        capital_gains_tax_rate: dec!(0.15),
        depreciation_recapture_rate: dec!(0.25),
        ..Default::default()
    }
}
