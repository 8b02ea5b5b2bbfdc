use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// How a cost field is expressed: percent of its reference amount, or
/// absolute dollars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostBasis {
    #[default]
    Percentage,
    Dollar,
}

/// Property class, which drives the default depreciation life.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    #[default]
    Residential,
    Commercial,
    Industrial,
}

impl PropertyType {
    /// IRS straight-line life: 27.5 years residential, 39 otherwise.
    pub fn default_depreciation_years(self) -> Decimal {
        match self {
            PropertyType::Residential => dec!(27.5),
            PropertyType::Commercial | PropertyType::Industrial => dec!(39),
        }
    }
}

/// How the loan principal is determined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinancingType {
    /// No debt
    #[default]
    Cash,
    /// Principal = target LTV% of purchase price
    Ltv,
    /// Principal sized so year-1 NOI / annual debt service = target DSCR
    Dscr,
}

/// How the sale price at disposition is determined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispositionPricing {
    /// Fixed dollar sale price
    Dollar,
    /// Sale price = final-year NOI / disposition cap rate
    #[default]
    CapRate,
}

// ---------------------------------------------------------------------------
// Assumptions record
// ---------------------------------------------------------------------------

/// Complete set of inputs for one proforma run. A plain value record: no
/// identity, immutable per calculation call, round-trips losslessly through
/// JSON.
///
/// Rate conventions, per field:
/// - `target_ltv`, `land_percentage`, `improvements_percentage`, and
///   percentage-basis cost fields are UI percent values (75 = 75%).
/// - `interest_rate`, `vacancy_rates`, `disposition_cap_rate`,
///   `cost_of_sale_percentage`, the tax rates, and `noi_growth_rate` are
///   fractions (0.065 = 6.5%).
/// - Percentage-basis `operating_expenses` entries are percent of effective
///   gross income (30 = 30% of EGI).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyAssumptions {
    // --- Acquisition ---
    pub purchase_price: Money,
    /// Percent of purchase price or dollar amount, per `acquisition_cost_basis`
    pub acquisition_costs: Decimal,
    pub acquisition_cost_basis: CostBasis,
    pub property_type: PropertyType,
    /// Percent of basis allocated to land (land + improvements = 100)
    pub land_percentage: Decimal,
    /// Percent of basis allocated to improvements (depreciable portion)
    pub improvements_percentage: Decimal,
    /// Straight-line depreciation life; 0 means "use the property-type default"
    pub depreciation_years: Decimal,
    /// Calendar month the property is placed in service (1–12)
    pub acquisition_month: u32,

    // --- Hold period ---
    pub hold_period_years: u32,

    // --- Income schedule (year-indexed, year 0 = first year of hold;
    //     missing entries read as zero) ---
    pub potential_rental_income: Vec<Money>,
    pub other_income: Vec<Money>,
    /// Vacancy fraction per year, applied to rental income only
    pub vacancy_rates: Vec<Rate>,
    /// Percent of EGI or dollar amount per year, per `operating_expense_basis`
    pub operating_expenses: Vec<Decimal>,
    pub operating_expense_basis: CostBasis,

    // --- Legacy flat income path, used only when the detailed arrays are
    //     unpopulated (potential_rental_income[0] not > 0) ---
    pub year1_noi: Money,
    pub noi_growth_rate: Rate,

    // --- Financing ---
    pub financing_type: FinancingType,
    /// Percent (75 = 75% of purchase price)
    pub target_ltv: Decimal,
    /// Coverage ratio (1.25 = 1.25x)
    pub target_dscr: Decimal,
    /// Annual rate as a fraction
    pub interest_rate: Rate,
    pub amortization_years: u32,
    pub loan_term_years: u32,
    /// 1, 2, 4, or 12
    pub payments_per_year: u32,
    /// Derived cache of the sized loan, not a source of truth for the
    /// `Ltv`/`Dscr` financing types. See `financing::refresh_loan_amount`.
    pub loan_amount: Money,
    /// Percent of loan or dollar amount, per `loan_cost_basis`
    pub loan_costs: Decimal,
    pub loan_cost_basis: CostBasis,

    // --- Disposition ---
    pub disposition_price_basis: DispositionPricing,
    pub disposition_price: Money,
    /// Fraction (0.05 = 5%)
    pub disposition_cap_rate: Rate,
    pub cost_of_sale_basis: CostBasis,
    /// Fraction of sale price (0.06 = 6%)
    pub cost_of_sale_percentage: Rate,
    pub cost_of_sale_amount: Money,

    // --- Tax (all fractions) ---
    pub ordinary_income_tax_rate: Rate,
    pub capital_gains_tax_rate: Rate,
    pub depreciation_recapture_rate: Rate,
}

impl Default for PropertyAssumptions {
    fn default() -> Self {
        PropertyAssumptions {
            purchase_price: Decimal::ZERO,
            acquisition_costs: Decimal::ZERO,
            acquisition_cost_basis: CostBasis::Percentage,
            property_type: PropertyType::Residential,
            land_percentage: dec!(20),
            improvements_percentage: dec!(80),
            depreciation_years: Decimal::ZERO,
            acquisition_month: 1,
            hold_period_years: 0,
            potential_rental_income: Vec::new(),
            other_income: Vec::new(),
            vacancy_rates: Vec::new(),
            operating_expenses: Vec::new(),
            operating_expense_basis: CostBasis::Percentage,
            year1_noi: Decimal::ZERO,
            noi_growth_rate: Decimal::ZERO,
            financing_type: FinancingType::Cash,
            target_ltv: Decimal::ZERO,
            target_dscr: Decimal::ZERO,
            interest_rate: Decimal::ZERO,
            amortization_years: 0,
            loan_term_years: 0,
            payments_per_year: 12,
            loan_amount: Decimal::ZERO,
            loan_costs: Decimal::ZERO,
            loan_cost_basis: CostBasis::Percentage,
            disposition_price_basis: DispositionPricing::CapRate,
            disposition_price: Decimal::ZERO,
            disposition_cap_rate: Decimal::ZERO,
            cost_of_sale_basis: CostBasis::Percentage,
            cost_of_sale_percentage: Decimal::ZERO,
            cost_of_sale_amount: Decimal::ZERO,
            ordinary_income_tax_rate: Decimal::ZERO,
            capital_gains_tax_rate: Decimal::ZERO,
            depreciation_recapture_rate: Decimal::ZERO,
        }
    }
}

impl PropertyAssumptions {
    /// Rental income for a year; unset entries are zero.
    pub fn rental_income_in(&self, year: usize) -> Money {
        entry_or_zero(&self.potential_rental_income, year)
    }

    /// Other (non-rental) income for a year; unset entries are zero.
    pub fn other_income_in(&self, year: usize) -> Money {
        entry_or_zero(&self.other_income, year)
    }

    /// Vacancy fraction for a year; unset entries are zero.
    pub fn vacancy_rate_in(&self, year: usize) -> Rate {
        entry_or_zero(&self.vacancy_rates, year)
    }

    /// Operating expense entry for a year; unset entries are zero.
    pub fn operating_expense_in(&self, year: usize) -> Decimal {
        entry_or_zero(&self.operating_expenses, year)
    }

    /// Whether the detailed per-year income arrays drive NOI. When false,
    /// the legacy `year1_noi` growth path applies.
    pub fn uses_detailed_income(&self) -> bool {
        self.rental_income_in(0) > Decimal::ZERO
    }

    /// Depreciation life, falling back to the property-type default.
    pub fn depreciation_life_years(&self) -> Decimal {
        if self.depreciation_years > Decimal::ZERO {
            self.depreciation_years
        } else {
            self.property_type.default_depreciation_years()
        }
    }

    /// Acquisition costs resolved to dollars.
    pub fn acquisition_cost_amount(&self) -> Money {
        match self.acquisition_cost_basis {
            CostBasis::Percentage => self.purchase_price * self.acquisition_costs / dec!(100),
            CostBasis::Dollar => self.acquisition_costs,
        }
    }
}

/// Year-indexed sequences are conceptually infinite, truncated to the hold
/// period; anything past the populated prefix reads as zero.
fn entry_or_zero(seq: &[Decimal], year: usize) -> Decimal {
    seq.get(year).copied().unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_defaulting() {
        let a = PropertyAssumptions {
            potential_rental_income: vec![dec!(100000), dec!(103000)],
            ..Default::default()
        };
        assert_eq!(a.rental_income_in(1), dec!(103000));
        assert_eq!(a.rental_income_in(5), Decimal::ZERO);
        assert_eq!(a.vacancy_rate_in(0), Decimal::ZERO);
    }

    #[test]
    fn test_depreciation_life_defaults() {
        let mut a = PropertyAssumptions::default();
        assert_eq!(a.depreciation_life_years(), dec!(27.5));

        a.property_type = PropertyType::Commercial;
        assert_eq!(a.depreciation_life_years(), dec!(39));

        a.depreciation_years = dec!(15);
        assert_eq!(a.depreciation_life_years(), dec!(15));
    }

    #[test]
    fn test_acquisition_cost_bases() {
        let mut a = PropertyAssumptions {
            purchase_price: dec!(1000000),
            acquisition_costs: dec!(2),
            ..Default::default()
        };
        assert_eq!(a.acquisition_cost_amount(), dec!(20000));

        a.acquisition_cost_basis = CostBasis::Dollar;
        a.acquisition_costs = dec!(15000);
        assert_eq!(a.acquisition_cost_amount(), dec!(15000));
    }

    #[test]
    fn test_json_round_trip() {
        let a = PropertyAssumptions {
            purchase_price: dec!(750000),
            financing_type: FinancingType::Dscr,
            disposition_price_basis: DispositionPricing::CapRate,
            potential_rental_income: vec![dec!(90000)],
            ..Default::default()
        };
        let json = serde_json::to_string(&a).unwrap();
        let back: PropertyAssumptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back.purchase_price, a.purchase_price);
        assert_eq!(back.financing_type, FinancingType::Dscr);
        assert_eq!(back.rental_income_in(0), dec!(90000));
    }
}
