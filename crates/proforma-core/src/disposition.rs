use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assumptions::{CostBasis, DispositionPricing, PropertyAssumptions};
use crate::financing;
use crate::types::Money;

/// Sale and tax outcome at the end of the hold.
///
/// `sale_price` is `None` when the price cannot be determined (cap-rate
/// disposition with a zero cap rate); every downstream field is zero in that
/// case rather than infinite or an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleProceeds {
    pub sale_price: Option<Money>,
    pub cost_of_sale: Money,
    /// Outstanding loan balance repaid at closing
    pub loan_payoff: Money,
    /// Sale price − cost of sale − loan payoff
    pub net_sale_proceeds: Money,
    pub accumulated_depreciation: Money,
    /// Purchase price + acquisition costs − accumulated depreciation
    pub adjusted_basis: Money,
    /// Sale price − cost of sale − adjusted basis (may be negative)
    pub total_gain: Money,
    pub depreciation_recapture_tax: Money,
    pub capital_gains_tax: Money,
    pub after_tax_proceeds: Money,
}

/// Compute sale price, cost of sale, and after-tax proceeds at disposition.
///
/// Gain is split the standard U.S. way: the portion up to accumulated
/// depreciation is taxed at the recapture rate, the remainder at the
/// capital-gains rate. No tax applies to a non-positive gain.
pub fn compute_sale_proceeds(
    assumptions: &PropertyAssumptions,
    final_year_noi: Money,
) -> SaleProceeds {
    let sale_price = match assumptions.disposition_price_basis {
        DispositionPricing::Dollar => Some(assumptions.disposition_price),
        DispositionPricing::CapRate => {
            if assumptions.disposition_cap_rate > Decimal::ZERO {
                Some(final_year_noi / assumptions.disposition_cap_rate)
            } else {
                None
            }
        }
    };

    let sale_price_value = match sale_price {
        Some(value) => value,
        None => return SaleProceeds::default(),
    };

    let cost_of_sale = match assumptions.cost_of_sale_basis {
        CostBasis::Percentage => sale_price_value * assumptions.cost_of_sale_percentage,
        CostBasis::Dollar => assumptions.cost_of_sale_amount,
    };

    let loan_amount = financing::size_loan(assumptions);
    let loan_payoff = financing::loan_balance_after_years(
        assumptions,
        loan_amount,
        assumptions.hold_period_years,
    );

    let accumulated = accumulated_depreciation(assumptions);
    let total_cost_basis = assumptions.purchase_price + assumptions.acquisition_cost_amount();
    let adjusted_basis = total_cost_basis - accumulated;
    let total_gain = sale_price_value - cost_of_sale - adjusted_basis;

    let (depreciation_recapture_tax, capital_gains_tax) = if total_gain > Decimal::ZERO {
        let recapture_base = total_gain.min(accumulated);
        (
            recapture_base * assumptions.depreciation_recapture_rate,
            (total_gain - recapture_base) * assumptions.capital_gains_tax_rate,
        )
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    let net_sale_proceeds = sale_price_value - cost_of_sale - loan_payoff;

    SaleProceeds {
        sale_price,
        cost_of_sale,
        loan_payoff,
        net_sale_proceeds,
        accumulated_depreciation: accumulated,
        adjusted_basis,
        total_gain,
        depreciation_recapture_tax,
        capital_gains_tax,
        after_tax_proceeds: net_sale_proceeds - depreciation_recapture_tax - capital_gains_tax,
    }
}

/// Straight-line depreciation claimed over the hold period, capped at the
/// depreciable (improvements) basis. The first calendar year is prorated by
/// the mid-month convention from `acquisition_month`.
pub fn accumulated_depreciation(assumptions: &PropertyAssumptions) -> Money {
    if assumptions.hold_period_years == 0 {
        return Decimal::ZERO;
    }

    let life = assumptions.depreciation_life_years();
    if life <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let total_cost_basis = assumptions.purchase_price + assumptions.acquisition_cost_amount();
    let depreciable_basis = total_cost_basis * assumptions.improvements_percentage / dec!(100);
    let annual_charge = depreciable_basis / life;

    let month = Decimal::from(assumptions.acquisition_month.clamp(1, 12));
    let first_year_fraction = (dec!(12.5) - month) / dec!(12);

    let years_in_service = first_year_fraction + Decimal::from(assumptions.hold_period_years - 1);
    (annual_charge * years_in_service).min(depreciable_basis)
}
