use clap::Args;
use serde_json::{json, Value};

use proforma_core::financing;

use crate::input;

/// Arguments for loan sizing
#[derive(Args)]
pub struct SizeLoanArgs {
    /// Path to a JSON or YAML assumptions file
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to a JSON or YAML assumptions file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_size_loan(args: SizeLoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let assumptions = input::read_assumptions(&args.input)?;
    let loan_amount = financing::size_loan(&assumptions);
    let annual_debt_service = financing::annual_debt_service(&assumptions, loan_amount);
    Ok(json!({
        "financing_type": assumptions.financing_type,
        "loan_amount": loan_amount,
        "loan_costs": financing::loan_cost_amount(&assumptions, loan_amount),
        "annual_debt_service": annual_debt_service,
    }))
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let assumptions = input::read_assumptions(&args.input)?;
    let loan_amount = financing::size_loan(&assumptions);
    let schedule = financing::amortization_schedule(&assumptions, loan_amount);
    Ok(serde_json::to_value(schedule)?)
}
