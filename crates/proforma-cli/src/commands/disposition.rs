use clap::Args;
use serde_json::{json, Value};

use proforma_core::disposition;
use proforma_core::income;

use crate::input;

/// Arguments for disposition analysis
#[derive(Args)]
pub struct DispositionArgs {
    /// Path to a JSON or YAML assumptions file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_disposition(args: DispositionArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let assumptions = input::read_assumptions(&args.input)?;
    let final_year = assumptions.hold_period_years.saturating_sub(1) as usize;
    let final_year_noi = income::compute_noi(&assumptions, final_year);
    let proceeds = disposition::compute_sale_proceeds(&assumptions, final_year_noi);
    Ok(json!({
        "final_year_noi": final_year_noi,
        "result": proceeds,
    }))
}
