use clap::Args;
use serde_json::{json, Value};

use proforma_core::income;

use crate::input;

/// Arguments for the NOI waterfall
#[derive(Args)]
pub struct NoiArgs {
    /// Path to a JSON or YAML assumptions file
    #[arg(long)]
    pub input: Option<String>,

    /// Display year (1-based); omit for every year of the hold
    #[arg(long)]
    pub year: Option<u32>,
}

pub fn run_noi(args: NoiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let assumptions = input::read_assumptions(&args.input)?;

    match args.year {
        Some(0) => Err("--year is 1-based; the first year of the hold is 1".into()),
        Some(year) => {
            let breakdown = income::compute_income_year(&assumptions, (year - 1) as usize);
            Ok(waterfall_row(year, &breakdown)?)
        }
        None => {
            let rows: Result<Vec<Value>, _> = (0..assumptions.hold_period_years)
                .map(|year| {
                    let breakdown = income::compute_income_year(&assumptions, year as usize);
                    waterfall_row(year + 1, &breakdown)
                })
                .collect();
            Ok(Value::Array(rows?))
        }
    }
}

fn waterfall_row(year: u32, breakdown: &income::IncomeYear) -> Result<Value, serde_json::Error> {
    let mut row = json!({ "year": year });
    let fields = serde_json::to_value(breakdown)?;
    if let (Value::Object(row_map), Value::Object(field_map)) = (&mut row, fields) {
        row_map.extend(field_map);
    }
    Ok(row)
}
