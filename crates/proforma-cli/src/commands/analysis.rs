use clap::Args;
use serde_json::{json, Value};

use proforma_core::analysis;
use proforma_core::validation;

use crate::input;

/// Arguments for the full proforma run
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to a JSON or YAML assumptions file
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for validation-only checks
#[derive(Args)]
pub struct ValidateArgs {
    /// Path to a JSON or YAML assumptions file
    #[arg(long)]
    pub input: Option<String>,

    /// Hold-period cap to enforce (some input surfaces cap at 10, others 30)
    #[arg(long)]
    pub hold_period_cap: Option<u32>,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let assumptions = input::read_assumptions(&args.input)?;
    let result = analysis::run_proforma(&assumptions);
    Ok(serde_json::to_value(result)?)
}

pub fn run_validate(args: ValidateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let assumptions = input::read_assumptions(&args.input)?;
    let errors = match args.hold_period_cap {
        Some(cap) => validation::validate_assumptions_with_cap(&assumptions, cap),
        None => validation::validate_assumptions(&assumptions),
    };
    Ok(json!({
        "valid": errors.is_empty(),
        "errors": errors,
    }))
}
